//! Project path functions - single source of truth for file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//! - `COURSES_PATH`: Override the catalog file outright (see config.rs)

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// Course catalog with topics and their quizzes
pub fn courses_path() -> String {
    format!("{}/courses.json", data_dir())
}

/// Optional TOML configuration file, relative to the working directory
pub const CONFIG_FILE: &str = "config.toml";
