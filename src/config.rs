//! Application configuration.
//!
//! Runtime settings resolve with priority: config.toml > environment
//! (including .env) > defaults. Values that never change at runtime are
//! plain constants below.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logging::LogOnError;
use crate::paths;

// ==================== Server Configuration ====================

/// Default address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port
pub const SERVER_PORT: u16 = 8001;

// ==================== Quiz Gateway Configuration ====================

/// Default quiz backend; the catalog routes of this same server
pub const DEFAULT_QUIZ_API_URL: &str = "http://127.0.0.1:8001";

/// Upper bound on a single quiz fetch before it counts as a connection failure
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

// ==================== Session Configuration ====================

/// Viewer session expiration time in hours of inactivity
pub const SESSION_EXPIRY_HOURS: i64 = 1;

/// Probability threshold for session cleanup (0-255, lower = less frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

/// Cookie carrying the viewer id
pub const VIEWER_COOKIE_NAME: &str = "quiz_viewer";

// ==================== File Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server: Option<ServerSection>,
    quiz: Option<QuizSection>,
    catalog: Option<CatalogSection>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    addr: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct QuizSection {
    api_url: Option<String>,
    fetch_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogSection {
    path: Option<String>,
}

/// Resolved runtime configuration, passed explicitly to whoever needs it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_addr: String,
    pub server_port: u16,
    /// Base URL of the course-quiz backend (no trailing slash)
    pub quiz_api_url: String,
    pub fetch_timeout: Duration,
    pub courses_path: PathBuf,
}

impl AppConfig {
    /// Load configuration from config.toml, .env and the process environment.
    pub fn load() -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let file = read_file_config(Path::new(paths::CONFIG_FILE));
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let server = file.server.unwrap_or_default();
        let quiz = file.quiz.unwrap_or_default();
        let catalog = file.catalog.unwrap_or_default();

        let server_addr = server
            .addr
            .or_else(|| env("SERVER_ADDR"))
            .unwrap_or_else(|| SERVER_ADDR.to_string());

        let server_port = server
            .port
            .or_else(|| parse_env(&env, "PORT"))
            .unwrap_or(SERVER_PORT);

        let quiz_api_url = quiz
            .api_url
            .or_else(|| env("QUIZ_API_URL"))
            .unwrap_or_else(|| DEFAULT_QUIZ_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = quiz
            .fetch_timeout_secs
            .or_else(|| parse_env(&env, "QUIZ_FETCH_TIMEOUT_SECS"))
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);

        let courses_path = catalog
            .path
            .or_else(|| env("COURSES_PATH"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(paths::courses_path()));

        Self {
            server_addr,
            server_port,
            quiz_api_url,
            fetch_timeout: Duration::from_secs(timeout_secs),
            courses_path,
        }
    }

    /// Get the full server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_addr, self.server_port)
    }
}

fn read_file_config(path: &Path) -> FileConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => return FileConfig::default(),
    };

    toml::from_str::<FileConfig>(&contents)
        .inspect(|_| tracing::info!("Using configuration from {}", path.display()))
        .log_warn_default(&format!("Ignoring malformed {}", path.display()))
}

fn parse_env<T>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env(key)?;
    raw.trim()
        .parse()
        .log_warn(&format!("Ignoring invalid {}={:?}", key, raw))
}
