//! Course catalog: classes, their topics, and each topic's quiz.
//!
//! Loaded once at startup from `courses.json`, keyed by normalised class key:
//!
//! ```json
//! {
//!   "class_7": [
//!     {"id": 1, "title": "Fractions", "video": "...", "quiz": [
//!       {"question": "1/2 + 1/2?", "options": ["1", "2"], "answer": "1"}
//!     ]}
//!   ]
//! }
//! ```
//!
//! Quiz records are kept as raw JSON; checking them against the question
//! contract is the consumer's job.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A curriculum topic belonging to one class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    /// Empty when the course data leaves it out
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<Vec<Value>>,
    /// Video links and anything else the course data carries
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Error loading the catalog.
#[derive(Debug)]
pub enum CatalogError {
    IoError(String),
    ParseError(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::IoError(e) => write!(f, "IO error: {}", e),
            CatalogError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    classes: HashMap<String, Vec<Topic>>,
}

impl Catalog {
    /// Load the catalog from disk.
    ///
    /// A missing file yields an empty catalog; every lookup then reports "not found".
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            tracing::warn!("Course data not found at {}, serving an empty catalog", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| CatalogError::IoError(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::from_json(&content)
            .map_err(|e| CatalogError::ParseError(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            "Loaded {} classes with {} topics from {}",
            catalog.class_count(),
            catalog.topic_count(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, Vec<Topic>> = serde_json::from_str(content)?;
        let classes = raw
            .into_iter()
            .map(|(key, topics)| (class_key(&key), topics))
            .collect();
        Ok(Self { classes })
    }

    /// Topics of a class, looked up by any spelling of its id ("Class 7", "class_7")
    pub fn topics(&self, class_id: &str) -> Option<&[Topic]> {
        self.classes.get(&class_key(class_id)).map(Vec::as_slice)
    }

    pub fn topic(&self, class_id: &str, topic_id: i64) -> Option<&Topic> {
        self.topics(class_id)?.iter().find(|t| t.id == topic_id)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn topic_count(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }
}

/// Normalise a class id to its catalog key: lowercase, spaces become underscores.
pub fn class_key(class_id: &str) -> String {
    class_id.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "Class 7": [
            {
                "id": 1,
                "title": "Fractions",
                "video": "https://example.com/fractions",
                "quiz": [
                    {"question": "1/2 + 1/2?", "options": ["1", "2"], "answer": "1"}
                ]
            },
            {"id": 2, "title": "Decimals"}
        ],
        "class_8": []
    }"#;

    #[test]
    fn test_class_key() {
        assert_eq!(class_key("Class 7"), "class_7");
        assert_eq!(class_key("class_7"), "class_7");
        assert_eq!(class_key(" CLASS 10 "), "class_10");
    }

    #[test]
    fn test_from_json_normalises_keys() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.class_count(), 2);
        assert_eq!(catalog.topic_count(), 2);
        assert_eq!(catalog.topics("class_7").map(|t| t.len()), Some(2));
        assert_eq!(catalog.topics("Class 7").map(|t| t.len()), Some(2));
        assert!(catalog.topics("class_9").is_none());
    }

    #[test]
    fn test_topic_lookup() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        let topic = catalog.topic("class_7", 1).unwrap();
        assert_eq!(topic.title, "Fractions");
        assert_eq!(topic.quiz.as_ref().map(|q| q.len()), Some(1));
        assert_eq!(topic.extra.get("video").and_then(Value::as_str), Some("https://example.com/fractions"));

        assert!(catalog.topic("class_7", 2).unwrap().quiz.is_none());
        assert!(catalog.topic("class_7", 3).is_none());
    }

    #[test]
    fn test_topic_without_title_still_loads() {
        let catalog = Catalog::from_json(
            r#"{"class_7": [
                {"id": 1, "quiz": [{"question": "q", "options": ["a", "b"], "answer": "a"}]},
                {"id": 2, "title": "Decimals"}
            ]}"#,
        )
        .unwrap();
        let topic = catalog.topic("class_7", 1).unwrap();
        assert_eq!(topic.title, "");
        assert_eq!(topic.quiz.as_ref().map(|q| q.len()), Some(1));
        assert_eq!(catalog.topic("class_7", 2).unwrap().title, "Decimals");
    }

    #[test]
    fn test_topic_serialises_extra_fields_back() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        let json = serde_json::to_value(catalog.topic("class_7", 1).unwrap()).unwrap();
        assert_eq!(json["video"], "https://example.com/fractions");
        assert_eq!(json["id"], 1);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let catalog = Catalog::load(&temp.path().join("missing.json")).unwrap();
        assert_eq!(catalog.class_count(), 0);
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("courses.json");
        fs::write(&path, SAMPLE).unwrap();
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.topic_count(), 2);
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("courses.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::ParseError(_)));
    }
}
