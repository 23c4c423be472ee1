//! JSON bodies exchanged with the course-quiz endpoint.
//!
//! Shared by the catalog (which serves them) and the gateway (which consumes
//! them), so both sides agree on field names.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status string the backend uses for a successful lookup.
pub const STATUS_SUCCESS: &str = "success";

/// Status string the backend uses for a failed lookup.
pub const STATUS_ERROR: &str = "error";

/// Body of `POST /get-course-quiz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequestBody {
    pub class_id: String,
    pub topic_id: i64,
}

/// A question record as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// Response of `POST /get-course-quiz` as the catalog serves it.
///
/// The gateway does not decode into this type: it reads replies as loose
/// JSON, since any reply that is not a success with questions counts as
/// "no questions" whatever its shape. Questions stay raw JSON so a malformed
/// catalog record reaches the gateway as-is.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResponseBody {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl QuizResponseBody {
    pub fn success(title: &str, questions: Vec<Value>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            title: Some(title.to_string()),
            questions: Some(questions),
            message: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            title: None,
            questions: None,
            message: Some(message.to_string()),
        }
    }
}
