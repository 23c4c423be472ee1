//! Quiz data gateway: fetches one topic's question set from the quiz backend.
//!
//! Every failure is mapped onto [`QuizError`]:
//!
//! | What happened                                  | Error         |
//! |------------------------------------------------|---------------|
//! | network failure or timeout                     | `Connection`  |
//! | non-2xx HTTP status                            | `Connection`  |
//! | body is not JSON                               | `Connection`  |
//! | any JSON without `"status": "success"`         | `NoQuestions` |
//! | `questions` missing, empty or not a list       | `NoQuestions` |
//! | a question record breaks the question contract | `Validation`  |
//!
//! The gateway never touches session state; callers apply the result.

use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::AppConfig;
use crate::domain::{Question, QuizError, QuizRequest, QuizSet};
use crate::wire::{STATUS_SUCCESS, WireQuestion};

/// Path of the quiz endpoint, relative to the backend base URL
pub const QUIZ_ENDPOINT_PATH: &str = "/get-course-quiz";

#[derive(Debug, Clone)]
pub struct QuizGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl QuizGateway {
    /// Gateway for the backend at `api_url`; every request is bounded by `timeout`.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let endpoint = format!("{}{}", api_url.trim_end_matches('/'), QUIZ_ENDPOINT_PATH);
        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        Self::new(&config.quiz_api_url, config.fetch_timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue one request for the topic's question set.
    pub async fn fetch_quiz_set(&self, request: &QuizRequest) -> Result<QuizSet, QuizError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request.to_body())
            .send()
            .await
            .map_err(|e| {
                let err = QuizError::Connection;
                tracing::warn!(
                    "Quiz request to {} failed [{}]: {}",
                    self.endpoint,
                    err.as_str(),
                    e
                );
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Quiz backend returned HTTP {} for {}", status, self.endpoint);
            return Err(QuizError::Connection);
        }

        // Only a body that is not JSON at all counts as a transport failure
        let body: Value = response.json().await.map_err(|e| {
            tracing::warn!("Unreadable quiz response from {}: {}", self.endpoint, e);
            QuizError::Connection
        })?;

        let result = parse_quiz_set(&body);
        match &result {
            Ok(set) => tracing::info!(
                "Fetched {} questions for {}/{}",
                set.len(),
                request.class_id(),
                request.topic_id()
            ),
            Err(e) => tracing::info!(
                "No usable quiz for {}/{} [{}]: {}",
                request.class_id(),
                request.topic_id(),
                e.as_str(),
                e
            ),
        }
        result
    }
}

/// Turn a JSON response body into a validated question set.
///
/// The body may have any shape; whatever is not a success with a non-empty
/// question list is "no questions".
pub fn parse_quiz_set(body: &Value) -> Result<QuizSet, QuizError> {
    if body.get("status").and_then(Value::as_str) != Some(STATUS_SUCCESS) {
        return Err(QuizError::NoQuestions);
    }

    let records = match body.get("questions").and_then(Value::as_array) {
        Some(records) if !records.is_empty() => records,
        _ => return Err(QuizError::NoQuestions),
    };

    let questions = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let wire = WireQuestion::deserialize(record).map_err(|e| {
                QuizError::Validation(format!("question {} is malformed: {}", i + 1, e))
            })?;
            Question::try_from(wire)
        })
        .collect::<Result<Vec<_>, _>>()?;

    QuizSet::new(questions)
}
