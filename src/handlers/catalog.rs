//! Quiz backend routes: topic quizzes and class data, served from the catalog.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::wire::{QuizRequestBody, QuizResponseBody, STATUS_ERROR, STATUS_SUCCESS};

/// POST /get-course-quiz
pub async fn course_quiz(
    State(catalog): State<Arc<Catalog>>,
    Json(req): Json<QuizRequestBody>,
) -> Json<QuizResponseBody> {
    let found = catalog
        .topic(&req.class_id, req.topic_id)
        .and_then(|topic| topic.quiz.as_ref().map(|quiz| (topic, quiz)));

    match found {
        Some((topic, quiz)) => {
            tracing::debug!(
                "Serving {} quiz records for {}/{}",
                quiz.len(),
                req.class_id,
                req.topic_id
            );
            Json(QuizResponseBody::success(&topic.title, quiz.clone()))
        }
        None => {
            tracing::debug!("No quiz for {}/{}", req.class_id, req.topic_id);
            Json(QuizResponseBody::error("Quiz not found."))
        }
    }
}

/// GET /get-class-data/{class_id}
pub async fn class_data(
    State(catalog): State<Arc<Catalog>>,
    Path(class_id): Path<String>,
) -> Json<Value> {
    match catalog.topics(&class_id) {
        Some(topics) => Json(json!({
            "status": STATUS_SUCCESS,
            "class": class_id,
            "videos": topics,
        })),
        None => Json(json!({
            "status": STATUS_ERROR,
            "message": "Class not found.",
        })),
    }
}
