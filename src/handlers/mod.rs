pub mod catalog;
pub mod quiz;

use axum::extract::FromRef;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::catalog::Catalog;
use crate::gateway::QUIZ_ENDPOINT_PATH;
use crate::state::AppState;

pub use catalog::{class_data, course_quiz};
pub use quiz::{quiz_page, restart_quiz, submit_answer};

/// Quiz backend routes. Usable with any state that can hand out the catalog.
pub fn catalog_routes<S>() -> Router<S>
where
  S: Clone + Send + Sync + 'static,
  Arc<Catalog>: FromRef<S>,
{
  Router::new()
    .route(QUIZ_ENDPOINT_PATH, post(course_quiz))
    .route("/get-class-data/{class_id}", get(class_data))
}

/// Liveness probe
pub async fn health() -> &'static str {
  "ok"
}

/// Full application router: backend routes, quiz pages and request tracing.
pub fn app(state: AppState) -> Router {
  Router::new()
    .merge(catalog_routes::<AppState>())
    .route("/quiz/{class_id}/{topic_id}", get(quiz_page))
    .route("/quiz/{class_id}/{topic_id}/answer", post(submit_answer))
    .route("/quiz/{class_id}/{topic_id}/restart", post(restart_quiz))
    .route("/health", get(health))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
