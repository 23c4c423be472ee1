//! Application state shared by all handlers.

use axum::extract::FromRef;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::gateway::QuizGateway;
use crate::session::QuizSessionStore;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Course data served by the quiz backend routes
    pub catalog: Arc<Catalog>,

    /// Client for the quiz backend the view pages read from
    pub gateway: QuizGateway,

    /// One quiz state machine per viewer
    pub sessions: Arc<QuizSessionStore>,
}

impl AppState {
    pub fn new(catalog: Catalog, gateway: QuizGateway) -> Self {
        Self {
            catalog: Arc::new(catalog),
            gateway,
            sessions: Arc::new(QuizSessionStore::new()),
        }
    }
}

impl FromRef<AppState> for Arc<Catalog> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.catalog)
    }
}
