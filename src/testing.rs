//! Test utilities: a real quiz backend on an ephemeral port.
//!
//! The gateway speaks HTTP, so its tests run against an actual listener
//! instead of a mock. The catalog fixture is written to a temporary directory
//! and loaded through the same `Catalog::load` path production uses.

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::catalog::Catalog;
use crate::gateway::{QUIZ_ENDPOINT_PATH, QuizGateway};
use crate::handlers::catalog_routes;
use crate::state::AppState;
use crate::wire::QuizResponseBody;

/// Course data used across tests.
///
/// - class_7/1: three valid questions
/// - class_7/2: two valid questions
/// - class_7/3: empty quiz
/// - class_7/4: topic without a quiz
/// - class_8/1: answer that is not among the options
pub const FIXTURE_COURSES: &str = r#"{
  "class_7": [
    {
      "id": 1,
      "title": "Fractions",
      "video": "https://videos.example.com/fractions",
      "quiz": [
        {"question": "What is one half plus one quarter?", "options": ["1/4", "3/4", "1/2"], "answer": "3/4"},
        {"question": "Which decimal equals one half?", "options": ["0.2", "0.5", "0.25"], "answer": "0.5"},
        {"question": "Which fraction is largest?", "options": ["1/3", "2/3", "1/6"], "answer": "2/3"}
      ]
    },
    {
      "id": 2,
      "title": "Geography",
      "video": "https://videos.example.com/geography",
      "quiz": [
        {"question": "Capital of France?", "options": ["Paris", "Rome", "Madrid"], "answer": "Paris"},
        {"question": "Which planet is known as the Red Planet?", "options": ["Venus", "Mars"], "answer": "Mars"}
      ]
    },
    {"id": 3, "title": "Decimals", "video": "https://videos.example.com/decimals", "quiz": []},
    {"id": 4, "title": "Revision", "video": "https://videos.example.com/revision"}
  ],
  "class_8": [
    {
      "id": 1,
      "title": "Algebra",
      "quiz": [
        {"question": "Solve x + 1 = 3", "options": ["1", "3"], "answer": "2"}
      ]
    }
  ]
}"#;

/// A quiz backend listening on 127.0.0.1 for the lifetime of the value.
pub struct TestBackend {
  /// Temporary directory (kept alive for the catalog file)
  pub temp: TempDir,
  /// Base URL, e.g. `http://127.0.0.1:41234`
  pub base_url: String,
  catalog: Catalog,
  server: JoinHandle<()>,
}

impl TestBackend {
  /// Backend serving the fixture catalog through the real catalog routes.
  pub async fn spawn() -> Self {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("courses.json");
    std::fs::write(&path, FIXTURE_COURSES).expect("write fixture");
    let catalog = Catalog::load(&path).expect("load fixture catalog");

    let router = catalog_routes().with_state(Arc::new(catalog.clone()));
    Self::serve(temp, catalog, router).await
  }

  /// Backend whose quiz endpoint always answers HTTP 500.
  pub async fn spawn_failing() -> Self {
    let router = Router::new().route(
      QUIZ_ENDPOINT_PATH,
      post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    Self::serve_empty(router).await
  }

  /// Backend whose quiz endpoint answers 200 with a body that is not JSON.
  pub async fn spawn_garbage() -> Self {
    let router = Router::new().route(
      QUIZ_ENDPOINT_PATH,
      post(|| async { "<html>maintenance</html>" }),
    );
    Self::serve_empty(router).await
  }

  /// Backend whose quiz endpoint always answers 200 with `body` as JSON.
  pub async fn spawn_json(body: Value) -> Self {
    let router = Router::new().route(
      QUIZ_ENDPOINT_PATH,
      post(move || {
        let body = body.clone();
        async move { Json(body) }
      }),
    );
    Self::serve_empty(router).await
  }

  /// Backend whose quiz endpoint takes `delay` before answering.
  pub async fn spawn_slow(delay: Duration) -> Self {
    let router = Router::new().route(
      QUIZ_ENDPOINT_PATH,
      post(move || async move {
        tokio::time::sleep(delay).await;
        Json(QuizResponseBody::error("too late"))
      }),
    );
    Self::serve_empty(router).await
  }

  /// URL of a port nothing listens on.
  pub async fn unused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
  }

  async fn serve_empty(router: Router) -> Self {
    let temp = TempDir::new().expect("create temp dir");
    Self::serve(temp, Catalog::default(), router).await
  }

  async fn serve(temp: TempDir, catalog: Catalog, router: Router) -> Self {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let server = tokio::spawn(async move {
      let _ = axum::serve(listener, router).await;
    });

    Self {
      temp,
      base_url: format!("http://{}", addr),
      catalog,
      server,
    }
  }

  pub fn gateway(&self, timeout: Duration) -> QuizGateway {
    QuizGateway::new(&self.base_url, timeout).expect("build gateway")
  }

  /// App state whose gateway reads from this backend.
  pub fn app_state(&self, timeout: Duration) -> AppState {
    AppState::new(self.catalog.clone(), self.gateway(timeout))
  }
}

impl Drop for TestBackend {
  fn drop(&mut self) {
    self.server.abort();
  }
}
