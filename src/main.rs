use std::error::Error;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_quiz::catalog::Catalog;
use course_quiz::config::AppConfig;
use course_quiz::gateway::QuizGateway;
use course_quiz::handlers;
use course_quiz::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "course_quiz=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = AppConfig::load();
  tracing::debug!("Resolved configuration: {:?}", config);

  let catalog = Catalog::load(&config.courses_path).inspect_err(|e| {
    tracing::error!("Failed to load course data: {}", e);
  })?;

  let gateway = QuizGateway::from_config(&config).inspect_err(|e| {
    tracing::error!("Failed to build quiz client: {}", e);
  })?;
  tracing::info!(
    "Quiz pages read from {} (timeout {:?})",
    gateway.endpoint(),
    config.fetch_timeout
  );

  let app = handlers::app(AppState::new(catalog, gateway));

  let bind_addr = config.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .inspect_err(|e| tracing::error!("Failed to bind to {}: {}", bind_addr, e))?;

  tracing::info!("Server running on http://localhost:{}", config.server_port);

  axum::serve(listener, app).await?;
  Ok(())
}
