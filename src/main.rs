use anyhow::Context;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use dotenvy::dotenv;

use create_cause_api::app::create_app;
use create_cause_api::config::Config;
use create_cause_api::db::pool::{create_pool, run_migrations};
use create_cause_api::state::SharedAppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  let config = Config::from_env()?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.environment.default_log_filter())),
    )
    .init();

  let pool = create_pool(&config)
    .await
    .context("Failed to create database pool")?;

  run_migrations(&pool).await?;

  tracing::info!("Database migrations applied successfully");

  let app_state = SharedAppState::new(pool.clone());
  let app = create_app(app_state);

  let listener = tokio::net::TcpListener::bind(config.listen_addr())
    .await
    .with_context(|| format!("Failed to bind {}", config.listen_addr()))?;

  tracing::info!(
    "Server listening at http://{} ({})",
    config.listen_addr(),
    config.environment
  );

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  pool.close().await;
  tracing::info!("Database pool closed");

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
  };

  #[cfg(unix)]
  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("Failed to install signal handler")
      .recv()
      .await;
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("Received termination signal, shutting down gracefully...");
}
