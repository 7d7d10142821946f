//! Notification service entry point
//!
//! Serves the canned notification list on `NOTIFICATION_PORT` (default: 5002).

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;

use pdf_service::bootstrap::{init_tracing, shutdown_signal};
use pdf_service::config::notification_port;
use pdf_service::notification::create_app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing("pdf_service=debug,notification_service=debug,tower_http=debug");

    let port = notification_port();
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("🚀 Notification Service running on port {}", port);

    axum::serve(listener, create_app())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}
