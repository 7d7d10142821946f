//! PDF service entry point
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Prepares the PDF directory (the only fatal startup step)
//! - Connects the advisory cache and the outbound HTTP client
//! - Starts the HTTP server with graceful shutdown support

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{info, warn};

use pdf_service::bootstrap::{init_tracing, shutdown_signal};
use pdf_service::cache::{RedisCache, UrlCache};
use pdf_service::config::Config;
use pdf_service::route::create_app;
use pdf_service::state::AppState;
use pdf_service::store::init_store;
use pdf_service::upstream::build_client;

/// Application entry point
///
/// # Environment Variables
///
/// - `PORT` - Server port number (default: 8006)
/// - `REDIS_HOST` - Cache host (default: "localhost")
/// - `PDF_DIR` - Directory holding the PDFs (default: "./pdfs")
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    init_tracing("pdf_service=debug,tower_http=debug");

    let config = Config::from_env();

    let store = init_store(&config.pdf_dir).context("Failed to create PDF directory")?;

    let redis = RedisCache::new(&config.cache).context("Invalid cache configuration")?;
    let cache = UrlCache::new(redis.clone());

    // The service runs without the cache; a failed ping is only reported.
    if cache.ping().await {
        info!("Redis connected successfully at {}", config.cache.url());
        let min_idle = config.cache.min_idle;
        tokio::spawn(async move {
            redis.warm_up(min_idle).await;
        });
    } else {
        warn!("Redis connection failed at {}, continuing without cache", config.cache.url());
    }

    let http = build_client(&config.timeouts).context("Failed to build outbound HTTP client")?;

    let port = config.port;
    let pdf_dir = store.dir().to_path_buf();
    let state = AppState::new(config, cache, store, http);
    let app = create_app(state);

    // Bind to all network interfaces on the specified port
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 PDF service running at http://localhost:{}", port);
    info!("📂 Serving PDFs from: {}", pdf_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}
