//! Route definitions for the PDF hosting service
//!
//! This module configures all HTTP routes, maps them to their handlers and
//! wraps them in the CORS, logging and timeout layers.

use axum::http::{Method, StatusCode};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::{RequestBodyTimeoutLayer, ResponseBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;

use crate::handler::{chat, get_pdf_url, health, proxy_pdf, serve_pdf};
use crate::middleware::log_requests;
use crate::state::AppState;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `GET /health` - Liveness probe
/// - `POST /api/get-pdf-url` - Resolves a document ID into a download URL
/// - `GET /api/pdfs/{filename}` - Streams a local PDF
/// - `GET /api/proxy-pdf?url=` - Streams a PDF from a whitelisted origin
/// - `POST /api/chat` - Placeholder chat endpoint
///
/// # Example Usage
///
/// ```no_run
/// # use pdf_service::cache::{MemoryCache, UrlCache};
/// # use pdf_service::config::Config;
/// # use pdf_service::state::AppState;
/// # use pdf_service::store::PdfStore;
/// # use pdf_service::route::create_app;
/// let config = Config::default();
/// let http = pdf_service::upstream::build_client(&config.timeouts).unwrap();
/// let store = PdfStore::new(&config.pdf_dir);
/// let state = AppState::new(config, UrlCache::new(MemoryCache::new()), store, http);
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let timeouts = state.config().timeouts.clone();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    // Handler must produce response headers within the write timeout. The
    // proxy route is registered after this layer: it is bounded by the
    // outbound client timeout, which surfaces as a fetch error instead.
    let api_routes = Router::new()
        .route("/get-pdf-url", post(get_pdf_url))
        // Catch-all so `sub/file.pdf` reaches the handler and gets a 400
        .route("/pdfs/{*filename}", get(serve_pdf))
        .route("/chat", post(chat))
        .route_layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeouts.write,
        ))
        .route("/proxy-pdf", get(proxy_pdf));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .with_state(state)
        // Streamed bodies may not stall longer than the write timeout between chunks
        .layer(ResponseBodyTimeoutLayer::new(timeouts.write))
        .layer(RequestBodyTimeoutLayer::new(timeouts.read))
        .layer(middleware::from_fn(log_requests))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
