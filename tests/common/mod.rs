//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    http::Request,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;

use pdf_service::cache::{CacheBackend, MemoryCache, UrlCache};
use pdf_service::config::{Config, Timeouts};
use pdf_service::route::create_app;
use pdf_service::state::AppState;
use pdf_service::store::PdfStore;
use pdf_service::upstream::build_client;

/// A fully wired application over a temporary PDF directory
pub struct TestApp {
    pub app: Router,
    pub cache: UrlCache,
    pub backend: Arc<MemoryCache>,
    pub dir: TempDir,
}

impl TestApp {
    /// Writes `{pdfDir}/{name}` with the given contents
    pub fn add_pdf(&self, name: &str, contents: &[u8]) {
        std::fs::write(self.dir.path().join(name), contents).expect("Failed to write test PDF");
    }
}

/// Application backed by an in-memory cache
pub fn setup_test_app() -> TestApp {
    setup_with_timeouts(Timeouts::default())
}

/// In-memory cache, with server and outbound timeouts scaled down by the caller
pub fn setup_with_timeouts(timeouts: Timeouts) -> TestApp {
    let backend = Arc::new(MemoryCache::new());
    let (app, cache, dir) = build_app(backend.clone(), timeouts);
    TestApp {
        app,
        cache,
        backend,
        dir,
    }
}

/// Application backed by an arbitrary cache backend
pub fn setup_with_backend(backend: Arc<dyn CacheBackend>) -> (Router, UrlCache, TempDir) {
    build_app(backend, Timeouts::default())
}

fn build_app(backend: Arc<dyn CacheBackend>, timeouts: Timeouts) -> (Router, UrlCache, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let config = Config {
        port: 8006,
        pdf_dir: dir.path().to_path_buf(),
        timeouts,
        ..Config::default()
    };

    let cache = UrlCache::from_arc(backend);
    let http = build_client(&config.timeouts).expect("Failed to build HTTP client");
    let store = PdfStore::new(dir.path());
    let state = AppState::new(config, cache.clone(), store, http);

    (create_app(state), cache, dir)
}

pub fn post_json(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper function to read a response body to the end
pub async fn response_bytes(body: Body) -> Bytes {
    body.collect()
        .await
        .expect("Failed to read response body")
        .to_bytes()
}

/// Helper function to parse response body as JSON
pub async fn response_json(body: Body) -> Value {
    let bytes = response_bytes(body).await;
    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

pub async fn response_text(body: Body) -> String {
    let bytes = response_bytes(body).await;
    String::from_utf8(bytes.to_vec()).expect("Response body is not UTF-8")
}
