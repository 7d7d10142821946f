//! Application state shared across all request handlers

use std::sync::Arc;

use reqwest::Client;

use crate::cache::UrlCache;
use crate::config::Config;
use crate::store::PdfStore;

/// Cheap to clone; everything mutable lives inside the pooled clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    cache: UrlCache,
    store: PdfStore,
    http: Client,
}

impl AppState {
    pub fn new(config: Config, cache: UrlCache, store: PdfStore, http: Client) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                cache,
                store,
                http,
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn cache(&self) -> &UrlCache {
        &self.inner.cache
    }

    pub fn store(&self) -> &PdfStore {
        &self.inner.store
    }

    pub fn http(&self) -> &Client {
        &self.inner.http
    }

    /// URL clients use to download `filename` from this service
    ///
    /// `filename` is percent-encoded as a single path segment, so `#`, `?` or
    /// `%` in a document ID survive the trip back through `GET /api/pdfs/`.
    pub fn public_pdf_url(&self, filename: &str) -> String {
        format!(
            "http://localhost:{}/api/pdfs/{}",
            self.inner.config.port,
            urlencoding::encode(filename)
        )
    }
}
