//! Advisory URL cache
//!
//! Handlers only ever talk to [`UrlCache`]. It wraps a [`CacheBackend`] and
//! collapses every backend failure into a miss (reads) or a log line
//! (writes), so the cache can speed up resolution but never change its
//! outcome.
//!
//! Backends:
//! - [`RedisCache`] - pooled Redis connections, used in production
//! - [`MemoryCache`] - in-process map with passive TTL expiry

mod memory;
mod redis_cache;

pub use memory::MemoryCache;
pub use redis_cache::RedisCache;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

/// Lifetime of a resolved URL in the cache
pub const URL_TTL: Duration = Duration::from_secs(3600);

/// Cache key for a document's resolved URL: `pdf:url:{documentId}`
pub fn cache_key(document_id: &str) -> String {
    format!("pdf:url:{}", document_id)
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("failed to create cache pool: {0}")]
    CreatePool(#[from] deadpool_redis::CreatePoolError),

    #[error("cache connection unavailable: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    #[error("cache command failed: {0}")]
    Redis(#[from] deadpool_redis::redis::RedisError),
}

pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Raw key/value operations a cache backend must provide
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns `Ok(None)` on a miss
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    async fn ping(&self) -> CacheResult<()>;

    /// Short label used in log lines
    fn name(&self) -> &'static str;
}

/// Counters describing how the cache has been used since startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    pub errors: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
    errors: AtomicU64,
}

/// Best-effort cache in front of URL resolution
#[derive(Clone)]
pub struct UrlCache {
    backend: Arc<dyn CacheBackend>,
    counters: Arc<Counters>,
}

impl UrlCache {
    pub fn new<B>(backend: B) -> Self
    where
        B: CacheBackend + 'static,
    {
        Self::from_arc(Arc::new(backend))
    }

    pub fn from_arc(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Looks up `key`; any backend error is logged and reported as a miss
    pub async fn lookup(&self, key: &str) -> Option<String> {
        match self.backend.get(key).await {
            Ok(Some(value)) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key, "cache hit");
                Some(value)
            }
            Ok(None) => {
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key, "cache miss");
                None
            }
            Err(e) => {
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                self.counters.errors.fetch_add(1, Ordering::Relaxed);
                warn!(key, backend = self.backend.name(), error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Writes `key` with a TTL; failures are logged and otherwise ignored
    pub async fn store(&self, key: &str, value: &str, ttl: Duration) {
        match self.backend.set_ex(key, value, ttl).await {
            Ok(()) => {
                self.counters.writes.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.counters.errors.fetch_add(1, Ordering::Relaxed);
                warn!(key, backend = self.backend.name(), error = %e, "cache write failed");
            }
        }
    }

    /// Health probe; `false` means the cache is currently unusable
    pub async fn ping(&self) -> bool {
        match self.backend.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(backend = self.backend.name(), error = %e, "cache ping failed");
                false
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            writes: self.counters.writes.load(Ordering::Relaxed),
            errors: self.counters.errors.load(Ordering::Relaxed),
        }
    }
}
