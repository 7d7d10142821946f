//! Service configuration
//!
//! All settings are read once from the environment at startup. The values are
//! immutable afterwards and shared with handlers through [`crate::state::AppState`].

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default listen port of the PDF service
pub const DEFAULT_PORT: u16 = 8006;

/// Default listen port of the notification service
pub const DEFAULT_NOTIFICATION_PORT: u16 = 5002;

/// Port the cache server listens on (not configurable)
pub const REDIS_PORT: u16 = 6379;

/// Hosts the proxy endpoint may fetch from unless `PROXY_ALLOWED_HOSTS` says otherwise
pub const DEFAULT_ALLOWED_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Tuning for the cache connection pool
#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub host: String,

    /// Always [`REDIS_PORT`] outside of tests
    pub port: u16,

    /// Maximum number of pooled connections
    pub pool_size: usize,

    /// Connections opened eagerly once the cache answers a ping
    pub min_idle: usize,

    /// Extra attempts for connection-level failures
    pub max_retries: usize,

    /// Upper bound on creating or waiting for a pooled connection
    pub connect_timeout: Duration,
}

impl CacheSettings {
    pub fn url(&self) -> String {
        format!("redis://{}:{}", self.host, self.port)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: REDIS_PORT,
            pool_size: 100,
            min_idle: 20,
            max_retries: 3,
            connect_timeout: Duration::from_secs(2),
        }
    }
}

/// Timeouts applied by the HTTP server and the outbound client
#[derive(Debug, Clone)]
pub struct Timeouts {
    pub read: Duration,
    pub write: Duration,
    pub outbound: Duration,
    pub outbound_idle: Duration,
    pub outbound_max_idle_per_host: usize,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            read: Duration::from_secs(15),
            write: Duration::from_secs(30),
            outbound: Duration::from_secs(30),
            outbound_idle: Duration::from_secs(90),
            outbound_max_idle_per_host: 100,
        }
    }
}

/// Top-level configuration for the PDF service
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port, also embedded in resolved URLs
    pub port: u16,

    /// Directory holding `{documentId}.pdf` files
    pub pdf_dir: PathBuf,

    /// Hosts the proxy endpoint is allowed to fetch from
    pub allowed_hosts: Vec<String>,

    pub cache: CacheSettings,
    pub timeouts: Timeouts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            pdf_dir: PathBuf::from("./pdfs"),
            allowed_hosts: DEFAULT_ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect(),
            cache: CacheSettings::default(),
            timeouts: Timeouts::default(),
        }
    }
}

impl Config {
    /// Reads configuration from the process environment
    ///
    /// # Environment Variables
    ///
    /// - `PORT` - Server port number (default: 8006)
    /// - `REDIS_HOST` - Cache host (default: "localhost")
    /// - `PDF_DIR` - Directory holding the PDFs (default: "./pdfs")
    /// - `PROXY_ALLOWED_HOSTS` - Comma-separated proxy whitelist (default: "localhost,127.0.0.1")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(raw) = get("PORT") {
            match raw.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value {:?}, using {}", raw, DEFAULT_PORT),
            }
        }

        if let Some(host) = get("REDIS_HOST") {
            config.cache.host = host.trim().to_string();
        }

        if let Some(dir) = get("PDF_DIR") {
            config.pdf_dir = PathBuf::from(dir);
        }

        if let Some(hosts) = get("PROXY_ALLOWED_HOSTS") {
            let parsed: Vec<String> = hosts
                .split(',')
                .map(|h| h.trim().to_ascii_lowercase())
                .filter(|h| !h.is_empty())
                .collect();
            if !parsed.is_empty() {
                config.allowed_hosts = parsed;
            }
        }

        config
    }
}

/// Reads the notification service port (`NOTIFICATION_PORT`, default 5002)
pub fn notification_port() -> u16 {
    env::var("NOTIFICATION_PORT")
        .ok()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(DEFAULT_NOTIFICATION_PORT)
}
