//! Outbound HTTP for the proxy endpoint

use reqwest::{Client, Url};

use crate::config::Timeouts;

/// Builds the shared pooled client used to fetch remote PDFs
pub fn build_client(timeouts: &Timeouts) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeouts.outbound)
        .pool_max_idle_per_host(timeouts.outbound_max_idle_per_host)
        .pool_idle_timeout(timeouts.outbound_idle)
        .build()
}

/// Checks a proxy target against the host whitelist
///
/// The target must be an absolute `http`/`https` URL whose host is exactly
/// one of `allowed` (ASCII case-insensitive). Anything that does not parse is
/// rejected.
pub fn is_allowed_origin(raw: &str, allowed: &[String]) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return false;
    };

    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    match url.host_str() {
        Some(host) => allowed.iter().any(|a| a.eq_ignore_ascii_case(host)),
        None => false,
    }
}
