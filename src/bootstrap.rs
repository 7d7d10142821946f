//! Process-level plumbing shared by both service binaries

use tokio::signal;
use tracing::{info, warn};

/// Resolves on SIGINT or SIGTERM
///
/// In-flight requests, including streaming downloads, are allowed to finish
/// before the server exits. A signal source that cannot be installed is
/// logged and never fires; the other one still does.
pub async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
    };

    info!(signal = received, "🛑 shutting down, draining open connections");
}

/// Installs the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_signal_waits_for_a_signal() {
        let waited = tokio::time::timeout(Duration::from_millis(50), shutdown_signal()).await;
        assert!(waited.is_err());
    }
}
