//! Signal handling for graceful shutdown.

use tokio::signal::unix::{SignalKind, signal};

/// Creates a future that completes when a shutdown signal is received.
///
/// Listens for SIGTERM and SIGINT (Ctrl+C). If the SIGTERM handler cannot
/// be installed, falls back to Ctrl+C only.
pub async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGTERM handler, only Ctrl+C will stop the server");
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            }
            tracing::info!("Received SIGINT, initiating graceful shutdown");
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            }
            tracing::info!("Received SIGINT, initiating graceful shutdown");
        }
    }
}
