use anyhow::{Context, Result};
use axum::Router;
use tokio::{net::TcpListener, signal};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Serves `router` until SIGINT/SIGTERM arrives or `shutdown` is cancelled.
///
/// In-flight requests finish before this returns.
///
/// # Errors
/// Returns an error when the listener fails while serving.
pub async fn serve(router: Router, listener: TcpListener, shutdown: CancellationToken) -> Result<()> {
    let local_addr = listener
        .local_addr()
        .context("listener has no local address")?;
    info!(%local_addr, "listening");

    let token = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            tokio::select! {
                () = shutdown_signal() => token.cancel(),
                () = token.cancelled() => {}
            }
        })
        .await
        .context("server exited with error")?;

    info!("server shutdown complete");
    Ok(())
}

/// Resolves on the first SIGINT (Ctrl+C) or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received SIGINT, initiating graceful shutdown"),
        () = terminate => info!("received SIGTERM, initiating graceful shutdown"),
    }
}
