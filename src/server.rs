use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

/// Bind to `address` and serve `app` until Ctrl+C or SIGTERM
pub async fn serve(app: Router, address: &str) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .context(format!("Failed to bind to {}", address))?;

    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, shutting down"),
        _ = terminate => info!("Terminate signal received, shutting down"),
    }
}
