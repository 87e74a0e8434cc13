//! Server startup and graceful shutdown.

use crate::{
    api::{AppState, router},
    config::settings::ServerConfig,
    errors::{Error, Result},
};
use std::future::Future;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

/// Binds the HTTP listener described by `config`.
#[instrument]
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let address = config.bind_address();
    TcpListener::bind(&address).await.map_err(|e| Error::Server {
        message: format!("Failed to bind {address}: {e}"),
    })
}

/// Serves the catalog API on `listener` until `shutdown` completes.
///
/// In-flight requests are allowed to finish once shutdown starts.
pub async fn run<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Starting server on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server exited");
    Ok(())
}

/// Binds and serves until the process receives Ctrl-C or SIGTERM.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let listener = bind(config).await?;
    run(listener, state, shutdown_signal()).await
}

/// Resolves when the process is asked to stop.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutting down server...");
}
