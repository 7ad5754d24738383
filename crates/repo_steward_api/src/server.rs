//! HTTP server configuration and startup

use axum::Router;
use repo_steward_core::Scheduler;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;

use crate::{config::ServerConfig, routes, AppState};

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;

/// Webhook server and, when enabled, the sweep scheduler.
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
    scheduler: Option<Scheduler>,
}

impl ApiServer {
    /// Create a new API server with the given configuration.
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state,
            scheduler: None,
        }
    }

    /// Runs `scheduler` alongside the server until shutdown.
    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Build the Axum router with all routes and middleware.
    pub fn router(&self) -> Router {
        routes::create_router(self.state.clone())
    }

    /// Resolves the configured bind address.
    pub fn address(&self) -> anyhow::Result<SocketAddr> {
        let ip = self.config.host.parse::<std::net::IpAddr>()?;
        Ok(SocketAddr::from((ip, self.config.port)))
    }

    /// Start the server and listen for requests.
    ///
    /// Blocks until CTRL+C (SIGINT) or SIGTERM. In-flight requests are
    /// completed and the scheduler is stopped before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.address()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening for webhooks on {}", addr);

        let app = self.router();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let scheduler_task = self.scheduler.map(|scheduler| {
            tokio::spawn(scheduler.run_until(wait_for_shutdown(shutdown_rx.clone())))
        });

        tokio::spawn(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        });

        axum::serve(listener, app)
            .with_graceful_shutdown(wait_for_shutdown(shutdown_rx))
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

        if let Some(task) = scheduler_task {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Scheduler task failed");
            }
        }

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    // An error means the sender is gone, which only happens on shutdown.
    let _ = rx.wait_for(|stop| *stop).await;
}

/// Wait for shutdown signal (CTRL+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for CTRL+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}
