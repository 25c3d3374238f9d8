//! Server implementation
//!
//! HTTP server startup and lifecycle.

use tokio_util::sync::CancellationToken;

use crate::api::build_app;
use crate::core::{Config, ServerState, SlaRefreshScheduler};

/// HTTP server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create the server with pre-built state (for tests)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let shutdown = CancellationToken::new();
        let scheduler = SlaRefreshScheduler::new(state.clone(), shutdown.clone());
        let scheduler_handle = tokio::spawn(scheduler.run());

        let app = build_app(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Helpdesk server starting on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        shutdown.cancel();
        let _ = scheduler_handle.await;

        Ok(())
    }
}
