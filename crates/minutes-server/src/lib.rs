//! HTTP surface of the minutes service

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod health;
mod index;
mod process;
mod upload;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use minutes_config::Config;
use minutes_pipeline::Pipeline;
use tower_http::trace::TraceLayer;

pub use error::UploadRejection;
pub use upload::ExtractAudio;

/// Port the service has always listened on
const DEFAULT_PORT: u16 = 5001;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// Both engines are constructed here, once, and shared by every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload directory cannot be created or an
    /// engine fails to initialize
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pipeline = Pipeline::from_config(&config)?;

        pipeline.store().ensure_dir().await?;

        Ok(Self::with_pipeline(&config, pipeline))
    }

    /// Build the server around an already-assembled pipeline
    pub fn with_pipeline(config: &Config, pipeline: Pipeline) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)));

        let mut app = Router::new()
            .route("/", get(index::index_handler))
            .route(
                "/process",
                post(process::process_handler).layer(DefaultBodyLimit::max(config.server.max_upload_bytes)),
            )
            .with_state(Arc::new(pipeline));

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health_handler));
        }

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Self {
            router: app,
            listen_address,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Override the listen address
    #[must_use]
    pub const fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
