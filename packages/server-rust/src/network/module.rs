//! Network module with deferred startup lifecycle.
//!
//! `new()` allocates shared state, `start()` binds the TCP listener and
//! `serve()` accepts connections until the shutdown future resolves.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;
use bytes::Bytes;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::binding::bindings;
use super::config::NetworkConfig;
use super::handlers::{
    handle_operation, health_handler, liveness_handler, readiness_handler, AppState,
};
use super::lifecycle::ServerLifecycle;
use super::middleware::build_http_layers;
use crate::service::OperationPipeline;

/// Owns the HTTP server lifecycle.
pub struct NetworkModule {
    config: NetworkConfig,
    pipeline: OperationPipeline,
    listener: Option<TcpListener>,
    lifecycle: Arc<ServerLifecycle>,
}

impl NetworkModule {
    /// Creates the module without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig, pipeline: OperationPipeline) -> Self {
        Self {
            config,
            pipeline,
            listener: None,
            lifecycle: Arc::new(ServerLifecycle::new()),
        }
    }

    /// Shared lifecycle handle (health state, in-flight count).
    #[must_use]
    pub fn lifecycle(&self) -> Arc<ServerLifecycle> {
        Arc::clone(&self.lifecycle)
    }

    /// Assembles the axum router.
    ///
    /// Routes:
    /// - `POST /uppercase`, `POST /count` -- one per [`bindings`] entry
    /// - `GET /health`, `GET /health/live`, `GET /health/ready`
    pub fn build_router(&self) -> Router {
        let state = AppState {
            pipeline: self.pipeline.clone(),
            lifecycle: Arc::clone(&self.lifecycle),
            start_time: Instant::now(),
        };

        let mut router = Router::new()
            .route("/health", get(health_handler))
            .route("/health/live", get(liveness_handler))
            .route("/health/ready", get(readiness_handler));

        for binding in bindings() {
            router = router.route(
                binding.path,
                post(
                    move |State(state): State<AppState>, headers: HeaderMap, body: Bytes| {
                        handle_operation(state, binding, headers, body)
                    },
                ),
            );
        }

        router
            .layer(build_http_layers(&self.config))
            .with_state(state)
    }

    /// Binds the TCP listener and returns the bound port (which differs from
    /// the configured one when port 0 is used).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves until `shutdown` resolves or [`ServerLifecycle::trigger_shutdown`]
    /// is called, then drains in-flight calls.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called or the server hits a
    /// fatal I/O error.
    pub async fn serve(
        mut self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.build_router();
        let listener = self
            .listener
            .take()
            .ok_or_else(|| anyhow::anyhow!("start() must be called before serve()"))?;

        self.lifecycle.set_ready();
        info!("Serving HTTP connections");

        let lifecycle = Arc::clone(&self.lifecycle);
        let mut triggered = self.lifecycle.shutdown_receiver();
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    () = shutdown => lifecycle.trigger_shutdown(),
                    _ = triggered.changed() => {}
                }
            })
            .await?;

        self.lifecycle.trigger_shutdown();
        if self.lifecycle.wait_for_drain(self.config.drain_timeout).await {
            info!("All in-flight calls drained");
        } else {
            warn!(
                in_flight = self.lifecycle.in_flight_count(),
                "Drain timeout expired with calls in flight"
            );
        }
        Ok(())
    }
}
