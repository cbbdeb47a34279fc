//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all resolution handler
//! - Wire up middleware (request ID, tracing, timeout, body buffering)
//! - Bind server to listener and shut down gracefully

use axum::{
    extract::{Request, State},
    middleware,
    response::Response,
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ShimConfig;
use crate::http::body::{buffer_post_body, BodyLimit};
use crate::http::request::to_descriptor;
use crate::http::response::into_http_response;
use crate::origin::Origin;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub origin: Arc<Origin>,
}

/// HTTP front for the origin resolver.
pub struct HttpServer {
    router: Router,
    config: ShimConfig,
    origin: Arc<Origin>,
}

impl HttpServer {
    /// Create a server whose origin comes from `config.origin`.
    pub fn new(config: ShimConfig) -> Self {
        let origin = Arc::new(Origin::from_config(&config.origin));
        Self::with_origin(config, origin)
    }

    /// Create a server around an existing origin.
    pub fn with_origin(config: ShimConfig, origin: Arc<Origin>) -> Self {
        let state = AppState {
            origin: origin.clone(),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            origin,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ShimConfig, state: AppState) -> Router {
        let limit = BodyLimit(config.listener.max_body_bytes);

        Router::new()
            .route("/{*path}", any(resolve_handler))
            .route("/", any(resolve_handler))
            .with_state(state)
            .layer(middleware::from_fn_with_state(limit, buffer_post_body))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The configured router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            origin = %self.origin.kind(),
            base_url = %self.origin.base_url(),
            max_body_bytes = self.config.listener.max_body_bytes,
            request_timeout_secs = self.config.timeouts.request_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

}

/// Resolve every request against the configured origin.
async fn resolve_handler(State(state): State<AppState>, request: Request) -> Response {
    let descriptor = to_descriptor(&request);
    drop(request);

    tracing::debug!(method = %descriptor.method, uri = %descriptor.uri, "Resolving request");

    let response = state.origin.retrieve(&descriptor).await;
    into_http_response(response)
}
