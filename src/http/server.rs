//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the vanity handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Swap in reloaded handler state without restarting
//! - Stop on the shutdown signal

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    extract::State,
    http::{HeaderMap, Uri},
    response::Response,
    routing::get,
    Router,
};
use percent_encoding::percent_decode_str;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerSettings;
use crate::http::handler::{request_host, VanityHandler};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<ArcSwap<VanityHandler>>,
}

/// HTTP server for vanity import paths.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server serving `handler`.
    pub fn new(handler: VanityHandler, settings: ServerSettings) -> Self {
        let state = AppState {
            handler: Arc::new(ArcSwap::from_pointee(handler)),
        };
        let router = build_router(&settings, state.clone());
        Self { router, state }
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Every handler received on `config_updates` replaces the current one
    /// atomically; in-flight requests finish on the state they started with.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<VanityHandler>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            vanity_paths = self.state.handler.load().paths().len(),
            "HTTP server starting"
        );

        let reload_state = self.state.clone();
        tokio::spawn(async move {
            while let Some(handler) = config_updates.recv().await {
                let vanity_paths = handler.paths().len();
                reload_state.handler.store(Arc::new(handler));
                tracing::info!(vanity_paths, "Configuration reloaded");
            }
        });

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Shared handler state, e.g. for swapping it from outside the server.
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub(crate) fn build_router(settings: &ServerSettings, state: AppState) -> Router {
    Router::new()
        .route("/", get(vanity_handler))
        .route("/{*path}", get(vanity_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    settings.request_timeout_secs,
                ))),
        )
}

async fn vanity_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    // Keys are matched in decoded form, so `/caf%C3%A9` finds `/café`.
    let path = percent_decode_str(uri.path()).decode_utf8_lossy();
    let handler = state.handler.load();
    handler.handle(&path, request_host(&headers, &uri))
}
