//! HTTP transport — axum router with the report, search and /health routes.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{handle_range_report, handle_subtexts, AppState};
use crate::types::{ServerError, ServerResult};

/// Inbound routes, in the order they are registered.
pub const ROUTES: &[(&str, &str)] = &[
    ("/", "divisor-annotated range report (text/plain)"),
    ("/subtexts", "fragment search, submitted upstream; relays the reply (JSON)"),
    ("/health", "liveness check (JSON)"),
];

/// Build the axum Router with every route.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handle_range_report))
        .route("/subtexts", get(handle_subtexts))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// HTTP server owning the shared state.
pub struct HttpTransport {
    state: Arc<AppState>,
}

impl HttpTransport {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Run the HTTP server on the given address.
    pub async fn run(&self, addr: &str) -> ServerResult<()> {
        let app = router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(ServerError::Io)?;

        tracing::info!("HTTP transport listening on {addr}");
        tracing::info!("Upstream: {}", self.state.endpoints.base_url());

        axum::serve(listener, app).await.map_err(ServerError::Io)?;

        Ok(())
    }
}

/// Health check endpoint.
async fn handle_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "upstream": state.endpoints.base_url(),
    }))
}
