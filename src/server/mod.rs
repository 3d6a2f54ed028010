//! HTTP service for portal clients.
//!
//! Provides three endpoints:
//! - `POST /` - form field `url`, answers with the detection report or `{}`
//! - `POST /{url}` - same as above; the path segment is ignored
//! - `GET /status` - JSON processing counters

mod handlers;
mod types;

use axum::routing::{get, post};
use axum::Router;

use handlers::{detect_handler, detect_with_path_handler, status_handler};
pub use types::{Counts, DetectForm, ServerState, StatusResponse};

/// Builds the service router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", post(detect_handler))
        .route("/status", get(status_handler))
        .route("/{url}", post(detect_with_path_handler))
        .with_state(state)
}

/// Binds `127.0.0.1:port` and serves until the process stops.
pub async fn start_server(port: u16, state: ServerState) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind portal service to port {}: {}", port, e))?;

    log::info!("Portal service listening on http://127.0.0.1:{}/", port);
    log::info!("  - Detect: POST http://127.0.0.1:{}/ (form field 'url')", port);
    log::info!("  - Status: GET http://127.0.0.1:{}/status", port);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| anyhow::anyhow!("Portal service error: {}", e))?;

    Ok(())
}
