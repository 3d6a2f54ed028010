//! JSON status handler.

use axum::extract::State;
use axum::Json;
use std::sync::atomic::Ordering;

use super::super::types::{Counts, ServerState, StatusResponse};

/// JSON status endpoint with request and processing counters
pub async fn status_handler(State(state): State<ServerState>) -> Json<StatusResponse> {
    let stats = state.detector.stats();
    Json(StatusResponse {
        requests: state.requests.load(Ordering::SeqCst),
        empty_results: state.empty_results.load(Ordering::SeqCst),
        elapsed_seconds: state.start_time.elapsed().as_secs_f64(),
        errors: Counts::errors(stats),
        warnings: Counts::warnings(stats),
        info: Counts::info(stats),
    })
}
