//! Detection handlers.

use axum::extract::{Path, State};
use axum::Form;
use axum::Json;
use serde_json::{json, Value};
use std::sync::atomic::Ordering;

use super::super::types::{DetectForm, ServerState};

/// Runs a detection report for the posted `url` form field.
///
/// Always answers `200`: the report as JSON, or `{}` when nothing could be detected.
pub async fn detect_handler(
    State(state): State<ServerState>,
    Form(form): Form<DetectForm>,
) -> Json<Value> {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let report = state.detector.report(&form.url).await;
    let body = report.and_then(|report| match serde_json::to_value(&report) {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("Failed to serialize report for {}: {}", form.url, e);
            None
        }
    });

    match body {
        Some(value) => Json(value),
        None => {
            state.empty_results.fetch_add(1, Ordering::SeqCst);
            Json(json!({}))
        }
    }
}

/// Same as `detect_handler`; the path segment is accepted and ignored.
pub async fn detect_with_path_handler(
    state: State<ServerState>,
    Path(_segment): Path<String>,
    form: Form<DetectForm>,
) -> Json<Value> {
    detect_handler(state, form).await
}
