//! Portal service data structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Instant;
use strum::IntoEnumIterator;

use crate::detector::CmsDetector;
use crate::error_handling::{ErrorType, InfoType, ProcessingStats, WarningType};

/// Shared state for the portal service
#[derive(Clone)]
pub struct ServerState {
    pub detector: CmsDetector,
    pub start_time: Arc<Instant>,
    /// Detection requests received
    pub requests: Arc<AtomicUsize>,
    /// Requests answered with an empty object
    pub empty_results: Arc<AtomicUsize>,
}

impl ServerState {
    pub fn new(detector: CmsDetector) -> Self {
        Self {
            detector,
            start_time: Arc::new(Instant::now()),
            requests: Arc::new(AtomicUsize::new(0)),
            empty_results: Arc::new(AtomicUsize::new(0)),
        }
    }
}

/// Form body of a detection request
#[derive(Debug, Deserialize)]
pub struct DetectForm {
    pub url: String,
}

/// JSON response for `/status` endpoint
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub requests: usize,
    pub empty_results: usize,
    pub elapsed_seconds: f64,
    pub errors: Counts,
    pub warnings: Counts,
    pub info: Counts,
}

/// Totals plus per-type counts, keyed by label
#[derive(Debug, Serialize)]
pub struct Counts {
    pub total: usize,
    pub by_type: BTreeMap<&'static str, usize>,
}

impl Counts {
    pub fn errors(stats: &ProcessingStats) -> Self {
        Self {
            total: stats.total_errors(),
            by_type: ErrorType::iter()
                .map(|t| (t.as_str(), stats.get_error_count(t)))
                .collect(),
        }
    }

    pub fn warnings(stats: &ProcessingStats) -> Self {
        Self {
            total: stats.total_warnings(),
            by_type: WarningType::iter()
                .map(|t| (t.as_str(), stats.get_warning_count(t)))
                .collect(),
        }
    }

    pub fn info(stats: &ProcessingStats) -> Self {
        Self {
            total: stats.total_info(),
            by_type: InfoType::iter()
                .map(|t| (t.as_str(), stats.get_info_count(t)))
                .collect(),
        }
    }
}
