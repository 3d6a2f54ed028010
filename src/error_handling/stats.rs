//! Processing statistics tracking.
//!
//! Counters for errors, warnings and informational events, shared by every
//! detection the process runs and read back by the portal `/status` endpoint.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType, WarningType};

/// One atomic counter per variant of `K`, all created up front.
struct CounterTable<K> {
    counters: HashMap<K, AtomicUsize>,
}

impl<K> CounterTable<K>
where
    K: IntoEnumIterator + Eq + Hash + Copy + Debug,
{
    fn new() -> Self {
        Self {
            counters: K::iter().map(|key| (key, AtomicUsize::new(0))).collect(),
        }
    }

    fn increment(&self, key: K) {
        match self.counters.get(&key) {
            Some(counter) => {
                counter.fetch_add(1, Ordering::Relaxed);
            }
            None => log::error!("No counter registered for {:?}", key),
        }
    }

    fn get(&self, key: K) -> usize {
        self.counters
            .get(&key)
            .map_or(0, |counter| counter.load(Ordering::SeqCst))
    }

    fn total(&self) -> usize {
        self.counters
            .values()
            .map(|counter| counter.load(Ordering::SeqCst))
            .sum()
    }
}

/// Thread-safe processing statistics tracker.
///
/// Every counter starts at zero. Detectors share one instance behind an `Arc`,
/// so the numbers cover all requests since startup.
///
/// # Categories
///
/// - **Errors**: Failures that leave a pipeline stage without a value
/// - **Warnings**: Missing optional data
/// - **Info**: Notable events that aren't errors or warnings
pub struct ProcessingStats {
    errors: CounterTable<ErrorType>,
    warnings: CounterTable<WarningType>,
    info: CounterTable<InfoType>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self {
            errors: CounterTable::new(),
            warnings: CounterTable::new(),
            info: CounterTable::new(),
        }
    }

    pub fn increment_error(&self, error: ErrorType) {
        self.errors.increment(error);
    }

    pub fn increment_warning(&self, warning: WarningType) {
        self.warnings.increment(warning);
    }

    pub fn increment_info(&self, info_type: InfoType) {
        self.info.increment(info_type);
    }

    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors.get(error)
    }

    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings.get(warning)
    }

    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info.get(info_type)
    }

    /// Sum over every error type.
    pub fn total_errors(&self) -> usize {
        self.errors.total()
    }

    /// Sum over every warning type.
    pub fn total_warnings(&self) -> usize {
        self.warnings.total()
    }

    /// Sum over every info type.
    pub fn total_info(&self) -> usize {
        self.info.total()
    }
}
