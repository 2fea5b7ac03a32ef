//! Frontier Statistics
//!
//! Independent atomic counters. Each field is monotonic on its own; a
//! snapshot taken while producers are active is not consistent across fields.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Live counters owned by a frontier
#[derive(Debug, Default)]
pub(crate) struct FrontierCounters {
    urls_added: AtomicUsize,
    duplicates_skipped: AtomicUsize,
    invalid_skipped: AtomicUsize,
}

impl FrontierCounters {
    pub(crate) fn record_added(&self) {
        self.urls_added.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_duplicate(&self) {
        self.duplicates_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_invalid(&self) {
        self.invalid_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> FrontierStatistics {
        FrontierStatistics {
            urls_added: self.urls_added.load(Ordering::Relaxed),
            duplicates_skipped: self.duplicates_skipped.load(Ordering::Relaxed),
            invalid_skipped: self.invalid_skipped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the frontier counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrontierStatistics {
    /// URLs accepted and enqueued
    pub urls_added: usize,
    /// Adds rejected because the URL was already visited
    pub duplicates_skipped: usize,
    /// Adds rejected by the validator
    pub invalid_skipped: usize,
}

impl FrontierStatistics {
    /// Total add attempts that were rejected
    pub fn total_skipped(&self) -> usize {
        self.duplicates_skipped + self.invalid_skipped
    }
}

impl fmt::Display for FrontierStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Added: {} | Duplicates: {} | Invalid: {}",
            self.urls_added, self.duplicates_skipped, self.invalid_skipped
        )
    }
}
