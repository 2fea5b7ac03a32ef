//! URL Frontier Implementation
//!
//! Deduplicating, bounded work queue shared by link-discovering producers and
//! fetching consumers. A URL is inserted into the visited set *before* it is
//! pushed, so two producers racing on the same URL can never both enqueue it.
//!
//! The visited-set lock and the queue lock are never held at the same time.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use parking_lot::RwLock;

use crate::frontier::config::FrontierConfig;
use crate::frontier::statistics::{FrontierCounters, FrontierStatistics};
use crate::frontier::validator::UrlValidator;
use crate::queue::BoundedQueue;

/// Shared URL frontier: pending queue plus visited set plus counters
pub struct UrlFrontier {
    queue: BoundedQueue<String>,
    visited: RwLock<HashSet<String>>,
    counters: FrontierCounters,
    validator: Option<Box<dyn UrlValidator>>,
    push_timeout: Duration,
    pop_timeout: Duration,
}

impl UrlFrontier {
    /// Create a frontier whose pending queue holds at most `queue_capacity` URLs
    pub fn new(queue_capacity: usize) -> Self {
        Self::from_config(&FrontierConfig::default().with_queue_capacity(queue_capacity))
    }

    pub fn from_config(config: &FrontierConfig) -> Self {
        Self {
            queue: BoundedQueue::new(config.queue_capacity),
            visited: RwLock::new(HashSet::new()),
            counters: FrontierCounters::default(),
            validator: None,
            push_timeout: config.push_timeout(),
            pop_timeout: config.pop_timeout(),
        }
    }

    /// Reject URLs the validator refuses; they are counted as invalid and
    /// are not marked visited
    pub fn with_validator(mut self, validator: Box<dyn UrlValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    // Producer interface

    /// Add a URL, waiting up to `timeout` for queue space.
    ///
    /// Returns `true` only if the URL was newly marked visited *and* enqueued.
    /// If the push fails (full queue or shutdown) the URL stays visited and
    /// can never be added again.
    pub fn try_add(&self, url: &str, timeout: Duration) -> bool {
        if let Some(validator) = &self.validator {
            if !validator.is_valid(url) {
                self.counters.record_invalid();
                log::trace!("Rejected invalid URL: {}", url);
                return false;
            }
        }

        // Fast path: most adds in a mature crawl are duplicates
        if self.visited.read().contains(url) {
            self.counters.record_duplicate();
            return false;
        }

        // Insert-if-absent under the write lock closes the check-then-insert race
        let inserted = self.visited.write().insert(url.to_owned());
        if !inserted {
            self.counters.record_duplicate();
            return false;
        }

        if self.queue.push(url.to_owned(), timeout) {
            self.counters.record_added();
            return true;
        }

        log::debug!(
            "URL marked visited but not enqueued ({}): {}",
            if self.queue.is_shutdown() { "shutdown" } else { "queue full" },
            url
        );
        false
    }

    /// Add a URL using the configured default push timeout
    pub fn add(&self, url: &str) -> bool {
        self.try_add(url, self.push_timeout)
    }

    /// Add a URL without waiting for queue space
    pub fn try_add_nowait(&self, url: &str) -> bool {
        self.try_add(url, Duration::ZERO)
    }

    /// Add each URL without waiting, returning how many were enqueued.
    ///
    /// Failures are per item and silent; earlier successes are kept.
    pub fn add_batch<I, S>(&self, urls: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let added = urls
            .into_iter()
            .filter(|url| self.try_add_nowait(url.as_ref()))
            .count();
        log::trace!("Batch enqueued {} URLs", added);
        added
    }

    // Consumer interface

    /// Pop the next URL, waiting up to `timeout`.
    ///
    /// `None` means timeout or shutdown; check [`is_shutdown`](Self::is_shutdown)
    /// to tell them apart.
    pub fn pop(&self, timeout: Duration) -> Option<String> {
        self.queue.pop(timeout)
    }

    /// Pop the next URL using the configured default pop timeout
    pub fn next_url(&self) -> Option<String> {
        self.pop(self.pop_timeout)
    }

    // Visited set

    /// Membership test; `url` must already be normalized
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.read().contains(url)
    }

    /// Register a URL as visited without enqueuing it. Idempotent.
    pub fn mark_visited(&self, url: &str) {
        self.visited.write().insert(url.to_owned());
    }

    pub fn visited_count(&self) -> usize {
        self.visited.read().len()
    }

    // Lifecycle and observability

    /// Unblock every waiting producer and consumer. The visited set is kept.
    pub fn shutdown(&self) {
        if !self.queue.is_shutdown() {
            log::info!("Shutting down frontier: {}", self.stats());
        }
        self.queue.shutdown();
    }

    pub fn is_shutdown(&self) -> bool {
        self.queue.is_shutdown()
    }

    pub fn queue_size(&self) -> usize {
        self.queue.size()
    }

    pub fn queue_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    pub fn stats(&self) -> FrontierStatistics {
        self.counters.snapshot()
    }
}

impl Default for UrlFrontier {
    fn default() -> Self {
        Self::from_config(&FrontierConfig::default())
    }
}

impl fmt::Debug for UrlFrontier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlFrontier")
            .field("queue", &self.queue)
            .field("visited", &self.visited_count())
            .field("stats", &self.stats())
            .field("validator", &self.validator.is_some())
            .finish()
    }
}
