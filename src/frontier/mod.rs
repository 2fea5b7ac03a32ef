//! URL Frontier
//!
//! Builds crawl bookkeeping on top of [`BoundedQueue`](crate::queue::BoundedQueue):
//! a reader/writer-locked visited set for deduplication, batch ingestion and
//! atomic usage counters. Producers and consumers only ever talk to
//! [`UrlFrontier`]; the queue and the set are never exposed.
//!
//! # Usage
//!
//! ```rust
//! use url_frontier::frontier::UrlFrontier;
//! use std::time::Duration;
//!
//! let frontier = UrlFrontier::new(100);
//! let added = frontier.add_batch(["https://a.example/", "https://a.example/", "https://b.example/"]);
//! assert_eq!(added, 2);
//! assert_eq!(frontier.stats().duplicates_skipped, 1);
//!
//! assert_eq!(frontier.pop(Duration::from_millis(10)).as_deref(), Some("https://a.example/"));
//! ```

pub mod config;
pub mod statistics;
pub mod url_frontier;
pub mod validator;

pub use config::{ConfigError, FrontierConfig};
pub use statistics::FrontierStatistics;
pub use url_frontier::UrlFrontier;
pub use validator::{SchemeValidator, UrlValidator};

#[cfg(test)]
mod tests;
