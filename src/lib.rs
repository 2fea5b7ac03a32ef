//! Bounded, deduplicating URL frontier for multi-threaded web crawlers.
//!
//! [`queue::BoundedQueue`] is a generic blocking FIFO with a shutdown latch;
//! [`frontier::UrlFrontier`] layers visited-set deduplication, batch
//! ingestion and counters on top of it.

pub mod config;
pub mod frontier;
pub mod logging;
pub mod queue;
pub mod simulation;

pub use frontier::{FrontierConfig, FrontierStatistics, UrlFrontier};
pub use queue::BoundedQueue;
