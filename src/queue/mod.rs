//! Bounded Queue System
//!
//! This module provides the blocking, capacity-limited FIFO that backs the
//! URL frontier. It is generic over the item type and independent of any
//! crawling concerns.
//!
//! # Usage
//!
//! ```rust
//! use url_frontier::queue::BoundedQueue;
//! use std::time::Duration;
//!
//! let queue = BoundedQueue::new(2);
//! assert!(queue.push("a", Duration::from_millis(10)));
//! assert!(queue.push("b", Duration::from_millis(10)));
//! // Full: times out without enqueuing
//! assert!(!queue.push("c", Duration::from_millis(10)));
//!
//! queue.shutdown();
//! // Buffered items still drain in order after shutdown
//! assert_eq!(queue.pop(Duration::from_millis(10)), Some("a"));
//! assert_eq!(queue.pop(Duration::from_millis(10)), Some("b"));
//! assert_eq!(queue.pop(Duration::from_millis(10)), None);
//! ```

pub mod bounded_queue;
pub mod error;

// Re-export main types for convenience
pub use bounded_queue::BoundedQueue;
pub use error::{PopError, PushError, QueueResult};

#[cfg(test)]
mod tests;
