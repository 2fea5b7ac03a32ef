//! Queue Error Types
//!
//! Defines the typed outcomes of blocking queue operations. The boolean and
//! `Option` methods on [`BoundedQueue`](super::BoundedQueue) collapse these
//! into a plain success/failure; the `*_timeout` variants expose them so a
//! caller can tell a timeout from a shutdown and recover a rejected item.

use thiserror::Error;

/// Result type for queue pop operations
pub type QueueResult<T> = Result<T, PopError>;

/// Reasons a push did not enqueue its item. The item is handed back.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PushError<T> {
    /// No capacity became available before the timeout elapsed
    #[error("Queue is full - timed out waiting for capacity")]
    Timeout(T),

    /// The queue has been shut down and accepts no more items
    #[error("Queue is shut down - cannot add more items")]
    Shutdown(T),
}

impl<T> PushError<T> {
    /// Recover the item that failed to be enqueued
    pub fn into_inner(self) -> T {
        match self {
            PushError::Timeout(item) | PushError::Shutdown(item) => item,
        }
    }

    pub fn is_shutdown(&self) -> bool {
        matches!(self, PushError::Shutdown(_))
    }
}

/// Reasons a pop returned no item
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PopError {
    /// No item arrived before the timeout elapsed
    #[error("Queue is empty - timed out waiting for an item")]
    Timeout,

    /// The queue has been shut down and fully drained
    #[error("Queue is shut down and drained")]
    Shutdown,
}
