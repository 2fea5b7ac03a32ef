//! Frontier Configuration
//!
//! Construction parameters for [`UrlFrontier`](super::UrlFrontier). The
//! queue capacity is fixed for the lifetime of a frontier; the timeouts are
//! the defaults used by [`UrlFrontier::add`](super::UrlFrontier::add) and
//! [`UrlFrontier::next_url`](super::UrlFrontier::next_url).
//!
//! ```rust
//! use url_frontier::frontier::FrontierConfig;
//!
//! let config = FrontierConfig::default()
//!     .with_queue_capacity(500)
//!     .with_pop_timeout_ms(250);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default maximum number of pending URLs
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;
/// Default wait for queue space in [`UrlFrontier::add`](super::UrlFrontier::add)
pub const DEFAULT_PUSH_TIMEOUT_MS: u64 = 100;
/// Default wait for a URL in [`UrlFrontier::next_url`](super::UrlFrontier::next_url)
pub const DEFAULT_POP_TIMEOUT_MS: u64 = 1000;

/// Configuration validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Queue capacity must be greater than zero")]
    InvalidQueueCapacity,
    #[error("Pop timeout must be greater than zero")]
    InvalidPopTimeout,
}

/// Frontier configuration parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FrontierConfig {
    /// Maximum URLs held in the pending queue
    pub queue_capacity: usize,
    /// How long producers wait for queue space by default
    pub push_timeout_ms: u64,
    /// How long consumers wait for a URL by default
    pub pop_timeout_ms: u64,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            push_timeout_ms: DEFAULT_PUSH_TIMEOUT_MS,
            pop_timeout_ms: DEFAULT_POP_TIMEOUT_MS,
        }
    }
}

impl FrontierConfig {
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_push_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.push_timeout_ms = timeout_ms;
        self
    }

    pub fn with_pop_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.pop_timeout_ms = timeout_ms;
        self
    }

    pub fn push_timeout(&self) -> Duration {
        Duration::from_millis(self.push_timeout_ms)
    }

    pub fn pop_timeout(&self) -> Duration {
        Duration::from_millis(self.pop_timeout_ms)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_capacity == 0 {
            return Err(ConfigError::InvalidQueueCapacity);
        }

        if self.pop_timeout_ms == 0 {
            return Err(ConfigError::InvalidPopTimeout);
        }

        Ok(())
    }
}
