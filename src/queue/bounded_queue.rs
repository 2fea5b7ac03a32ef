//! Bounded Blocking Queue Implementation
//!
//! Fixed-capacity MPMC FIFO with blocking push/pop bounded by a timeout and a
//! one-way shutdown latch. The buffer and the latch live under a single
//! mutex; producers wait on `not_full`, consumers on `not_empty`.
//!
//! After [`BoundedQueue::shutdown`] every push fails immediately, while pops
//! keep draining buffered items in order and only fail once the buffer is
//! empty.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};

use crate::queue::error::{PopError, PushError, QueueResult};

struct Inner<T> {
    items: VecDeque<T>,
    shutdown: bool,
}

/// Capacity-limited, thread-safe FIFO queue with blocking operations
pub struct BoundedQueue<T> {
    inner: Mutex<Inner<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Create a queue holding at most `capacity` items
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                // Large capacities grow on demand rather than reserving up front
                items: VecDeque::with_capacity(capacity.min(1024)),
                shutdown: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        }
    }

    /// Push an item, waiting up to `timeout` for free capacity.
    ///
    /// Returns `true` iff the item was enqueued. On timeout or shutdown the
    /// item is dropped; use [`push_timeout`](Self::push_timeout) to get it back.
    pub fn push(&self, item: T, timeout: Duration) -> bool {
        self.push_timeout(item, timeout).is_ok()
    }

    /// Push without waiting for capacity
    pub fn try_push(&self, item: T) -> Result<(), PushError<T>> {
        self.push_timeout(item, Duration::ZERO)
    }

    /// Push an item, waiting up to `timeout` for free capacity, returning the
    /// item inside the error if it could not be enqueued
    pub fn push_timeout(&self, item: T, timeout: Duration) -> Result<(), PushError<T>> {
        let deadline = Instant::now().checked_add(timeout);
        let mut inner = self.inner.lock();

        loop {
            if inner.shutdown {
                return Err(PushError::Shutdown(item));
            }

            if inner.items.len() < self.capacity {
                inner.items.push_back(item);
                drop(inner);
                self.not_empty.notify_one();
                return Ok(());
            }

            if !self.wait(&self.not_full, &mut inner, deadline) {
                // One last look: shutdown wins over timeout, space wins over both
                if inner.shutdown {
                    return Err(PushError::Shutdown(item));
                }
                if inner.items.len() < self.capacity {
                    continue;
                }
                return Err(PushError::Timeout(item));
            }
        }
    }

    /// Pop the oldest item, waiting up to `timeout` for one to arrive.
    ///
    /// Returns `None` on timeout, or once the queue is shut down and drained.
    pub fn pop(&self, timeout: Duration) -> Option<T> {
        self.pop_timeout(timeout).ok()
    }

    /// Pop without waiting
    pub fn try_pop(&self) -> Option<T> {
        self.pop_timeout(Duration::ZERO).ok()
    }

    /// Pop the oldest item, distinguishing a timeout from a drained shutdown
    pub fn pop_timeout(&self, timeout: Duration) -> QueueResult<T> {
        let deadline = Instant::now().checked_add(timeout);
        let mut inner = self.inner.lock();

        loop {
            if let Some(item) = inner.items.pop_front() {
                drop(inner);
                self.not_full.notify_one();
                return Ok(item);
            }

            if inner.shutdown {
                return Err(PopError::Shutdown);
            }

            if !self.wait(&self.not_empty, &mut inner, deadline) && inner.items.is_empty() {
                return Err(if inner.shutdown {
                    PopError::Shutdown
                } else {
                    PopError::Timeout
                });
            }
        }
    }

    /// Wait on `condvar` until notified or `deadline` passes.
    ///
    /// Returns `false` once the deadline has been reached. A `None` deadline
    /// (timeout too large to represent) waits without limit.
    fn wait(
        &self,
        condvar: &Condvar,
        inner: &mut MutexGuard<'_, Inner<T>>,
        deadline: Option<Instant>,
    ) -> bool {
        match deadline {
            Some(deadline) => {
                if Instant::now() >= deadline {
                    return false;
                }
                !condvar.wait_until(inner, deadline).timed_out()
            }
            None => {
                condvar.wait(inner);
                true
            }
        }
    }

    /// Number of buffered items; may be stale as soon as it returns
    pub fn size(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }

    /// Set the shutdown latch and wake every blocked producer and consumer.
    /// Idempotent and irreversible.
    pub fn shutdown(&self) {
        {
            let mut inner = self.inner.lock();
            if inner.shutdown {
                return;
            }
            inner.shutdown = true;
        }
        self.not_empty.notify_all();
        self.not_full.notify_all();
        log::debug!("Bounded queue shut down");
    }

    pub fn is_shutdown(&self) -> bool {
        self.inner.lock().shutdown
    }
}

impl<T> fmt::Debug for BoundedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("BoundedQueue")
            .field("size", &inner.items.len())
            .field("capacity", &self.capacity)
            .field("shutdown", &inner.shutdown)
            .finish()
    }
}
