//! Cancellation and time limits for long renders.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared stop signal, polled by the renderer between buckets.
///
/// Clones share the same flag, so a clone handed to another thread can
/// cancel a render in progress.
#[derive(Debug, Clone, Default)]
pub struct RenderControl {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl RenderControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop once `limit` has elapsed from now.
    ///
    /// A limit too large to represent as an `Instant` leaves the render
    /// without a deadline.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.deadline = Instant::now().checked_add(limit);
        if self.deadline.is_none() {
            log::warn!("Time limit {limit:?} is out of range, rendering without a deadline");
        }
        self
    }

    /// Request that the render stop.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    pub fn should_stop(&self) -> bool {
        self.is_cancelled() || self.deadline_passed()
    }
}
