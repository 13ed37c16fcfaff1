//! Capture-key allocation: unique, monotonic `CapturedAt` stamps.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::CapturedAt;
use crate::ports::Clock;

/// Hands out strictly increasing capture stamps.
///
/// The stamp is `max(now_ms, last + 1)`, so keys stay unique and
/// monotonic even when two captures land in the same millisecond or the
/// wall clock steps backward. The capture layer uses this when enqueuing
/// a failed submission.
pub struct MonotonicStamper {
    clock: Arc<dyn Clock>,
    last: AtomicI64,
}

impl MonotonicStamper {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last: AtomicI64::new(0),
        }
    }

    pub fn next(&self) -> CapturedAt {
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let now = self.clock.now().timestamp_millis();
            let candidate = now.max(last + 1);
            match self.last.compare_exchange_weak(
                last,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return CapturedAt::from_millis(candidate),
                Err(observed) => last = observed,
            }
        }
    }
}
