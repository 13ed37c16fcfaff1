use serde::Serialize;

use crate::domain::Outcome;

/// Per-pass tallies, for logs and status displays only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    /// Entries delivered (2xx) and removed.
    pub delivered: usize,
    /// Entries rejected permanently and removed.
    pub discarded: usize,
    /// Entries left queued for the next pass.
    pub deferred: usize,
    /// Entries whose attempt failed at the engine boundary (storage
    /// error, unexpected fault); also left queued.
    pub faulted: usize,
}

impl PassSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Success { .. } => self.delivered += 1,
            Outcome::PermanentFailure { .. } => self.discarded += 1,
            Outcome::TransientFailure { .. } => self.deferred += 1,
        }
    }
}
