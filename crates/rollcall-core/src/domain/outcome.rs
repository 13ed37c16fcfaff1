//! Outcome model: per-attempt classification of a delivery result.
//!
//! This module is transport-agnostic: it only defines how an HTTP status
//! (or the absence of one) maps to what the engine does with the queued
//! entry.

/// Classification of one delivery attempt.
///
/// - `Success`: 2xx — the entry is removed and clients are notified.
/// - `PermanentFailure`: the request itself is invalid or unauthorized
///   (4xx, or a malformed entry); blind retry cannot fix it, so the entry
///   is removed without notification.
/// - `TransientFailure`: the server or the link misbehaved (5xx, network
///   error); the entry stays queued for the next pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { status: u16 },
    PermanentFailure { reason: String },
    TransientFailure { reason: String },
}

impl Outcome {
    /// Classify an HTTP status code.
    ///
    /// Anything that is neither 2xx nor 4xx (5xx, but also 1xx/3xx, which
    /// the protocol leaves unspecified here) is treated as retryable.
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => Outcome::Success { status },
            400..=499 => Outcome::PermanentFailure {
                reason: format!("http status {status}"),
            },
            _ => Outcome::TransientFailure {
                reason: format!("http status {status}"),
            },
        }
    }

    /// Terminal outcomes remove the entry from the queue.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Outcome::Success { .. } | Outcome::PermanentFailure { .. }
        )
    }
}
