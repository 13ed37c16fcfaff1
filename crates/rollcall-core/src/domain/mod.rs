//! Domain model: queue entries, attempt outcomes, client messages.

pub mod message;
pub mod outcome;
pub mod request;

pub use message::ClientMessage;
pub use outcome::Outcome;
pub use request::{CapturedAt, PendingRequest};
