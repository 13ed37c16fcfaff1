//! rollcall-core
//!
//! Offline queue-and-replay engine for attendance check-in/check-out
//! actions. A capture layer writes requests that failed to reach the
//! attendance API into a durable queue; once connectivity returns, the
//! coordinator drains the queue in capture order, classifies every
//! attempt, and broadcasts completion events to connected UI clients.
//!
//! Module layout:
//! - **domain**: queue entries, outcome classification, client messages
//! - **ports**: abstraction seams (QueueStore, Transport, EventSink, Clock)
//! - **impls**: store/transport/sink implementations (memory, SQLite, HTTP, broadcast)
//! - **delivery**: resolves one entry to a network call and acts on the result
//! - **coordinator**: single-in-flight sync pass over the whole queue

pub mod coordinator;
pub mod delivery;
pub mod domain;
pub mod error;
pub mod impls;
pub mod observability;
pub mod ports;

pub use coordinator::SyncCoordinator;
pub use delivery::DeliveryHandler;
pub use domain::{CapturedAt, ClientMessage, Outcome, PendingRequest};
pub use error::SyncError;
pub use observability::PassSummary;

#[cfg(test)]
pub(crate) mod testutil;
