//! Ports: the abstraction seams of the engine.
//!
//! Each trait hides an external collaborator — the durable queue store,
//! the HTTP stack, the UI messaging channel, the wall clock — so any
//! implementation (SQLite, in-memory, a test double) can substitute.

pub mod clock;
pub mod event_sink;
pub mod stamp;
pub mod store;
pub mod transport;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::EventSink;
pub use self::stamp::MonotonicStamper;
pub use self::store::QueueStore;
pub use self::transport::{OutboundRequest, Transport, TransportError, TransportReply};
