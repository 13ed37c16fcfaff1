//! Implementations of the ports.
//!
//! - `MemoryStore`: reference store, also the default test double
//! - `SqliteStore`: durable store on SQLite
//! - `HttpTransport`: reqwest-backed outbound requests
//! - `BroadcastSink` / `NoopSink`: UI messaging channels

pub mod broadcast_sink;
pub mod http_transport;
pub mod memory_store;
pub mod sqlite_store;

pub use self::broadcast_sink::{BroadcastSink, NoopSink};
pub use self::http_transport::HttpTransport;
pub use self::memory_store::MemoryStore;
pub use self::sqlite_store::SqliteStore;
