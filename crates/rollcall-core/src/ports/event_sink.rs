//! EventSink port: completion events toward connected UI clients.

use async_trait::async_trait;

use crate::domain::ClientMessage;

/// Fire-and-forget broadcast of client messages.
///
/// No acknowledgement is awaited and the absence of any listening UI is
/// not an error, so `emit` is infallible by design.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, message: ClientMessage);
}
