//! Broadcast sink: completion messages to every connected UI client.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::ClientMessage;
use crate::ports::EventSink;

/// Fans each message out to all current subscribers.
///
/// Send errors mean "nobody is listening", which is not an error for a
/// fire-and-forget channel, so they are dropped.
pub struct BroadcastSink {
    tx: broadcast::Sender<ClientMessage>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Attach one UI client. Each subscriber sees every message emitted
    /// after the subscription.
    pub fn subscribe(&self) -> broadcast::Receiver<ClientMessage> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl EventSink for BroadcastSink {
    async fn emit(&self, message: ClientMessage) {
        let _ = self.tx.send(message);
    }
}

/// Sink for wiring the engine without any UI attached.
pub struct NoopSink;

#[async_trait]
impl EventSink for NoopSink {
    async fn emit(&self, _message: ClientMessage) {}
}
