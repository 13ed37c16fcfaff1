//! Shared test doubles: scripted transport, recording sink, fault
//! injection around a real store.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{CapturedAt, ClientMessage, PendingRequest};
use crate::error::SyncError;
use crate::impls::MemoryStore;
use crate::ports::{
    EventSink, OutboundRequest, QueueStore, Transport, TransportError, TransportReply,
};

/// Transport that replays a script of replies and records every request.
///
/// Once the script is exhausted, further sends answer 200.
pub(crate) struct MockTransport {
    replies: Mutex<VecDeque<Result<TransportReply, TransportError>>>,
    requests: std::sync::Mutex<Vec<OutboundRequest>>,
    sends: AtomicUsize,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn with_replies(replies: Vec<Result<TransportReply, TransportError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: std::sync::Mutex::new(Vec::new()),
            sends: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub fn always(status: u16) -> Self {
        Self::with_replies(vec![Ok(TransportReply { status })])
    }

    pub fn statuses(statuses: &[u16]) -> Self {
        Self::with_replies(
            statuses
                .iter()
                .map(|&status| Ok(TransportReply { status }))
                .collect(),
        )
    }

    /// Make every send take this long, to hold a pass open.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn sends(&self) -> usize {
        self.sends.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportReply, TransportError> {
        self.sends.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or(Ok(TransportReply { status: 200 }))
    }
}

/// Sink that keeps every emitted message for later assertions.
#[derive(Default)]
pub(crate) struct RecordingSink {
    messages: Mutex<Vec<ClientMessage>>,
}

impl RecordingSink {
    pub async fn messages(&self) -> Vec<ClientMessage> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn emit(&self, message: ClientMessage) {
        self.messages.lock().await.push(message);
    }
}

/// Wraps a `MemoryStore` and injects failures on demand.
#[derive(Default)]
pub(crate) struct FaultyStore {
    pub inner: MemoryStore,
    fail_open: AtomicBool,
    /// Number of upcoming `remove` calls that will fail.
    fail_removes: AtomicUsize,
}

impl FaultyStore {
    pub fn fail_open(&self, fail: bool) {
        self.fail_open.store(fail, Ordering::SeqCst);
    }

    pub fn fail_next_removes(&self, n: usize) {
        self.fail_removes.store(n, Ordering::SeqCst);
    }
}

#[async_trait]
impl QueueStore for FaultyStore {
    async fn open(&self) -> Result<(), SyncError> {
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(SyncError::Storage("injected open failure".to_string()));
        }
        self.inner.open().await
    }

    async fn insert(&self, request: PendingRequest) -> Result<(), SyncError> {
        self.inner.insert(request).await
    }

    async fn list_all(&self) -> Result<Vec<PendingRequest>, SyncError> {
        self.inner.list_all().await
    }

    async fn remove(&self, key: CapturedAt) -> Result<(), SyncError> {
        let remaining = self.fail_removes.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_removes.store(remaining - 1, Ordering::SeqCst);
            return Err(SyncError::Storage("injected remove failure".to_string()));
        }
        self.inner.remove(key).await
    }
}

/// Arc-wrapped store helper used by coordinator tests.
pub(crate) async fn seeded_store(entries: &[PendingRequest]) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    for e in entries {
        store.insert(e.clone()).await.unwrap();
    }
    store
}
