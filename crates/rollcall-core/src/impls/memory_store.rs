//! In-memory queue store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{CapturedAt, PendingRequest};
use crate::error::SyncError;
use crate::ports::QueueStore;

/// In-memory `QueueStore`.
///
/// A `BTreeMap` keyed by `CapturedAt` gives ascending iteration for free,
/// matching the key order the durable collection guarantees.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<CapturedAt, PendingRequest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending entries. Handy for status displays and tests.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl QueueStore for MemoryStore {
    async fn open(&self) -> Result<(), SyncError> {
        // Nothing to create; the map exists from construction.
        Ok(())
    }

    async fn insert(&self, request: PendingRequest) -> Result<(), SyncError> {
        let mut entries = self.entries.lock().await;
        if entries.contains_key(&request.captured_at) {
            return Err(SyncError::DuplicateKey(request.captured_at));
        }
        entries.insert(request.captured_at, request);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<PendingRequest>, SyncError> {
        let entries = self.entries.lock().await;
        Ok(entries.values().cloned().collect())
    }

    async fn remove(&self, key: CapturedAt) -> Result<(), SyncError> {
        let mut entries = self.entries.lock().await;
        entries.remove(&key);
        Ok(())
    }
}
