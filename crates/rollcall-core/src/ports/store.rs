//! QueueStore port: the durable queue of pending requests.

use async_trait::async_trait;

use crate::domain::{CapturedAt, PendingRequest};
use crate::error::SyncError;

/// Durable, ordered collection of pending attendance requests.
///
/// The store is the sole source of truth for outstanding work: no
/// parallel in-memory list survives across sync passes, so a process
/// restart mid-pass loses nothing.
///
/// Writers: the capture layer inserts, the delivery handler removes.
/// Nothing updates an entry in place.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Idempotently create the collection and run additive migrations.
    ///
    /// Calling this repeatedly, or from concurrent passes, must not
    /// corrupt the schema. If the stored schema version already satisfies
    /// the required one this is a no-op.
    async fn open(&self) -> Result<(), SyncError>;

    /// Insert one entry. The capture key must be unique; inserting a
    /// duplicate `captured_at` is a [`SyncError::DuplicateKey`].
    async fn insert(&self, request: PendingRequest) -> Result<(), SyncError>;

    /// Every pending entry, in ascending `captured_at` order.
    async fn list_all(&self) -> Result<Vec<PendingRequest>, SyncError>;

    /// Delete one entry. Removing an already-absent key succeeds
    /// silently, which lets a crashed-then-replayed pass redo its
    /// deletes.
    async fn remove(&self, key: CapturedAt) -> Result<(), SyncError>;
}
