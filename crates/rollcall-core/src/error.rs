use thiserror::Error;

use crate::domain::CapturedAt;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("storage: {0}")]
    Storage(String),

    #[error("duplicate capture key {0}")]
    DuplicateKey(CapturedAt),

    #[error("serde: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SyncError {
    /// Wrap any storage-backend error without leaking the backend type
    /// through the `QueueStore` seam.
    pub fn storage(err: impl std::fmt::Display) -> Self {
        SyncError::Storage(err.to_string())
    }
}
