//! Messages broadcast to connected UI clients.

use serde::{Deserialize, Serialize};

/// Structured message posted to every open UI instance.
///
/// Serializes as `{"type":"SYNC_COMPLETED","path":...}` so consuming UIs
/// can dispatch on the `type` discriminant. Delivery is fire-and-forget;
/// UIs decide whether to refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    SyncCompleted { path: String },
}
