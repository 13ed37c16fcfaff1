//! Transport port: performs one outbound HTTP request.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// A fully-resolved request, ready to put on the wire.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub url: Url,
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: serde_json::Value,
}

/// What the engine reads back: the status code only. Response bodies are
/// never inspected.
#[derive(Debug, Clone, Copy)]
pub struct TransportReply {
    pub status: u16,
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// No response at all: DNS, refused connection, broken link.
    #[error("connect: {0}")]
    Connect(String),

    /// The request went out but no response arrived in time.
    #[error("timeout: {0}")]
    Timeout(String),

    /// The stored entry cannot be turned into a request (bad method,
    /// unserializable body). Retrying cannot fix this.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Whether this failure classifies as permanent (poison entry)
    /// rather than retryable.
    pub fn is_permanent(&self) -> bool {
        matches!(self, TransportError::InvalidRequest(_))
    }
}

/// Transport issues one request and reports the status, or why nothing
/// came back.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportReply, TransportError>;
}
