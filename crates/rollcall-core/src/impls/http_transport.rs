//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::ports::{OutboundRequest, Transport, TransportError, TransportReply};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Outbound HTTP via a shared `reqwest::Client`.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        Ok(Self { client })
    }

    /// Use an externally configured client (custom timeout, proxy, TLS).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportReply, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|_| TransportError::InvalidRequest(format!("bad method {:?}", request.method)))?;
        let body = serde_json::to_vec(&request.body)
            .map_err(|e| TransportError::InvalidRequest(format!("unserializable body: {e}")))?;

        let mut builder = self.client.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.body(body).send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(e.to_string())
            } else {
                TransportError::Connect(e.to_string())
            }
        })?;

        Ok(TransportReply {
            status: response.status().as_u16(),
        })
    }
}
