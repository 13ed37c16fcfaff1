//! Delivery attempt handler: one queued entry → one network call → one
//! classified outcome, acted on.

use std::sync::Arc;

use url::Url;

use crate::domain::{ClientMessage, Outcome, PendingRequest};
use crate::error::SyncError;
use crate::ports::{EventSink, OutboundRequest, QueueStore, Transport};

/// Resolves an endpoint for one entry, performs the request, classifies
/// the result, and applies the terminal action (remove / remove+notify /
/// leave queued).
///
/// Sole writer of the queue store during a pass: only this handler
/// removes entries.
pub struct DeliveryHandler {
    store: Arc<dyn QueueStore>,
    transport: Arc<dyn Transport>,
    sink: Arc<dyn EventSink>,
    base_url: Url,
}

impl DeliveryHandler {
    /// `base_url` is the origin relative target paths resolve against.
    /// The capture layer is expected to persist fully-qualified URLs;
    /// the base is the explicit fallback for entries that did not.
    pub fn new(
        store: Arc<dyn QueueStore>,
        transport: Arc<dyn Transport>,
        sink: Arc<dyn EventSink>,
        base_url: Url,
    ) -> Self {
        Self {
            store,
            transport,
            sink,
            base_url,
        }
    }

    /// Attempt delivery of one entry.
    ///
    /// `Err` means the engine itself failed (storage); the entry is left
    /// queued and the caller decides whether to continue the pass. A
    /// returned [`Outcome`] means the attempt ran to a classification and
    /// its action has already been applied.
    pub async fn attempt(&self, entry: &PendingRequest) -> Result<Outcome, SyncError> {
        let outbound = match self.prepare(entry) {
            Ok(outbound) => outbound,
            // Malformed entries are discarded rather than retried, so one
            // poison entry can never block the queue forever.
            Err(reason) => return self.discard(entry, reason).await,
        };

        match self.transport.send(&outbound).await {
            Ok(reply) => {
                let outcome = Outcome::from_status(reply.status);
                match &outcome {
                    Outcome::Success { status } => {
                        self.store.remove(entry.captured_at).await?;
                        tracing::debug!(
                            captured_at = %entry.captured_at,
                            status = *status as i64,
                            "delivered"
                        );
                        self.sink
                            .emit(ClientMessage::SyncCompleted {
                                path: entry.target_path.clone(),
                            })
                            .await;
                    }
                    Outcome::PermanentFailure { reason } => {
                        self.store.remove(entry.captured_at).await?;
                        tracing::warn!(
                            captured_at = %entry.captured_at,
                            %reason,
                            "rejected by server, dropped"
                        );
                    }
                    Outcome::TransientFailure { reason } => {
                        tracing::debug!(
                            captured_at = %entry.captured_at,
                            %reason,
                            "deferred to next pass"
                        );
                    }
                }
                Ok(outcome)
            }
            Err(err) if err.is_permanent() => self.discard(entry, err.to_string()).await,
            Err(err) => {
                tracing::debug!(
                    captured_at = %entry.captured_at,
                    error = %err,
                    "no response, deferred to next pass"
                );
                Ok(Outcome::TransientFailure {
                    reason: err.to_string(),
                })
            }
        }
    }

    async fn discard(&self, entry: &PendingRequest, reason: String) -> Result<Outcome, SyncError> {
        self.store.remove(entry.captured_at).await?;
        tracing::warn!(captured_at = %entry.captured_at, %reason, "malformed entry, dropped");
        Ok(Outcome::PermanentFailure { reason })
    }

    fn prepare(&self, entry: &PendingRequest) -> Result<OutboundRequest, String> {
        // An absolute target is used verbatim; a relative one resolves
        // against the configured base origin.
        let url = match Url::parse(&entry.target_path) {
            Ok(url) => url,
            Err(_) => self
                .base_url
                .join(&entry.target_path)
                .map_err(|e| format!("unresolvable target {:?}: {e}", entry.target_path))?,
        };

        let mut headers = entry.headers.clone().unwrap_or_default();
        let has_content_type = headers.keys().any(|k| k.eq_ignore_ascii_case("content-type"));
        if !has_content_type {
            headers.insert("content-type".to_string(), "application/json".to_string());
        }

        Ok(OutboundRequest {
            url,
            method: entry.method.clone(),
            headers,
            body: entry.body.clone(),
        })
    }
}
