//! Sync coordinator: drains the queue in capture order, one entry at a
//! time, one pass at a time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use crate::delivery::DeliveryHandler;
use crate::observability::PassSummary;
use crate::ports::QueueStore;

/// Runs sync passes over the durable queue.
///
/// Invariant: at most one pass is in flight. A trigger arriving while a
/// pass runs is coalesced — the running pass loops once more, so the late
/// trigger is never lost and two passes never interleave reads and
/// deletes on the same store.
pub struct SyncCoordinator {
    store: Arc<dyn QueueStore>,
    handler: DeliveryHandler,
    pass_gate: Mutex<()>,
    rerun: AtomicBool,
}

impl SyncCoordinator {
    pub fn new(store: Arc<dyn QueueStore>, handler: DeliveryHandler) -> Self {
        Self {
            store,
            handler,
            pass_gate: Mutex::new(()),
            rerun: AtomicBool::new(false),
        }
    }

    /// Run a sync pass now.
    ///
    /// The no-argument, no-return verb invoked by a connectivity-restored
    /// signal or a manual retry action. Outcomes are observable only
    /// through the queue state and the client messages.
    pub async fn trigger(&self) {
        let Ok(_guard) = self.pass_gate.try_lock() else {
            // A pass is running; fold this trigger into it.
            self.rerun.store(true, Ordering::SeqCst);
            return;
        };

        loop {
            self.run_pass().await;
            if !self.rerun.swap(false, Ordering::SeqCst) {
                break;
            }
        }
    }

    /// One pass: open the store, list everything, attempt each entry
    /// sequentially in ascending capture order.
    ///
    /// Entries are never dispatched concurrently — attendance events for
    /// one user must replay chronologically, and a sequential drain does
    /// not burst the server after a long offline stretch.
    async fn run_pass(&self) {
        if let Err(err) = self.store.open().await {
            tracing::warn!(error = %err, "queue store unavailable, pass aborted");
            return;
        }

        let entries = match self.store.list_all().await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(error = %err, "listing pending entries failed, pass aborted");
                return;
            }
        };
        if entries.is_empty() {
            tracing::debug!("no pending entries");
            return;
        }

        let mut summary = PassSummary::default();
        for entry in &entries {
            match self.handler.attempt(entry).await {
                Ok(outcome) => summary.record(&outcome),
                // One bad entry must never block delivery of the rest.
                Err(err) => {
                    summary.faulted += 1;
                    tracing::warn!(
                        captured_at = %entry.captured_at,
                        error = %err,
                        "attempt faulted, continuing pass"
                    );
                }
            }
        }

        tracing::info!(
            total = entries.len(),
            delivered = summary.delivered,
            discarded = summary.discarded,
            deferred = summary.deferred,
            faulted = summary.faulted,
            "sync pass finished"
        );
    }
}
