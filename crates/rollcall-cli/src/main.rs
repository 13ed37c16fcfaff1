use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::time::{Duration, sleep};
use url::Url;

use rollcall_core::domain::PendingRequest;
use rollcall_core::impls::{BroadcastSink, MemoryStore, SqliteStore};
use rollcall_core::ports::{
    MonotonicStamper, OutboundRequest, QueueStore, SystemClock, Transport, TransportError,
    TransportReply,
};
use rollcall_core::{DeliveryHandler, SyncCoordinator, SyncError};

/// Stand-in for a flaky attendance API: answers 503 a few times before
/// letting a request through, so the demo shows entries surviving passes.
struct FlakyServer {
    remaining_failures: AtomicU32,
}

impl FlakyServer {
    fn new(n: u32) -> Self {
        Self {
            remaining_failures: AtomicU32::new(n),
        }
    }
}

#[async_trait]
impl Transport for FlakyServer {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportReply, TransportError> {
        let left = self.remaining_failures.load(Ordering::Relaxed);
        if left > 0 {
            self.remaining_failures.fetch_sub(1, Ordering::Relaxed);
            println!("  -> {} {} : 503 (left={left})", request.method, request.url);
            return Ok(TransportReply { status: 503 });
        }
        println!("  -> {} {} : 200", request.method, request.url);
        Ok(TransportReply { status: 200 })
    }
}

#[tokio::main]
async fn main() -> Result<(), SyncError> {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    // (A) Durable store: SQLite when a path is given, in-memory otherwise.
    let store: Arc<dyn QueueStore> = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(%path, "using sqlite queue store");
            Arc::new(SqliteStore::open_path(&path)?)
        }
        None => {
            tracing::info!("using in-memory queue store");
            Arc::new(MemoryStore::new())
        }
    };
    store.open().await?;

    // (B) Capture side: two attendance actions queued "while offline".
    let stamper = MonotonicStamper::new(Arc::new(SystemClock));
    store
        .insert(PendingRequest::new(
            stamper.next(),
            "POST",
            "/attendance/check-in",
            serde_json::json!({"employeeId": 42, "site": "HQ"}),
        ))
        .await?;
    store
        .insert(PendingRequest::new(
            stamper.next(),
            "POST",
            "/attendance/check-out",
            serde_json::json!({"employeeId": 42, "site": "HQ"}),
        ))
        .await?;
    println!("enqueued {} pending requests", store.list_all().await?.len());

    // (C) UI side: one subscriber printing completion messages.
    let sink = Arc::new(BroadcastSink::new(16));
    let mut events = sink.subscribe();
    let ui = tokio::spawn(async move {
        while let Ok(msg) = events.recv().await {
            println!("ui received: {}", serde_json::to_string(&msg).unwrap());
        }
    });

    // (D) Sync engine wiring; the server fails twice before recovering.
    let handler = DeliveryHandler::new(
        Arc::clone(&store),
        Arc::new(FlakyServer::new(2)),
        sink,
        Url::parse("https://attendance.example.com").expect("static url"),
    );
    let coordinator = SyncCoordinator::new(Arc::clone(&store), handler);

    // (E) Fire a trigger per "reconnect" until the queue drains.
    loop {
        coordinator.trigger().await;
        let pending = store.list_all().await?.len();
        println!("pass done, {pending} still pending");
        if pending == 0 {
            break;
        }
        sleep(Duration::from_millis(200)).await;
    }

    ui.abort();
    Ok(())
}
