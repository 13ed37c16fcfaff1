//! SQLite-backed queue store.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};

use crate::domain::{CapturedAt, PendingRequest};
use crate::error::SyncError;
use crate::ports::QueueStore;

/// Schema version this build requires. Bumps are additive-only: version 1
/// creates the collection and its primary key; later bumps that add
/// optional fields need no structural migration.
const SCHEMA_VERSION: i32 = 1;

/// Durable `QueueStore` on SQLite.
///
/// rusqlite is synchronous, so every call runs on the blocking pool with
/// the connection behind a `std::sync::Mutex`. WAL mode keeps the single
/// writer cheap.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, SyncError> {
        let conn = Connection::open(path).map_err(SyncError::storage)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self, SyncError> {
        let conn = Connection::open_in_memory().map_err(SyncError::storage)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, SyncError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, SyncError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| SyncError::Storage("connection mutex poisoned".to_string()))?;
            f(&*guard)
        })
        .await
        .map_err(|e| SyncError::Storage(format!("blocking task: {e}")))?
    }

    fn init_schema(conn: &Connection) -> Result<(), SyncError> {
        conn.execute_batch(
            r#"
PRAGMA journal_mode=WAL;

CREATE TABLE IF NOT EXISTS pending_requests (
    captured_at INTEGER PRIMARY KEY,
    target_path TEXT NOT NULL,
    method      TEXT NOT NULL,
    headers     TEXT,          -- JSON object (nullable)
    body        TEXT NOT NULL  -- JSON
);

CREATE TABLE IF NOT EXISTS sync_kv (
    k TEXT PRIMARY KEY,
    v TEXT NOT NULL
);
"#,
        )
        .map_err(SyncError::storage)?;

        conn.execute(
            "INSERT INTO sync_kv(k,v) VALUES('schema_version','1')
             ON CONFLICT(k) DO NOTHING",
            [],
        )
        .map_err(SyncError::storage)?;

        let current = Self::stored_version(conn)?;
        if current < SCHEMA_VERSION {
            // Stepwise additive migrations go here as the schema grows.
            conn.execute(
                "INSERT INTO sync_kv(k,v) VALUES('schema_version',?1)
                 ON CONFLICT(k) DO UPDATE SET v=excluded.v",
                params![SCHEMA_VERSION.to_string()],
            )
            .map_err(SyncError::storage)?;
        }
        Ok(())
    }

    fn stored_version(conn: &Connection) -> Result<i32, SyncError> {
        let v: Option<String> = conn
            .query_row("SELECT v FROM sync_kv WHERE k='schema_version'", [], |r| {
                r.get(0)
            })
            .optional()
            .map_err(SyncError::storage)?;
        Ok(v.and_then(|s| s.parse::<i32>().ok()).unwrap_or(1))
    }

    /// Current schema version, read back from `sync_kv`.
    pub async fn schema_version(&self) -> Result<i32, SyncError> {
        self.with_conn(Self::stored_version).await
    }
}

#[async_trait]
impl QueueStore for SqliteStore {
    async fn open(&self) -> Result<(), SyncError> {
        self.with_conn(Self::init_schema).await
    }

    async fn insert(&self, request: PendingRequest) -> Result<(), SyncError> {
        self.with_conn(move |conn| {
            let headers = request
                .headers
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?;
            let body = serde_json::to_string(&request.body)?;

            let result = conn.execute(
                "INSERT INTO pending_requests (captured_at, target_path, method, headers, body)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    request.captured_at.as_millis(),
                    request.target_path,
                    request.method,
                    headers,
                    body,
                ],
            );
            match result {
                Ok(_) => Ok(()),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Err(SyncError::DuplicateKey(request.captured_at))
                }
                Err(e) => Err(SyncError::storage(e)),
            }
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<PendingRequest>, SyncError> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT captured_at, target_path, method, headers, body
                     FROM pending_requests
                     ORDER BY captured_at ASC",
                )
                .map_err(SyncError::storage)?;

            let rows = stmt
                .query_map([], |r| {
                    let captured_at: i64 = r.get(0)?;
                    let target_path: String = r.get(1)?;
                    let method: String = r.get(2)?;
                    let headers: Option<String> = r.get(3)?;
                    let body: String = r.get(4)?;
                    Ok((captured_at, target_path, method, headers, body))
                })
                .map_err(SyncError::storage)?;

            let mut out = Vec::new();
            for row in rows {
                let (captured_at, target_path, method, headers, body) =
                    row.map_err(SyncError::storage)?;
                out.push(PendingRequest {
                    captured_at: CapturedAt::from_millis(captured_at),
                    target_path,
                    method,
                    headers: headers.as_deref().map(serde_json::from_str).transpose()?,
                    body: serde_json::from_str(&body)?,
                });
            }
            Ok(out)
        })
        .await
    }

    async fn remove(&self, key: CapturedAt) -> Result<(), SyncError> {
        self.with_conn(move |conn| {
            // Zero affected rows is fine: idempotent delete.
            conn.execute(
                "DELETE FROM pending_requests WHERE captured_at = ?1",
                params![key.as_millis()],
            )
            .map_err(SyncError::storage)?;
            Ok(())
        })
        .await
    }
}
