//! Queue entry: one attendance action awaiting delivery.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capture timestamp in Unix milliseconds.
///
/// Doubles as the primary key of the durable queue and as the FIFO
/// ordering key: attendance events for one user must replay in the order
/// they were captured, and `Ord` on the raw milliseconds gives exactly
/// that.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CapturedAt(i64);

impl CapturedAt {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CapturedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One serialized attendance action awaiting delivery.
///
/// Entries are inserted whole by the capture layer and removed whole by
/// the delivery handler; nothing ever updates an entry in place. An entry
/// exists in the store if and only if it has not reached a terminal
/// outcome yet.
///
/// Field names serialize in camelCase to match the persisted record
/// layout (`capturedAt`, `targetPath`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRequest {
    /// Unique monotonic capture timestamp; primary and ordering key.
    pub captured_at: CapturedAt,

    /// Fully-qualified URL, or a server-relative path resolved against
    /// the configured base origin at delivery time.
    pub target_path: String,

    /// HTTP verb.
    pub method: String,

    /// Optional extra headers. When absent the delivery handler supplies
    /// a JSON content type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,

    /// The attendance action payload, kept opaque.
    pub body: serde_json::Value,
}

impl PendingRequest {
    pub fn new(
        captured_at: CapturedAt,
        method: impl Into<String>,
        target_path: impl Into<String>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            captured_at,
            target_path: target_path.into(),
            method: method.into(),
            headers: None,
            body,
        }
    }

    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_field_names() {
        let req = PendingRequest::new(
            CapturedAt::from_millis(1_700_000_000_000),
            "POST",
            "/attendance/check-in",
            serde_json::json!({"employeeId": 42}),
        );

        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["capturedAt"], 1_700_000_000_000_i64);
        assert_eq!(v["targetPath"], "/attendance/check-in");
        assert_eq!(v["method"], "POST");
        assert!(v.get("headers").is_none());
        assert_eq!(v["body"]["employeeId"], 42);
    }

    #[test]
    fn roundtrips_headers() {
        let mut headers = BTreeMap::new();
        headers.insert("authorization".to_string(), "Bearer t".to_string());
        let req = PendingRequest::new(
            CapturedAt::from_millis(1),
            "POST",
            "https://api.example.com/attendance/check-out",
            serde_json::json!({}),
        )
        .with_headers(headers);

        let s = serde_json::to_string(&req).unwrap();
        let back: PendingRequest = serde_json::from_str(&s).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn captured_at_orders_by_millis() {
        let earlier = CapturedAt::from_millis(10);
        let later = CapturedAt::from_millis(11);
        assert!(earlier < later);
    }
}
