//! HTTP cache control module
//!
//! Provides validators derived from file metadata and conditional request handling.
//! Media files are streamed, so the `ETag` is built from size and mtime rather than content.

use chrono::{DateTime, Utc};
use std::fs::Metadata;
use std::time::{SystemTime, UNIX_EPOCH};

/// `ETag` / `Last-Modified` pair for one version of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    pub etag: String,
    pub last_modified: Option<String>,
}

impl Validator {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self::new(metadata.len(), metadata.modified().ok())
    }

    /// Build a weak validator, e.g. `W/"1f4-17c8a3b2e0"`
    pub fn new(size: u64, modified: Option<SystemTime>) -> Self {
        let mtime_nanos = modified
            .and_then(|m| m.duration_since(UNIX_EPOCH).ok())
            .map_or(0, |d| d.as_nanos());
        Self {
            etag: format!("W/\"{size:x}-{mtime_nanos:x}\""),
            last_modified: modified.map(format_http_date),
        }
    }
}

/// Format a timestamp as an IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`)
pub fn format_http_date(time: SystemTime) -> String {
    let time: DateTime<Utc> = time.into();
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Supports:
/// - Single `ETag`: `"abc123"`
/// - Multiple `ETags`: `"abc123", "def456"`
/// - Wildcard: `*`
///
/// Comparison is weak, a `W/` prefix on either side is ignored (RFC 7232 §3.2).
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    let ours = strip_weak(etag);
    if_none_match.is_some_and(|client_etag| {
        client_etag.split(',').map(str::trim).any(|e| {
            e == "*" || strip_weak(e) == ours
        })
    })
}

fn strip_weak(etag: &str) -> &str {
    etag.strip_prefix("W/").unwrap_or(etag)
}
