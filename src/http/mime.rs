//! MIME type detection module
//!
//! Maps lowercase file extensions to Content-Type values. The table is built once
//! and only read afterwards; extra entries can be layered on for config overrides.

use std::collections::HashMap;

/// Content-Type for anything the table does not know
pub const OCTET_STREAM: &str = "application/octet-stream";

const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    // Audio
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("oga", "audio/ogg"),
    ("opus", "audio/opus"),
    ("m4a", "audio/mp4"),
    ("aac", "audio/aac"),
    ("flac", "audio/flac"),
    ("weba", "audio/webm"),
    // Images
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("avif", "image/avif"),
    ("ico", "image/x-icon"),
    // Video
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("ogv", "video/ogg"),
    ("mov", "video/quicktime"),
    // Documents
    ("pdf", "application/pdf"),
    ("json", "application/json"),
    ("txt", "text/plain; charset=utf-8"),
    ("zip", "application/zip"),
];

/// Frozen extension -> MIME lookup table
#[derive(Debug, Clone)]
pub struct MimeTable {
    entries: HashMap<String, String>,
}

impl MimeTable {
    /// Table with no entries; every lookup falls back to `application/octet-stream`
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace an entry. The extension is stored lowercase without a leading dot.
    #[must_use]
    pub fn with_entry(mut self, extension: &str, mime: &str) -> Self {
        self.entries.insert(normalize(extension), mime.to_string());
        self
    }

    /// Apply a set of overrides, e.g. from configuration
    #[must_use]
    pub fn with_overrides<'a, I>(self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        overrides
            .into_iter()
            .fold(self, |table, (ext, mime)| table.with_entry(ext, mime))
    }

    /// Get MIME Content-Type based on file extension
    ///
    /// # Examples
    /// ```
    /// use media_streamer::http::mime::MimeTable;
    ///
    /// let table = MimeTable::default();
    /// assert_eq!(table.lookup(Some("MP3")), "audio/mpeg");
    /// assert_eq!(table.lookup(Some("xyz")), "application/octet-stream");
    /// assert_eq!(table.lookup(None), "application/octet-stream");
    /// ```
    pub fn lookup(&self, extension: Option<&str>) -> &str {
        extension
            .and_then(|ext| self.entries.get(&normalize(ext)))
            .map_or(OCTET_STREAM, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        DEFAULT_ENTRIES
            .iter()
            .fold(Self::empty(), |table, (ext, mime)| table.with_entry(ext, mime))
    }
}

fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}
