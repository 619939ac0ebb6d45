// Application state module
// Everything a request handler needs, built once at startup and never mutated

use std::io;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use super::types::Config;
use crate::http::MimeTable;
use crate::streamer::{RangeFileStreamer, StorageRoot, StreamerOptions};

/// Application state
pub struct AppState {
    pub config: Config,
    pub streamer: RangeFileStreamer,
    /// Mount prefix without a trailing slash, e.g. `/api/uploads`
    pub mount_prefix: String,
    pub active_connections: Arc<AtomicUsize>,
}

impl AppState {
    /// Create `AppState`, canonicalizing the storage root
    ///
    /// Fails if the storage root does not exist or is not a directory.
    pub fn new(config: Config) -> io::Result<Self> {
        let root = StorageRoot::open(&config.storage.root)?;
        let mime = MimeTable::default().with_overrides(&config.storage.mime_overrides);
        let options = StreamerOptions {
            chunk_size: config.storage.chunk_size,
            cache_control: config.storage.cache_control.clone(),
        };
        let mount_prefix = config.storage.mount_prefix.trim_end_matches('/').to_string();

        Ok(Self {
            streamer: RangeFileStreamer::new(root, mime, options),
            mount_prefix,
            config,
            active_connections: Arc::new(AtomicUsize::new(0)),
        })
    }
}
