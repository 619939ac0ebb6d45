//! HTTP media server that streams files from a storage root with byte-range support.
//!
//! The core is [`streamer::RangeFileStreamer`]: it maps request path segments
//! onto a confined storage directory and answers with full (200) or partial
//! (206) content, streaming the file in bounded chunks.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod streamer;
