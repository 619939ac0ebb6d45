//! Request handler module
//!
//! Responsible for request routing dispatch: health probe, preflight, and
//! handing media paths to the streamer.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
