//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from file resolution
//! and request routing.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use mime::MimeTable;
pub use range::{parse_range_header, RangeParseResult, RangeRequest};
pub use response::{
    build_304_response, build_404_response, build_405_response, build_error_response,
    build_health_response, build_options_response, ResponseBody,
};
