//! Error taxonomy for media requests

use hyper::StatusCode;
use std::io;
use thiserror::Error;

/// Terminal failure of a single media request. None of these are retried server-side.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Missing or unusable path segments
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resolved path escapes the storage root
    #[error("path escapes the storage root")]
    Forbidden,

    /// No regular file at the resolved path
    #[error("file not found")]
    NotFound,

    /// Range header that cannot be served against a file of `size` bytes
    #[error("range not satisfiable for {size} byte file")]
    RangeNotSatisfiable { size: u64 },

    /// I/O failure after validation passed
    #[error("i/o error: {0}")]
    Internal(#[from] io::Error),
}

impl StreamError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::RangeNotSatisfiable { .. } => StatusCode::RANGE_NOT_SATISFIABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client. Never includes filesystem paths.
    pub fn public_message(&self) -> &str {
        match self {
            Self::BadRequest(reason) => reason,
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::RangeNotSatisfiable { .. } => "Range Not Satisfiable",
            Self::Internal(_) => "Internal Server Error",
        }
    }
}
