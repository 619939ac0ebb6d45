//! HTTP Range request parsing module
//!
//! Single-range `bytes` parsing for seekable playback and resumable downloads (RFC 7233).

/// Parsed Range request, both ends inclusive and already clamped to the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRequest {
    /// Start byte position
    pub start: u64,
    /// End byte position (inclusive)
    pub end: u64,
}

impl RangeRequest {
    /// Number of bytes covered by the range
    #[inline]
    pub const fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` header value for this range
    pub fn content_range(&self, file_size: u64) -> String {
        format!("bytes {}-{}/{file_size}", self.start, self.end)
    }
}

/// Range header parse result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeParseResult {
    /// No Range header
    None,
    /// Valid range request
    Valid(RangeRequest),
    /// Well-formed but outside the file (start >= `file_size`, start > end, empty suffix)
    NotSatisfiable,
    /// Not a single `bytes` range we can parse
    Malformed,
}

/// Parse HTTP Range header (single range only, bytes unit)
///
/// Supported formats:
/// - `bytes=start-end` - Specific range, end clamped to the last byte
/// - `bytes=start-` - From start to end of file
/// - `bytes=-suffix` - Last suffix bytes
///
/// # Examples
/// ```
/// use media_streamer::http::range::{parse_range_header, RangeParseResult};
///
/// let result = parse_range_header(Some("bytes=0-99"), 1000);
/// assert!(matches!(result, RangeParseResult::Valid(_)));
///
/// let result = parse_range_header(None, 1000);
/// assert!(matches!(result, RangeParseResult::None));
///
/// let result = parse_range_header(Some("bytes=0-9,20-29"), 1000);
/// assert!(matches!(result, RangeParseResult::Malformed));
/// ```
pub fn parse_range_header(range_header: Option<&str>, file_size: u64) -> RangeParseResult {
    let Some(header) = range_header else {
        return RangeParseResult::None;
    };

    // Range units are case-insensitive
    let Some(ranges) = header
        .trim()
        .split_once('=')
        .and_then(|(unit, ranges)| unit.trim().eq_ignore_ascii_case("bytes").then_some(ranges))
    else {
        return RangeParseResult::Malformed;
    };

    // Multi-range responses are not supported
    if ranges.contains(',') {
        return RangeParseResult::Malformed;
    }

    let Some((start_str, end_str)) = ranges.split_once('-') else {
        return RangeParseResult::Malformed;
    };

    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        return parse_suffix_range(end_str, file_size);
    }

    parse_standard_range(start_str, end_str, file_size)
}

/// Parse suffix range (e.g., "-500")
fn parse_suffix_range(suffix_str: &str, file_size: u64) -> RangeParseResult {
    let Some(suffix) = parse_position(suffix_str) else {
        return RangeParseResult::Malformed;
    };

    if suffix == 0 || file_size == 0 {
        return RangeParseResult::NotSatisfiable;
    }

    // Suffix larger than the file selects the whole file
    RangeParseResult::Valid(RangeRequest {
        start: file_size.saturating_sub(suffix),
        end: file_size - 1,
    })
}

/// Parse standard range (e.g., "0-99" or "100-")
fn parse_standard_range(start_str: &str, end_str: &str, file_size: u64) -> RangeParseResult {
    let Some(start) = parse_position(start_str) else {
        return RangeParseResult::Malformed;
    };

    let end = if end_str.is_empty() {
        None
    } else {
        let Some(e) = parse_position(end_str) else {
            return RangeParseResult::Malformed;
        };
        Some(e)
    };

    if start >= file_size {
        return RangeParseResult::NotSatisfiable;
    }

    let last = file_size - 1;
    let end = end.map_or(last, |e| e.min(last));
    if start > end {
        return RangeParseResult::NotSatisfiable;
    }

    RangeParseResult::Valid(RangeRequest { start, end })
}

/// Digits only: `u64::from_str` would also accept a leading `+`
fn parse_position(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
