//! Range-aware media file streaming
//!
//! Resolves a requested path under the storage root, picks the byte window to send
//! and builds a response whose body streams the file lazily. The status line is only
//! decided after the file has been opened, stat-ed and positioned, so an I/O failure
//! always turns into a clean error response.

mod body;
pub mod error;
pub mod path;

pub use body::ActiveStreamGuard;
pub use error::StreamError;
pub use path::{normalize_segments, ResolvedPath, StorageRoot};

use crate::http::cache::{check_etag_match, Validator};
use crate::http::response::{build_304_response, build_error_response, empty_body};
use crate::http::{parse_range_header, MimeTable, RangeParseResult, RangeRequest, ResponseBody};
use crate::logger;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use std::io::{self, SeekFrom};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncSeekExt;

/// Default read size for body chunks
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Default `Cache-Control`: uploaded files never change once visible
pub const DEFAULT_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Tunables that do not affect which bytes are served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamerOptions {
    pub chunk_size: usize,
    pub cache_control: String,
}

impl Default for StreamerOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            cache_control: DEFAULT_CACHE_CONTROL.to_string(),
        }
    }
}

/// Request headers the streamer cares about
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestHeaders<'a> {
    pub range: Option<&'a str>,
    pub if_none_match: Option<&'a str>,
    pub is_head: bool,
}

/// An opened regular file under the root, ready to be streamed
#[derive(Debug)]
pub struct MediaFile {
    file: File,
    size: u64,
    content_type: String,
    file_name: String,
    validator: Validator,
}

impl MediaFile {
    pub const fn size(&self) -> u64 {
        self.size
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub const fn validator(&self) -> &Validator {
        &self.validator
    }
}

/// Serves files below one storage root, honoring single byte ranges
#[derive(Debug)]
pub struct RangeFileStreamer {
    root: StorageRoot,
    mime: MimeTable,
    options: StreamerOptions,
    active_streams: Arc<AtomicUsize>,
}

impl RangeFileStreamer {
    pub fn new(root: StorageRoot, mime: MimeTable, options: StreamerOptions) -> Self {
        Self {
            root,
            mime,
            options: StreamerOptions {
                chunk_size: options.chunk_size.max(1),
                ..options
            },
            active_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub const fn root(&self) -> &StorageRoot {
        &self.root
    }

    /// Number of response bodies currently holding a file open
    pub fn active_streams(&self) -> usize {
        self.active_streams.load(Ordering::SeqCst)
    }

    /// Serve `segments`, honoring an optional raw `Range` header value
    ///
    /// Always produces exactly one response: 200/206 on success, or a JSON error.
    pub async fn serve<S: AsRef<str>>(
        &self,
        segments: &[S],
        range_header: Option<&str>,
    ) -> Response<ResponseBody> {
        let headers = RequestHeaders {
            range: range_header,
            ..RequestHeaders::default()
        };
        self.serve_request(segments, &headers).await
    }

    /// Like [`serve`](Self::serve), also handling `HEAD` and `If-None-Match`
    pub async fn serve_request<S: AsRef<str>>(
        &self,
        segments: &[S],
        headers: &RequestHeaders<'_>,
    ) -> Response<ResponseBody> {
        match self.try_serve(segments, headers).await {
            Ok(response) => response,
            Err(err) => self.error_response(segments, &err),
        }
    }

    /// Resolve, open and stat the file behind `segments`
    pub async fn open<S: AsRef<str>>(&self, segments: &[S]) -> Result<MediaFile, StreamError> {
        let resolved = self.root.resolve(segments).await?;

        // `a.mp3/` names a directory, and only regular files are served
        if names_directory(segments) {
            return Err(StreamError::NotFound);
        }

        // Opening a FIFO or device would block until a writer shows up
        let metadata = tokio::fs::metadata(&resolved.canonical)
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => StreamError::NotFound,
                _ => StreamError::Internal(e),
            })?;
        if !metadata.is_file() {
            return Err(StreamError::NotFound);
        }

        let file = File::open(&resolved.canonical)
            .await
            .map_err(|e| match e.kind() {
                // Removed between resolution and open
                io::ErrorKind::NotFound => StreamError::NotFound,
                _ => StreamError::Internal(e),
            })?;
        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(StreamError::NotFound);
        }

        let extension = resolved
            .requested
            .extension()
            .and_then(|e| e.to_str());
        let file_name = resolved
            .requested
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(MediaFile {
            file,
            size: metadata.len(),
            content_type: self.mime.lookup(extension).to_string(),
            file_name,
            validator: Validator::from_metadata(&metadata),
        })
    }

    async fn try_serve<S: AsRef<str>>(
        &self,
        segments: &[S],
        headers: &RequestHeaders<'_>,
    ) -> Result<Response<ResponseBody>, StreamError> {
        let media = self.open(segments).await?;

        // Validator matches the whole representation, so any range is moot
        if check_etag_match(headers.if_none_match, &media.validator.etag) {
            return Ok(build_304_response(
                &media.validator.etag,
                &self.options.cache_control,
            ));
        }

        let range = select_range(headers.range, media.size)?;
        self.respond(media, range, headers.is_head).await
    }

    async fn respond(
        &self,
        mut media: MediaFile,
        range: Option<RangeRequest>,
        is_head: bool,
    ) -> Result<Response<ResponseBody>, StreamError> {
        let (status, start, length) = match range {
            Some(r) => (StatusCode::PARTIAL_CONTENT, r.start, r.len()),
            None => (StatusCode::OK, 0, media.size),
        };

        let mut builder = Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, media.content_type.as_str())
            .header(header::CONTENT_LENGTH, length)
            .header(header::ACCEPT_RANGES, "bytes")
            .header(header::CACHE_CONTROL, self.options.cache_control.as_str())
            .header(header::ETAG, media.validator.etag.as_str())
            .header(header::CONTENT_DISPOSITION, content_disposition(&media.file_name));
        if let Some(r) = range {
            builder = builder.header(header::CONTENT_RANGE, r.content_range(media.size));
        }
        if let Some(last_modified) = media.validator.last_modified.as_deref() {
            builder = builder.header(header::LAST_MODIFIED, last_modified);
        }

        let body = if is_head {
            empty_body()
        } else {
            if start > 0 {
                media.file.seek(SeekFrom::Start(start)).await?;
            }
            let guard = ActiveStreamGuard::new(&self.active_streams);
            body::file_body(media.file, length, self.options.chunk_size, guard)
        };

        builder.body(body).map_err(|e| StreamError::Internal(io::Error::other(e)))
    }

    fn error_response<S: AsRef<str>>(
        &self,
        segments: &[S],
        err: &StreamError,
    ) -> Response<ResponseBody> {
        match err {
            StreamError::Internal(_) => logger::log_error(&format!(
                "Failed to serve '{}' from '{}': {err}",
                display_segments(segments),
                self.root.path().display()
            )),
            StreamError::Forbidden => logger::log_warning(&format!(
                "Path traversal attempt blocked: '{}'",
                display_segments(segments)
            )),
            _ => {}
        }

        let mut response = build_error_response(err.status(), err.public_message());
        if let StreamError::RangeNotSatisfiable { size } = err {
            if let Ok(value) = HeaderValue::from_str(&format!("bytes */{size}")) {
                response.headers_mut().insert(header::CONTENT_RANGE, value);
            }
        }
        response
    }
}

/// Apply the range policy: malformed and unsatisfiable headers are both rejected
fn select_range(header: Option<&str>, size: u64) -> Result<Option<RangeRequest>, StreamError> {
    match parse_range_header(header, size) {
        RangeParseResult::None => Ok(None),
        RangeParseResult::Valid(range) => Ok(Some(range)),
        RangeParseResult::NotSatisfiable | RangeParseResult::Malformed => {
            Err(StreamError::RangeNotSatisfiable { size })
        }
    }
}

fn names_directory<S: AsRef<str>>(segments: &[S]) -> bool {
    segments.len() > 1 && matches!(segments.last().map(AsRef::as_ref), Some("" | "."))
}

/// `inline; filename="..."`, with an RFC 5987 `filename*` when the name is not ASCII
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if file_name.is_ascii() {
        format!("inline; filename=\"{fallback}\"")
    } else {
        format!(
            "inline; filename=\"{fallback}\"; filename*=UTF-8''{}",
            urlencoding::encode(file_name)
        )
    }
}

fn display_segments<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/")
        .escape_debug()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::body::Body;
    use std::path::Path;
    use tempfile::TempDir;

    /// Deterministic, non-repeating-at-small-periods test content
    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| u8::try_from(i % 251).unwrap()).collect()
    }

    fn write(root: &Path, rel: &str, data: &[u8]) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, data).unwrap();
    }

    fn streamer(dir: &TempDir) -> RangeFileStreamer {
        RangeFileStreamer::new(
            StorageRoot::open(dir.path()).unwrap(),
            MimeTable::default(),
            StreamerOptions {
                chunk_size: 4096,
                ..StreamerOptions::default()
            },
        )
    }

    fn header_str<'a>(response: &'a Response<ResponseBody>, name: header::HeaderName) -> &'a str {
        response.headers()[name].to_str().unwrap()
    }

    async fn body_bytes(response: Response<ResponseBody>) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec()
    }

    #[tokio::test]
    async fn test_full_file() {
        let dir = TempDir::new().unwrap();
        let data = pattern(10_000);
        write(dir.path(), "artists/7/track.mp3", &data);
        let s = streamer(&dir);

        let response = s.serve(&["artists", "7", "track.mp3"], None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_str(&response, header::CONTENT_LENGTH), "10000");
        assert_eq!(header_str(&response, header::ACCEPT_RANGES), "bytes");
        assert_eq!(header_str(&response, header::CONTENT_TYPE), "audio/mpeg");
        assert_eq!(
            header_str(&response, header::CACHE_CONTROL),
            "public, max-age=31536000, immutable"
        );
        assert_eq!(
            header_str(&response, header::CONTENT_DISPOSITION),
            "inline; filename=\"track.mp3\""
        );
        assert!(response.headers().get(header::CONTENT_RANGE).is_none());
        assert_eq!(body_bytes(response).await, data);
    }

    #[tokio::test]
    async fn test_range_slices() {
        let dir = TempDir::new().unwrap();
        let data = pattern(9_001);
        write(dir.path(), "a.flac", &data);
        let s = streamer(&dir);

        for (start, end) in [(0, 0), (0, 4095), (1, 4096), (4000, 8999), (9000, 9000)] {
            let range = format!("bytes={start}-{end}");
            let response = s.serve(&["a.flac"], Some(&range)).await;
            assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT, "{range}");
            assert_eq!(
                header_str(&response, header::CONTENT_LENGTH),
                (end - start + 1).to_string()
            );
            assert_eq!(
                header_str(&response, header::CONTENT_RANGE),
                format!("bytes {start}-{end}/9001")
            );
            assert_eq!(body_bytes(response).await, &data[start..=end], "{range}");
        }
    }

    #[tokio::test]
    async fn test_open_ended_and_clamped_range() {
        let dir = TempDir::new().unwrap();
        let data = pattern(1000);
        write(dir.path(), "a.wav", &data);
        let s = streamer(&dir);

        let response = s.serve(&["a.wav"], Some("bytes=900-")).await;
        assert_eq!(header_str(&response, header::CONTENT_RANGE), "bytes 900-999/1000");
        assert_eq!(body_bytes(response).await, &data[900..]);

        let response = s.serve(&["a.wav"], Some("bytes=990-5000")).await;
        assert_eq!(header_str(&response, header::CONTENT_RANGE), "bytes 990-999/1000");
        assert_eq!(header_str(&response, header::CONTENT_LENGTH), "10");
        assert_eq!(body_bytes(response).await, &data[990..]);

        let response = s.serve(&["a.wav"], Some("bytes=-100")).await;
        assert_eq!(header_str(&response, header::CONTENT_RANGE), "bytes 900-999/1000");
        assert_eq!(body_bytes(response).await, &data[900..]);
    }

    #[tokio::test]
    async fn test_adjacent_ranges_concatenate() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "mix.ogg", &pattern(5000));
        let s = streamer(&dir);

        let mut joined = body_bytes(s.serve(&["mix.ogg"], Some("bytes=0-999")).await).await;
        joined.extend(body_bytes(s.serve(&["mix.ogg"], Some("bytes=1000-1999")).await).await);

        let whole = body_bytes(s.serve(&["mix.ogg"], None).await).await;
        assert_eq!(joined, &whole[..2000]);
    }

    #[tokio::test]
    async fn test_podcast_scenario() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "podcasts/track.mp3", &pattern(5_000_000));
        let s = streamer(&dir);

        let response = s
            .serve(&["podcasts", "track.mp3"], Some("bytes=1000000-1999999"))
            .await;
        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(
            header_str(&response, header::CONTENT_RANGE),
            "bytes 1000000-1999999/5000000"
        );
        assert_eq!(header_str(&response, header::CONTENT_LENGTH), "1000000");
        assert_eq!(body_bytes(response).await.len(), 1_000_000);

        let response = s.serve(&["podcasts", "track.mp3"], None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_str(&response, header::CONTENT_LENGTH), "5000000");
        assert_eq!(header_str(&response, header::ACCEPT_RANGES), "bytes");
    }

    #[tokio::test]
    async fn test_traversal_is_forbidden() {
        let outer = TempDir::new().unwrap();
        write(outer.path(), "secret.txt", b"top secret");
        write(outer.path(), "uploads/a.mp3", b"abc");
        let s = RangeFileStreamer::new(
            StorageRoot::open(outer.path().join("uploads")).unwrap(),
            MimeTable::default(),
            StreamerOptions::default(),
        );

        // Target exists one level up
        let response = s.serve(&["..", "secret.txt"], None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_bytes(response).await;
        assert!(!String::from_utf8_lossy(&body).contains("top secret"));

        let response = s.serve(&["..", "..", "etc", "passwd"], None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            header_str(&response, header::CONTENT_TYPE),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.mp3", &pattern(100));
        std::fs::create_dir(dir.path().join("covers")).unwrap();
        let s = streamer(&dir);

        let empty: [&str; 0] = [];
        assert_eq!(s.serve(&empty, None).await.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            s.serve(&["missing.mp3"], None).await.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            s.serve(&["covers"], None).await.status(),
            StatusCode::NOT_FOUND
        );

        let response = s.serve(&["a.mp3"], Some("bytes=100-")).await;
        assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
        assert_eq!(header_str(&response, header::CONTENT_RANGE), "bytes */100");
    }

    #[tokio::test]
    async fn test_malformed_range_is_rejected() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.mp3", &pattern(100));
        let s = streamer(&dir);

        for range in ["bytes=abc-", "bytes=0-9,20-29", "pages=1-2"] {
            let response = s.serve(&["a.mp3"], Some(range)).await;
            assert_eq!(
                response.status(),
                StatusCode::RANGE_NOT_SATISFIABLE,
                "{range}"
            );
        }
    }

    #[tokio::test]
    async fn test_error_body_has_no_paths() {
        let dir = TempDir::new().unwrap();
        let s = streamer(&dir);

        let response = s.serve(&["artists", "missing.mp3"], None).await;
        let body = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(!body.contains("missing.mp3"));
        assert!(!body.contains(&*dir.path().to_string_lossy()));
    }

    #[tokio::test]
    async fn test_head_has_headers_only() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "cover.PNG", &pattern(2048));
        let s = streamer(&dir);

        let headers = RequestHeaders {
            range: Some("bytes=0-99"),
            is_head: true,
            ..RequestHeaders::default()
        };
        let response = s.serve_request(&["cover.PNG"], &headers).await;
        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(header_str(&response, header::CONTENT_LENGTH), "100");
        assert_eq!(header_str(&response, header::CONTENT_TYPE), "image/png");
        assert!(body_bytes(response).await.is_empty());
        assert_eq!(s.active_streams(), 0);
    }

    #[tokio::test]
    async fn test_if_none_match_not_modified() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.jpg", &pattern(300));
        let s = streamer(&dir);

        let first = s.serve(&["a.jpg"], None).await;
        let etag = header_str(&first, header::ETAG).to_string();
        assert!(first.headers().contains_key(header::LAST_MODIFIED));

        let headers = RequestHeaders {
            if_none_match: Some(etag.as_str()),
            range: Some("bytes=0-10"),
            ..RequestHeaders::default()
        };
        let response = s.serve_request(&["a.jpg"], &headers).await;
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        assert!(body_bytes(response).await.is_empty());

        let headers = RequestHeaders {
            if_none_match: Some("W/\"stale\""),
            ..RequestHeaders::default()
        };
        let response = s.serve_request(&["a.jpg"], &headers).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dropped_body_releases_stream() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "long.mp3", &pattern(200_000));
        let s = streamer(&dir);

        let response = s.serve(&["long.mp3"], None).await;
        assert_eq!(s.active_streams(), 1);

        let mut body = response.into_body();
        let chunk = body.frame().await.unwrap().unwrap().into_data().unwrap();
        assert!(!chunk.is_empty() && chunk.len() <= 4096);
        assert!(!body.is_end_stream());

        // Client went away mid-transfer
        drop(body);
        assert_eq!(s.active_streams(), 0);
    }

    #[tokio::test]
    async fn test_chunks_are_bounded() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.m4a", &pattern(50_000));
        let s = streamer(&dir);

        let mut body = s
            .serve(&["a.m4a"], Some("bytes=100-20099"))
            .await
            .into_body();
        let mut total = 0;
        while let Some(frame) = body.frame().await {
            let chunk = frame.unwrap().into_data().unwrap();
            assert!(chunk.len() <= 4096);
            total += chunk.len();
        }
        assert_eq!(total, 20_000);
        drop(body);
        assert_eq!(s.active_streams(), 0);
    }

    #[tokio::test]
    async fn test_empty_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "empty.mp3", b"");
        let s = streamer(&dir);

        let response = s.serve(&["empty.mp3"], None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(header_str(&response, header::CONTENT_LENGTH), "0");
        assert!(body_bytes(response).await.is_empty());

        let response = s.serve(&["empty.mp3"], Some("bytes=0-")).await;
        assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
    }

    #[tokio::test]
    async fn test_trailing_slash_on_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.mp3", &pattern(10));
        let s = streamer(&dir);

        for segments in [&["a.mp3", ""][..], &["a.mp3", "."][..]] {
            let response = s.serve(segments, None).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{segments:?}");
        }
        // Empty segments in the middle are still skipped
        let response = s.serve(&["", "a.mp3"], None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_range_unit_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let data = pattern(100);
        write(dir.path(), "a.mp3", &data);
        let s = streamer(&dir);

        let response = s.serve(&["a.mp3"], Some("Bytes=0-3")).await;
        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(body_bytes(response).await, &data[..4]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fifo_is_not_found_without_blocking() {
        let dir = TempDir::new().unwrap();
        let fifo = dir.path().join("pipe.mp3");
        let status = std::process::Command::new("mkfifo")
            .arg(&fifo)
            .status()
            .unwrap();
        assert!(status.success());
        let s = streamer(&dir);

        let response = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            s.serve(&["pipe.mp3"], None),
        )
        .await
        .expect("serving a FIFO must not block");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_io_failure_is_internal_error_without_path() {
        let dir = TempDir::new().unwrap();
        // Symlink loop: resolution fails with an error other than not-found
        std::os::unix::fs::symlink(dir.path().join("loop-b"), dir.path().join("loop-a.mp3"))
            .unwrap();
        std::os::unix::fs::symlink(dir.path().join("loop-a.mp3"), dir.path().join("loop-b"))
            .unwrap();
        let s = streamer(&dir);

        let response = s.serve(&["loop-a.mp3"], None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            header_str(&response, header::CONTENT_TYPE),
            "application/json"
        );

        let body = String::from_utf8(body_bytes(response).await).unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"]["code"], 500);
        assert_eq!(json["error"]["message"], "Internal Server Error");
        assert!(!body.contains("loop-a"));
        assert!(!body.contains(&*dir.path().to_string_lossy()));
    }

    #[test]
    fn test_content_disposition() {
        assert_eq!(
            content_disposition("track.mp3"),
            "inline; filename=\"track.mp3\""
        );
        assert_eq!(
            content_disposition("a\"b.mp3"),
            "inline; filename=\"a_b.mp3\""
        );
        assert_eq!(
            content_disposition("café.mp3"),
            "inline; filename=\"caf_.mp3\"; filename*=UTF-8''caf%C3%A9.mp3"
        );
    }
}
