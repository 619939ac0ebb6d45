//! Lazy file body
//!
//! The body owns the open file. hyper drops the body when the transfer ends or the
//! client goes away, which closes the file and releases the stream guard.

use crate::http::ResponseBody;
use futures_util::{Stream, TryStreamExt};
use http_body_util::{BodyExt, StreamBody};
use hyper::body::Frame;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tokio_util::io::ReaderStream;

/// Counts one in-flight file stream for as long as it is alive
#[derive(Debug)]
pub struct ActiveStreamGuard {
    counter: Arc<AtomicUsize>,
}

impl ActiveStreamGuard {
    pub fn new(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self {
            counter: Arc::clone(counter),
        }
    }
}

impl Drop for ActiveStreamGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Stream at most `length` bytes from the file's current position in `chunk_size` reads
pub fn file_body(
    file: File,
    length: u64,
    chunk_size: usize,
    guard: ActiveStreamGuard,
) -> ResponseBody {
    let reader = ReaderStream::with_capacity(file.take(length), chunk_size);
    let frames = GuardedStream {
        inner: reader.map_ok(Frame::data),
        _guard: guard,
    };
    StreamBody::new(frames).boxed()
}

/// Owns the stream guard next to the stream it counts
struct GuardedStream<S> {
    inner: S,
    _guard: ActiveStreamGuard,
}

impl<S: Stream + Unpin> Stream for GuardedStream<S> {
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
