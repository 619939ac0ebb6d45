// Connection handling module
// Accepts TCP connections and serves each one on its own task

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::server::graceful::GracefulShutdown;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Decrements the active connection counter when the connection task ends
struct ConnectionGuard {
    counter: Arc<AtomicUsize>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Accept a connection, enforcing the connection limit.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
/// * `graceful` - Tracks the connection so shutdown can wait for it
pub fn accept_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    graceful: &GracefulShutdown,
) {
    let counter = &state.active_connections;

    // Increment counter first, then check limit (prevents race condition)
    let prev_count = counter.fetch_add(1, Ordering::SeqCst);
    let guard = ConnectionGuard {
        counter: Arc::clone(counter),
    };

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected."
            ));
            drop(stream);
            return;
        }
    }

    logger::log_connection_accepted(&peer_addr);
    handle_connection(stream, peer_addr, Arc::clone(state), graceful, guard);
}

/// Serve a single connection in a spawned task.
///
/// Keep-alive and the header read timeout come from the performance config.
/// No whole-connection timeout is applied: a media transfer lasts as long as
/// the client keeps reading.
fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    graceful: &GracefulShutdown,
    guard: ConnectionGuard,
) {
    let io = TokioIo::new(stream);
    let performance = &state.config.performance;

    let mut builder = http1::Builder::new();
    builder
        .timer(TokioTimer::new())
        .keep_alive(performance.keep_alive_timeout > 0)
        .header_read_timeout(Duration::from_secs(performance.header_read_timeout.max(1)));

    let service = service_fn(move |req| {
        let state = Arc::clone(&state);
        async move { handler::handle_request(req, state, peer_addr).await }
    });

    let conn = graceful.watch(builder.serve_connection(io, service));

    tokio::spawn(async move {
        // Client disconnects mid-body surface here; the body and its file are already dropped
        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
        drop(guard);
    });
}
