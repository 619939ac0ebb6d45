// Server module entry point
// Binds the listener, serves connections and shuts down on signal

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file is mounted under another name
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_listener;
pub use server_loop::start_server_loop;

use std::sync::Arc;

use crate::config::{AppState, Config};
use crate::logger;

/// Build the application state, bind, and serve until SIGINT/SIGTERM
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.get_socket_addr()?;
    let backlog = config.server.backlog;

    let state = Arc::new(AppState::new(config).map_err(|e| {
        format!("Storage root unusable: {e}")
    })?);
    let listener = create_listener(addr, backlog)?;

    logger::log_server_start(&addr, &state.config, state.streamer.root().path());

    start_server_loop(listener, state, signal::shutdown_signal()).await
}
