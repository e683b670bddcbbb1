// Connection module
// Serves one accepted TCP connection on its own task

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tokio::sync::watch;

use super::signal::wait_for_shutdown;
use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Keeps the active-connection count accurate even if the task panics
struct ConnectionGuard(Arc<AtomicUsize>);

impl ConnectionGuard {
    fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Handle a single connection in a spawned task.
///
/// The connection is served as HTTP/1.1 (keep-alive per config). When the
/// shutdown signal fires, hyper is asked to finish the in-flight response and
/// then close instead of waiting for the next request.
///
/// # Arguments
///
/// * `stream` - The accepted TCP stream
/// * `peer_addr` - The peer's socket address, for the access log
/// * `state` - Shared application state
/// * `conn_counter` - Active connection counter, held for the task's lifetime
/// * `shutdown` - Shutdown signal receiver
pub fn spawn_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    conn_counter: Arc<AtomicUsize>,
    mut shutdown: watch::Receiver<bool>,
) {
    let guard = ConnectionGuard::new(conn_counter);

    tokio::spawn(async move {
        let _guard = guard;
        let io = TokioIo::new(stream);
        let keep_alive = state.config.performance.keep_alive;

        let service = service_fn(move |req| {
            handler::handle_request(req, Arc::clone(&state), peer_addr)
        });
        let conn = http1::Builder::new()
            .keep_alive(keep_alive)
            .serve_connection(io, service);
        tokio::pin!(conn);

        let mut shutting_down = false;
        let result = loop {
            tokio::select! {
                res = conn.as_mut() => break res,
                () = wait_for_shutdown(&mut shutdown), if !shutting_down => {
                    shutting_down = true;
                    conn.as_mut().graceful_shutdown();
                }
            }
        };

        if let Err(err) = result {
            // Clients dropping idle keep-alive connections are not worth reporting
            if !err.is_incomplete_message() {
                logger::log_connection_error(&err);
            }
        }
    });
}
