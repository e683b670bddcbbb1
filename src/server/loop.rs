// Server loop module
// Accepts connections until the shutdown signal fires, then drains

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

use super::connection::spawn_connection;
use super::drain::drain_connections;
use super::signal::wait_for_shutdown;
use crate::config::AppState;
use crate::logger;

/// Accept loop: one task per connection, no request deadline.
///
/// On shutdown the listener is dropped first so no new connections are
/// accepted, then in-flight connections get `performance.shutdown_grace_ms`
/// to finish.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    mut shutdown: watch::Receiver<bool>,
) {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        spawn_connection(
                            stream,
                            peer_addr,
                            Arc::clone(&state),
                            Arc::clone(&active_connections),
                            shutdown.clone(),
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = wait_for_shutdown(&mut shutdown) => break,
        }
    }

    drop(listener);

    let grace = Duration::from_millis(state.config.performance.shutdown_grace_ms);
    let remaining = drain_connections(&active_connections, grace).await;
    logger::log_shutdown(remaining);
}
