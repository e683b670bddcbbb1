// Signal handling module
//
// Supported signals:
// - SIGINT:  Graceful shutdown (Ctrl+C)
// - SIGTERM: Graceful shutdown (Unix only)

use std::sync::Arc;
use tokio::sync::watch;

use crate::logger;

/// Cancellation signal shared by the accept loop and connection tasks
#[derive(Clone, Debug)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Request shutdown; idempotent
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once shutdown has been requested (or the handle is gone)
pub async fn wait_for_shutdown(rx: &mut watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}

/// Start signal handlers (Unix)
///
/// Spawns a background task that triggers `handle` on the first SIGINT or SIGTERM.
#[cfg(unix)]
pub fn start_signal_handler(handle: ShutdownHandle) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => Some(s),
            Err(e) => {
                logger::log_warning(&format!("Failed to register SIGTERM handler: {e}"));
                None
            }
        };

        let name = tokio::select! {
            res = tokio::signal::ctrl_c() => {
                if let Err(e) = res {
                    logger::log_warning(&format!("Failed to listen for Ctrl+C: {e}"));
                    return;
                }
                "SIGINT (Ctrl+C)"
            }
            () = async {
                match sigterm.as_mut() {
                    Some(s) => {
                        s.recv().await;
                    }
                    None => std::future::pending::<()>().await,
                }
            } => "SIGTERM",
        };

        logger::log_signal(name);
        handle.trigger();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handle: ShutdownHandle) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                logger::log_signal("Ctrl+C");
                handle.trigger();
            }
            Err(e) => logger::log_warning(&format!("Failed to listen for Ctrl+C: {e}")),
        }
    });
}
