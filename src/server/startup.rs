// Startup module
// Checks the project root, binds the listener and announces the server

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;

use super::listener::create_listener;
use super::server_loop::start_server_loop;
use crate::browser::BrowserLauncher;
use crate::config::{AppState, Config, ServerConfig};
use crate::error::ServerError;
use crate::logger;

/// A bound, announced server that has not started accepting yet
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until `shutdown` fires
    pub async fn run(self, shutdown: watch::Receiver<bool>) {
        start_server_loop(self.listener, self.state, shutdown).await;
    }
}

/// Verify the marker file and return the canonical document root
///
/// Runs before any socket is opened.
pub fn check_marker(config: &ServerConfig) -> Result<PathBuf, ServerError> {
    let root = Path::new(&config.root);
    let marker = root.join(&config.marker_file);
    if !marker.is_file() {
        return Err(ServerError::MissingMarker { path: marker });
    }
    Ok(root.canonicalize()?)
}

/// Start the server: marker check, bind, banner, best-effort browser launch.
///
/// Must be called from within a Tokio runtime. A browser failure is logged
/// and otherwise ignored.
pub fn startup(config: Config, browser: &dyn BrowserLauncher) -> Result<Server, ServerError> {
    let root = check_marker(&config.server)?;
    let addr = config.get_socket_addr()?;

    let listener = create_listener(addr)?;
    let port = listener.local_addr()?.port();
    logger::log_startup(&root, port);

    let url = format!("http://localhost:{port}");
    logger::log_listening(&url);

    if config.server.open_browser {
        match browser.open(&url) {
            Ok(()) => logger::log_browser_opened(&url),
            Err(e) => logger::log_browser_failed(&e),
        }
    }
    logger::log_serving();

    Ok(Server {
        listener,
        state: Arc::new(AppState::new(config, root)),
    })
}
