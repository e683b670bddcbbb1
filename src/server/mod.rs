// Server module entry point
// Startup, listener creation, connection handling and graceful shutdown

pub mod connection;
pub mod drain;
pub mod listener;
pub mod signal;
pub mod startup;

// `loop` is a keyword, so the module is exposed as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used items
pub use signal::{start_signal_handler, ShutdownHandle};
pub use startup::{startup, Server};
