//! Logger module
//!
//! Console logging for the development server:
//! - Startup banner and usage instructions
//! - `[SERVER]` access lines, with static-asset requests filtered out
//! - Error, warning and shutdown messages

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::LoggingConfig;
use crate::error::ServerError;
use std::path::Path;

const RULE: &str = "==================================================";

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    writer::init(
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
    )
}

fn write_info(message: &str) {
    #[cfg(test)]
    if capture::record(message) {
        return;
    }
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// True when the request path ends in one of the quiet static-asset extensions
///
/// Only the path is inspected; callers strip the query string first.
pub fn is_quiet_path(path: &str, quiet_extensions: &[String]) -> bool {
    let path = path.to_ascii_lowercase();
    quiet_extensions
        .iter()
        .any(|ext| path.ends_with(&ext.to_ascii_lowercase()))
}

pub fn log_startup(root: &Path, port: u16) {
    write_info("Starting development server...");
    write_info(&format!("Directory: {}", root.display()));
    write_info(&format!("Port: {port}"));
}

pub fn log_listening(url: &str) {
    write_info(&format!("\nServer running at: {url}"));
    write_info("\nInstructions:");
    write_info("  - Open the link above in your browser");
    write_info("  - To stop the server: Ctrl+C");
}

pub fn log_browser_opened(url: &str) {
    write_info(&format!("\nOpening {url} in the browser..."));
}

pub fn log_browser_failed(err: &std::io::Error) {
    write_info(&format!("\nCould not open a browser ({err}); open the link manually"));
}

pub fn log_serving() {
    write_info(&format!("\n{RULE}"));
}

/// Log formatted access log entry with the `[SERVER]` tag
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&format!("[SERVER] {}", entry.format(format)));
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_signal(name: &str) {
    write_info(&format!("\n\n[SIGNAL] {name} received, stopping server..."));
}

pub fn log_shutdown(remaining: usize) {
    if remaining > 0 {
        log_warning(&format!(
            "{remaining} connection(s) still open after grace period, closing"
        ));
    }
    write_info("Server stopped by user");
}

/// Report a fatal error once, with its follow-up hint
pub fn log_fatal(err: &ServerError) {
    write_error(&format!("[ERROR] {err}"));
    if let Some(hint) = err.hint() {
        write_error(&format!("        {hint}"));
    }
}
