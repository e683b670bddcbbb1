// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ROOT: &str = ".";
pub const DEFAULT_MARKER_FILE: &str = "index.html";
pub const DEFAULT_INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];
pub const DEFAULT_ACCESS_LOG_FORMAT: &str = "\"$request\" $status $body_bytes_sent";
pub const DEFAULT_QUIET_EXTENSIONS: [&str; 6] = [".css", ".js", ".png", ".ico", ".woff", ".ttf"];
pub const DEFAULT_SHUTDOWN_GRACE_MS: u32 = 1000;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Listener and document root settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Document root, resolved relative to the working directory
    pub root: String,
    /// File that must exist in the root before the server will start
    pub marker_file: String,
    pub open_browser: bool,
    #[serde(default)]
    pub workers: Option<usize>,
    /// Files tried, in order, when a directory is requested
    pub index_files: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common, or custom pattern)
    pub access_log_format: String,
    /// Request paths ending in one of these are not access-logged
    pub quiet_extensions: Vec<String>,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// How long shutdown waits for in-flight connections
    pub shutdown_grace_ms: u64,
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            root: DEFAULT_ROOT.to_string(),
            marker_file: DEFAULT_MARKER_FILE.to_string(),
            open_browser: true,
            workers: None,
            index_files: to_strings(&DEFAULT_INDEX_FILES),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            access_log: true,
            access_log_format: DEFAULT_ACCESS_LOG_FORMAT.to_string(),
            quiet_extensions: to_strings(&DEFAULT_QUIET_EXTENSIONS),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            keep_alive: true,
            shutdown_grace_ms: u64::from(DEFAULT_SHUTDOWN_GRACE_MS),
        }
    }
}
