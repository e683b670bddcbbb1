// Application state module
// Holds the configuration together with the resolved document root

use std::path::{Path, PathBuf};

use super::types::Config;

/// Application state shared by every connection task
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// Canonical document root; served paths must stay below it
    pub root: PathBuf,
}

impl AppState {
    pub const fn new(config: Config, root: PathBuf) -> Self {
        Self { config, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_files(&self) -> &[String] {
        &self.config.server.index_files
    }
}
