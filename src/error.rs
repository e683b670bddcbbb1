//! Startup and serving errors
//!
//! Every variant is fatal for the process; per-request failures never reach
//! this type and are answered with an HTTP status instead.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The marker file is absent, so we are probably not in the project root
    #[error("{} not found", path.display())]
    MissingMarker { path: PathBuf },

    #[error("port {} is already in use", addr.port())]
    AddrInUse { addr: SocketAddr },

    #[error("failed to start server on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("unexpected error: {0}")]
    Io(#[from] io::Error),
}

impl ServerError {
    /// Classify a bind failure, singling out "address in use"
    pub fn from_bind(addr: SocketAddr, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::AddrInUse {
            Self::AddrInUse { addr }
        } else {
            Self::Bind { addr, source: err }
        }
    }

    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MissingMarker { .. } => 1,
            Self::AddrInUse { .. } => 2,
            Self::Bind { .. } => 3,
            Self::Config(_) | Self::InvalidAddress(_) => 4,
            Self::Io(_) => 5,
        }
    }

    /// Follow-up advice printed under the diagnostic
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingMarker { .. } => {
                Some("Make sure you start the server from the project root directory.")
            }
            Self::AddrInUse { .. } => {
                Some("Stop the other server or pick a different port (DEVSERVER_SERVER__PORT).")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "127.0.0.1:8000".parse().unwrap()
    }

    #[test]
    fn test_addr_in_use_is_distinguished() {
        let err = ServerError::from_bind(addr(), io::Error::from(io::ErrorKind::AddrInUse));
        assert!(matches!(err, ServerError::AddrInUse { .. }));
        assert_eq!(err.to_string(), "port 8000 is already in use");
        assert!(err.hint().is_some());

        let err = ServerError::from_bind(addr(), io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, ServerError::Bind { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_missing_marker_exits_with_one() {
        let err = ServerError::MissingMarker {
            path: PathBuf::from("./index.html"),
        };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "./index.html not found");
    }
}
