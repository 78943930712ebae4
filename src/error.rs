//! Error types for startup and configuration.

use std::fmt;

/// Errors that abort startup. The frame loop itself has no failure modes.
#[derive(Debug)]
pub enum Error {
    /// Reading a configuration file failed.
    Io(std::io::Error),
    /// Configuration was not valid JSON or had unknown keys.
    Json(serde_json::Error),
    /// A configuration value is out of range.
    InvalidConfig { field: &'static str, reason: String },
    /// Platform or GPU initialization failed.
    Startup(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "config I/O error: {}", e),
            Error::Json(e) => write!(f, "config parse error: {}", e),
            Error::InvalidConfig { field, reason } => {
                write!(f, "invalid config value for `{}`: {}", field, reason)
            }
            Error::Startup(msg) => write!(f, "startup failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
