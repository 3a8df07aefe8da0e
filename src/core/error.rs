//! Error types for the logger

use std::path::Path;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The log file could not be created or opened
    #[error("Failed to open log file '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing to the log file failed
    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),

    /// No usable sink (after `close` or a failed `reopen`)
    #[error("Log sink is closed")]
    SinkClosed,

    /// Level name missing from the level table (strict mode only)
    #[error("Unknown log level '{name}'")]
    UnknownLevel { name: String },

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create an open error for the given path
    pub fn open(path: &Path, source: std::io::Error) -> Self {
        LoggerError::Open {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create an unknown level error
    pub fn unknown_level(name: impl Into<String>) -> Self {
        LoggerError::UnknownLevel { name: name.into() }
    }
}
