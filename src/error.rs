//! Error types: startup configuration and member-file I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a stopword or taxonomy list. Always fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File missing or unreadable.
    #[error("cannot read config file {path:?}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File readable but its content cannot be used.
    #[error("malformed config file {path:?} at line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

impl ConfigError {
    /// Map an I/O failure on `path`. Non-UTF-8 content counts as malformed.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::InvalidData {
            ConfigError::Malformed {
                path,
                line: 0,
                reason: source.to_string(),
            }
        } else {
            ConfigError::NotFound { path, source }
        }
    }

    /// Attach a file path to an error raised while parsing in-memory text.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            ConfigError::Malformed { line, reason, .. } => ConfigError::Malformed {
                path: path.into(),
                line,
                reason,
            },
            other => other,
        }
    }
}

/// Failure reading or writing a member CSV file.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("cannot read member file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
