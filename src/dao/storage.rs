use std::{io, path::PathBuf};

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by snapshot stores regardless of where the data lands.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing a file failed.
    #[error("i/o failure on `{path}`")]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying i/o error.
        #[source]
        source: io::Error,
    },
    /// Encoding or decoding the JSON payload failed.
    #[error("invalid JSON payload for `{path}`")]
    Serialize {
        /// File the payload was read from or written to.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The user name cannot be used as a file name.
    #[error("user name `{name}` is not a safe file name")]
    UnsafeName {
        /// Rejected user name.
        name: String,
    },
}

impl StorageError {
    /// Wrap an i/o failure together with the offending path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a JSON failure together with the offending path.
    pub fn serialize(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StorageError::Serialize {
            path: path.into(),
            source,
        }
    }
}
