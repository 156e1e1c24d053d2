//! Error types for storage operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The requested backend exists by name but is not implemented.
    #[error("storage backend '{backend}' is not supported yet")]
    Unsupported {
        /// Name of the backend.
        backend: String,
    },

    /// The backend name is not known at all.
    #[error("unknown storage backend '{0}' (expected one of: file, memory, gcp)")]
    UnknownKind(String),

    /// Another writer holds the lock on the document.
    #[error("storage locked: another writer has exclusive access to {}", path.display())]
    Locked {
        /// Path of the locked document.
        path: PathBuf,
    },
}
