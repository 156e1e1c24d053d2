//! Backend selection by name.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use crate::file::FileBackend;
use crate::memory::InMemoryBackend;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The kinds of storage a dictionary can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// A single local file.
    File,
    /// Process memory; nothing survives the process.
    Memory,
    /// A Google Cloud table. Named for configuration compatibility, not
    /// implemented.
    Gcp,
}

impl StorageKind {
    /// Returns the configuration name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Memory => "memory",
            Self::Gcp => "gcp",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKind {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            "gcp" => Ok(Self::Gcp),
            other => Err(StorageError::UnknownKind(other.to_string())),
        }
    }
}

/// Opens a backend of the given kind.
///
/// `path` locates the document for file storage and is ignored otherwise.
/// With `lock` set, file storage takes the single-writer lock.
///
/// # Errors
///
/// Returns [`StorageError::Unsupported`] for kinds without an
/// implementation, and lock or I/O errors from the file backend.
pub fn open_backend(
    kind: StorageKind,
    path: &Path,
    lock: bool,
) -> StorageResult<Box<dyn StorageBackend>> {
    match kind {
        StorageKind::File if lock => Ok(Box::new(FileBackend::open_locked(path)?)),
        StorageKind::File => Ok(Box::new(FileBackend::new(path))),
        StorageKind::Memory => Ok(Box::new(InMemoryBackend::new())),
        StorageKind::Gcp => Err(StorageError::Unsupported {
            backend: kind.to_string(),
        }),
    }
}
