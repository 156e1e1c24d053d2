//! In-memory storage backend for testing.

use crate::backend::StorageBackend;
use crate::error::StorageResult;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// An in-memory storage backend.
///
/// This backend keeps the document in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral dictionaries that don't need persistence
///
/// Clones share the same document, so a test can hand one clone to a
/// dictionary and inspect what was written through another.
///
/// # Example
///
/// ```rust
/// use coldict_storage::{StorageBackend, InMemoryBackend};
///
/// let handle = InMemoryBackend::new();
/// let mut backend = handle.clone();
/// backend.write(b"test data").unwrap();
///
/// assert_eq!(handle.data().unwrap(), b"test data");
/// assert_eq!(handle.write_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    data: Arc<RwLock<Option<Vec<u8>>>>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryBackend {
    /// Creates a new backend holding no document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new backend holding a pre-existing document.
    ///
    /// Useful for testing load behavior.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            data: Arc::new(RwLock::new(Some(data))),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns a copy of the stored document, if any.
    #[must_use]
    pub fn data(&self) -> Option<Vec<u8>> {
        self.data.read().clone()
    }

    /// Returns how many times the document has been written.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl StorageBackend for InMemoryBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.data.read().clone())
    }

    fn write(&mut self, data: &[u8]) -> StorageResult<()> {
        *self.data.write() = Some(data.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn exists(&self) -> StorageResult<bool> {
        Ok(self.data.read().is_some())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_new_is_empty() {
        let backend = InMemoryBackend::new();
        assert!(backend.read().unwrap().is_none());
        assert!(!backend.exists().unwrap());
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn memory_write_and_read() {
        let mut backend = InMemoryBackend::new();
        backend.write(b"hello world").unwrap();

        assert_eq!(backend.read().unwrap().unwrap(), b"hello world");
        assert!(backend.exists().unwrap());
    }

    #[test]
    fn memory_write_replaces() {
        let mut backend = InMemoryBackend::new();
        backend.write(b"first").unwrap();
        backend.write(b"second").unwrap();

        assert_eq!(backend.data().unwrap(), b"second");
        assert_eq!(backend.write_count(), 2);
    }

    #[test]
    fn memory_with_data() {
        let backend = InMemoryBackend::with_data(b"preloaded".to_vec());
        assert_eq!(backend.read().unwrap().unwrap(), b"preloaded");
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn memory_clones_share_document() {
        let handle = InMemoryBackend::new();
        let mut writer = handle.clone();
        writer.write(b"shared").unwrap();

        assert_eq!(handle.data().unwrap(), b"shared");
        assert_eq!(handle.write_count(), 1);
    }
}
