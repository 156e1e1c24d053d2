//! Storage backend trait definition.

use crate::error::StorageResult;

/// A whole-document storage backend.
///
/// Backends store one opaque document. The dictionary encodes its full
/// record set into that document on save and decodes it on load; backends
/// never interpret the bytes.
///
/// # Invariants
///
/// - `read` returns exactly the bytes of the last successful `write`
/// - `read` returns `None` when the backing medium holds no document yet;
///   an absent document is not an error
/// - `write` replaces the whole document. Readers observe either the old
///   or the new document, never a mix of both
/// - Backends must be `Send + Sync`
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait StorageBackend: Send + Sync {
    /// Reads the complete stored document.
    ///
    /// Returns `Ok(None)` if no document has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium exists but cannot be read.
    fn read(&self) -> StorageResult<Option<Vec<u8>>>;

    /// Replaces the stored document with `data`.
    ///
    /// After this returns successfully the new document is durable.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written. On error the
    /// previously stored document is left in place.
    fn write(&mut self, data: &[u8]) -> StorageResult<()>;

    /// Returns true if a document is currently stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be queried.
    fn exists(&self) -> StorageResult<bool>;

    /// A short human-readable description of where the document lives.
    fn describe(&self) -> String;
}
