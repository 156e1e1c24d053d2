//! # Coldict Storage
//!
//! Storage backends for the column dictionary.
//!
//! A backend holds exactly one document: the complete, encoded record set
//! of a dictionary. Backends are **opaque byte stores**; they never look
//! inside the document they hold.
//!
//! ## Design Principles
//!
//! - A read returns the whole document, or `None` when nothing was ever stored
//! - A write replaces the whole document; a partial write is never observable
//! - Must be `Send + Sync` so a dictionary can be shared across threads
//! - The dictionary owns all document format interpretation
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral dictionaries
//! - [`FileBackend`] - A single file, replaced atomically on every write
//!
//! Use [`open_backend`] to select one from a [`StorageKind`]. Kinds that are
//! named but not implemented are rejected with [`StorageError::Unsupported`].
//!
//! ## Example
//!
//! ```rust
//! use coldict_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! assert!(backend.read().unwrap().is_none());
//!
//! backend.write(b"[]").unwrap();
//! assert_eq!(backend.read().unwrap().as_deref(), Some(&b"[]"[..]));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod kind;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use kind::{open_backend, StorageKind};
pub use memory::InMemoryBackend;
