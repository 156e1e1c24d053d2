//! CLI command implementations.

pub mod export;
pub mod inspect;
pub mod search;
pub mod update;

use coldict_core::Dictionary;
use coldict_storage::{open_backend, StorageKind};
use std::path::Path;

/// Opens the dictionary at `path`. Writers take the file lock.
pub fn open_dictionary(
    path: &Path,
    kind: StorageKind,
    writer: bool,
) -> Result<Dictionary, Box<dyn std::error::Error>> {
    let backend = open_backend(kind, path, writer)?;
    Ok(Dictionary::open(backend)?)
}
