//! Index trait.

use crate::types::RecordId;

/// Core index trait.
///
/// An index maps keys to the set of record ids currently holding that key.
/// Implementations must never keep a key whose id set is empty.
pub trait Index<K>: Send + Sync {
    /// Inserts a key-record mapping.
    ///
    /// Returns true if the key was not present before (a new bucket was
    /// created).
    fn insert(&mut self, key: K, id: RecordId) -> bool;

    /// Removes a key-record mapping.
    ///
    /// Returns true if the key's last id was removed and the key itself is
    /// gone.
    fn remove(&mut self, key: &K, id: RecordId) -> bool;
}
