//! Sorted snapshot of the name keys.

use std::sync::Arc;

/// A sorted, deduplicated snapshot of the names in the dictionary.
///
/// Fuzzy matching scans this instead of the name index so every scan sees
/// candidates in the same order. The snapshot is shared: cloning it or
/// handing it out is a reference-count bump.
///
/// Rebuilt only when the set of names changes, never when a record changes
/// under a name that stays.
#[derive(Debug, Clone, Default)]
pub struct NameCache {
    names: Arc<[String]>,
}

impl NameCache {
    /// Builds a cache from any collection of names.
    pub fn build<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut names: Vec<String> = names.into_iter().cloned().collect();
        names.sort_unstable();
        names.dedup();
        Self {
            names: names.into(),
        }
    }

    /// The cached names, sorted.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// A shared handle to the cached names.
    #[must_use]
    pub fn snapshot(&self) -> Arc<[String]> {
        Arc::clone(&self.names)
    }

    /// Number of cached names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no names are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
