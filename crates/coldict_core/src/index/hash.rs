//! Hash index implementation.

use crate::index::traits::Index;
use crate::types::RecordId;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// Hash-based index for O(1) equality lookups.
///
/// `HashIndex` stores a mapping from key to a set of record ids
/// (non-unique index). Ids inside a bucket are kept ordered, so lookups
/// return them in a stable order.
///
/// # Example
///
/// ```rust
/// use coldict_core::index::{HashIndex, Index};
/// use coldict_core::RecordId;
///
/// let mut index: HashIndex<String> = HashIndex::new();
/// index.insert("coid".to_string(), RecordId::new(2));
/// index.insert("coid".to_string(), RecordId::new(1));
///
/// let ids: Vec<RecordId> = index.ids(&"coid".to_string()).collect();
/// assert_eq!(ids, vec![RecordId::new(1), RecordId::new(2)]);
/// ```
#[derive(Debug, Clone)]
pub struct HashIndex<K> {
    /// Key to record ids mapping.
    entries: HashMap<K, BTreeSet<RecordId>>,
}

impl<K> Default for HashIndex<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> HashIndex<K> {
    /// Creates a new, empty hash index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over the distinct keys, in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Iterates over the ids stored under `key` without allocating.
    pub fn ids<'a>(&'a self, key: &K) -> impl Iterator<Item = RecordId> + 'a {
        self.entries
            .get(key)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}

impl<K: Eq + Hash + Send + Sync> Index<K> for HashIndex<K> {
    fn insert(&mut self, key: K, id: RecordId) -> bool {
        let created = !self.entries.contains_key(&key);
        self.entries.entry(key).or_default().insert(id);
        created
    }

    fn remove(&mut self, key: &K, id: RecordId) -> bool {
        if let Some(set) = self.entries.get_mut(key) {
            if set.remove(&id) && set.is_empty() {
                self.entries.remove(key);
                return true;
            }
        }
        false
    }
}
