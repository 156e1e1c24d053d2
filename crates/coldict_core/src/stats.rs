//! Dictionary statistics.
//!
//! Two kinds of numbers are tracked:
//!
//! - [`LookupStats`]: atomic query counters, bumped on every lookup and
//!   readable while queries are running
//! - [`DictionaryStats`]: a point-in-time snapshot of the dictionary's size
//!   and session change counters, taken with [`crate::Dictionary::stats`]
//!
//! # Usage
//!
//! ```rust
//! use coldict_core::Dictionary;
//!
//! let dictionary = Dictionary::open_in_memory().unwrap();
//! let _ = dictionary.lookup("coid");
//!
//! let stats = dictionary.stats();
//! assert_eq!(stats.records, 0);
//! assert_eq!(stats.exact_lookups, 1);
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Query counters.
///
/// Values are monotonically increasing for the life of the dictionary.
#[derive(Debug, Default)]
pub struct LookupStats {
    /// Exact lookups, including those issued on behalf of fuzzy lookups.
    exact_lookups: AtomicU64,
    /// Fuzzy lookups.
    fuzzy_lookups: AtomicU64,
    /// Fuzzy lookups whose best candidate met the threshold.
    fuzzy_hits: AtomicU64,
}

impl LookupStats {
    /// Creates a new stats instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_exact(&self) {
        self.exact_lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_fuzzy(&self, hit: bool) {
        self.fuzzy_lookups.fetch_add(1, Ordering::Relaxed);
        if hit {
            self.fuzzy_hits.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Total exact lookups.
    pub fn exact_lookups(&self) -> u64 {
        self.exact_lookups.load(Ordering::Relaxed)
    }

    /// Total fuzzy lookups.
    pub fn fuzzy_lookups(&self) -> u64 {
        self.fuzzy_lookups.load(Ordering::Relaxed)
    }

    /// Fuzzy lookups that found a candidate above the threshold.
    pub fn fuzzy_hits(&self) -> u64 {
        self.fuzzy_hits.load(Ordering::Relaxed)
    }
}

/// Point-in-time view of a dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryStats {
    /// Number of records.
    pub records: usize,
    /// Number of distinct names.
    pub names: usize,
    /// Records inserted this session.
    pub new_records: u64,
    /// Records updated this session.
    pub updated_records: u64,
    /// When the stored document was last written, if known.
    pub last_updated: Option<DateTime<Utc>>,
    /// Exact lookups this session.
    pub exact_lookups: u64,
    /// Fuzzy lookups this session.
    pub fuzzy_lookups: u64,
    /// Fuzzy lookups that matched.
    pub fuzzy_hits: u64,
}

impl DictionaryStats {
    /// True if the session has new or updated records.
    #[must_use]
    pub const fn has_updates(&self) -> bool {
        self.new_records > 0 || self.updated_records > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let stats = LookupStats::new();
        assert_eq!(stats.exact_lookups(), 0);
        assert_eq!(stats.fuzzy_lookups(), 0);
        assert_eq!(stats.fuzzy_hits(), 0);
    }

    #[test]
    fn fuzzy_hits_are_a_subset() {
        let stats = LookupStats::new();
        stats.record_fuzzy(true);
        stats.record_fuzzy(false);
        stats.record_exact();

        assert_eq!(stats.fuzzy_lookups(), 2);
        assert_eq!(stats.fuzzy_hits(), 1);
        assert_eq!(stats.exact_lookups(), 1);
    }

    #[test]
    fn snapshot_has_updates() {
        let mut snapshot = DictionaryStats {
            records: 1,
            names: 1,
            new_records: 0,
            updated_records: 0,
            last_updated: None,
            exact_lookups: 0,
            fuzzy_lookups: 0,
            fuzzy_hits: 0,
        };
        assert!(!snapshot.has_updates());

        snapshot.updated_records = 1;
        assert!(snapshot.has_updates());
    }
}
