//! The dictionary: indexes, change tracking and lookups.

use crate::config::Config;
use crate::document::DictionaryDocument;
use crate::error::CoreResult;
use crate::fuzzy;
use crate::index::{HashIndex, Index, NameCache};
use crate::record::Record;
use crate::stats::{DictionaryStats, LookupStats};
use crate::types::RecordId;
use chrono::{DateTime, Utc};
use coldict_storage::{InMemoryBackend, StorageBackend};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// What [`Dictionary::add`] did with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The id was new; the record was inserted.
    Inserted,
    /// The id was known and the record differed; it was replaced.
    Updated {
        /// Whether the record moved to a different name.
        renamed: bool,
    },
    /// The id was known with an identical record; nothing changed.
    Unchanged,
}

/// The best fuzzy candidate for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// The dictionary name that matched best.
    pub name: String,
    /// Its similarity score, 0–100.
    pub score: f64,
}

/// A searchable dictionary of approved column records.
///
/// `Dictionary` keeps every record addressable two ways:
/// - by id (the primary index, one record per id)
/// - by name (the secondary index, a set of ids per name; names are not
///   unique)
///
/// It counts how many records were inserted and updated since it was
/// opened, and only writes back to storage when one of those counts is
/// non-zero.
///
/// # Lifecycle
///
/// ```rust
/// use coldict_core::{Dictionary, Record};
/// use url::Url;
///
/// let base = Url::parse("https://catalog.example.com/").unwrap();
/// let dictionary = Dictionary::open_in_memory().unwrap();
///
/// let record = Record::new(123, "coid", "Company", "Company id", "/a/123", &base).unwrap();
/// dictionary.add(record.clone());
///
/// assert_eq!(dictionary.lookup("coid"), vec![record]);
/// assert!(dictionary.has_updates());
/// assert!(dictionary.save().unwrap());
/// ```
///
/// # Thread Safety
///
/// All index state sits behind one lock: every `add`, and every `save`, is
/// a single critical section, so readers never see one index updated
/// without the other.
pub struct Dictionary {
    /// Configuration.
    config: Config,
    /// Where the document is loaded from and saved to.
    storage: Mutex<Box<dyn StorageBackend>>,
    /// Indexes and counters.
    state: RwLock<DictionaryState>,
    /// Query counters.
    lookups: LookupStats,
}

#[derive(Debug, Default)]
struct DictionaryState {
    /// Primary index.
    by_id: BTreeMap<RecordId, Record>,
    /// Secondary index: name → ids.
    by_name: HashIndex<String>,
    /// Sorted names, for fuzzy matching.
    name_cache: NameCache,
    new_count: u64,
    updated_count: u64,
    last_updated: Option<DateTime<Utc>>,
}

impl DictionaryState {
    fn from_document(document: DictionaryDocument) -> Self {
        let mut state = Self {
            last_updated: document.last_updated,
            ..Self::default()
        };

        for record in document.records {
            let id = record.id();
            let name = record.name().to_string();
            if let Some(previous) = state.by_id.insert(id, record) {
                if previous.name() != name {
                    state.by_name.remove(&previous.name().to_string(), id);
                }
            }
            state.by_name.insert(name, id);
        }

        state.refresh_name_cache();
        state
    }

    fn refresh_name_cache(&mut self) {
        self.name_cache = NameCache::build(self.by_name.keys());
    }

    fn apply(&mut self, record: Record) -> AddOutcome {
        let id = record.id();

        let Some(existing) = self.by_id.get(&id) else {
            if self.by_name.insert(record.name().to_string(), id) {
                self.refresh_name_cache();
            }
            self.by_id.insert(id, record);
            self.new_count += 1;
            return AddOutcome::Inserted;
        };

        if *existing == record {
            return AddOutcome::Unchanged;
        }

        let renamed = existing.name() != record.name();
        if renamed {
            let old_name = existing.name().to_string();
            self.by_name.remove(&old_name, id);
            self.by_name.insert(record.name().to_string(), id);
            self.refresh_name_cache();
        }

        self.by_id.insert(id, record);
        self.updated_count += 1;
        AddOutcome::Updated { renamed }
    }

    fn lookup(&self, name: &str) -> Vec<Record> {
        let mut seen = HashSet::new();
        self.by_name
            .ids(&name.to_string())
            .filter_map(|id| self.by_id.get(&id))
            .filter(|record| seen.insert(record.description()))
            .cloned()
            .collect()
    }

    fn best_match(&self, name: &str) -> Option<FuzzyMatch> {
        fuzzy::extract_one(name, self.name_cache.as_slice()).map(|found| FuzzyMatch {
            name: found.choice.to_string(),
            score: found.score,
        })
    }

    fn has_updates(&self) -> bool {
        self.new_count > 0 || self.updated_count > 0
    }
}

impl Dictionary {
    /// Opens a dictionary, loading every record from `storage`.
    ///
    /// An empty or absent document opens an empty dictionary.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read or its document cannot
    /// be decoded.
    pub fn open(storage: Box<dyn StorageBackend>) -> CoreResult<Self> {
        Self::open_with_config(storage, Config::default())
    }

    /// Opens a dictionary with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read or its document cannot
    /// be decoded.
    pub fn open_with_config(storage: Box<dyn StorageBackend>, config: Config) -> CoreResult<Self> {
        let document = match storage.read()? {
            Some(bytes) => DictionaryDocument::decode(&bytes)?,
            None => DictionaryDocument::default(),
        };

        let state = DictionaryState::from_document(document);
        info!(
            storage = %storage.describe(),
            records = state.by_id.len(),
            names = state.name_cache.len(),
            "dictionary loaded"
        );

        Ok(Self {
            config,
            storage: Mutex::new(storage),
            state: RwLock::new(state),
            lookups: LookupStats::new(),
        })
    }

    /// Opens an empty dictionary backed by memory.
    ///
    /// # Errors
    ///
    /// Returns an error only if the empty document cannot be read.
    pub fn open_in_memory() -> CoreResult<Self> {
        Self::open(Box::new(InMemoryBackend::new()))
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a snapshot of every record, in ascending id order.
    pub fn records(&self) -> Vec<Record> {
        self.state.read().by_id.values().cloned().collect()
    }

    /// Returns the record with the given id.
    pub fn get(&self, id: RecordId) -> Option<Record> {
        self.state.read().by_id.get(&id).cloned()
    }

    /// Returns true if a record with the given id exists.
    pub fn contains(&self, id: RecordId) -> bool {
        self.state.read().by_id.contains_key(&id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.state.read().by_id.len()
    }

    /// Returns true if the dictionary holds no records.
    pub fn is_empty(&self) -> bool {
        self.state.read().by_id.is_empty()
    }

    /// The distinct names, sorted.
    pub fn names(&self) -> Arc<[String]> {
        self.state.read().name_cache.snapshot()
    }

    /// Finds every record named exactly `name`.
    ///
    /// The match is case-sensitive and exact. Among records sharing the
    /// name, only the first record with any given description is returned
    /// (records are visited in ascending id order), so textually redundant
    /// entries are not repeated. An unknown name yields an empty list.
    pub fn lookup(&self, name: &str) -> Vec<Record> {
        self.lookups.record_exact();
        self.state.read().lookup(name)
    }

    /// Finds the single name most similar to `name`, with its score.
    ///
    /// Returns `None` only for an empty dictionary.
    pub fn fuzzy_match(&self, name: &str) -> Option<FuzzyMatch> {
        self.state.read().best_match(name)
    }

    /// Looks up the records of the single name most similar to `name`.
    ///
    /// The best candidate is only used if its score is at least `threshold`
    /// (inclusive); otherwise, or for an empty dictionary, the result is
    /// empty. This is a "did you mean" correction, not a ranked search: the
    /// runner-up candidates are never considered.
    pub fn fuzzy_lookup(&self, name: &str, threshold: u8) -> Vec<Record> {
        let state = self.state.read();

        let accepted = state
            .best_match(name)
            .filter(|found| found.score >= f64::from(threshold));
        self.lookups.record_fuzzy(accepted.is_some());

        match accepted {
            Some(found) => {
                debug!(query = name, matched = %found.name, score = found.score, "fuzzy match");
                self.lookups.record_exact();
                state.lookup(&found.name)
            }
            None => Vec::new(),
        }
    }

    /// Exact lookup, falling back to [`Dictionary::fuzzy_lookup`] when the
    /// exact lookup finds nothing.
    pub fn lookup_or_fuzzy(&self, name: &str, threshold: u8) -> Vec<Record> {
        let exact = self.lookup(name);
        if exact.is_empty() {
            self.fuzzy_lookup(name, threshold)
        } else {
            exact
        }
    }

    /// Adds or updates a record.
    ///
    /// - A new id is inserted and counted as new.
    /// - A known id with an identical record changes nothing.
    /// - A known id with a different record replaces it and is counted as
    ///   updated; if its name changed it moves to the new name.
    ///
    /// Both indexes are updated under one lock.
    pub fn add(&self, record: Record) -> AddOutcome {
        let id = record.id();
        let outcome = self.state.write().apply(record);
        debug!(%id, ?outcome, "add");
        outcome
    }

    /// Returns true if any record was inserted or updated since the
    /// dictionary was opened.
    pub fn has_updates(&self) -> bool {
        self.state.read().has_updates()
    }

    /// Records inserted since the dictionary was opened.
    pub fn new_record_count(&self) -> u64 {
        self.state.read().new_count
    }

    /// Records updated since the dictionary was opened.
    pub fn updated_record_count(&self) -> u64 {
        self.state.read().updated_count
    }

    /// Writes every record back to storage, if anything changed.
    ///
    /// Returns true if a write happened. The session counters are not
    /// reset by saving, so once a session has changes every `save` writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be encoded or written; the
    /// in-memory state is unaffected.
    pub fn save(&self) -> CoreResult<bool> {
        let mut state = self.state.write();
        if !state.has_updates() {
            debug!("no changes this session; skipping save");
            return Ok(false);
        }

        let document = DictionaryDocument::new(state.by_id.values().cloned().collect());
        let bytes = document.encode(self.config.pretty_document)?;

        let mut storage = self.storage.lock();
        storage.write(&bytes)?;
        state.last_updated = document.last_updated;

        info!(
            storage = %storage.describe(),
            records = document.records.len(),
            new = state.new_count,
            updated = state.updated_count,
            "dictionary saved"
        );
        Ok(true)
    }

    /// Returns a snapshot of the dictionary's statistics.
    pub fn stats(&self) -> DictionaryStats {
        let state = self.state.read();
        DictionaryStats {
            records: state.by_id.len(),
            names: state.name_cache.len(),
            new_records: state.new_count,
            updated_records: state.updated_count,
            last_updated: state.last_updated,
            exact_lookups: self.lookups.exact_lookups(),
            fuzzy_lookups: self.lookups.fuzzy_lookups(),
            fuzzy_hits: self.lookups.fuzzy_hits(),
        }
    }
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("Dictionary")
            .field("records", &state.by_id.len())
            .field("names", &state.name_cache.len())
            .field("new_count", &state.new_count)
            .field("updated_count", &state.updated_count)
            .finish_non_exhaustive()
    }
}
