//! # Coldict Core
//!
//! Indexing and lookup engine for the approved column dictionary.
//!
//! This crate provides:
//! - Record normalization (markup-free descriptions, absolute URLs)
//! - A dictionary with a primary id index and a secondary name index
//! - Exact lookup with description deduplication
//! - Fuzzy "did you mean" lookup over the distinct names
//! - Change tracking and conditional persistence
//! - CSV export
//!
//! ## Key Invariants
//!
//! - Every record is reachable by its id and listed under exactly one name
//! - No name bucket is ever empty
//! - The name cache always equals the sorted set of names
//! - A dictionary with no changes this session never writes to storage
//!
//! ## Example
//!
//! ```rust
//! use coldict_core::{AddOutcome, Dictionary, Record};
//! use url::Url;
//!
//! let base = Url::parse("https://catalog.example.com/").unwrap();
//! let dictionary = Dictionary::open_in_memory().unwrap();
//!
//! let record = Record::new(
//!     123,
//!     "street_address_1",
//!     "Street Address",
//!     "<p>First line of the street address</p>",
//!     "/attribute/123/",
//!     &base,
//! )
//! .unwrap();
//! assert_eq!(record.description(), "First line of the street address");
//! assert_eq!(dictionary.add(record), AddOutcome::Inserted);
//!
//! let found = dictionary.fuzzy_lookup("street address", 75);
//! assert_eq!(found.len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dictionary;
mod document;
mod error;
mod export;
pub mod fuzzy;
pub mod index;
mod record;
mod stats;
mod types;

pub use config::{Config, DEFAULT_THRESHOLD};
pub use dictionary::{AddOutcome, Dictionary, FuzzyMatch};
pub use document::DictionaryDocument;
pub use error::{CoreError, CoreResult};
pub use export::{export_records, export_to_path, ExportOptions, EXPORT_COLUMNS};
pub use record::{normalize_description, resolve_url, Record, RecordDraft};
pub use stats::{DictionaryStats, LookupStats};
pub use types::RecordId;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
