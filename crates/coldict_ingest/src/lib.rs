//! # Coldict Ingest
//!
//! Reads approved column records from the upstream catalog.
//!
//! This crate provides:
//! - Request configuration (fields and custom-field filters)
//! - Catalog settings (endpoint, token, TLS, timeout)
//! - A lazy, paginated record stream following `X-Next-Page` links
//! - An HTTP client abstraction with an in-memory implementation
//! - A `reqwest` client (feature `reqwest`, on by default)
//! - [`ingest`], which drives a stream into a dictionary
//!
//! ## Example
//!
//! ```rust
//! use coldict_core::Dictionary;
//! use coldict_ingest::{ingest, CatalogClient, CatalogSettings, IngestConfig, MemoryCatalog};
//!
//! let endpoint = "https://catalog.example.com/integration/v2/column/";
//! let catalog = MemoryCatalog::new().page(
//!     endpoint,
//!     r#"[{"id": 1, "name": "coid", "title": "", "description": "", "url": "/a/1"}]"#,
//!     None,
//! );
//!
//! let settings = CatalogSettings::new(endpoint, "token").unwrap();
//! let client = CatalogClient::new(settings, &IngestConfig::default(), catalog).unwrap();
//!
//! let dictionary = Dictionary::open_in_memory().unwrap();
//! let summary = ingest(&dictionary, client.records()).unwrap();
//! assert_eq!(summary.inserted, 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "reqwest")]
mod blocking;
mod client;
mod config;
mod error;
mod http;

#[cfg(feature = "reqwest")]
pub use blocking::ReqwestClient;
pub use client::{ingest, CatalogClient, IngestSummary, RecordStream};
pub use config::{CatalogSettings, CustomField, IngestConfig, APPROVED_FIELD_ID, DEFAULT_FIELDS};
pub use error::{IngestError, IngestResult};
pub use http::{HttpClient, HttpResponse, MemoryCatalog, RecordedRequest, NEXT_PAGE_HEADER};
