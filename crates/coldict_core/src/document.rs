//! The persisted dictionary document.
//!
//! A dictionary is stored as one JSON document:
//!
//! ```text
//! {
//!   "last_updated": "2026-01-31T06:00:00Z",
//!   "records": [
//!     {"id": 123, "name": "coid", "title": "...", "description": "...", "url": "https://..."}
//!   ]
//! }
//! ```
//!
//! Older dictionaries were written as a bare array of records; that shape
//! is still accepted on read and upgraded on the next write. An empty
//! document decodes as an empty dictionary.

use crate::error::{CoreError, CoreResult};
use crate::record::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The decoded contents of a stored dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DictionaryDocument {
    /// When the document was last written, if known.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    /// Every record in the dictionary.
    #[serde(default)]
    pub records: Vec<Record>,
}

impl DictionaryDocument {
    /// Creates a document stamped with the current time.
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            last_updated: Some(Utc::now()),
            records,
        }
    }

    /// Decodes a stored document.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Document`] for malformed JSON or records, and
    /// [`CoreError::InvalidFormat`] for JSON that is neither an object nor an
    /// array.
    pub fn decode(bytes: &[u8]) -> CoreResult<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(bytes)? {
            value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
            value @ Value::Array(_) => Ok(Self {
                last_updated: None,
                records: serde_json::from_value(value)?,
            }),
            other => Err(CoreError::invalid_format(format!(
                "expected a JSON object or array, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Encodes the document as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Document`] if serialization fails.
    pub fn encode(&self, pretty: bool) -> CoreResult<Vec<u8>> {
        let bytes = if pretty {
            serde_json::to_vec_pretty(self)?
        } else {
            serde_json::to_vec(self)?
        };
        Ok(bytes)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
