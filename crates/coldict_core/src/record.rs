//! Catalog records and their normalization.
//!
//! A [`Record`] is immutable once built. Everything that needs cleaning up
//! happens on the way in, in [`Record::new`] / [`RecordDraft::normalize`]:
//!
//! - the description is reduced to plain text (markup stripped, entities
//!   decoded, whitespace around every text fragment trimmed)
//! - the url is resolved against a base so it is always absolute
//!
//! Records read back from storage were normalized before they were stored
//! and are decoded as-is.

use crate::error::{CoreError, CoreResult};
use crate::types::RecordId;
use scraper::Html;
use serde::{Deserialize, Serialize};
use url::Url;

/// One approved column entry.
///
/// Equality is structural: two records are equal when every field is
/// equal. The dictionary relies on this to recognize re-ingested data that
/// did not change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
}

impl Record {
    /// Builds a normalized record.
    ///
    /// `description` may contain markup; only its text is kept. `url` may be
    /// relative; it is resolved against `base`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRecord`] if `url` cannot be resolved.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        title: impl Into<String>,
        description: &str,
        url: &str,
        base: &Url,
    ) -> CoreResult<Self> {
        Ok(Self {
            id: RecordId::new(id),
            name: name.into(),
            title: title.into(),
            description: normalize_description(description),
            url: resolve_url(url, base)?,
        })
    }

    /// The record identifier.
    #[must_use]
    pub const fn id(&self) -> RecordId {
        self.id
    }

    /// The column name; the lookup key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The human-readable title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The plain-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The absolute url of the record in the catalog.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// A record as the upstream catalog delivers it.
///
/// Strings that are missing default to empty and fields the dictionary does
/// not know are skipped, so catalog responses carrying extra columns decode
/// cleanly. Nothing here is normalized yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDraft {
    /// Catalog identifier.
    pub id: i64,
    /// Column name.
    #[serde(default)]
    pub name: String,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Description, possibly containing markup.
    #[serde(default)]
    pub description: String,
    /// Url, possibly relative.
    #[serde(default)]
    pub url: String,
}

impl RecordDraft {
    /// Normalizes the draft into a [`Record`], resolving its url against
    /// `base`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRecord`] if the url cannot be resolved.
    pub fn normalize(self, base: &Url) -> CoreResult<Record> {
        Record::new(
            self.id,
            self.name,
            self.title,
            &self.description,
            &self.url,
            base,
        )
    }
}

/// Reduces a possibly-marked-up description to plain text.
///
/// Every text node of the parsed fragment is trimmed, empty ones are
/// dropped and the rest are concatenated. Parsing is lenient, so this is
/// total: malformed markup still produces text.
#[must_use]
pub fn normalize_description(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    fragment
        .root_element()
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Resolves `raw` against `base`. Absolute urls are kept as they are
/// (modulo url normalization); an empty url resolves to `base` itself.
///
/// # Errors
///
/// Returns [`CoreError::InvalidRecord`] if `raw` is not a valid url
/// reference.
pub fn resolve_url(raw: &str, base: &Url) -> CoreResult<String> {
    base.join(raw.trim())
        .map(String::from)
        .map_err(|err| CoreError::invalid_record(format!("cannot resolve url '{raw}': {err}")))
}
