//! Request and connection configuration.

use crate::error::{IngestError, IngestResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Fields requested from the catalog when no configuration file says
/// otherwise.
pub const DEFAULT_FIELDS: &str = "id,name,title,description,url";

/// Custom field holding the approval status.
pub const APPROVED_FIELD_ID: i64 = 10049;

/// A custom-field filter sent with every catalog request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    /// Catalog custom-field id.
    pub field_id: i64,
    /// Required value.
    pub value: String,
}

/// Query parameters for the catalog, usually read from a JSON file:
///
/// ```json
/// {
///     "fields": "id,name,title,description,url",
///     "custom_fields": [{"field_id": 10049, "value": "Approved"}]
/// }
/// ```
///
/// Keys other than these two are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Comma-separated list of fields to request.
    pub fields: String,
    /// Filters; all must match.
    pub custom_fields: Vec<CustomField>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            fields: DEFAULT_FIELDS.to_string(),
            custom_fields: vec![CustomField {
                field_id: APPROVED_FIELD_ID,
                value: "Approved".to_string(),
            }],
        }
    }
}

impl IngestConfig {
    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// configuration.
    pub fn load(path: &Path) -> IngestResult<Self> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Reads a configuration file, falling back to the defaults if it cannot
    /// be read or parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "unusable ingest config; using defaults"
                );
                Self::default()
            }
        }
    }

    /// Renders the query parameters: `fields` as given and `custom_fields`
    /// as a JSON-encoded list.
    ///
    /// # Errors
    ///
    /// Returns an error if the custom fields cannot be encoded.
    pub fn query_params(&self) -> IngestResult<Vec<(String, String)>> {
        Ok(vec![
            ("fields".to_string(), self.fields.clone()),
            (
                "custom_fields".to_string(),
                serde_json::to_string(&self.custom_fields)?,
            ),
        ])
    }
}

/// Where the catalog lives and how to talk to it.
#[derive(Clone)]
pub struct CatalogSettings {
    /// Column endpoint; the first page is fetched here and next-page links
    /// are resolved against it.
    pub endpoint: Url,
    /// API token, sent in the `token` header.
    pub token: String,
    /// Base for relative record urls.
    pub record_base: Url,
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl CatalogSettings {
    /// Creates settings for `endpoint`. Record urls are resolved against the
    /// endpoint's site root.
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not an absolute url or `token` is
    /// empty.
    pub fn new(endpoint: &str, token: impl Into<String>) -> IngestResult<Self> {
        let endpoint = Url::parse(endpoint)?;
        if endpoint.cannot_be_a_base() {
            return Err(IngestError::config(format!(
                "catalog endpoint {endpoint} cannot be a base url"
            )));
        }

        let token = token.into();
        if token.trim().is_empty() {
            return Err(IngestError::config("API token is empty"));
        }

        let record_base = endpoint.join("/")?;
        Ok(Self {
            endpoint,
            token,
            record_base,
            accept_invalid_certs: false,
            timeout: Duration::from_secs(30),
        })
    }

    /// Sets the base for relative record urls.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not an absolute url.
    pub fn with_record_base(mut self, base: &str) -> IngestResult<Self> {
        self.record_base = Url::parse(base)?;
        Ok(self)
    }

    /// Sets whether invalid TLS certificates are accepted.
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for CatalogSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogSettings")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &"<redacted>")
            .field("record_base", &self.record_base.as_str())
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("timeout", &self.timeout)
            .finish()
    }
}
