//! [`HttpClient`] over `reqwest`'s blocking client.

use crate::config::CatalogSettings;
use crate::error::{IngestError, IngestResult};
use crate::http::{HttpClient, HttpResponse, NEXT_PAGE_HEADER};
use tracing::warn;

/// Network client for the catalog.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Builds a client honoring the timeout and TLS settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(settings: &CatalogSettings) -> IngestResult<Self> {
        if settings.accept_invalid_certs {
            warn!(endpoint = %settings.endpoint, "TLS certificate verification is disabled");
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .user_agent(concat!("coldict/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| IngestError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, String> {
        let mut request = self.client.get(url).query(query);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let next_page = response
            .headers()
            .get(NEXT_PAGE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().map_err(|e| e.to_string())?.to_vec();

        Ok(HttpResponse {
            status,
            next_page,
            body,
        })
    }
}
