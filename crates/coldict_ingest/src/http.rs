//! HTTP client abstraction.
//!
//! The catalog is read with plain GET requests. The client that performs
//! them is abstracted behind [`HttpClient`] so the pagination logic can run
//! against [`MemoryCatalog`] in tests and against a real network client
//! otherwise.

use parking_lot::Mutex;
use std::collections::HashMap;

/// Response header carrying the link to the next page.
pub const NEXT_PAGE_HEADER: &str = "X-Next-Page";

/// What a client returns for one GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Value of the [`NEXT_PAGE_HEADER`] header, if present.
    pub next_page: Option<String>,
    /// Response body.
    pub body: Vec<u8>,
}

/// HTTP client abstraction.
///
/// Implement this trait to provide the actual HTTP transport.
pub trait HttpClient: Send + Sync {
    /// Sends a GET request and returns the response.
    ///
    /// Only failures to obtain a response are errors; a non-success status
    /// is a normal response.
    fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, String>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, String> {
        (**self).get(url, query, headers)
    }
}

/// A request seen by [`MemoryCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Requested url, without the query.
    pub url: String,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// Request headers.
    pub headers: Vec<(String, String)>,
}

/// An in-memory catalog serving canned pages by url.
///
/// Useful for testing without a network. Requests for urls without a page
/// fail as transport errors.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    pages: HashMap<String, HttpResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` at `url`, linking to `next` if given.
    pub fn page(mut self, url: &str, body: impl Into<Vec<u8>>, next: Option<&str>) -> Self {
        self.pages.insert(
            url.to_string(),
            HttpResponse {
                status: 200,
                next_page: next.map(str::to_string),
                body: body.into(),
            },
        );
        self
    }

    /// Answers requests for `url` with `status` and an empty body.
    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(
            url.to_string(),
            HttpResponse {
                status,
                next_page: None,
                body: Vec::new(),
            },
        );
        self
    }

    /// Returns every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

impl HttpClient for MemoryCatalog {
    fn get(
        &self,
        url: &str,
        query: &[(String, String)],
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, String> {
        self.requests.lock().push(RecordedRequest {
            url: url.to_string(),
            query: query.to_vec(),
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        });

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| format!("connection refused: {url}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_catalog_serves_pages() {
        let catalog = MemoryCatalog::new().page("https://c/1", "[]", Some("/2"));

        let response = catalog.get("https://c/1", &[], &[]).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.next_page.as_deref(), Some("/2"));
        assert_eq!(response.body, b"[]");
    }

    #[test]
    fn memory_catalog_unknown_url_is_transport_error() {
        let catalog = MemoryCatalog::new();
        let err = catalog.get("https://c/404", &[], &[]).unwrap_err();
        assert!(err.contains("https://c/404"));
    }

    #[test]
    fn memory_catalog_records_requests() {
        let catalog = MemoryCatalog::new().status("https://c/", 401);
        let query = vec![("fields".to_string(), "id".to_string())];

        let response = catalog.get("https://c/", &query, &[("token", "t")]).unwrap();
        assert_eq!(response.status, 401);

        let requests = catalog.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, query);
        assert_eq!(
            requests[0].headers,
            vec![("token".to_string(), "t".to_string())]
        );
    }
}
