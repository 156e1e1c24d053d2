//! Catalog pagination and ingestion into a dictionary.

use crate::config::{CatalogSettings, IngestConfig};
use crate::error::{IngestError, IngestResult};
use crate::http::HttpClient;
use coldict_core::{AddOutcome, Dictionary, Record, RecordDraft};
use std::vec;
use tracing::{debug, info};
use url::Url;

/// Reads approved column records from the catalog.
pub struct CatalogClient<C: HttpClient> {
    settings: CatalogSettings,
    query: Vec<(String, String)>,
    client: C,
}

impl<C: HttpClient> CatalogClient<C> {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the query parameters cannot be rendered.
    pub fn new(settings: CatalogSettings, config: &IngestConfig, client: C) -> IngestResult<Self> {
        Ok(Self {
            settings,
            query: config.query_params()?,
            client,
        })
    }

    /// Returns the settings.
    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Returns the underlying HTTP client.
    pub fn http(&self) -> &C {
        &self.client
    }

    /// Returns a lazy stream over every record in the catalog.
    ///
    /// Nothing is requested until the stream is first polled. Every call
    /// starts again from the first page.
    pub fn records(&self) -> RecordStream<'_, C> {
        RecordStream {
            client: self,
            next_url: Some(self.settings.endpoint.clone()),
            buffer: Vec::new().into_iter(),
            pages: 0,
        }
    }

    fn fetch_page(&self, url: &Url) -> IngestResult<Page> {
        let headers = [
            ("accept", "application/json"),
            ("token", self.settings.token.as_str()),
        ];

        let response = self
            .client
            .get(url.as_str(), &self.query, &headers)
            .map_err(IngestError::Transport)?;

        if !(200..300).contains(&response.status) {
            return Err(IngestError::Status {
                status: response.status,
                url: url.to_string(),
            });
        }

        let next = match response.next_page.as_deref().map(str::trim) {
            Some(link) if !link.is_empty() => Some(self.settings.endpoint.join(link)?),
            _ => None,
        };
        let drafts: Vec<RecordDraft> = serde_json::from_slice(&response.body)?;

        debug!(%url, records = drafts.len(), has_next = next.is_some(), "fetched catalog page");
        Ok(Page { drafts, next })
    }
}

struct Page {
    drafts: Vec<RecordDraft>,
    next: Option<Url>,
}

/// Lazy iterator over the catalog's records, page by page.
///
/// Records are normalized before they are yielded. A failed page request
/// is yielded once as an error and ends the stream; a record that cannot be
/// normalized is yielded as an error and the stream continues.
pub struct RecordStream<'a, C: HttpClient> {
    client: &'a CatalogClient<C>,
    next_url: Option<Url>,
    buffer: vec::IntoIter<RecordDraft>,
    pages: usize,
}

impl<C: HttpClient> RecordStream<'_, C> {
    /// Number of pages fetched so far.
    pub fn pages(&self) -> usize {
        self.pages
    }
}

impl<C: HttpClient> Iterator for RecordStream<'_, C> {
    type Item = IngestResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(draft) = self.buffer.next() {
                let base = &self.client.settings.record_base;
                return Some(draft.normalize(base).map_err(IngestError::from));
            }

            let url = self.next_url.take()?;
            match self.client.fetch_page(&url) {
                Ok(page) => {
                    self.pages += 1;
                    self.next_url = page.next;
                    self.buffer = page.drafts.into_iter();
                }
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Counts from one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Records received.
    pub seen: u64,
    /// Records that were new to the dictionary.
    pub inserted: u64,
    /// Records that replaced a different version.
    pub updated: u64,
    /// Records the dictionary already held unchanged.
    pub unchanged: u64,
}

impl IngestSummary {
    /// Returns true if the run changed the dictionary.
    pub fn changed(&self) -> bool {
        self.inserted > 0 || self.updated > 0
    }

    fn count(&mut self, outcome: AddOutcome) {
        self.seen += 1;
        match outcome {
            AddOutcome::Inserted => self.inserted += 1,
            AddOutcome::Updated { .. } => self.updated += 1,
            AddOutcome::Unchanged => self.unchanged += 1,
        }
    }
}

/// Adds every record of `records` to `dictionary`.
///
/// Stops at the first error; records added before it stay added.
///
/// # Errors
///
/// Returns the first error the stream yields.
pub fn ingest<I>(dictionary: &Dictionary, records: I) -> IngestResult<IngestSummary>
where
    I: IntoIterator<Item = IngestResult<Record>>,
{
    let mut summary = IngestSummary::default();
    for record in records {
        summary.count(dictionary.add(record?));
    }

    info!(
        seen = summary.seen,
        inserted = summary.inserted,
        updated = summary.updated,
        unchanged = summary.unchanged,
        "ingestion finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MemoryCatalog;

    const ENDPOINT: &str = "https://catalog.example.com/integration/v2/column/";

    fn settings() -> CatalogSettings {
        CatalogSettings::new(ENDPOINT, "t0k").unwrap()
    }

    fn body(ids: &[i64]) -> String {
        let records: Vec<String> = ids
            .iter()
            .map(|id| {
                format!(
                    r#"{{"id": {id}, "name": "col_{id}", "title": "", "description": "<p>d{id}</p>", "url": "/attribute/{id}/"}}"#
                )
            })
            .collect();
        format!("[{}]", records.join(","))
    }

    fn two_pages() -> MemoryCatalog {
        MemoryCatalog::new()
            .page(ENDPOINT, body(&[1, 2]), Some("/integration/v2/column/?skip=2"))
            .page(
                "https://catalog.example.com/integration/v2/column/?skip=2",
                body(&[3]),
                None,
            )
    }

    #[test]
    fn follows_next_page_links() {
        let client = CatalogClient::new(settings(), &IngestConfig::default(), two_pages()).unwrap();

        let mut stream = client.records();
        let records: Vec<Record> = stream.by_ref().map(Result::unwrap).collect();
        assert_eq!(stream.pages(), 2);

        let ids: Vec<i64> = records.iter().map(|r| r.id().as_i64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(records[0].description(), "d1");
        assert_eq!(
            records[2].url(),
            "https://catalog.example.com/attribute/3/"
        );
    }

    #[test]
    fn sends_headers_and_query_on_every_page() {
        let client = CatalogClient::new(settings(), &IngestConfig::default(), two_pages()).unwrap();
        let _ = client.records().count();

        let requests = client.http().requests();
        assert_eq!(requests.len(), 2);
        for request in &requests {
            assert!(request
                .headers
                .contains(&("accept".to_string(), "application/json".to_string())));
            assert!(request
                .headers
                .contains(&("token".to_string(), "t0k".to_string())));
            assert_eq!(request.query, IngestConfig::default().query_params().unwrap());
        }
    }

    #[test]
    fn stream_is_lazy_and_restartable() {
        let client = CatalogClient::new(settings(), &IngestConfig::default(), two_pages()).unwrap();

        let stream = client.records();
        assert!(client.http().requests().is_empty());
        drop(stream);

        assert_eq!(client.records().count(), 3);
        assert_eq!(client.records().count(), 3);
        assert_eq!(client.http().requests().len(), 4);
    }

    #[test]
    fn status_error_ends_stream() {
        let catalog = MemoryCatalog::new()
            .page(ENDPOINT, body(&[1]), Some("/broken"))
            .status("https://catalog.example.com/broken", 500);
        let client = CatalogClient::new(settings(), &IngestConfig::default(), catalog).unwrap();

        let items: Vec<_> = client.records().collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(matches!(
            items[1],
            Err(IngestError::Status { status: 500, .. })
        ));
    }

    #[test]
    fn transport_error_ends_stream() {
        let client =
            CatalogClient::new(settings(), &IngestConfig::default(), MemoryCatalog::new()).unwrap();

        let items: Vec<_> = client.records().collect();
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Err(IngestError::Transport(_))));
    }

    #[test]
    fn malformed_page_is_decode_error() {
        let catalog = MemoryCatalog::new().page(ENDPOINT, "{\"detail\": \"nope\"}", None);
        let client = CatalogClient::new(settings(), &IngestConfig::default(), catalog).unwrap();

        let items: Vec<_> = client.records().collect();
        assert!(matches!(items.as_slice(), [Err(IngestError::Decode(_))]));
    }

    #[test]
    fn empty_next_page_header_ends_stream() {
        let catalog = MemoryCatalog::new().page(ENDPOINT, body(&[1]), Some("  "));
        let client = CatalogClient::new(settings(), &IngestConfig::default(), catalog).unwrap();

        assert_eq!(client.records().count(), 1);
        assert_eq!(client.http().requests().len(), 1);
    }

    #[test]
    fn ingest_counts_outcomes() {
        let client = CatalogClient::new(settings(), &IngestConfig::default(), two_pages()).unwrap();
        let dictionary = Dictionary::open_in_memory().unwrap();

        let first = ingest(&dictionary, client.records()).unwrap();
        assert_eq!(
            first,
            IngestSummary {
                seen: 3,
                inserted: 3,
                updated: 0,
                unchanged: 0
            }
        );
        assert!(first.changed());

        let second = ingest(&dictionary, client.records()).unwrap();
        assert_eq!(second.unchanged, 3);
        assert!(!second.changed());
        assert_eq!(dictionary.len(), 3);
    }

    #[test]
    fn ingest_stops_at_first_error() {
        let catalog = MemoryCatalog::new().page(ENDPOINT, body(&[1, 2]), Some("/missing"));
        let client = CatalogClient::new(settings(), &IngestConfig::default(), catalog).unwrap();
        let dictionary = Dictionary::open_in_memory().unwrap();

        let result = ingest(&dictionary, client.records());
        assert!(matches!(result, Err(IngestError::Transport(_))));
        assert_eq!(dictionary.len(), 2);
    }
}
