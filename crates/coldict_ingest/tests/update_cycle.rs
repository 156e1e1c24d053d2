//! Scheduled-update flow: ingest, save, repeat.

use coldict_core::Dictionary;
use coldict_ingest::{ingest, CatalogClient, CatalogSettings, IngestConfig, MemoryCatalog};
use coldict_storage::FileBackend;
use std::path::Path;
use tempfile::tempdir;

const ENDPOINT: &str = "https://catalog.example.com/integration/v2/column/";

fn catalog(records: &str) -> CatalogClient<MemoryCatalog> {
    let settings = CatalogSettings::new(ENDPOINT, "t0k").unwrap();
    let catalog = MemoryCatalog::new().page(ENDPOINT, records.to_string(), None);
    CatalogClient::new(settings, &IngestConfig::default(), catalog).unwrap()
}

fn run(path: &Path, records: &str) -> (u64, u64, bool) {
    let dictionary = Dictionary::open(Box::new(FileBackend::open_locked(path).unwrap())).unwrap();
    let summary = ingest(&dictionary, catalog(records).records()).unwrap();
    let saved = dictionary.save().unwrap();
    (summary.inserted, summary.updated, saved)
}

#[test]
fn repeated_runs_only_write_on_change() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dictionary.json");

    let v1 = r#"[
        {"id": 1, "name": "coid", "title": "Company", "description": "<b>Company</b> id", "url": "/a/1"},
        {"id": 2, "name": "street_address_1", "title": "Street", "description": "Street", "url": "/a/2"}
    ]"#;
    let v2 = r#"[
        {"id": 1, "name": "coid", "title": "Company", "description": "<b>Company</b> id", "url": "/a/1"},
        {"id": 2, "name": "street_line_1", "title": "Street", "description": "Street", "url": "/a/2"}
    ]"#;

    assert_eq!(run(&path, v1), (2, 0, true));
    let written = std::fs::read(&path).unwrap();

    assert_eq!(run(&path, v1), (0, 0, false));
    assert_eq!(std::fs::read(&path).unwrap(), written);

    assert_eq!(run(&path, v2), (0, 1, true));

    let dictionary = Dictionary::open(Box::new(FileBackend::new(&path))).unwrap();
    assert!(dictionary.lookup("street_address_1").is_empty());
    assert_eq!(dictionary.lookup("street_line_1").len(), 1);
    assert_eq!(dictionary.lookup("coid")[0].description(), "Companyid");
}
