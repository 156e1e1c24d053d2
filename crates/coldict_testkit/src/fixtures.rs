//! Test fixtures and dictionary helpers.

use coldict_core::{Dictionary, Record};
use coldict_storage::{FileBackend, InMemoryBackend, StorageBackend, StorageError, StorageResult};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use url::Url;

/// Base url used for fixture records.
pub const TEST_BASE_URL: &str = "https://catalog.example.com/";

/// Returns [`TEST_BASE_URL`] parsed.
pub fn test_base() -> Url {
    Url::parse(TEST_BASE_URL).expect("Invalid test base url")
}

/// A test dictionary with automatic cleanup.
pub struct TestDictionary {
    /// The dictionary instance.
    pub dictionary: Dictionary,
    /// Handle to the in-memory backend, if memory-based.
    memory: Option<InMemoryBackend>,
    /// The temporary directory (kept alive to prevent cleanup).
    temp_dir: Option<TempDir>,
}

impl TestDictionary {
    /// Creates a new in-memory test dictionary.
    pub fn memory() -> Self {
        let backend = InMemoryBackend::new();
        Self {
            dictionary: Dictionary::open(Box::new(backend.clone()))
                .expect("Failed to open in-memory dictionary"),
            memory: Some(backend),
            temp_dir: None,
        }
    }

    /// Creates a new file-based test dictionary.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join(DOCUMENT_NAME);
        Self {
            dictionary: Dictionary::open(Box::new(FileBackend::new(&path)))
                .expect("Failed to open file dictionary"),
            memory: None,
            temp_dir: Some(temp_dir),
        }
    }

    /// Returns the document path if file-based, None if in-memory.
    pub fn path(&self) -> Option<PathBuf> {
        self.temp_dir.as_ref().map(|d| d.path().join(DOCUMENT_NAME))
    }

    /// Number of writes the in-memory backend has received.
    pub fn write_count(&self) -> Option<usize> {
        self.memory.as_ref().map(InMemoryBackend::write_count)
    }

    /// Opens a second dictionary over the same storage, as a new session.
    pub fn reopen(&self) -> Dictionary {
        match (&self.memory, self.path()) {
            (Some(backend), _) => {
                Dictionary::open(Box::new(backend.clone())).expect("Failed to reopen dictionary")
            }
            (None, Some(path)) => Dictionary::open(Box::new(FileBackend::new(&path)))
                .expect("Failed to reopen dictionary"),
            (None, None) => unreachable!("test dictionary has no storage"),
        }
    }
}

const DOCUMENT_NAME: &str = "dictionary.json";

impl std::ops::Deref for TestDictionary {
    type Target = Dictionary;

    fn deref(&self) -> &Self::Target {
        &self.dictionary
    }
}

/// Runs a test with a temporary in-memory dictionary.
pub fn with_temp_dictionary<F, R>(f: F) -> R
where
    F: FnOnce(&Dictionary) -> R,
{
    let test = TestDictionary::memory();
    f(&test.dictionary)
}

/// Runs a test with a temporary file-based dictionary.
pub fn with_file_dictionary<F, R>(f: F) -> R
where
    F: FnOnce(&Dictionary, &Path) -> R,
{
    let test = TestDictionary::file();
    let path = test.path().expect("File dictionary should have a path");
    f(&test.dictionary, &path)
}

/// Builds records with sensible defaults.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    id: i64,
    name: String,
    title: String,
    description: String,
    url: String,
}

impl RecordBuilder {
    /// Starts a record; description and url default from the id.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            title: String::new(),
            description: format!("description {id}"),
            url: format!("/attribute/{id}/"),
        }
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description (markup allowed).
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the url (relative allowed).
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Normalizes into a record against [`TEST_BASE_URL`].
    pub fn build(self) -> Record {
        Record::new(
            self.id,
            self.name,
            self.title,
            &self.description,
            &self.url,
            &test_base(),
        )
        .expect("Failed to build record")
    }
}

/// Sample records: three names, one of them shared, one shared description.
pub fn sample_records() -> Vec<Record> {
    vec![
        RecordBuilder::new(1, "coid")
            .title("Company")
            .description("<p>Company identifier</p>")
            .build(),
        RecordBuilder::new(2, "coid")
            .title("Company (legacy)")
            .description("Company identifier")
            .build(),
        RecordBuilder::new(3, "coid")
            .description("Legacy company code")
            .build(),
        RecordBuilder::new(4, "eff_timestamp")
            .title("Effective")
            .description("When the row became effective")
            .build(),
        RecordBuilder::new(5, "street_address_1")
            .title("Street")
            .description("First line of the street address")
            .build(),
    ]
}

/// Creates an in-memory dictionary holding [`sample_records`].
pub fn populated_dictionary() -> TestDictionary {
    let test = TestDictionary::memory();
    for record in sample_records() {
        test.add(record);
    }
    test
}

/// A backend whose reads or writes fail on demand.
#[derive(Debug, Clone, Default)]
pub struct FailingBackend {
    inner: InMemoryBackend,
    fail_reads: bool,
    fail_writes: bool,
}

impl FailingBackend {
    /// A backend whose writes fail.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// A backend whose reads fail.
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// The wrapped backend.
    pub fn inner(&self) -> &InMemoryBackend {
        &self.inner
    }

    fn failure(op: &str) -> StorageError {
        StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("injected {op} failure"),
        ))
    }
}

impl StorageBackend for FailingBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        if self.fail_reads {
            return Err(Self::failure("read"));
        }
        self.inner.read()
    }

    fn write(&mut self, data: &[u8]) -> StorageResult<()> {
        if self.fail_writes {
            return Err(Self::failure("write"));
        }
        self.inner.write(data)
    }

    fn exists(&self) -> StorageResult<bool> {
        self.inner.exists()
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}
