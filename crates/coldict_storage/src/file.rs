//! File-based storage backend for persistent dictionaries.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use fs2::FileExt;
use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// A single-file storage backend.
///
/// The document lives in one file. Data survives process restarts.
///
/// # Durability
///
/// Writes use the write-then-rename pattern:
/// 1. Write the document to a temporary file next to the target
/// 2. Sync the temporary file to disk
/// 3. Rename it over the target
/// 4. Sync the parent directory so the rename itself is durable
///
/// A crash at any point leaves either the old or the new document.
///
/// # Locking
///
/// [`FileBackend::open_locked`] takes an advisory exclusive lock on a
/// sidecar `<file>.lock` for as long as the backend lives, so only one
/// writer works on a dictionary file at a time. [`FileBackend::new`] takes
/// no lock and is meant for read-only use.
///
/// # Example
///
/// ```no_run
/// use coldict_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::open_locked(Path::new("dictionary.json")).unwrap();
/// backend.write(b"{\"records\": []}").unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    /// Lock file handle (held for exclusive access).
    _lock_file: Option<File>,
}

impl FileBackend {
    /// Creates a backend for the file at `path` without locking it.
    ///
    /// The file does not need to exist; reading a missing file yields no
    /// document.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            _lock_file: None,
        }
    }

    /// Creates a backend for the file at `path` and takes the writer lock.
    ///
    /// Parent directories are created if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Locked`] if another writer holds the lock,
    /// or an I/O error if the lock file cannot be created.
    pub fn open_locked(path: &Path) -> StorageResult<Self> {
        fs::create_dir_all(parent_dir(path))?;

        let lock_path = lock_path(path);
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        if lock_file.try_lock_exclusive().is_err() {
            return Err(StorageError::Locked {
                path: path.to_path_buf(),
            });
        }

        debug!(path = %path.display(), "acquired dictionary writer lock");

        Ok(Self {
            path: path.to_path_buf(),
            _lock_file: Some(lock_file),
        })
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if this backend holds the writer lock.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self._lock_file.is_some()
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> StorageResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, data: &[u8]) -> StorageResult<()> {
        let dir = parent_dir(&self.path);
        fs::create_dir_all(&dir)?;

        let mut temp = NamedTempFile::new_in(&dir)?;
        temp.write_all(data)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|err| err.error)?;

        sync_directory(&dir)?;

        debug!(path = %self.path.display(), bytes = data.len(), "document written");
        Ok(())
    }

    fn exists(&self) -> StorageResult<bool> {
        Ok(self.path.try_exists()?)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .unwrap_or(OsStr::new("dictionary"))
        .to_os_string();
    name.push(".lock");
    path.with_file_name(name)
}

/// Syncs a directory so a rename inside it is durable.
///
/// Windows NTFS journals metadata updates, and directory handles cannot be
/// synced there, so this is a no-op off Unix.
#[cfg(unix)]
fn sync_directory(dir: &Path) -> StorageResult<()> {
    File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_directory(_dir: &Path) -> StorageResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_missing_reads_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dict.json");

        let backend = FileBackend::new(&path);
        assert!(backend.read().unwrap().is_none());
        assert!(!backend.exists().unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn file_write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dict.json");

        let mut backend = FileBackend::new(&path);
        backend.write(b"hello").unwrap();

        assert!(backend.exists().unwrap());
        assert_eq!(backend.read().unwrap().unwrap(), b"hello");
    }

    #[test]
    fn file_write_replaces_whole_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dict.json");

        let mut backend = FileBackend::new(&path);
        backend.write(b"a much longer first document").unwrap();
        backend.write(b"short").unwrap();

        assert_eq!(backend.read().unwrap().unwrap(), b"short");
    }

    #[test]
    fn file_persistence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dict.json");

        {
            let mut backend = FileBackend::new(&path);
            backend.write(b"persistent data").unwrap();
        }

        let backend = FileBackend::new(&path);
        assert_eq!(backend.read().unwrap().unwrap(), b"persistent data");
    }

    #[test]
    fn file_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("path").join("dict.json");

        let mut backend = FileBackend::new(&path);
        backend.write(b"{}").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn file_write_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dict.json");

        let mut backend = FileBackend::new(&path);
        backend.write(b"one").unwrap();
        backend.write(b"two").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn file_lock_is_exclusive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dict.json");

        let first = FileBackend::open_locked(&path).unwrap();
        assert!(first.is_locked());

        let second = FileBackend::open_locked(&path);
        assert!(matches!(second, Err(StorageError::Locked { .. })));

        drop(first);
        assert!(FileBackend::open_locked(&path).is_ok());
    }

    #[test]
    fn file_unlocked_backend_ignores_lock() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dict.json");

        let _writer = FileBackend::open_locked(&path).unwrap();
        let reader = FileBackend::new(&path);
        assert!(!reader.is_locked());
        assert!(reader.read().unwrap().is_none());
    }

    #[test]
    fn lock_path_is_sidecar() {
        assert_eq!(
            lock_path(Path::new("/tmp/dict.json")),
            PathBuf::from("/tmp/dict.json.lock")
        );
    }

    #[test]
    fn parent_dir_of_bare_file_name() {
        assert_eq!(parent_dir(Path::new("dict.json")), PathBuf::from("."));
    }

    #[test]
    fn file_describe() {
        let backend = FileBackend::new(Path::new("dict.json"));
        assert_eq!(backend.describe(), "file:dict.json");
    }
}
