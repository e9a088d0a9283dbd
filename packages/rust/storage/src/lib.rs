//! Raw page storage for docset building (read side only).
//!
//! The fetch step writes downloaded pages somewhere; this crate hands them
//! back by relative path. [`FsStore`] reads from a directory on disk,
//! [`MemoryStore`] serves pages already held in memory.
//!
//! A missing page is always reported as [`DocsetError::NotFound`] so callers
//! can tell it apart from other I/O failures.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use docsetbuilder_shared::{DocsetError, Result, StorageConfig};
use tracing::instrument;

/// Source of raw document text, keyed by relative path.
pub trait DocumentStore: Send + Sync {
    /// Return the full text of the document at `path`.
    fn read(&self, path: &str) -> Result<String>;
}

// ---------------------------------------------------------------------------
// Filesystem
// ---------------------------------------------------------------------------

/// Reads documents from files below a root directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`. The directory is not checked until a read.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store from the `[storage]` config section.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.root)
    }

    /// Root directory documents are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches(['/', '\\']))
    }
}

impl DocumentStore for FsStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn read(&self, path: &str) -> Result<String> {
        let full = self.resolve(path);

        match std::fs::read_to_string(&full) {
            Ok(content) => {
                tracing::debug!(bytes = content.len(), "document loaded");
                Ok(content)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(DocsetError::not_found(path))
            }
            Err(e) => Err(DocsetError::io(full, e)),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Serves documents from a map of path to HTML text.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the document at `path`.
    pub fn insert(&mut self, path: impl Into<String>, html: impl Into<String>) {
        self.documents.insert(path.into(), html.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, path: impl Into<String>, html: impl Into<String>) -> Self {
        self.insert(path, html);
        self
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, path: &str) -> Result<String> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| DocsetError::not_found(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_store_reads_relative_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/setup.html"), "<h2>Setup</h2>").unwrap();

        let store = FsStore::new(dir.path());
        assert_eq!(store.read("docs/setup.html").unwrap(), "<h2>Setup</h2>");
        assert_eq!(store.read("/docs/setup.html").unwrap(), "<h2>Setup</h2>");
    }

    #[test]
    fn fs_store_missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsStore::new(dir.path());

        let err = store.read("missing.html").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "document not found: missing.html");
    }

    #[test]
    fn fs_store_directory_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("nested")).unwrap();
        let store = FsStore::new(dir.path());

        let err = store.read("nested").unwrap_err();
        assert!(matches!(err, DocsetError::Io { .. }));
    }

    #[test]
    fn fs_store_from_config_uses_root() {
        let config = StorageConfig {
            root: "/srv/pages".into(),
        };
        assert_eq!(FsStore::from_config(&config).root(), Path::new("/srv/pages"));
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new().with("guide.html", "<h2>Intro</h2>");
        assert_eq!(store.len(), 1);
        assert_eq!(store.read("guide.html").unwrap(), "<h2>Intro</h2>");
        assert!(store.read("other.html").unwrap_err().is_not_found());
    }
}
