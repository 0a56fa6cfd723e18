//! Filesystem store implementation.
//!
//! Provides [`FsStore`] for reading journal documents from a content
//! directory. Each `<id>.md` file directly under the root is one document;
//! the store never recurses and never mutates anything beyond the one-time
//! directory creation in [`ensure_exists`](crate::Store::ensure_exists).

use std::fs;
use std::path::{Path, PathBuf};

use crate::store::{StorageError, Store, validate_id};

/// File extension for journal documents.
const EXTENSION: &str = "md";

/// Filesystem store rooted at an explicit content directory.
///
/// The root is a constructor parameter rather than being resolved against
/// the process working directory, so two stores with different roots can
/// coexist in one process.
pub struct FsStore {
    content_root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `content_root`.
    ///
    /// The directory is not touched until [`ensure_exists`](Store::ensure_exists)
    /// or a read operation is called.
    #[must_use]
    pub fn new(content_root: PathBuf) -> Self {
        Self { content_root }
    }

    /// The content directory this store reads from.
    #[must_use]
    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    fn document_path(&self, id: &str) -> PathBuf {
        self.content_root.join(format!("{id}.{EXTENSION}"))
    }
}

impl Store for FsStore {
    fn ensure_exists(&self) -> Result<(), StorageError> {
        // create_dir_all succeeds when the directory already exists, so
        // concurrent callers cannot race each other into an error.
        fs::create_dir_all(&self.content_root).map_err(|source| StorageError::Io {
            path: self.content_root.clone(),
            source,
        })
    }

    fn document_ids(&self) -> Result<Vec<String>, StorageError> {
        let entries = match fs::read_dir(&self.content_root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.content_root.clone(),
                    source,
                });
            }
        };

        let mut ids = Vec::new();
        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if !path.is_file() || path.extension().is_none_or(|e| e != EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!(path = %path.display(), "skipping document with non-UTF-8 name");
                continue;
            };
            if stem.starts_with('.') {
                continue;
            }
            ids.push(stem.to_owned());
        }

        Ok(ids)
    }

    fn read(&self, id: &str) -> Result<String, StorageError> {
        validate_id(id)?;
        let path = self.document_path(id);
        fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound { id: id.to_owned() }
            } else {
                StorageError::Io { path, source }
            }
        })
    }

    fn exists(&self, id: &str) -> bool {
        validate_id(id).is_ok() && self.document_path(id).is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_docs(docs: &[(&str, &str)]) -> (TempDir, FsStore) {
        let tmp = TempDir::new().unwrap();
        for (id, body) in docs {
            fs::write(tmp.path().join(format!("{id}.md")), body).unwrap();
        }
        let store = FsStore::new(tmp.path().to_path_buf());
        (tmp, store)
    }

    #[test]
    fn ensure_exists_creates_missing_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("content").join("journal");
        let store = FsStore::new(root.clone());

        assert!(!root.exists());
        store.ensure_exists().unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn ensure_exists_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = FsStore::new(tmp.path().to_path_buf());

        store.ensure_exists().unwrap();
        store.ensure_exists().unwrap();
    }

    #[test]
    fn document_ids_strip_extension() {
        let (_tmp, store) = store_with_docs(&[("first-post", "a"), ("second-post", "b")]);

        let mut ids = store.document_ids().unwrap();
        ids.sort();
        assert_eq!(ids, vec!["first-post", "second-post"]);
    }

    #[test]
    fn document_ids_empty_for_missing_root() {
        let tmp = TempDir::new().unwrap();
        let store = FsStore::new(tmp.path().join("does-not-exist"));

        assert!(store.document_ids().unwrap().is_empty());
    }

    #[test]
    fn document_ids_skip_non_markdown_and_hidden() {
        let (tmp, store) = store_with_docs(&[("post", "a")]);
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();
        fs::write(tmp.path().join(".draft.md"), "x").unwrap();
        fs::create_dir(tmp.path().join("nested.md")).unwrap();

        assert_eq!(store.document_ids().unwrap(), vec!["post"]);
    }

    #[test]
    fn read_returns_raw_text() {
        let (_tmp, store) = store_with_docs(&[("post", "---\ntitle: Hi\n---\nBody")]);

        assert_eq!(store.read("post").unwrap(), "---\ntitle: Hi\n---\nBody");
    }

    #[test]
    fn read_missing_id_is_not_found() {
        let (_tmp, store) = store_with_docs(&[]);

        let err = store.read("nonexistent-id").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn read_rejects_traversal() {
        let (_tmp, store) = store_with_docs(&[]);

        let err = store.read("../outside").unwrap_err();
        assert!(matches!(err, StorageError::InvalidId { .. }));
    }

    #[test]
    fn exists_reflects_store_contents() {
        let (_tmp, store) = store_with_docs(&[("post", "a")]);

        assert!(store.exists("post"));
        assert!(!store.exists("other"));
        assert!(!store.exists("../post"));
    }
}
