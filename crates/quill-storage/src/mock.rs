//! In-memory store for testing.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::store::{StorageError, Store, validate_id};

/// In-memory [`Store`] implementation for tests.
///
/// Build with the fluent API:
///
/// ```
/// use quill_storage::{MockStore, Store};
///
/// let store = MockStore::new()
///     .with_document("hello", "---\ntitle: Hello\n---\nBody");
/// assert!(store.exists("hello"));
/// ```
#[derive(Default)]
pub struct MockStore {
    documents: Mutex<BTreeMap<String, String>>,
}

impl MockStore {
    /// Create an empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with the given id and raw text.
    #[must_use]
    pub fn with_document(self, id: &str, raw: &str) -> Self {
        self.documents
            .lock()
            .unwrap()
            .insert(id.to_owned(), raw.to_owned());
        self
    }
}

impl Store for MockStore {
    fn ensure_exists(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn document_ids(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.documents.lock().unwrap().keys().cloned().collect())
    }

    fn read(&self, id: &str) -> Result<String, StorageError> {
        validate_id(id)?;
        self.documents
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound { id: id.to_owned() })
    }

    fn exists(&self, id: &str) -> bool {
        validate_id(id).is_ok() && self.documents.lock().unwrap().contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_returns_stored_text() {
        let store = MockStore::new().with_document("a", "raw text");
        assert_eq!(store.read("a").unwrap(), "raw text");
    }

    #[test]
    fn read_missing_is_not_found() {
        let store = MockStore::new();
        assert!(store.read("a").unwrap_err().is_not_found());
    }

    #[test]
    fn ids_are_listed() {
        let store = MockStore::new()
            .with_document("b", "x")
            .with_document("a", "y");
        assert_eq!(store.document_ids().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn invalid_id_rejected() {
        let store = MockStore::new();
        assert!(matches!(
            store.read("../x").unwrap_err(),
            StorageError::InvalidId { .. }
        ));
    }
}
