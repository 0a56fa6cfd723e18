//! Store trait and error types.

use std::path::PathBuf;

/// Error raised by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No document backs the requested id. A recoverable, expected
    /// condition: the presentation layer renders a not-found state.
    #[error("no document found for id '{id}'")]
    NotFound {
        /// The id that failed to resolve.
        id: String,
    },

    /// The id contains characters that could escape the content root
    /// (path separators, `.` or `..` components) or is empty.
    #[error("invalid document id '{id}'")]
    InvalidId {
        /// The rejected id.
        id: String,
    },

    /// Underlying I/O failure other than not-found.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        /// Path the operation was touching.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// True when the error is the expected missing-document condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Storage abstraction for document listing and retrieval.
///
/// Backends are read-only from the pipeline's perspective; the single
/// permitted mutation is [`ensure_exists`](Store::ensure_exists), which is
/// idempotent and safe to race.
pub trait Store: Send + Sync {
    /// Create the content root if absent. No-op when it already exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the directory cannot be created.
    fn ensure_exists(&self) -> Result<(), StorageError>;

    /// List the ids of all documents in the store.
    ///
    /// Order is unspecified; ordering entries is the index builder's job.
    /// A missing content root yields an empty list, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the root exists but cannot be read.
    fn document_ids(&self) -> Result<Vec<String>, StorageError>;

    /// Read the raw text of a single document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] when no document matches `id`,
    /// [`StorageError::InvalidId`] when the id is not identifier-safe.
    fn read(&self, id: &str) -> Result<String, StorageError>;

    /// Check whether a document exists for the given id.
    ///
    /// Returns `false` for invalid ids and on I/O errors.
    fn exists(&self, id: &str) -> bool;
}

/// Validate that an id cannot escape the content root.
///
/// Ids become `<root>/<id>.md`, so anything with a path separator or a
/// dot-component would address files outside the store.
pub(crate) fn validate_id(id: &str) -> Result<(), StorageError> {
    let invalid = id.is_empty()
        || id.contains('/')
        || id.contains('\\')
        || id == "."
        || id == ".."
        || id.contains('\0');

    if invalid {
        return Err(StorageError::InvalidId { id: id.to_owned() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_recognized() {
        let err = StorageError::NotFound { id: "gone".into() };
        assert!(err.is_not_found());
    }

    #[test]
    fn io_is_not_not_found() {
        let err = StorageError::Io {
            path: PathBuf::from("/tmp/x"),
            source: std::io::Error::other("boom"),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn display_includes_id() {
        let err = StorageError::NotFound { id: "gone".into() };
        assert_eq!(err.to_string(), "no document found for id 'gone'");
    }

    #[test]
    fn valid_ids_pass() {
        for id in ["hello", "2026-01-09-first-post", "a_b", "entry.draft"] {
            assert!(validate_id(id).is_ok(), "{id} should be valid");
        }
    }

    #[test]
    fn traversal_ids_rejected() {
        for id in ["", "..", ".", "a/b", "a\\b", "../etc/passwd", "x\0y"] {
            assert!(validate_id(id).is_err(), "{id:?} should be rejected");
        }
    }

    #[test]
    fn storage_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
    }
}
