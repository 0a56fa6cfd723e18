//! Journal pipeline.
//!
//! [`Journal`] composes a document store with the renderer: it lists
//! entries for the index and loads single entries with rendered HTML.
//! Operates on individual documents without caching or shared mutable
//! state, so one instance can serve concurrent readers.

use std::path::Path;
use std::sync::Arc;

use quill_renderer::{HighlightOptions, HtmlRenderer, RenderError};
use quill_storage::{FsStore, StorageError, Store};

use crate::entry::{EntryRecord, FullEntry};
use crate::frontmatter;

/// Error type for journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// The document store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The markdown body could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl JournalError {
    /// Whether this error means the requested entry does not exist.
    ///
    /// Lets the presentation layer map to its not-found state without
    /// matching nested enums.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_not_found())
    }
}

/// Journal content pipeline over a document store.
pub struct Journal {
    store: Arc<dyn Store>,
    renderer: HtmlRenderer,
}

impl Journal {
    /// Create a journal over an existing store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, options: HighlightOptions) -> Self {
        Self {
            store,
            renderer: HtmlRenderer::new(options),
        }
    }

    /// Convenience constructor wiring a filesystem store rooted at
    /// `content_root`, with default rendering options.
    #[must_use]
    pub fn open(content_root: impl AsRef<Path>) -> Self {
        Self::new(
            Arc::new(FsStore::new(content_root.as_ref().to_path_buf())),
            HighlightOptions::default(),
        )
    }

    /// List all entries, newest first.
    ///
    /// Dates are compared lexicographically as opaque strings, which
    /// orders ISO-8601 dates correctly; undated entries sort last. The
    /// sort is stable, so entries sharing a date keep their relative
    /// listing order. A document that cannot be read is skipped with a
    /// warning rather than failing the whole listing.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Storage`] when the store itself fails;
    /// a missing content root is created and yields an empty list.
    pub fn entries(&self) -> Result<Vec<EntryRecord>, JournalError> {
        self.store.ensure_exists()?;

        let ids = self.store.document_ids()?;
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            let raw = match self.store.read(&id) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "skipping unreadable document");
                    continue;
                }
            };
            let (fm, _body) = frontmatter::extract(&raw);
            records.push(EntryRecord::from_frontmatter(&id, fm));
        }

        records.sort_by(|a, b| b.date.cmp(&a.date));
        tracing::debug!(count = records.len(), "built entry index");
        Ok(records)
    }

    /// Load a single entry with its body rendered to HTML.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Storage`] when the document is missing
    /// or unreadable (check [`JournalError::is_not_found`]) and
    /// [`JournalError::Render`] when the body cannot be rendered.
    pub fn entry(&self, id: &str) -> Result<FullEntry, JournalError> {
        let raw = self.store.read(id)?;
        let (fm, body) = frontmatter::extract(&raw);
        let record = EntryRecord::from_frontmatter(id, fm);
        let content_html = self.renderer.render(body)?;
        Ok(FullEntry::new(record, content_html))
    }
}
