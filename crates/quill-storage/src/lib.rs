//! Document storage for the quill journal pipeline.
//!
//! This crate provides a [`Store`] trait abstracting document listing and
//! retrieval from the underlying storage backend. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Clean separation** between pipeline logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Store`] trait with `document_ids()`, `read()`, and `exists()` methods
//! - [`FsStore`] implementation backed by a content directory
//! - [`MockStore`] for testing (behind the `mock` feature flag)
//!
//! # Document Identity
//!
//! A document id is its filename minus the `.md` extension. Ids are embedded
//! directly into URL paths by the presentation layer, so [`Store`] methods
//! reject ids containing path separators or parent-directory components.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), quill_storage::StorageError> {
//! use std::path::PathBuf;
//! use quill_storage::{FsStore, Store};
//!
//! let store = FsStore::new(PathBuf::from("content/journal"));
//! store.ensure_exists()?;
//! for id in store.document_ids()? {
//!     let raw = store.read(&id)?;
//!     println!("{id}: {} bytes", raw.len());
//! }
//! # Ok(())
//! # }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod store;

pub use fs::FsStore;
#[cfg(feature = "mock")]
pub use mock::MockStore;
pub use store::{StorageError, Store};
