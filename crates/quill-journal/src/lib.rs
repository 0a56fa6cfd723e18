//! Journal content pipeline.
//!
//! Turns a directory of markdown documents with optional YAML
//! frontmatter into listing records and rendered entries:
//!
//! - [`frontmatter::extract`] splits a raw document into typed
//!   [`Frontmatter`] and body, tolerating absent or malformed headers.
//! - [`Journal::entries`] builds the index, newest first.
//! - [`Journal::entry`] loads one document and renders its body to
//!   HTML with syntax-highlighted code blocks.
//!
//! The pipeline is a library with no presentation concerns; records
//! serialize with `serde` for whatever layer sits on top.
//!
//! ```no_run
//! use quill_journal::Journal;
//!
//! # fn main() -> Result<(), quill_journal::JournalError> {
//! let journal = Journal::open("content/journal");
//! for entry in journal.entries()? {
//!     println!("{} ({})", entry.title, entry.date);
//! }
//! let full = journal.entry("first-post")?;
//! assert!(full.content_html.starts_with('<'));
//! # Ok(())
//! # }
//! ```

mod entry;
pub mod frontmatter;
mod journal;

pub use entry::{EntryRecord, FullEntry};
pub use frontmatter::Frontmatter;
pub use journal::{Journal, JournalError};
