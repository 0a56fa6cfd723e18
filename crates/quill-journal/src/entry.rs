//! Entry record types.
//!
//! Two shapes cross the API boundary: [`EntryRecord`] for listings
//! (metadata only, no body in any form) and [`FullEntry`] for a single
//! rendered entry (rendered HTML, no raw markup). Both serialize with
//! `serde` so the presentation layer can ship them as JSON directly.

use serde::{Deserialize, Serialize};

use crate::frontmatter::Frontmatter;

/// Lightweight listing record for one journal entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Stable identifier, the document filename without extension.
    pub id: String,
    /// Display title; derived from the id when the header has none.
    pub title: String,
    /// Opaque date string; empty when unset (sorts after dated entries).
    pub date: String,
    /// Short summary; empty when unset.
    pub description: String,
    /// Topic tags in authored order.
    pub tags: Vec<String>,
}

impl EntryRecord {
    /// Build a record from extracted frontmatter, lowering every
    /// optional field to its safe default in one place.
    #[must_use]
    pub(crate) fn from_frontmatter(id: &str, frontmatter: Frontmatter) -> Self {
        Self {
            id: id.to_owned(),
            title: frontmatter
                .title
                .unwrap_or_else(|| title_from_id(id)),
            date: frontmatter.date.unwrap_or_default(),
            description: frontmatter.description.unwrap_or_default(),
            tags: frontmatter.tags,
        }
    }
}

/// A single entry with its rendered body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullEntry {
    /// Stable identifier, the document filename without extension.
    pub id: String,
    /// Display title; derived from the id when the header has none.
    pub title: String,
    /// Opaque date string; empty when unset.
    pub date: String,
    /// Short summary; empty when unset.
    pub description: String,
    /// Topic tags in authored order.
    pub tags: Vec<String>,
    /// Rendered HTML body. The raw markup is never exposed.
    pub content_html: String,
}

impl FullEntry {
    pub(crate) fn new(record: EntryRecord, content_html: String) -> Self {
        Self {
            id: record.id,
            title: record.title,
            date: record.date,
            description: record.description,
            tags: record.tags,
            content_html,
        }
    }
}

/// Derive a human-readable title from a document id:
/// `why-rust-wins` becomes `Why Rust Wins`.
fn title_from_id(id: &str) -> String {
    id.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
