//! Frontmatter extraction.
//!
//! A document may open with a YAML header fenced by `---` marker lines:
//!
//! ```text
//! ---
//! title: Some Entry
//! date: 2024-03-01
//! ---
//! body starts here
//! ```
//!
//! Extraction happens exactly once, at the storage boundary. Everything
//! downstream works with the typed [`Frontmatter`] and never re-inspects
//! the raw text.

use serde::{Deserialize, Serialize};

/// Typed view of a document's YAML header.
///
/// Every field is optional in the source; unknown keys are ignored.
/// Defaults are applied when the header is absent, unclosed, or
/// malformed, so callers never see a parse failure for metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Display title. Absent titles are later derived from the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Publication date, kept as an opaque string and compared
    /// lexicographically (ISO-8601 dates order correctly this way).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Short summary for listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Topic tags in authored order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Split a raw document into its frontmatter and body.
///
/// The header is recognized only when the first line is exactly `---`
/// and a closing `---` or `...` line follows. An unclosed header is
/// treated as ordinary body text. Malformed YAML inside the markers is
/// tolerated: the header is dropped with a warning and the body is
/// still everything after the closing marker.
///
/// The body keeps its original formatting. Only the newline after the
/// closing marker is consumed.
pub fn extract(raw: &str) -> (Frontmatter, &str) {
    let Some((header, body)) = split(raw) else {
        return (Frontmatter::default(), raw);
    };

    match parse_header(header) {
        Ok(frontmatter) => (frontmatter, body),
        Err(e) => {
            tracing::warn!(error = %e, "malformed frontmatter, using empty metadata");
            (Frontmatter::default(), body)
        }
    }
}

/// Locate the header block. `None` when the document has no header.
fn split(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix("---")?;
    let rest = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed == "---" || trimmed == "..." {
            let header = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((header, body));
        }
        offset += line.len();
    }

    // Unclosed header: the whole document is body.
    None
}

fn parse_header(header: &str) -> Result<Frontmatter, serde_yaml::Error> {
    if header.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml::from_str(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_recognized_fields() {
        let raw = "---\ntitle: Hello\ndate: 2024-03-01\ndescription: greeting\ntags:\n  - intro\n  - meta\n---\nBody text.\n";
        let (fm, body) = extract(raw);
        assert_eq!(fm.title, Some("Hello".to_owned()));
        assert_eq!(fm.date, Some("2024-03-01".to_owned()));
        assert_eq!(fm.description, Some("greeting".to_owned()));
        assert_eq!(fm.tags, vec!["intro".to_owned(), "meta".to_owned()]);
        assert_eq!(body, "Body text.\n");
    }

    #[test]
    fn no_header_returns_whole_text_as_body() {
        let raw = "Just a plain document.\n\nNo header here.";
        let (fm, body) = extract(raw);
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, raw);
    }

    #[test]
    fn header_must_start_on_first_line() {
        let raw = "\n---\ntitle: Nope\n---\nbody";
        let (fm, body) = extract(raw);
        assert!(fm.title.is_none());
        assert_eq!(body, raw);
    }

    #[test]
    fn unclosed_header_is_body() {
        let raw = "---\ntitle: Dangling\n\nNever closed.";
        let (fm, body) = extract(raw);
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, raw);
    }

    #[test]
    fn malformed_yaml_falls_back_to_empty_metadata() {
        let raw = "---\ntitle: [unterminated\n---\nThe body survives.";
        let (fm, body) = extract(raw);
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, "The body survives.");
    }

    #[test]
    fn empty_header_block() {
        let raw = "---\n---\nbody";
        let (fm, body) = extract(raw);
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, "body");
    }

    #[test]
    fn dots_close_the_header() {
        let raw = "---\ntitle: T\n...\nbody";
        let (fm, body) = extract(raw);
        assert_eq!(fm.title, Some("T".to_owned()));
        assert_eq!(body, "body");
    }

    #[test]
    fn crlf_markers_accepted() {
        let raw = "---\r\ntitle: Windows\r\n---\r\nbody\r\n";
        let (fm, body) = extract(raw);
        assert_eq!(fm.title, Some("Windows".to_owned()));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn body_formatting_preserved() {
        let raw = "---\ntitle: T\n---\n\n  indented first line\n\ntrailing\n\n";
        let (_, body) = extract(raw);
        assert_eq!(body, "\n  indented first line\n\ntrailing\n\n");
    }

    #[test]
    fn unknown_keys_ignored() {
        let raw = "---\ntitle: T\ndraft: true\nweight: 3\n---\nbody";
        let (fm, _) = extract(raw);
        assert_eq!(fm.title, Some("T".to_owned()));
    }

    #[test]
    fn empty_document() {
        let (fm, body) = extract("");
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, "");
    }

    #[test]
    fn thematic_break_in_headerless_body_untouched() {
        let raw = "intro\n\n---\n\noutro";
        let (fm, body) = extract(raw);
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, raw);
    }
}
