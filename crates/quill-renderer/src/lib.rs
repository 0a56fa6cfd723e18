//! Markdown-to-HTML renderer with code highlighting.
//!
//! This crate turns a journal entry body into an HTML string in a fixed
//! pipeline:
//!
//! 1. Parse the markdown with `pulldown-cmark`
//! 2. Fold the event stream into HTML
//! 3. Divert fenced code blocks through the [`highlight`] pass, which
//!    tokenizes by declared language and wraps tokens in theme-colored spans
//!
//! Serialization is incremental: the event fold writes straight into the
//! output buffer, so step 2 and the final string are the same pass.
//!
//! Rendering the same body twice produces byte-identical output, and an
//! unrecognized code-block language degrades to a plain escaped block
//! rather than failing the document.
//!
//! # Example
//!
//! ```
//! use quill_renderer::{HighlightOptions, HtmlRenderer};
//!
//! let renderer = HtmlRenderer::new(HighlightOptions::default());
//! let html = renderer.render("# Hello\n\n**Bold** text").unwrap();
//! assert!(html.contains("<strong>Bold</strong>"));
//! ```

mod escape;
pub mod highlight;
mod renderer;

pub use escape::escape_html;
pub use highlight::{HighlightOptions, Theme};
pub use renderer::{HtmlRenderer, RenderError};
