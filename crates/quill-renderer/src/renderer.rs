//! Markdown event stream to HTML.

use std::fmt::Write;
use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::escape::escape_html;
use crate::highlight::{HighlightOptions, highlight_code_block};

/// Block nesting beyond this depth is rejected rather than rendered.
/// Authored content never gets close; only pathological input does.
const MAX_DEPTH: usize = 64;

/// Error raised when a body cannot be rendered.
///
/// The markdown grammar itself is total (unclosed fences run to end of
/// document, stray markers render literally), so the only failure is the
/// nesting guard tripping on degenerate input.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Block nesting exceeded [`MAX_DEPTH`] levels.
    #[error("markup nesting exceeds supported depth at byte offset {offset}")]
    NestingTooDeep {
        /// Byte offset of the construct that tripped the guard.
        offset: usize,
    },
}

/// Markdown-to-HTML renderer.
///
/// Stateless across calls: rendering borrows the configuration and builds
/// all per-document state internally, so one renderer can serve any number
/// of documents and identical input always yields identical output.
pub struct HtmlRenderer {
    options: HighlightOptions,
}

impl HtmlRenderer {
    /// Create a renderer with the given highlighting configuration.
    #[must_use]
    pub fn new(options: HighlightOptions) -> Self {
        Self { options }
    }

    /// Render a markdown body to an HTML string.
    ///
    /// An empty body renders to an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NestingTooDeep`] for pathologically nested
    /// input; everything else the grammar tolerates renders to *some* HTML.
    pub fn render(&self, body: &str) -> Result<String, RenderError> {
        let parser = Parser::new_ext(body, parser_options());
        let mut writer = HtmlWriter::new(&self.options, body.len());
        for (event, range) in parser.into_offset_iter() {
            writer.event(event, &range)?;
        }
        Ok(writer.finish())
    }
}

/// GFM-flavored option set, matching the house default.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

fn heading_level_to_num(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Fenced code block being captured for the highlight pass.
struct CodeCapture {
    lang: Option<String>,
    buf: String,
}

/// Image whose alt text is being collected from nested events.
struct ImageCapture {
    src: String,
    title: String,
    alt: String,
}

/// Folds a markdown event stream into an HTML string.
struct HtmlWriter<'a> {
    out: String,
    code: Option<CodeCapture>,
    image: Option<ImageCapture>,
    nested_images: usize,
    in_table_head: bool,
    depth: usize,
    options: &'a HighlightOptions,
}

impl<'a> HtmlWriter<'a> {
    fn new(options: &'a HighlightOptions, body_len: usize) -> Self {
        Self {
            out: String::with_capacity(body_len + body_len / 2),
            code: None,
            image: None,
            nested_images: 0,
            in_table_head: false,
            depth: 0,
            options,
        }
    }

    fn finish(self) -> String {
        self.out
    }

    fn event(&mut self, event: Event<'_>, range: &Range<usize>) -> Result<(), RenderError> {
        match event {
            Event::Start(tag) => {
                self.depth += 1;
                if self.depth > MAX_DEPTH {
                    return Err(RenderError::NestingTooDeep {
                        offset: range.start,
                    });
                }
                self.start_tag(tag);
            }
            Event::End(tag) => {
                self.depth = self.depth.saturating_sub(1);
                self.end_tag(tag);
            }
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => {
                // Author-trusted content passes through unmodified.
                if self.image.is_none() {
                    self.out.push_str(&html);
                }
            }
            Event::SoftBreak => self.text("\n"),
            Event::HardBreak => self.out.push_str("<br>"),
            Event::Rule => self.out.push_str("<hr>"),
            Event::TaskListMarker(checked) => {
                self.out.push_str(if checked {
                    r#"<input type="checkbox" checked disabled>"#
                } else {
                    r#"<input type="checkbox" disabled>"#
                });
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        // While collecting alt text, nested inline markup contributes only
        // its text content.
        if self.image.is_some() {
            if matches!(tag, Tag::Image { .. }) {
                self.nested_images += 1;
            }
            return;
        }
        match tag {
            Tag::Paragraph => self.out.push_str("<p>"),
            Tag::Heading { level, .. } => {
                write!(self.out, "<h{}>", heading_level_to_num(level)).unwrap();
            }
            Tag::BlockQuote(_) => self.out.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) => info
                        .split_whitespace()
                        .next()
                        .filter(|l| !l.is_empty())
                        .map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some(CodeCapture {
                    lang,
                    buf: String::new(),
                });
            }
            Tag::List(start) => match start {
                Some(1) => self.out.push_str("<ol>"),
                Some(n) => write!(self.out, r#"<ol start="{n}">"#).unwrap(),
                None => self.out.push_str("<ul>"),
            },
            Tag::Item => self.out.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.out.push_str("<dl>"),
            Tag::DefinitionListTitle => self.out.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.out.push_str("<dd>"),
            Tag::Table(_) => self.out.push_str("<table>"),
            Tag::TableHead => {
                self.in_table_head = true;
                self.out.push_str("<thead><tr>");
            }
            Tag::TableRow => self.out.push_str("<tr>"),
            Tag::TableCell => {
                self.out
                    .push_str(if self.in_table_head { "<th>" } else { "<td>" });
            }
            Tag::Emphasis => self.out.push_str("<em>"),
            Tag::Strong => self.out.push_str("<strong>"),
            Tag::Strikethrough => self.out.push_str("<s>"),
            Tag::Link { dest_url, .. } => {
                write!(self.out, r#"<a href="{}">"#, escape_html(&dest_url)).unwrap();
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image = Some(ImageCapture {
                    src: dest_url.into_string(),
                    title: title.into_string(),
                    alt: String::new(),
                });
            }
            Tag::Superscript => self.out.push_str("<sup>"),
            Tag::Subscript => self.out.push_str("<sub>"),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        if self.image.is_some() {
            if !matches!(tag, TagEnd::Image) {
                return;
            }
            if self.nested_images > 0 {
                self.nested_images -= 1;
                return;
            }
        }
        match tag {
            TagEnd::Paragraph => self.out.push_str("</p>"),
            TagEnd::Heading(level) => {
                write!(self.out, "</h{}>", heading_level_to_num(level)).unwrap();
            }
            TagEnd::BlockQuote(_) => self.out.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    let block =
                        highlight_code_block(code.lang.as_deref(), &code.buf, self.options);
                    self.out.push_str(&block);
                }
            }
            TagEnd::List(ordered) => {
                self.out.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.out.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::Image => {
                if let Some(image) = self.image.take() {
                    write!(
                        self.out,
                        r#"<img src="{}" alt="{}""#,
                        escape_html(&image.src),
                        escape_html(&image.alt)
                    )
                    .unwrap();
                    if !image.title.is_empty() {
                        write!(self.out, r#" title="{}""#, escape_html(&image.title)).unwrap();
                    }
                    self.out.push('>');
                }
            }
            TagEnd::DefinitionList => self.out.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.out.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.out.push_str("</dd>"),
            TagEnd::Table => self.out.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.out.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.out.push_str("</tr>"),
            TagEnd::TableCell => {
                self.out
                    .push_str(if self.in_table_head { "</th>" } else { "</td>" });
            }
            TagEnd::Emphasis => self.out.push_str("</em>"),
            TagEnd::Strong => self.out.push_str("</strong>"),
            TagEnd::Strikethrough => self.out.push_str("</s>"),
            TagEnd::Link => self.out.push_str("</a>"),
            TagEnd::Superscript => self.out.push_str("</sup>"),
            TagEnd::Subscript => self.out.push_str("</sub>"),
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(code) = self.code.as_mut() {
            code.buf.push_str(text);
        } else if let Some(image) = self.image.as_mut() {
            image.alt.push_str(text);
        } else {
            self.out.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if let Some(image) = self.image.as_mut() {
            image.alt.push_str(code);
        } else {
            write!(self.out, "<code>{}</code>", escape_html(code)).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(body: &str) -> String {
        HtmlRenderer::new(HighlightOptions::default())
            .render(body)
            .unwrap()
    }

    #[test]
    fn basic_paragraph() {
        assert_eq!(render("Hello, world!"), "<p>Hello, world!</p>");
    }

    #[test]
    fn empty_body_renders_empty() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn headings() {
        assert_eq!(render("## Section"), "<h2>Section</h2>");
    }

    #[test]
    fn emphasis_and_strong() {
        let html = render("*italic* and **bold** and ~~gone~~");
        assert!(html.contains("<em>italic</em>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<s>gone</s>"));
    }

    #[test]
    fn unordered_and_ordered_lists() {
        let html = render("- one\n- two");
        assert!(html.contains("<ul><li>one</li><li>two</li></ul>"));

        let html = render("3. three\n4. four");
        assert!(html.contains(r#"<ol start="3">"#));
    }

    #[test]
    fn links_are_escaped() {
        let html = render("[click](https://example.com?a=1&b=2)");
        assert_eq!(
            html,
            r#"<p><a href="https://example.com?a=1&amp;b=2">click</a></p>"#
        );
    }

    #[test]
    fn image_alt_text_collected() {
        let html = render("![An *emphatic* cat](cat.png)");
        assert_eq!(
            html,
            r#"<p><img src="cat.png" alt="An emphatic cat"></p>"#
        );
    }

    #[test]
    fn image_title_attribute() {
        let html = render(r#"![alt](img.png "the title")"#);
        assert!(html.contains(r#" title="the title""#));
    }

    #[test]
    fn inline_code_escaped() {
        assert_eq!(
            render("use `Vec<u8>` here"),
            "<p>use <code>Vec&lt;u8&gt;</code> here</p>"
        );
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(render("1 < 2 & 3 > 2"), "<p>1 &lt; 2 &amp; 3 &gt; 2</p>");
    }

    #[test]
    fn blockquote() {
        assert_eq!(
            render("> quoted"),
            "<blockquote><p>quoted</p></blockquote>"
        );
    }

    #[test]
    fn fenced_code_block_is_highlighted() {
        let html = render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<pre data-theme="github-dark""#));
        assert!(html.contains(r#"class="language-rust""#));
        assert!(html.contains(r##"<span style="color:#ff7b72">fn</span>"##));
    }

    #[test]
    fn fenced_block_unknown_language_degrades() {
        let html = render("```mystery\na < b\n```");
        assert!(html.contains(r#"class="language-mystery""#));
        assert!(html.contains("a &lt; b\n"));
    }

    #[test]
    fn fenced_block_without_language() {
        let html = render("```\nplain\n```");
        assert!(html.contains("<code>plain\n</code>"));
    }

    #[test]
    fn unclosed_fence_runs_to_end() {
        let html = render("```rust\nlet x = 1;");
        assert!(html.contains("let"));
        assert!(html.ends_with("</code></pre>"));
    }

    #[test]
    fn indented_code_block_is_plain() {
        let html = render("    indented code\n");
        assert!(html.contains("<code>indented code\n</code>"));
        assert!(!html.contains("language-"));
    }

    #[test]
    fn table_rendering() {
        let html = render("| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table><thead><tr><th>A</th><th>B</th></tr></thead><tbody>"));
        assert!(html.contains("<td>1</td><td>2</td>"));
        assert!(html.ends_with("</tbody></table>"));
    }

    #[test]
    fn task_list_markers() {
        let html = render("- [ ] open\n- [x] done");
        assert!(html.contains(r#"<input type="checkbox" disabled>"#));
        assert!(html.contains(r#"<input type="checkbox" checked disabled>"#));
    }

    #[test]
    fn rule_and_breaks() {
        assert!(render("---").contains("<hr>"));
        assert!(render("line one  \nline two").contains("<br>"));
    }

    #[test]
    fn raw_html_passes_through() {
        let html = render("before\n\n<div class=\"x\">raw</div>\n\nafter");
        assert!(html.contains(r#"<div class="x">raw</div>"#));
    }

    #[test]
    fn rendering_is_idempotent() {
        let body = "# T\n\npara with `code`\n\n```rust\nfn f() -> u8 { 0 }\n```\n";
        let renderer = HtmlRenderer::new(HighlightOptions::default());
        assert_eq!(renderer.render(body).unwrap(), renderer.render(body).unwrap());
    }

    #[test]
    fn pathological_nesting_is_an_error() {
        let body = format!("{}deep", "> ".repeat(MAX_DEPTH + 8));
        let err = HtmlRenderer::new(HighlightOptions::default())
            .render(&body)
            .unwrap_err();
        assert!(matches!(err, RenderError::NestingTooDeep { .. }));
    }

    #[test]
    fn nesting_under_the_guard_renders() {
        let body = format!("{}ok", "> ".repeat(16));
        let html = render(&body);
        assert!(html.contains("ok"));
    }
}
