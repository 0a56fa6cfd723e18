//! Syntax highlighting for fenced code blocks.
//!
//! Fenced blocks are tokenized by their declared language with a small
//! lexical scanner (comments, strings, numbers, keywords, call sites) and
//! each token is wrapped in a theme-colored `<span>`. The scanner is a
//! single deterministic pass, so identical input always produces identical
//! markup.
//!
//! Languages without a registered [`LanguageSpec`] degrade to a plain
//! escaped code block; a missing or unknown language tag is never an error.

use std::fmt::Write;

use crate::escape::escape_html;

/// A fixed presentation theme for highlighted code.
///
/// Colors are CSS color literals written into inline `style` attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Theme identifier, emitted as `data-theme` on the `<pre>` element.
    pub name: &'static str,
    /// Block background color.
    pub background: &'static str,
    /// Default text color.
    pub foreground: &'static str,
    keyword: &'static str,
    string: &'static str,
    comment: &'static str,
    number: &'static str,
    function: &'static str,
}

impl Theme {
    /// The GitHub dark palette.
    #[must_use]
    pub fn github_dark() -> Self {
        Self {
            name: "github-dark",
            background: "#0d1117",
            foreground: "#e6edf3",
            keyword: "#ff7b72",
            string: "#a5d6ff",
            comment: "#8b949e",
            number: "#79c0ff",
            function: "#d2a8ff",
        }
    }

    fn color(&self, kind: TokenKind) -> Option<&'static str> {
        match kind {
            TokenKind::Keyword => Some(self.keyword),
            TokenKind::Str => Some(self.string),
            TokenKind::Comment => Some(self.comment),
            TokenKind::Number => Some(self.number),
            TokenKind::Function => Some(self.function),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::github_dark()
    }
}

/// Rendering configuration for highlighted code blocks.
#[derive(Clone, Debug)]
pub struct HighlightOptions {
    /// Color scheme applied to recognized tokens.
    pub theme: Theme,
    /// When true, the theme background and foreground are written as an
    /// inline `style` on the `<pre>` element. When false only `data-theme`
    /// is emitted and background styling is left to an external stylesheet.
    pub keep_background: bool,
}

impl Default for HighlightOptions {
    /// The journal's fixed configuration: `github-dark` with inline
    /// backgrounds.
    fn default() -> Self {
        Self {
            theme: Theme::github_dark(),
            keep_background: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenKind {
    Keyword,
    Str,
    Comment,
    Number,
    Function,
}

/// Lexical shape of one language: enough to color the token classes the
/// theme distinguishes, nothing more.
struct LanguageSpec {
    keywords: &'static [&'static str],
    line_comments: &'static [&'static str],
    block_comment: Option<(&'static str, &'static str)>,
    string_delims: &'static [char],
}

static RUST: LanguageSpec = LanguageSpec {
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
        "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
        "true", "type", "unsafe", "use", "where", "while",
    ],
    line_comments: &["//"],
    block_comment: Some(("/*", "*/")),
    // Single quotes are left plain so lifetimes don't read as strings.
    string_delims: &['"'],
};

static JAVASCRIPT: LanguageSpec = LanguageSpec {
    keywords: &[
        "async", "await", "break", "case", "catch", "class", "const", "continue", "default",
        "delete", "do", "else", "export", "extends", "false", "finally", "for", "from",
        "function", "if", "import", "in", "instanceof", "interface", "let", "new", "null", "of",
        "return", "static", "super", "switch", "this", "throw", "true", "try", "type", "typeof",
        "undefined", "var", "void", "while", "yield",
    ],
    line_comments: &["//"],
    block_comment: Some(("/*", "*/")),
    string_delims: &['"', '\'', '`'],
};

static PYTHON: LanguageSpec = LanguageSpec {
    keywords: &[
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
        "try", "while", "with", "yield",
    ],
    line_comments: &["#"],
    block_comment: None,
    string_delims: &['"', '\''],
};

static JSON: LanguageSpec = LanguageSpec {
    keywords: &["false", "null", "true"],
    line_comments: &[],
    block_comment: None,
    string_delims: &['"'],
};

static TOML: LanguageSpec = LanguageSpec {
    keywords: &["false", "true"],
    line_comments: &["#"],
    block_comment: None,
    string_delims: &['"', '\''],
};

static YAML: LanguageSpec = LanguageSpec {
    keywords: &["false", "no", "null", "true", "yes"],
    line_comments: &["#"],
    block_comment: None,
    string_delims: &['"', '\''],
};

static SHELL: LanguageSpec = LanguageSpec {
    keywords: &[
        "case", "do", "done", "echo", "elif", "else", "esac", "export", "fi", "for", "function",
        "if", "in", "local", "return", "select", "then", "until", "while",
    ],
    line_comments: &["#"],
    block_comment: None,
    string_delims: &['"', '\''],
};

static GO: LanguageSpec = LanguageSpec {
    keywords: &[
        "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
        "false", "for", "func", "go", "goto", "if", "import", "interface", "map", "nil",
        "package", "range", "return", "select", "struct", "switch", "true", "type", "var",
    ],
    line_comments: &["//"],
    block_comment: Some(("/*", "*/")),
    string_delims: &['"', '`'],
};

static C: LanguageSpec = LanguageSpec {
    keywords: &[
        "auto", "bool", "break", "case", "char", "class", "const", "continue", "default", "do",
        "double", "else", "enum", "extern", "float", "for", "goto", "if", "int", "long",
        "namespace", "new", "nullptr", "public", "private", "return", "short", "signed",
        "sizeof", "static", "struct", "switch", "template", "typedef", "union", "unsigned",
        "using", "void", "volatile", "while",
    ],
    line_comments: &["//"],
    block_comment: Some(("/*", "*/")),
    string_delims: &['"', '\''],
};

/// Resolve a fence language tag to a language spec.
///
/// Tags are matched case-insensitively; unrecognized tags return `None`,
/// which callers must treat as "render plain", never as an error.
fn language(tag: &str) -> Option<&'static LanguageSpec> {
    match tag.to_ascii_lowercase().as_str() {
        "rust" | "rs" => Some(&RUST),
        "javascript" | "js" | "jsx" | "typescript" | "ts" | "tsx" => Some(&JAVASCRIPT),
        "python" | "py" => Some(&PYTHON),
        "json" => Some(&JSON),
        "toml" => Some(&TOML),
        "yaml" | "yml" => Some(&YAML),
        "bash" | "sh" | "shell" | "zsh" => Some(&SHELL),
        "go" | "golang" => Some(&GO),
        "c" | "cpp" | "c++" | "cc" => Some(&C),
        _ => None,
    }
}

/// Render one fenced code block as a complete `<pre><code>` element.
///
/// The code text survives verbatim (escaped, whitespace intact) whether or
/// not the language is recognized.
#[must_use]
pub fn highlight_code_block(lang: Option<&str>, code: &str, options: &HighlightOptions) -> String {
    let mut out = String::with_capacity(code.len() + 128);

    write!(out, r#"<pre data-theme="{}""#, options.theme.name).unwrap();
    if options.keep_background {
        write!(
            out,
            r#" style="background-color:{};color:{}""#,
            options.theme.background, options.theme.foreground
        )
        .unwrap();
    }
    out.push('>');

    match lang {
        Some(tag) => write!(out, r#"<code class="language-{}">"#, escape_html(tag)).unwrap(),
        None => out.push_str("<code>"),
    }

    match lang.and_then(language) {
        Some(spec) => highlight_into(&mut out, code, spec, &options.theme),
        None => out.push_str(&escape_html(code)),
    }

    out.push_str("</code></pre>");
    out
}

/// Tokenize `code` and append theme-colored markup to `out`.
fn highlight_into(out: &mut String, code: &str, spec: &LanguageSpec, theme: &Theme) {
    let mut i = 0;
    let mut plain_start = 0;

    while i < code.len() {
        let rest = &code[i..];

        if spec.line_comments.iter().any(|m| rest.starts_with(m)) {
            let end = rest.find('\n').map_or(code.len(), |n| i + n);
            flush_plain(out, &code[plain_start..i]);
            push_span(out, TokenKind::Comment, &code[i..end], theme);
            i = end;
            plain_start = i;
            continue;
        }

        if let Some((open, close)) = spec.block_comment {
            if rest.starts_with(open) {
                let end = rest[open.len()..]
                    .find(close)
                    .map_or(code.len(), |n| i + open.len() + n + close.len());
                flush_plain(out, &code[plain_start..i]);
                push_span(out, TokenKind::Comment, &code[i..end], theme);
                i = end;
                plain_start = i;
                continue;
            }
        }

        let Some(c) = rest.chars().next() else { break };

        if spec.string_delims.contains(&c) {
            let end = string_end(code, i, c);
            flush_plain(out, &code[plain_start..i]);
            push_span(out, TokenKind::Str, &code[i..end], theme);
            i = end;
            plain_start = i;
            continue;
        }

        if c.is_ascii_digit() {
            let end = i + token_len(rest, |ch| {
                ch.is_ascii_alphanumeric() || ch == '.' || ch == '_'
            });
            flush_plain(out, &code[plain_start..i]);
            push_span(out, TokenKind::Number, &code[i..end], theme);
            i = end;
            plain_start = i;
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let end = i + token_len(rest, |ch| ch.is_alphanumeric() || ch == '_');
            let word = &code[i..end];
            if spec.keywords.contains(&word) {
                flush_plain(out, &code[plain_start..i]);
                push_span(out, TokenKind::Keyword, word, theme);
                plain_start = end;
            } else if code[end..].starts_with('(') {
                flush_plain(out, &code[plain_start..i]);
                push_span(out, TokenKind::Function, word, theme);
                plain_start = end;
            }
            // A plain identifier stays in the pending run.
            i = end;
            continue;
        }

        i += c.len_utf8();
    }

    flush_plain(out, &code[plain_start..]);
}

/// Byte length of the token at the start of `rest` matching `pred`.
fn token_len(rest: &str, pred: impl Fn(char) -> bool) -> usize {
    rest.char_indices()
        .find(|&(_, ch)| !pred(ch))
        .map_or(rest.len(), |(off, _)| off)
}

/// Find the end (exclusive) of a string literal opened at `start` with
/// delimiter `delim`, honoring backslash escapes. Unterminated literals run
/// to end of input.
fn string_end(code: &str, start: usize, delim: char) -> usize {
    let body = start + delim.len_utf8();
    let mut escaped = false;
    for (off, ch) in code[body..].char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == delim {
            return body + off + ch.len_utf8();
        }
    }
    code.len()
}

fn flush_plain(out: &mut String, text: &str) {
    if !text.is_empty() {
        out.push_str(&escape_html(text));
    }
}

fn push_span(out: &mut String, kind: TokenKind, text: &str, theme: &Theme) {
    match theme.color(kind) {
        Some(color) => {
            write!(out, r#"<span style="color:{color}">{}</span>"#, escape_html(text)).unwrap();
        }
        None => out.push_str(&escape_html(text)),
    }
}
