//! The snippet engine shared by both emitters.
//!
//! Static files are plain `format!` templates. Anything with a variable
//! number of lines goes through [`CodeWriter`], which owns indentation so the
//! snippets themselves stay flat. Values spliced into generated source must
//! pass through one of the quoting helpers here first.

use ferry_core::{CollisionPolicy, NameAllocator};

/// Indentation unit of every generated TypeScript and JSON file.
const INDENT: &str = "  ";

/// Line-oriented builder for generated source.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    depth: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line at the current depth. An empty line carries no
    /// trailing whitespace.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Append a multi-line snippet, re-indenting each of its lines.
    pub fn lines(&mut self, snippet: &str) -> &mut Self {
        for line in snippet.lines() {
            self.line(line);
        }
        self
    }

    /// Run `body` one level deeper.
    pub fn indented(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self
    }

    /// `open`, an indented `body`, then `close`.
    pub fn block(
        &mut self,
        open: impl AsRef<str>,
        close: impl AsRef<str>,
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.line(open);
        self.indented(body);
        self.line(close)
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Identifiers unique within one generated file. A repeated name from a
/// different source gets a numeric suffix (`getWelcome2`).
#[derive(Debug)]
pub struct LocalNames(NameAllocator);

impl LocalNames {
    pub fn new() -> Self {
        LocalNames(NameAllocator::new(CollisionPolicy::Suffix))
    }

    pub fn claim(&mut self, name: &str, source: &str) -> String {
        self.0.allocate_suffixed(name, source).name
    }
}

impl Default for LocalNames {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-quoted TypeScript string literal.
pub fn ts_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Double-quoted JSON string literal.
pub fn json_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Text safe to place between JSX tags.
pub fn jsx_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            '\n' | '\r' | '\t' => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// JSX attribute value: `"value"`, or `{'value'}` when it holds a `"`.
pub fn jsx_attr(value: &str) -> String {
    if value.contains('"') {
        format!("{{{}}}", ts_string(value))
    } else {
        format!("\"{}\"", value)
    }
}

/// A plain ASCII identifier, usable as-is in TypeScript and in file names.
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Body of a JSON object mapping names to strings, one `"k": "v"` per line at
/// `depth` levels of indentation, without the surrounding braces.
pub fn json_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>, depth: usize) -> String {
    let pad = INDENT.repeat(depth);
    entries
        .into_iter()
        .map(|(k, v)| format!("{}{}: {}", pad, json_string(k), json_string(v)))
        .collect::<Vec<_>>()
        .join(",\n")
}
