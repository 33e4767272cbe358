/*!
 * Translation-target nodes and the encoding of their text payloads.
 *
 * Each variant knows how to decode its payload from the original source and
 * how to render a replacement so that the surrounding syntax stays valid:
 * - literals keep their quote style and are re-escaped,
 * - JSX text runs are padded with one space on each side and entity-escaped,
 * - comments keep their delimiter style and are padded with one space.
 */

use std::fmt;
use std::ops::Range;

use super::tree::SourceTree;
use crate::errors::SyntaxError;

/// Category of a translation-target node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Literal,
    TextRun,
    Comment,
}

impl NodeKind {
    /// Short label used in diagnostics and dry-run markers
    pub fn label(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::TextRun => "text-run",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Read/write access to the text carried by a node
pub trait TextPayload {
    /// Byte range of the node in the original source
    fn span(&self) -> Range<usize>;

    fn kind(&self) -> NodeKind;

    /// Human-readable text of the node, decoded from the original source
    fn read(&self, source: &str) -> String;

    /// Source text that replaces the whole node when it carries `text`
    fn render(&self, text: &str) -> String;
}

/// A string literal such as `"こんにちは"` or a JSX attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralNode {
    pub span: Range<usize>,
    pub quote: char,
    /// JSX attribute strings take no backslash escapes
    pub jsx_attribute: bool,
}

/// A run of text between JSX tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRunNode {
    pub span: Range<usize>,
}

/// Delimiter style of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// ...`, keeping the number of slashes of the original (`///` stays `///`)
    Line { slashes: usize },
    /// `/* ... */`
    Block,
    /// `/** ... */`
    Doc,
}

impl CommentStyle {
    fn opener(&self) -> String {
        match self {
            Self::Line { slashes } => "/".repeat(*slashes),
            Self::Block => "/*".to_string(),
            Self::Doc => "/**".to_string(),
        }
    }
}

/// A line or block comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    pub span: Range<usize>,
    pub style: CommentStyle,
}

impl CommentNode {
    /// Build from the raw comment text, detecting its delimiter style
    pub fn from_raw(span: Range<usize>, raw: &str) -> Option<Self> {
        let style = if raw.starts_with("//") {
            CommentStyle::Line {
                slashes: raw.chars().take_while(|c| *c == '/').count(),
            }
        } else if raw.starts_with("/**") && raw.len() > 4 {
            CommentStyle::Doc
        } else if raw.starts_with("/*") {
            CommentStyle::Block
        } else {
            return None;
        };
        Some(Self { span, style })
    }
}

/// One of the three kinds of translation-target nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslatableNode {
    Literal(LiteralNode),
    TextRun(TextRunNode),
    Comment(CommentNode),
}

impl TranslatableNode {
    fn payload(&self) -> &dyn TextPayload {
        match self {
            Self::Literal(node) => node,
            Self::TextRun(node) => node,
            Self::Comment(node) => node,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.payload().kind()
    }

    pub fn span(&self) -> Range<usize> {
        self.payload().span()
    }

    /// 1-based line of the node in the original source
    pub fn line(&self, tree: &SourceTree) -> usize {
        let start = self.span().start.min(tree.source().len());
        tree.source().as_bytes()[..start]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1
    }

    /// Current text of the node as it appears in the original source
    pub fn text(&self, tree: &SourceTree) -> String {
        self.read_in(tree.source())
    }

    pub(crate) fn read_in(&self, source: &str) -> String {
        self.payload().read(source)
    }

    /// Give the node a new text payload
    pub fn replace(&self, tree: &mut SourceTree, text: &str) -> Result<(), SyntaxError> {
        let payload = self.payload();
        tree.replace(payload.span(), payload.render(text))
    }
}

impl TextPayload for LiteralNode {
    fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Literal
    }

    fn read(&self, source: &str) -> String {
        let raw = source.get(self.span.clone()).unwrap_or_default();
        let inner = raw
            .strip_prefix(self.quote)
            .and_then(|rest| rest.strip_suffix(self.quote))
            .unwrap_or(raw);

        if self.jsx_attribute {
            inner.to_string()
        } else {
            decode_escapes(inner)
        }
    }

    fn render(&self, text: &str) -> String {
        if self.jsx_attribute {
            encode_jsx_attribute(text, self.quote)
        } else {
            encode_string_literal(text, self.quote)
        }
    }
}

impl TextPayload for TextRunNode {
    fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::TextRun
    }

    fn read(&self, source: &str) -> String {
        source.get(self.span.clone()).unwrap_or_default().trim().to_string()
    }

    fn render(&self, text: &str) -> String {
        format!(" {} ", escape_jsx_text(text.trim()))
    }
}

impl TextPayload for CommentNode {
    fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Comment
    }

    fn read(&self, source: &str) -> String {
        let raw = source.get(self.span.clone()).unwrap_or_default();
        match self.style {
            CommentStyle::Line { .. } => raw.trim_start_matches('/').trim().to_string(),
            CommentStyle::Block | CommentStyle::Doc => {
                let inner = raw
                    .strip_prefix(self.style.opener().as_str())
                    .unwrap_or(raw)
                    .strip_suffix("*/")
                    .unwrap_or(raw);
                let lines: Vec<&str> = inner
                    .lines()
                    .map(|line| {
                        let line = line.trim_start();
                        line.strip_prefix('*').unwrap_or(line).trim()
                    })
                    .collect();
                lines.join("\n").trim().to_string()
            }
        }
    }

    fn render(&self, text: &str) -> String {
        let text = text.trim();
        match self.style {
            CommentStyle::Line { .. } => {
                let single_line = text.lines().map(str::trim).collect::<Vec<_>>().join(" ");
                format!("{} {} ", self.style.opener(), single_line)
            }
            CommentStyle::Block | CommentStyle::Doc => {
                format!("{} {} */", self.style.opener(), text.replace("*/", "* /"))
            }
        }
    }
}

/// Decode JavaScript string escapes
pub fn decode_escapes(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&escaped) = chars.get(i) else {
            out.push('\\');
            break;
        };
        i += 1;

        match escaped {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !chars.get(i).is_some_and(|c| c.is_ascii_digit()) => out.push('\0'),
            'x' => match read_hex(&chars, i, 2) {
                Some(code) => {
                    out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                    i += 2;
                }
                None => out.push('x'),
            },
            'u' => {
                let (code, consumed) = read_unicode_escape(&chars, i);
                match code {
                    Some(code) if (0xD800..=0xDBFF).contains(&code) => {
                        // High surrogate, try to pair it with a following \uXXXX
                        i += consumed;
                        let low = if chars.get(i) == Some(&'\\') && chars.get(i + 1) == Some(&'u') {
                            read_hex(&chars, i + 2, 4).filter(|low| (0xDC00..=0xDFFF).contains(low))
                        } else {
                            None
                        };
                        match low {
                            Some(low) => {
                                let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                                out.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                                i += 6;
                            }
                            None => out.push('\u{FFFD}'),
                        }
                    }
                    Some(code) => {
                        out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                        i += consumed;
                    }
                    None => out.push('u'),
                }
            }
            // Line continuation
            '\r' => {
                if chars.get(i) == Some(&'\n') {
                    i += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }

    out
}

fn read_hex(chars: &[char], start: usize, len: usize) -> Option<u32> {
    let digits: String = chars.get(start..start + len)?.iter().collect();
    if digits.chars().all(|c| c.is_ascii_hexdigit()) {
        u32::from_str_radix(&digits, 16).ok()
    } else {
        None
    }
}

// Returns the code point of `\u....` or `\u{...}` starting after the `u`,
// and how many characters it spans.
fn read_unicode_escape(chars: &[char], start: usize) -> (Option<u32>, usize) {
    if chars.get(start) == Some(&'{') {
        let close = chars[start..].iter().position(|&c| c == '}');
        return match close {
            Some(offset) if offset > 1 => {
                let digits: String = chars[start + 1..start + offset].iter().collect();
                (u32::from_str_radix(&digits, 16).ok(), offset + 1)
            }
            _ => (None, 0),
        };
    }
    (read_hex(chars, start, 4), 4)
}

/// Encode `value` as a JavaScript string literal delimited by `quote`
pub fn encode_string_literal(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn encode_jsx_attribute(value: &str, quote: char) -> String {
    let entity = if quote == '"' { "&quot;" } else { "&#39;" };
    format!("{quote}{}{quote}", value.replace(quote, entity))
}

fn escape_jsx_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            c => out.push(c),
        }
    }
    out
}
