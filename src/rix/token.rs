//! Token types produced by the lexer and consumed by the parser.
//!
//!     A token keeps three views of its text: the `original` text (the raw match preceded by
//!     every character the lexer absorbed before it, whitespace included), the semantic
//!     `value` the parser works with, and a `span` triple of byte offsets.
//!
//! Span Layout
//!
//!     Spans are `[outer_start, inner, outer_end]`. For string-like tokens (comments, quoted
//!     and backtick literals) `inner` is where the content starts, right after the opening
//!     delimiter. For every other kind `inner` equals `outer_end`. Consumers must not assume
//!     the middle value means the same thing across token kinds.

use serde::Serialize;
use std::fmt;

/// Byte offsets `[start, inner, end]` of a token within the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "[usize; 3]")]
pub struct Span {
    pub start: usize,
    pub inner: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, inner: usize, end: usize) -> Self {
        Self { start, inner, end }
    }

    /// A span whose middle value is the match end.
    pub fn raw(start: usize, end: usize) -> Self {
        Self::new(start, end, end)
    }
}

impl From<Span> for [usize; 3] {
    fn from(span: Span) -> Self {
        [span.start, span.inner, span.end]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.start, self.inner, self.end)
    }
}

/// Flavor of a string-like token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StringKind {
    Comment,
    Quote,
    Backtick,
}

/// Case class of an identifier, decided by its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IdentifierKind {
    User,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type")]
pub enum TokenKind {
    Number,
    String { kind: StringKind },
    Identifier { kind: IdentifierKind },
    PlaceHolder { index: usize },
    SemicolonSequence { count: usize },
    Symbol,
    End,
}

impl TokenKind {
    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Number => "Number",
            TokenKind::String { .. } => "String",
            TokenKind::Identifier { .. } => "Identifier",
            TokenKind::PlaceHolder { .. } => "PlaceHolder",
            TokenKind::SemicolonSequence { .. } => "SemicolonSequence",
            TokenKind::Symbol => "Symbol",
            TokenKind::End => "End",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(flatten)]
    pub kind: TokenKind,
    pub original: String,
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, original: String, value: String, span: Span) -> Self {
        Self {
            kind,
            original,
            value,
            span,
        }
    }

    /// The terminating token, placed at the input length.
    pub fn end(original: String, position: usize) -> Self {
        Self::new(
            TokenKind::End,
            original,
            String::new(),
            Span::raw(position, position),
        )
    }

    pub fn is_end(&self) -> bool {
        matches!(self.kind, TokenKind::End)
    }

    /// True for a symbol token spelled exactly `symbol`.
    pub fn is_symbol(&self, symbol: &str) -> bool {
        matches!(self.kind, TokenKind::Symbol) && self.value == symbol
    }

    pub fn is_comment(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::String {
                kind: StringKind::Comment
            }
        )
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self.kind, TokenKind::Identifier { .. })
    }

    /// True when this token starts exactly where `previous` ends.
    pub fn is_adjacent_to(&self, previous: &Token) -> bool {
        self.span.start == previous.span.end
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::End => write!(f, "End@{}", self.span.start),
            _ => write!(f, "{}({:?})@{}", self.kind, self.value, self.span.start),
        }
    }
}
