//! Common lexer module
//!
//! This module contains the error type shared by the lexing stages.

use std::fmt;

/// Count-delimited literal kinds that can be left open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    BlockComment,
    Quote,
    Backtick,
}

impl Delimiter {
    /// Human name of the construct.
    pub fn construct(&self) -> &'static str {
        match self {
            Delimiter::BlockComment => "block comment",
            Delimiter::Quote => "quoted literal",
            Delimiter::Backtick => "backtick literal",
        }
    }

    /// Plural name of the repeated closing unit.
    pub fn unit(&self) -> &'static str {
        match self {
            Delimiter::BlockComment => "stars",
            Delimiter::Quote => "quotes",
            Delimiter::Backtick => "backticks",
        }
    }

    /// Spelling of the closing delimiter for a run of `count`.
    pub fn closing(&self, count: usize) -> String {
        match self {
            Delimiter::BlockComment => format!("{}/", "*".repeat(count)),
            Delimiter::Quote => "\"".repeat(count),
            Delimiter::Backtick => "`".repeat(count),
        }
    }
}

/// Errors that can occur during lexing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A comment, quote or backtick literal never saw its matching close
    UnmatchedDelimiter {
        delimiter: Delimiter,
        count: usize,
        position: usize,
        remainder: String,
    },
}

impl LexError {
    /// Byte offset of the opening delimiter.
    pub fn position(&self) -> usize {
        match self {
            LexError::UnmatchedDelimiter { position, .. } => *position,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnmatchedDelimiter {
                delimiter,
                count,
                position,
                remainder,
            } => write!(
                f,
                "Unmatched {} at position {}: need {} closing {} ({}); unconsumed text: {:?}",
                delimiter.construct(),
                position,
                count,
                delimiter.unit(),
                delimiter.closing(*count),
                remainder
            ),
        }
    }
}

impl std::error::Error for LexError {}

impl From<LexError> for String {
    fn from(err: LexError) -> Self {
        err.to_string()
    }
}
