//! Parser errors.

use crate::rix::lexing::LexError;
use std::fmt;

/// Every parse failure is fatal to the call; no partial tree is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The source could not be tokenized.
    Lex(LexError),
    /// The tokens do not form valid RiX.
    Syntax { message: String, position: usize },
    /// Expressions nested deeper than the configured limit.
    NestingTooDeep { limit: usize, position: usize },
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, position: usize) -> Self {
        ParseError::Syntax {
            message: message.into(),
            position,
        }
    }

    /// Byte offset the error points at.
    pub fn position(&self) -> usize {
        match self {
            ParseError::Lex(err) => err.position(),
            ParseError::Syntax { position, .. } | ParseError::NestingTooDeep { position, .. } => {
                *position
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(err) => write!(f, "Lex error: {}", err),
            ParseError::Syntax { message, position } => {
                write!(f, "Syntax error at position {}: {}", position, message)
            }
            ParseError::NestingTooDeep { limit, position } => write!(
                f,
                "Nesting too deep at position {}: more than {} levels",
                position, limit
            ),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

impl From<ParseError> for String {
    fn from(err: ParseError) -> Self {
        err.to_string()
    }
}
