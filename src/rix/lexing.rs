//! Lexer
//!
//!     This module turns RiX source text into an ordered token sequence. Unlike a classic
//!     longest-match lexer, RiX lexing is priority driven: at each position a fixed list of
//!     matchers is tried in order (number, string-like, identifier/placeholder, semicolon run,
//!     symbol) and the first success wins.
//!
//! Source Text Preservation
//!
//!     Every token stores the raw text it matched plus everything the lexer absorbed before
//!     it: whitespace and characters no matcher accepts. The final `End` token holds the
//!     trailing whitespace. Joining the `original` field of all tokens gives back the input,
//!     and the parser relies on this to recover the exact source text of each AST node.
//!
//! Count-Delimited Literals
//!
//!     Block comments (`/** ... **/`), quoted literals (`"""..."""`) and backtick literals
//!     open with a run of N delimiter characters and close only at a run of exactly N. This
//!     lets literals contain shorter or longer runs of their own delimiter. A literal that is
//!     never closed is the only way lexing can fail. See [delimiters](delimiters).
//!
//! Pattern Tables
//!
//!     Number spellings and operator spellings live in [patterns](patterns) as ordered
//!     tables compiled once.

pub mod common;
pub mod delimiters;
pub mod patterns;
pub mod tokenizer;

pub use common::{Delimiter, LexError};
pub use tokenizer::{canonical_identifier, tokenize};
