//! # rix
//!
//! Lexer and parser for the RiX expression language.
//!
//! Source text goes through two stages:
//!
//! 1. **Lexing** ([tokenize]): priority-ordered matching into a token sequence whose
//!    `original` texts concatenate back to the input.
//! 2. **Parsing** ([parse], [parse_with], [parse_tokens]): precedence climbing over the
//!    tokens into a sequence of top-level [Node]s.
//!
//! ## Testing
//!
//! Parser tests use the fluent assertions in the [testing module](rix::testing) and the
//! S-expression renderer [to_sexpr].

pub mod rix;

pub use rix::ast::{snapshot_node, snapshot_program, to_sexpr, AstSnapshot, Node, NodeKind};
pub use rix::lexing::{tokenize, LexError};
pub use rix::parsing::{
    parse, parse_tokens, parse_with, Classification, DefaultClassifier, IdentifierClassifier,
    OperatorSpec, OperatorTable, ParseError, ParseOptions,
};
pub use rix::token::{Token, TokenKind};
