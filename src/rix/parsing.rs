//! Parser
//!
//!     Turns a token sequence into top-level AST nodes with a precedence-climbing engine.
//!     Operator precedence and associativity come from the static symbol table
//!     ([crate::rix::symbols]); System identifiers can additionally act as operators when an
//!     [IdentifierClassifier] says so.
//!
//! Layout
//!
//!     [parser] holds the token cursor and the program loop, [expression] the climbing core.
//!     Each structured form has its own sub-parser module, written as a further
//!     `impl Parser` block:
//!
//!         grouping     ( ... ) as grouping, tuple or parameter list
//!         arrays       [ ... ] as array, matrix, tensor or metadata wrapper
//!         braces       { ... } as set, map or system, and {{ ... }} code blocks
//!         functions    calls, definitions, lambdas, pattern-matching functions
//!         calculus     derivative and integral notation
//!         generators   generator chain reshaping
//!         embedded     backtick embedded-language blocks
//!
//! Errors
//!
//!     Every error is fatal to the parse call: there is no recovery and no partial tree.
//!     Nesting deeper than [ParseOptions::max_depth] fails with [ParseError::NestingTooDeep]
//!     rather than exhausting the stack.

pub mod classifier;
pub mod error;
pub mod parser;

mod arrays;
mod braces;
mod calculus;
mod embedded;
mod expression;
mod functions;
mod generators;
mod grouping;

pub use classifier::{
    Classification, DefaultClassifier, IdentifierClassifier, OperatorSpec, OperatorTable,
};
pub use embedded::DEFAULT_LANGUAGE;
pub use error::ParseError;
pub use parser::{ParseOptions, Parser};

use crate::rix::ast::Node;
use crate::rix::lexing::tokenize;
use crate::rix::token::Token;

/// Parse source text with the default classifier and options.
pub fn parse(source: &str) -> Result<Vec<Node>, ParseError> {
    parse_with(source, &DefaultClassifier, &ParseOptions::default())
}

/// Parse source text with a custom classifier and options.
pub fn parse_with(
    source: &str,
    classifier: &dyn IdentifierClassifier,
    options: &ParseOptions,
) -> Result<Vec<Node>, ParseError> {
    let tokens = tokenize(source)?;
    parse_tokens(tokens, classifier, options)
}

/// Parse an already lexed token sequence.
pub fn parse_tokens(
    tokens: Vec<Token>,
    classifier: &dyn IdentifierClassifier,
    options: &ParseOptions,
) -> Result<Vec<Node>, ParseError> {
    Parser::new(tokens, classifier, *options).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rix::symbols::{precedence, Associativity, OperatorForm};

    #[test]
    fn empty_source_parses_to_nothing() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  ;; \n").unwrap().is_empty());
    }

    #[test]
    fn lex_errors_pass_through() {
        let err = parse("\"open").unwrap_err();
        assert!(matches!(err, ParseError::Lex(_)));
    }

    #[test]
    fn classifier_turns_system_identifiers_into_operators() {
        let classifier = |name: &str| match name {
            "AND" => Classification::Operator(OperatorSpec {
                precedence: precedence::LOGICAL_AND,
                associativity: Associativity::Left,
                form: OperatorForm::Infix,
            }),
            _ => Classification::Identifier,
        };
        let nodes = parse_with("a And b", &classifier, &ParseOptions::default()).unwrap();
        let (operator, left, right) = nodes[0].as_binary().unwrap();
        assert_eq!(operator, "AND");
        assert_eq!(left.identifier_name(), Some("a"));
        assert_eq!(right.identifier_name(), Some("b"));

        // Without the classifier the three identifiers are separate expressions
        let nodes = parse("a And b").unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1].node_type(), "SystemIdentifier");
    }

    #[test]
    fn classifier_precedence_at_the_ceiling_still_parses() {
        let classifier = |name: &str| match name {
            "OP" => Classification::Operator(OperatorSpec {
                precedence: u16::MAX,
                associativity: Associativity::Left,
                form: OperatorForm::Infix,
            }),
            _ => Classification::Identifier,
        };
        let nodes = parse_with("a Op b", &classifier, &ParseOptions::default()).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].as_binary().map(|(op, _, _)| op), Some("OP"));
    }

    #[test]
    fn depth_limit_is_enforced() {
        let source = format!("{}1{}", "(".repeat(40), ")".repeat(40));
        assert!(parse(&source).is_ok());
        let err = parse_with(&source, &DefaultClassifier, &ParseOptions::with_max_depth(10))
            .unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { limit: 10, .. }));
    }

    #[test]
    fn parse_tokens_accepts_sequences_without_end() {
        let mut tokens = tokenize("1 + 2").unwrap();
        tokens.pop();
        let nodes = parse_tokens(tokens, &DefaultClassifier, &ParseOptions::default()).unwrap();
        assert_eq!(nodes.len(), 1);
    }
}
