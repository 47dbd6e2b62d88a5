//! Token cursor and program loop.
//!
//!     [Parser] owns the token vector for one parse call and walks it with a single cursor.
//!     The helpers here (peek, advance, expect, node finishing) are shared by the expression
//!     engine and every sub-parser, which live in sibling modules as further `impl Parser`
//!     blocks.

use super::classifier::IdentifierClassifier;
use super::error::ParseError;
use crate::rix::ast::{Node, NodeKind, NodeSpan};
use crate::rix::token::{Span, Token, TokenKind};
use tracing::debug;

/// Limits applied to one parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed expression nesting.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

impl ParseOptions {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

pub struct Parser<'c> {
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) depth: usize,
    pub(super) classifier: &'c dyn IdentifierClassifier,
    pub(super) options: ParseOptions,
}

impl<'c> Parser<'c> {
    /// Wrap a token sequence, appending an `End` token if the sequence lacks one.
    pub fn new(
        mut tokens: Vec<Token>,
        classifier: &'c dyn IdentifierClassifier,
        options: ParseOptions,
    ) -> Self {
        if !tokens.last().is_some_and(Token::is_end) {
            let at = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::end(String::new(), at));
        }
        Self {
            tokens,
            pos: 0,
            depth: 0,
            classifier,
            options,
        }
    }

    /// Parse every top-level statement.
    pub fn parse_program(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            let token = self.peek();
            if token.is_end() {
                break;
            }
            if token.is_comment() {
                let start = self.pos;
                let text = self.advance().value;
                nodes.push(self.finish(NodeKind::Comment { text }, start));
                continue;
            }
            if self.at_statement_end() {
                self.advance();
                continue;
            }

            let start = self.pos;
            let expression = self.parse_expression(0)?;
            if self.at_statement_end() {
                self.advance();
                nodes.push(self.finish(
                    NodeKind::Statement {
                        expression: Box::new(expression),
                    },
                    start,
                ));
            } else {
                nodes.push(expression);
            }
        }
        debug!(nodes = nodes.len(), tokens = self.tokens.len(), "parsed program");
        Ok(nodes)
    }

    pub(super) fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Token `offset` places ahead of the cursor, clamped to `End`.
    pub(super) fn peek_at(&self, offset: usize) -> &Token {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Consume the current token. The cursor never moves past `End`.
    pub(super) fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if !token.is_end() {
            self.pos += 1;
        }
        token
    }

    pub(super) fn check(&self, symbol: &str) -> bool {
        self.peek().is_symbol(symbol)
    }

    /// Consume `symbol` if it is next.
    pub(super) fn eat(&mut self, symbol: &str) -> bool {
        if self.check(symbol) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, symbol: &str, context: &str) -> Result<Token, ParseError> {
        if self.check(symbol) {
            Ok(self.advance())
        } else {
            Err(self.error(format!(
                "Expected '{}' {}, found {}",
                symbol,
                context,
                describe(self.peek())
            )))
        }
    }

    /// A `;` or a run of semicolons.
    pub(super) fn at_statement_end(&self) -> bool {
        let token = self.peek();
        token.is_symbol(";") || matches!(token.kind, TokenKind::SemicolonSequence { .. })
    }

    pub(super) fn skip_comments(&mut self) {
        while self.peek().is_comment() {
            self.advance();
        }
    }

    /// Turn a `}}` at the cursor into two `}` tokens so a brace container can close on
    /// the first half.
    pub(super) fn split_double_brace(&mut self) {
        if !self.check("}}") {
            return;
        }
        let token = self.tokens[self.pos].clone();
        let first_original = token.original[..token.original.len() - 1].to_string();
        let first = Token::new(
            TokenKind::Symbol,
            first_original,
            "}".to_string(),
            Span::raw(token.span.start, token.span.start + 1),
        );
        let second = Token::new(
            TokenKind::Symbol,
            "}".to_string(),
            "}".to_string(),
            Span::raw(token.span.start + 1, token.span.end),
        );
        self.tokens[self.pos] = second;
        self.tokens.insert(self.pos, first);
    }

    pub(super) fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::syntax(message, self.peek().span.start)
    }

    /// Build a node covering every token consumed since `start`.
    pub(super) fn finish(&self, kind: NodeKind, start: usize) -> Node {
        let first = &self.tokens[start];
        let end = if self.pos > start {
            self.tokens[self.pos - 1].span.end
        } else {
            first.span.start
        };
        let original: String = self.tokens[start..self.pos]
            .iter()
            .map(|t| t.original.as_str())
            .collect();
        Node::new(kind, NodeSpan::new(first.span.start, end), original)
    }

    /// Count one level of expression nesting, failing past the configured limit.
    pub(super) fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.options.max_depth,
                position: self.peek().span.start,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(super) fn leave(&mut self) {
        self.depth -= 1;
    }
}

/// Short description of a token for error messages.
pub(super) fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::End => "end of input".to_string(),
        TokenKind::Symbol => format!("'{}'", token.value),
        _ => format!("{} '{}'", token.kind, token.value),
    }
}
