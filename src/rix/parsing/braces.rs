//! Brace literals and code blocks.
//!
//!     `{...}` holds elements separated by `,` or `;` and is classified after parsing:
//!     any equation relation (`:=:`, `:<:`, `:>:`, `:<=:`, `:>=:`) makes it a System, else any
//!     `:=` makes it a Map, else it is a Set. Systems must consist only of equations separated
//!     by `;`; maps only of `:=` pairs.
//!
//!     The lexer always reads `}}` as one token, so a brace container closing right before
//!     its parent splits that token in two and consumes the first half.
//!
//!     `{{...}}` is a code block: a statement sequence terminated by `}}`.

use super::error::ParseError;
use super::parser::{describe, Parser};
use crate::rix::ast::{Node, NodeKind};
use crate::rix::symbols::is_equation_relation;

fn is_equation(node: &Node) -> bool {
    node.as_binary()
        .is_some_and(|(op, _, _)| is_equation_relation(op))
}

/// A pattern-matching function written as an element or as a map entry's value.
fn pattern_function(element: &Node) -> Option<&Node> {
    let candidate = match element.as_binary() {
        Some((":=", _, right)) => right,
        _ => element,
    };
    matches!(candidate.kind, NodeKind::PatternMatchingFunction { .. }).then_some(candidate)
}

/// Decide between System, Map and Set.
fn classify_braces(
    elements: Vec<Node>,
    saw_comma: bool,
    position: usize,
) -> Result<NodeKind, ParseError> {
    if elements.iter().any(is_equation) {
        if let Some(other) = elements.iter().find(|e| !is_equation(e)) {
            return Err(ParseError::syntax(
                format!(
                    "Equation systems may only contain equations, found {}",
                    other.node_type()
                ),
                other.span.start,
            ));
        }
        if saw_comma {
            return Err(ParseError::syntax(
                "Equations in a system must be separated by ';', not ','",
                position,
            ));
        }
        return Ok(NodeKind::System {
            equations: elements,
        });
    }

    if elements.iter().any(|e| e.is_binary(":=")) {
        if let Some(other) = elements.iter().find(|e| !e.is_binary(":=")) {
            return Err(ParseError::syntax(
                format!(
                    "Map entries must all be 'key := value' pairs, found {}",
                    other.node_type()
                ),
                other.span.start,
            ));
        }
        return Ok(NodeKind::Map { elements });
    }

    Ok(NodeKind::Set { elements })
}

impl<'c> Parser<'c> {
    pub(super) fn parse_brace_container(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let open_position = self.peek().span.start;
        self.expect("{", "to open braces")?;

        let mut elements = Vec::new();
        let mut saw_comma = false;
        loop {
            self.skip_comments();
            self.split_double_brace();
            if self.check("}") {
                break;
            }
            let element = self.parse_expression(0)?;
            if let Some(function) = pattern_function(&element) {
                return Err(ParseError::syntax(
                    "Pattern matching functions cannot be written inside {}; use array syntax [...] for the cases",
                    function.span.start,
                ));
            }
            elements.push(element);

            self.skip_comments();
            if self.eat(",") {
                saw_comma = true;
                continue;
            }
            if self.at_statement_end() {
                self.advance();
                continue;
            }
            self.split_double_brace();
            if self.check("}") {
                break;
            }
            return Err(self.error(format!(
                "Expected ',', ';' or '}}' in braces, found {}",
                describe(self.peek())
            )));
        }
        self.expect("}", "to close braces")?;

        let kind = classify_braces(elements, saw_comma, open_position)?;
        Ok(self.finish(kind, start))
    }

    pub(super) fn parse_code_block(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        self.expect("{{", "to open code block")?;

        let mut statements = Vec::new();
        loop {
            self.skip_comments();
            if self.eat("}}") {
                break;
            }
            // `}}` split by an inner brace container
            if self.check("}") && self.peek_at(1).is_symbol("}") {
                self.advance();
                self.advance();
                break;
            }
            if self.peek().is_end() {
                return Err(self.error("Unterminated code block: expected '}}'"));
            }
            if self.at_statement_end() {
                self.advance();
                continue;
            }
            statements.push(self.parse_expression(0)?);
        }
        Ok(self.finish(NodeKind::CodeBlock { statements }, start))
    }
}
