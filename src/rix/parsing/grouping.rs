//! Parenthesized forms: grouping, tuple and parameter list.
//!
//!     Which of the three a `(` opens is decided before anything is parsed, by a bounded scan
//!     from the cursor to the matching `)`. The scan tracks nesting over every bracket kind
//!     and only looks at separators on the outermost level:
//!
//!         ()              empty tuple
//!         (a; b := 1)     parameter list (any top-level `;` or `;;` run)
//!         (a, b)          tuple (a top-level `,` and no `;`)
//!         (a + b)         grouping

use super::error::ParseError;
use super::functions::{keyword_parameter, push_positional};
use super::parser::Parser;
use crate::rix::ast::{Node, NodeKind, Parameters};
use crate::rix::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum GroupShape {
    Grouping,
    Tuple,
    ParameterList,
}

impl<'c> Parser<'c> {
    /// Classify the group whose `(` was just consumed.
    pub(super) fn scan_group_shape(&self) -> GroupShape {
        let mut depth = 0usize;
        let mut saw_comma = false;
        for token in &self.tokens[self.pos..] {
            match token.kind {
                TokenKind::End => break,
                TokenKind::SemicolonSequence { .. } if depth == 0 => {
                    return GroupShape::ParameterList
                }
                TokenKind::Symbol => match token.value.as_str() {
                    "(" | "[" | "{" | "~[" | "~{" => depth += 1,
                    "{{" => depth += 2,
                    ")" | "]" | "}" => {
                        if depth == 0 {
                            break;
                        }
                        depth -= 1;
                    }
                    "}}" => {
                        if depth < 2 {
                            break;
                        }
                        depth -= 2;
                    }
                    ";" if depth == 0 => return GroupShape::ParameterList,
                    "," if depth == 0 => saw_comma = true,
                    _ => {}
                },
                _ => {}
            }
        }
        if saw_comma {
            GroupShape::Tuple
        } else {
            GroupShape::Grouping
        }
    }

    pub(super) fn parse_grouping(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        self.expect("(", "to open group")?;
        self.skip_comments();
        if self.eat(")") {
            return Ok(self.finish(NodeKind::Tuple { elements: vec![] }, start));
        }

        let kind = match self.scan_group_shape() {
            GroupShape::ParameterList => NodeKind::ParameterList {
                parameters: self.parse_parameter_sections()?,
            },
            GroupShape::Tuple => NodeKind::Tuple {
                elements: self.parse_tuple_elements()?,
            },
            GroupShape::Grouping => {
                let expression = self.parse_expression(0)?;
                self.skip_comments();
                NodeKind::Grouping {
                    expression: Box::new(expression),
                }
            }
        };
        self.expect(")", "to close group")?;
        Ok(self.finish(kind, start))
    }

    fn parse_tuple_elements(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut elements = Vec::new();
        loop {
            self.skip_comments();
            if self.check(",") {
                let message = if elements.is_empty() {
                    "Tuple cannot start with ','"
                } else {
                    "Consecutive commas in tuple"
                };
                return Err(self.error(message));
            }
            elements.push(self.parse_expression(0)?);
            self.skip_comments();
            if !self.eat(",") {
                break;
            }
            self.skip_comments();
            if self.check(")") {
                break;
            }
        }
        Ok(elements)
    }

    /// Positional parameters up to the first `;`, keyword parameters after it.
    fn parse_parameter_sections(&mut self) -> Result<Parameters, ParseError> {
        let mut parameters = Parameters::default();
        self.skip_comments();
        if !self.at_statement_end() {
            loop {
                let element = self.parse_expression(0)?;
                push_positional(element, &mut parameters)?;
                self.skip_comments();
                if !self.eat(",") {
                    break;
                }
                self.skip_comments();
            }
        }
        if !self.at_statement_end() {
            return Err(self.error("Expected ';' before keyword parameters"));
        }
        self.advance();

        loop {
            self.skip_comments();
            if self.check(")") {
                break;
            }
            let element = self.parse_expression(0)?;
            parameters.keyword.push(keyword_parameter(element)?);
            self.skip_comments();
            if !self.eat(",") && !self.eat(";") {
                break;
            }
        }
        Ok(parameters)
    }
}
