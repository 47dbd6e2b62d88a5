//! The precedence-climbing core.
//!
//!     [Parser::parse_expression] parses one prefix term and then repeatedly extends it with
//!     postfix forms and infix operators whose precedence is at least the requested minimum.
//!     Right-associative operators parse their right operand at their own precedence,
//!     left-associative ones one level higher.
//!
//!     Postfix forms (calls, `@(...)`, `?(...)`, derivative quotes and unit suffixes) are
//!     tried before the generic operator lookup. They bind at postfix precedence, so they
//!     never attach to the right operand of `.`.
//!
//!     When an expression is complete, generator operators that the climbing loop folded into
//!     binary operations are reshaped into a `GeneratorChain` (see [generators](super::generators)).

use super::classifier::Classification;
use super::error::ParseError;
use super::generators::reshape_generator_chain;
use super::parser::{describe, Parser};
use crate::rix::ast::{Fixity, Node, NodeKind};
use crate::rix::symbols::{self, precedence, OperatorForm, SymbolInfo};
use crate::rix::token::{IdentifierKind, StringKind, Token, TokenKind};
use tracing::trace;

enum Postfix {
    Applied(Node),
    Skipped(Node),
}

/// Node kind for an identifier token.
pub(super) fn identifier_kind(token: &Token) -> NodeKind {
    match token.kind {
        TokenKind::Identifier {
            kind: IdentifierKind::System,
        } => NodeKind::SystemIdentifier {
            name: token.value.clone(),
        },
        _ => NodeKind::UserIdentifier {
            name: token.value.clone(),
        },
    }
}

fn is_callable(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::UserIdentifier { .. }
            | NodeKind::SystemIdentifier { .. }
            | NodeKind::FunctionCall { .. }
            | NodeKind::Call { .. }
            | NodeKind::PropertyAccess { .. }
            | NodeKind::Grouping { .. }
            | NodeKind::Derivative { .. }
            | NodeKind::Integral { .. }
    )
}

fn is_differentiable(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::UserIdentifier { .. }
            | NodeKind::SystemIdentifier { .. }
            | NodeKind::FunctionCall { .. }
            | NodeKind::Call { .. }
            | NodeKind::PropertyAccess { .. }
            | NodeKind::Derivative { .. }
            | NodeKind::Integral { .. }
    )
}

impl<'c> Parser<'c> {
    /// Parse an expression whose operators all bind at least as tightly as `min_precedence`.
    pub(super) fn parse_expression(&mut self, min_precedence: u16) -> Result<Node, ParseError> {
        self.enter()?;
        let result = self.climb(min_precedence);
        self.leave();
        result
    }

    fn climb(&mut self, min_precedence: u16) -> Result<Node, ParseError> {
        let start = self.pos;
        let mut left = self.parse_prefix()?;
        loop {
            if self.at_expression_boundary() {
                break;
            }
            match self.parse_postfix(left, start, min_precedence)? {
                Postfix::Applied(node) => {
                    left = node;
                    continue;
                }
                Postfix::Skipped(node) => left = node,
            }

            let Some((operator, info)) = self.infix_operator() else {
                break;
            };
            if info.precedence == precedence::NONE || info.precedence < min_precedence {
                break;
            }
            match info.form {
                OperatorForm::Infix => {
                    if !symbols::is_generator_operator(&operator) {
                        left = reshape_generator_chain(left);
                    }
                    left = self.parse_infix(left, start, operator, info)?;
                }
                OperatorForm::Postfix => {
                    self.advance();
                    left = self.finish(
                        NodeKind::UnaryOperation {
                            operator,
                            fixity: Fixity::Postfix,
                            operand: Box::new(left),
                        },
                        start,
                    );
                }
                _ => break,
            }
        }
        Ok(reshape_generator_chain(left))
    }

    fn at_expression_boundary(&self) -> bool {
        let token = self.peek();
        match &token.kind {
            TokenKind::End | TokenKind::SemicolonSequence { .. } => true,
            TokenKind::String {
                kind: StringKind::Comment,
            } => true,
            TokenKind::Symbol => {
                token.value == ";" || token.value == "," || symbols::is_closing_delimiter(&token.value)
            }
            _ => false,
        }
    }

    /// Operator spelling and metadata of the current token, if it can act as an operator.
    fn infix_operator(&self) -> Option<(String, SymbolInfo)> {
        let token = self.peek();
        match token.kind {
            TokenKind::Symbol => {
                symbols::lookup(&token.value).map(|info| (token.value.clone(), *info))
            }
            TokenKind::Identifier {
                kind: IdentifierKind::System,
            } => match self.classifier.classify(&token.value) {
                Classification::Operator(spec) => Some((token.value.clone(), spec.into())),
                Classification::Identifier => None,
            },
            _ => None,
        }
    }

    fn parse_infix(
        &mut self,
        left: Node,
        start: usize,
        operator: String,
        info: SymbolInfo,
    ) -> Result<Node, ParseError> {
        self.advance();
        trace!(operator = %operator, precedence = info.precedence, "infix");

        if operator == "??" {
            let true_branch = self.parse_expression(precedence::CONDITION + 1)?;
            self.expect("?:", "after the true branch of '??'")?;
            let false_branch = self.parse_expression(precedence::CONDITION)?;
            return Ok(self.finish(
                NodeKind::TernaryOperation {
                    condition: Box::new(left),
                    true_branch: Box::new(true_branch),
                    false_branch: Box::new(false_branch),
                },
                start,
            ));
        }

        let right = self.parse_expression(info.right_binding())?;
        let kind = self.combine(operator, left, right)?;
        Ok(self.finish(kind, start))
    }

    /// Node kind for `left operator right`.
    fn combine(&self, operator: String, left: Node, right: Node) -> Result<NodeKind, ParseError> {
        let (left, right) = (Box::new(left), Box::new(right));
        let kind = match operator.as_str() {
            "->" => self.build_arrow(left, right),
            ":->" => self.build_definition(*left, *right)?,
            ":=>" => self.build_pattern_function(*left, *right)?,
            "|>" => NodeKind::Pipe { left, right },
            "||>" => NodeKind::ExplicitPipe { left, right },
            "|>>" => NodeKind::PipeMap { left, right },
            "|>:" => NodeKind::PipeFilter { left, right },
            "|>?" => NodeKind::PipeReduce { left, right },
            ":+" => NodeKind::IntervalStepping {
                interval: left,
                step: right,
            },
            "::" => NodeKind::IntervalDivision {
                interval: left,
                count: right,
            },
            ":/:" => NodeKind::IntervalPartition {
                interval: left,
                count: right,
            },
            ":~" => NodeKind::IntervalMediants {
                interval: left,
                levels: right,
            },
            ":~/" => NodeKind::IntervalMediantPartition {
                interval: left,
                levels: right,
            },
            ":%" => NodeKind::IntervalRandom {
                interval: left,
                count: right,
            },
            ":/%" => NodeKind::IntervalRandomPartition {
                interval: left,
                count: right,
            },
            "::+" => NodeKind::InfiniteSequence {
                start: left,
                step: right,
            },
            "." => NodeKind::PropertyAccess {
                object: left,
                property: right,
            },
            _ => NodeKind::BinaryOperation {
                operator,
                left,
                right,
            },
        };
        Ok(kind)
    }

    fn parse_prefix(&mut self) -> Result<Node, ParseError> {
        self.skip_comments();
        let start = self.pos;
        let token = self.peek().clone();
        trace!(token = %token, "prefix");

        let kind = match token.kind {
            TokenKind::Number => {
                self.advance();
                NodeKind::Number { value: token.value }
            }
            TokenKind::String {
                kind: StringKind::Backtick,
            } => return self.parse_embedded_language(),
            TokenKind::String {
                kind: StringKind::Comment,
            } => {
                self.advance();
                NodeKind::Comment { text: token.value }
            }
            TokenKind::String {
                kind: StringKind::Quote,
            } => {
                self.advance();
                NodeKind::String { value: token.value }
            }
            TokenKind::Identifier { .. } => {
                self.advance();
                identifier_kind(&token)
            }
            TokenKind::PlaceHolder { index } => {
                self.advance();
                NodeKind::PlaceHolder { index }
            }
            TokenKind::Symbol => return self.parse_prefix_symbol(&token),
            TokenKind::SemicolonSequence { .. } | TokenKind::End => {
                return Err(self.error(format!("Unexpected {}", describe(&token))));
            }
        };
        Ok(self.finish(kind, start))
    }

    fn parse_prefix_symbol(&mut self, token: &Token) -> Result<Node, ParseError> {
        let start = self.pos;
        let symbol = token.value.as_str();
        match symbol {
            "(" => return self.parse_grouping(),
            "[" => return self.parse_array(),
            "{" => return self.parse_brace_container(),
            "{{" => return self.parse_code_block(),
            "'" => return self.parse_integral(),
            _ if symbols::is_generator_operator(symbol) => return self.parse_headless_generator(),
            _ if symbol == "," || symbol == ";" || symbols::is_closing_delimiter(symbol) => {
                return Err(self.error(format!("Unexpected '{}'", symbol)));
            }
            _ => {}
        }

        self.advance();
        let kind = match symbol {
            "_" => NodeKind::Null,
            "+" | "-" if !self.check("(") => {
                let operand = self.parse_expression(precedence::UNARY)?;
                NodeKind::UnaryOperation {
                    operator: symbol.to_string(),
                    fixity: Fixity::Prefix,
                    operand: Box::new(operand),
                }
            }
            // Operator references such as `+(a, b)` and any other stray symbol
            _ => NodeKind::UserIdentifier {
                name: symbol.to_string(),
            },
        };
        Ok(self.finish(kind, start))
    }

    /// The `(` directly following the current token, if there is no space between them.
    fn adjacent_paren_follows(&self) -> bool {
        let next = self.peek_at(1);
        next.is_symbol("(") && next.is_adjacent_to(self.peek())
    }

    fn parse_postfix(
        &mut self,
        left: Node,
        start: usize,
        min_precedence: u16,
    ) -> Result<Postfix, ParseError> {
        if min_precedence > precedence::POSTFIX {
            return Ok(Postfix::Skipped(left));
        }

        if self.check("(") && is_callable(&left) {
            let arguments = self.parse_call_arguments()?;
            let kind = if left.is_identifier() {
                NodeKind::FunctionCall {
                    function: Box::new(left),
                    arguments,
                }
            } else {
                NodeKind::Call {
                    target: Box::new(left),
                    arguments,
                }
            };
            return Ok(Postfix::Applied(self.finish(kind, start)));
        }

        if (self.check("@") || self.check("?")) && self.adjacent_paren_follows() {
            let marker = self.advance();
            self.advance();
            let argument = self.parse_expression(0)?;
            self.skip_comments();
            self.expect(")", &format!("to close '{}('", marker.value))?;
            let (target, argument) = (Box::new(left), Box::new(argument));
            let kind = if marker.value == "@" {
                NodeKind::At { target, argument }
            } else {
                NodeKind::Ask { target, argument }
            };
            return Ok(Postfix::Applied(self.finish(kind, start)));
        }

        if self.check("'") && is_differentiable(&left) {
            return Ok(Postfix::Applied(self.parse_derivative(left, start)?));
        }

        if self.check("~[") || self.check("~{") {
            let opener = self.advance();
            let scientific = opener.value == "~[";
            let unit = self.parse_unit_text(if scientific { "]" } else { "}" })?;
            let expression = Box::new(left);
            let kind = if scientific {
                NodeKind::ScientificUnit { expression, unit }
            } else {
                NodeKind::MathematicalUnit { expression, unit }
            };
            return Ok(Postfix::Applied(self.finish(kind, start)));
        }

        Ok(Postfix::Skipped(left))
    }

    /// Raw text up to `close`, which is consumed.
    fn parse_unit_text(&mut self, close: &str) -> Result<String, ParseError> {
        let mut text = String::new();
        loop {
            if close == "}" {
                self.split_double_brace();
            }
            if self.eat(close) {
                break;
            }
            if self.peek().is_end() {
                return Err(self.error(format!("Expected '{}' to close unit", close)));
            }
            text.push_str(&self.advance().original);
        }
        let unit = text.trim().to_string();
        if unit.is_empty() {
            return Err(self.error("Empty unit"));
        }
        Ok(unit)
    }
}
