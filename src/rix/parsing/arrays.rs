//! Square-bracket literals: arrays, matrices, tensors and metadata wrappers.
//!
//!     Elements are separated by `,`. A run of N semicolons ends a row at separator level N.
//!     After the literal is parsed the collected rows are classified:
//!
//!         no semicolons         Array
//!         only single `;`       Matrix with one entry per row
//!         any `;;` or longer    Tensor keeping every row's separator level,
//!                               max_dimension = highest level + 1
//!
//!     An element written `key := value` is metadata rather than a member. Metadata turns the
//!     literal into `WithMetadata` around the single plain element (or an empty array) and
//!     cannot be combined with rows or with more than one plain element.

use super::error::ParseError;
use super::parser::{describe, Parser};
use crate::rix::ast::{Node, NodeKind, NodeSpan, TensorRow};
use crate::rix::token::TokenKind;
use std::collections::BTreeMap;

/// `key := value` split into its parts, or the node back unchanged.
fn metadata_entry(node: Node) -> Result<(String, Node), Node> {
    let key = node
        .as_binary()
        .filter(|(op, _, _)| *op == ":=")
        .and_then(|(_, left, _)| left.identifier_name())
        .map(str::to_string);
    match (key, node.kind) {
        (Some(key), NodeKind::BinaryOperation { right, .. }) => Ok((key, *right)),
        (_, kind) => Err(Node::new(kind, node.span, node.original)),
    }
}

impl<'c> Parser<'c> {
    /// Level of the separator at the cursor: 1 for `;`, N for a run of N, else 0.
    fn semicolon_level(&self) -> usize {
        let token = self.peek();
        match token.kind {
            TokenKind::SemicolonSequence { count } => count,
            TokenKind::Symbol if token.value == ";" => 1,
            _ => 0,
        }
    }

    pub(super) fn parse_array(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let open_position = self.peek().span.start;
        self.expect("[", "to open array")?;

        let mut rows: Vec<TensorRow> = Vec::new();
        let mut current: Vec<Node> = Vec::new();
        let mut metadata = BTreeMap::new();
        let mut max_level = 0;
        let mut plain_count = 0;

        loop {
            self.skip_comments();
            if self.check("]") {
                break;
            }
            if self.check(",") {
                return Err(self.error("Empty element in array"));
            }
            let element = self.parse_expression(0)?;
            match metadata_entry(element) {
                Ok((key, value)) => {
                    metadata.insert(key, value);
                }
                Err(element) => {
                    current.push(element);
                    plain_count += 1;
                }
            }

            self.skip_comments();
            if self.eat(",") {
                continue;
            }
            let level = self.semicolon_level();
            if level > 0 {
                self.advance();
                max_level = max_level.max(level);
                rows.push(TensorRow {
                    elements: std::mem::take(&mut current),
                    separator_level: level,
                });
                continue;
            }
            if self.check("]") {
                break;
            }
            return Err(self.error(format!(
                "Expected ',', ';' or ']' in array, found {}",
                describe(self.peek())
            )));
        }
        self.expect("]", "to close array")?;

        if !current.is_empty() {
            rows.push(TensorRow {
                elements: current,
                separator_level: 0,
            });
        }
        while rows.last().is_some_and(|row| row.elements.is_empty()) {
            rows.pop();
        }

        if !metadata.is_empty() {
            if max_level > 0 {
                return Err(ParseError::syntax(
                    "Array metadata cannot be combined with ';' row separators",
                    open_position,
                ));
            }
            if plain_count > 1 {
                return Err(ParseError::syntax(
                    "Array metadata cannot be combined with more than one element",
                    open_position,
                ));
            }
            let primary = rows
                .into_iter()
                .flat_map(|row| row.elements)
                .next()
                .unwrap_or_else(|| {
                    Node::new(
                        NodeKind::Array { elements: vec![] },
                        NodeSpan::new(open_position, open_position),
                        String::new(),
                    )
                });
            return Ok(self.finish(
                NodeKind::WithMetadata {
                    primary: Box::new(primary),
                    metadata,
                },
                start,
            ));
        }

        let kind = match max_level {
            0 => NodeKind::Array {
                elements: rows.into_iter().flat_map(|row| row.elements).collect(),
            },
            1 => NodeKind::Matrix {
                rows: rows.into_iter().map(|row| row.elements).collect(),
            },
            _ => NodeKind::Tensor {
                structure: rows,
                max_dimension: max_level + 1,
            },
        };
        Ok(self.finish(kind, start))
    }
}
