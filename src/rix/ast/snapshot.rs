//! AST Snapshot - a normalized intermediate representation of the AST tree
//!
//! This module provides a canonical, format-agnostic representation of parsed RiX
//! suitable for rendering as an indented tree or as S-expressions.
//!
//! The snapshot captures node types, a short label, attributes and children, so each
//! renderer focuses solely on presentation without reimplementing AST traversal logic.
//! Children come from [Node::children], which lists them in source order.

use super::node::{Fixity, Node, NodeKind};
use super::params::Parameters;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// A snapshot of an AST node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstSnapshot {
    /// The type of node (e.g., "Number", "BinaryOperation", "Matrix")
    pub node_type: String,

    /// The primary label: operator, name or literal value
    pub label: String,

    /// Additional attributes specific to the node type
    pub attributes: BTreeMap<String, String>,

    /// Child nodes in the tree
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    /// Create a new snapshot with the given node type and label
    pub fn new(node_type: String, label: String) -> Self {
        Self {
            node_type,
            label,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute to this snapshot
    pub fn with_attribute(mut self, key: &str, value: String) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    /// Render as an S-expression: `(Type label child...)`.
    pub fn to_sexpr(&self) -> String {
        let mut out = String::new();
        self.write_sexpr(&mut out);
        out
    }

    fn write_sexpr(&self, out: &mut String) {
        out.push('(');
        out.push_str(&self.node_type);
        if !self.label.is_empty() {
            out.push(' ');
            out.push_str(&self.label);
        }
        for child in &self.children {
            out.push(' ');
            child.write_sexpr(out);
        }
        out.push(')');
    }

    /// Render as an indented tree, one node per line.
    pub fn to_tree(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) {
        let _ = write!(out, "{}{}", "  ".repeat(depth), self.node_type);
        if !self.label.is_empty() {
            let _ = write!(out, " {}", self.label);
        }
        for (key, value) in &self.attributes {
            let _ = write!(out, " {}={}", key, value);
        }
        out.push('\n');
        for child in &self.children {
            child.write_tree(out, depth + 1);
        }
    }
}

fn parameter_label(parameters: &Parameters) -> String {
    format!("[{}]", parameters.names().join(" "))
}

fn label_for(node: &Node) -> String {
    match &node.kind {
        NodeKind::Number { value } => value.clone(),
        NodeKind::String { value } => format!("{:?}", value),
        NodeKind::UserIdentifier { name } | NodeKind::SystemIdentifier { name } => name.clone(),
        NodeKind::PlaceHolder { index } => format!("_{}", index),
        NodeKind::BinaryOperation { operator, .. } => operator.clone(),
        NodeKind::UnaryOperation { operator, .. } => operator.clone(),
        NodeKind::FunctionDefinition { parameters, .. }
        | NodeKind::PatternMatchingFunction { parameters, .. }
        | NodeKind::FunctionLambda { parameters, .. }
        | NodeKind::ParameterList { parameters } => parameter_label(parameters),
        NodeKind::Tensor { max_dimension, .. } => max_dimension.to_string(),
        NodeKind::GeneratorChain { operators, .. } => operators
            .iter()
            .map(|step| step.operator.symbol())
            .collect::<Vec<_>>()
            .join(""),
        NodeKind::Derivative { order, .. } | NodeKind::Integral { order, .. } => {
            "'".repeat(*order)
        }
        NodeKind::ScientificUnit { unit, .. } | NodeKind::MathematicalUnit { unit, .. } => {
            unit.clone()
        }
        NodeKind::EmbeddedLanguage {
            language, context, ..
        } => match context {
            Some(context) => format!("{}({})", language, context),
            None => language.clone(),
        },
        NodeKind::Comment { text } => format!("{:?}", text.trim()),
        _ => String::new(),
    }
}

/// Build a snapshot for a node and all its descendants.
pub fn snapshot_node(node: &Node) -> AstSnapshot {
    let mut snapshot = AstSnapshot::new(node.node_type().to_string(), label_for(node))
        .with_attribute("span", node.span.to_string());
    match &node.kind {
        NodeKind::UnaryOperation {
            fixity: Fixity::Postfix,
            ..
        } => snapshot = snapshot.with_attribute("fixity", "postfix".to_string()),
        NodeKind::Matrix { rows } => {
            let widths: Vec<String> = rows.iter().map(|row| row.len().to_string()).collect();
            snapshot = snapshot.with_attribute("rows", widths.join(","));
        }
        NodeKind::Tensor { structure, .. } => {
            let levels: Vec<String> = structure
                .iter()
                .map(|row| row.separator_level.to_string())
                .collect();
            snapshot = snapshot.with_attribute("levels", levels.join(","));
        }
        NodeKind::WithMetadata { metadata, .. } => {
            let keys: Vec<&str> = metadata.keys().map(String::as_str).collect();
            snapshot = snapshot.with_attribute("keys", keys.join(","));
        }
        NodeKind::Derivative { application, .. } | NodeKind::Integral { application, .. } => {
            if let Some(application) = application {
                let kind = if application.is_operations() {
                    "operations"
                } else {
                    "evaluation"
                };
                snapshot = snapshot.with_attribute("application", kind.to_string());
            }
        }
        NodeKind::EmbeddedLanguage { body, .. } => {
            snapshot = snapshot.with_attribute("body", format!("{:?}", body));
        }
        _ => {}
    }
    snapshot.children = node.children().into_iter().map(snapshot_node).collect();
    snapshot
}

/// Snapshot of a whole program under a `Program` root.
pub fn snapshot_program(nodes: &[Node]) -> AstSnapshot {
    let mut root = AstSnapshot::new("Program".to_string(), String::new());
    root.children = nodes.iter().map(snapshot_node).collect();
    root
}

/// One S-expression per top-level node, newline separated.
pub fn to_sexpr(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|node| snapshot_node(node).to_sexpr())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rix::ast::node::NodeSpan;

    fn node(kind: NodeKind, start: usize, end: usize) -> Node {
        Node::new(kind, NodeSpan::new(start, end), String::new())
    }

    fn number(value: &str, at: usize) -> Node {
        node(
            NodeKind::Number {
                value: value.to_string(),
            },
            at,
            at + value.len(),
        )
    }

    #[test]
    fn sexpr_nests_children() {
        let sum = node(
            NodeKind::BinaryOperation {
                operator: "+".to_string(),
                left: Box::new(number("1", 0)),
                right: Box::new(number("2", 2)),
            },
            0,
            3,
        );
        assert_eq!(
            snapshot_node(&sum).to_sexpr(),
            "(BinaryOperation + (Number 1) (Number 2))"
        );
    }

    #[test]
    fn tree_indents_children_and_lists_attributes() {
        let grouping = node(
            NodeKind::Grouping {
                expression: Box::new(number("7", 1)),
            },
            0,
            3,
        );
        assert_eq!(
            snapshot_node(&grouping).to_tree(),
            "Grouping span=0..3\n  Number 7 span=1..2\n"
        );
    }

    #[test]
    fn program_root_wraps_nodes() {
        let root = snapshot_program(&[number("1", 0), node(NodeKind::Null, 2, 3)]);
        assert_eq!(root.node_type, "Program");
        assert_eq!(root.to_sexpr(), "(Program (Number 1) (Null))");
    }
}
