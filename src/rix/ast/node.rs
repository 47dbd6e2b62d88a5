//! The RiX node type.
//!
//!     A [Node] pairs a [NodeKind] with its byte span and the exact source text it covers. The
//!     source text includes the whitespace absorbed by the node's first token, so joining the
//!     `original` of every top-level node gives back the program text up to trailing
//!     whitespace.

use super::params::{Arguments, CalculusApplication, GeneratorStep, Parameters, TensorRow};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Byte offsets `{start, end}` of a node within the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct NodeSpan {
    pub start: usize,
    pub end: usize,
}

impl NodeSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for NodeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fixity {
    Prefix,
    Postfix,
}

/// Fixed metadata carried by every integral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegralMetadata {
    pub integration_constant: String,
    pub default_value: i64,
}

impl Default for IntegralMetadata {
    fn default() -> Self {
        Self {
            integration_constant: "c".to_string(),
            default_value: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    Number {
        value: String,
    },
    String {
        value: String,
    },
    UserIdentifier {
        name: String,
    },
    SystemIdentifier {
        name: String,
    },
    PlaceHolder {
        index: usize,
    },
    Null,
    BinaryOperation {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    UnaryOperation {
        operator: String,
        fixity: Fixity,
        operand: Box<Node>,
    },
    TernaryOperation {
        condition: Box<Node>,
        true_branch: Box<Node>,
        false_branch: Box<Node>,
    },
    FunctionCall {
        function: Box<Node>,
        arguments: Arguments,
    },
    Call {
        target: Box<Node>,
        arguments: Arguments,
    },
    FunctionDefinition {
        name: Box<Node>,
        parameters: Parameters,
        body: Box<Node>,
    },
    PatternMatchingFunction {
        name: Box<Node>,
        parameters: Parameters,
        cases: Vec<Node>,
    },
    FunctionLambda {
        parameters: Parameters,
        body: Box<Node>,
    },
    Tuple {
        elements: Vec<Node>,
    },
    Grouping {
        expression: Box<Node>,
    },
    ParameterList {
        parameters: Parameters,
    },
    Array {
        elements: Vec<Node>,
    },
    Matrix {
        rows: Vec<Vec<Node>>,
    },
    Tensor {
        structure: Vec<TensorRow>,
        max_dimension: usize,
    },
    WithMetadata {
        primary: Box<Node>,
        metadata: BTreeMap<String, Node>,
    },
    Set {
        elements: Vec<Node>,
    },
    Map {
        elements: Vec<Node>,
    },
    System {
        equations: Vec<Node>,
    },
    CodeBlock {
        statements: Vec<Node>,
    },
    Pipe {
        left: Box<Node>,
        right: Box<Node>,
    },
    ExplicitPipe {
        left: Box<Node>,
        right: Box<Node>,
    },
    PipeMap {
        left: Box<Node>,
        right: Box<Node>,
    },
    PipeFilter {
        left: Box<Node>,
        right: Box<Node>,
    },
    PipeReduce {
        left: Box<Node>,
        right: Box<Node>,
    },
    IntervalStepping {
        interval: Box<Node>,
        step: Box<Node>,
    },
    IntervalDivision {
        interval: Box<Node>,
        count: Box<Node>,
    },
    IntervalPartition {
        interval: Box<Node>,
        count: Box<Node>,
    },
    IntervalMediants {
        interval: Box<Node>,
        levels: Box<Node>,
    },
    IntervalMediantPartition {
        interval: Box<Node>,
        levels: Box<Node>,
    },
    IntervalRandom {
        interval: Box<Node>,
        count: Box<Node>,
    },
    IntervalRandomPartition {
        interval: Box<Node>,
        count: Box<Node>,
    },
    InfiniteSequence {
        start: Box<Node>,
        step: Box<Node>,
    },
    GeneratorChain {
        start: Option<Box<Node>>,
        operators: Vec<GeneratorStep>,
    },
    Derivative {
        function: Box<Node>,
        order: usize,
        variables: Vec<Node>,
        application: Option<CalculusApplication>,
    },
    Integral {
        function: Box<Node>,
        order: usize,
        variables: Vec<Node>,
        application: Option<CalculusApplication>,
        metadata: IntegralMetadata,
    },
    PropertyAccess {
        object: Box<Node>,
        property: Box<Node>,
    },
    At {
        target: Box<Node>,
        argument: Box<Node>,
    },
    Ask {
        target: Box<Node>,
        argument: Box<Node>,
    },
    ScientificUnit {
        expression: Box<Node>,
        unit: String,
    },
    MathematicalUnit {
        expression: Box<Node>,
        unit: String,
    },
    EmbeddedLanguage {
        language: String,
        context: Option<String>,
        body: String,
    },
    Comment {
        text: String,
    },
    Statement {
        expression: Box<Node>,
    },
}

impl NodeKind {
    /// Variant name, identical to the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Number { .. } => "Number",
            NodeKind::String { .. } => "String",
            NodeKind::UserIdentifier { .. } => "UserIdentifier",
            NodeKind::SystemIdentifier { .. } => "SystemIdentifier",
            NodeKind::PlaceHolder { .. } => "PlaceHolder",
            NodeKind::Null => "Null",
            NodeKind::BinaryOperation { .. } => "BinaryOperation",
            NodeKind::UnaryOperation { .. } => "UnaryOperation",
            NodeKind::TernaryOperation { .. } => "TernaryOperation",
            NodeKind::FunctionCall { .. } => "FunctionCall",
            NodeKind::Call { .. } => "Call",
            NodeKind::FunctionDefinition { .. } => "FunctionDefinition",
            NodeKind::PatternMatchingFunction { .. } => "PatternMatchingFunction",
            NodeKind::FunctionLambda { .. } => "FunctionLambda",
            NodeKind::Tuple { .. } => "Tuple",
            NodeKind::Grouping { .. } => "Grouping",
            NodeKind::ParameterList { .. } => "ParameterList",
            NodeKind::Array { .. } => "Array",
            NodeKind::Matrix { .. } => "Matrix",
            NodeKind::Tensor { .. } => "Tensor",
            NodeKind::WithMetadata { .. } => "WithMetadata",
            NodeKind::Set { .. } => "Set",
            NodeKind::Map { .. } => "Map",
            NodeKind::System { .. } => "System",
            NodeKind::CodeBlock { .. } => "CodeBlock",
            NodeKind::Pipe { .. } => "Pipe",
            NodeKind::ExplicitPipe { .. } => "ExplicitPipe",
            NodeKind::PipeMap { .. } => "PipeMap",
            NodeKind::PipeFilter { .. } => "PipeFilter",
            NodeKind::PipeReduce { .. } => "PipeReduce",
            NodeKind::IntervalStepping { .. } => "IntervalStepping",
            NodeKind::IntervalDivision { .. } => "IntervalDivision",
            NodeKind::IntervalPartition { .. } => "IntervalPartition",
            NodeKind::IntervalMediants { .. } => "IntervalMediants",
            NodeKind::IntervalMediantPartition { .. } => "IntervalMediantPartition",
            NodeKind::IntervalRandom { .. } => "IntervalRandom",
            NodeKind::IntervalRandomPartition { .. } => "IntervalRandomPartition",
            NodeKind::InfiniteSequence { .. } => "InfiniteSequence",
            NodeKind::GeneratorChain { .. } => "GeneratorChain",
            NodeKind::Derivative { .. } => "Derivative",
            NodeKind::Integral { .. } => "Integral",
            NodeKind::PropertyAccess { .. } => "PropertyAccess",
            NodeKind::At { .. } => "At",
            NodeKind::Ask { .. } => "Ask",
            NodeKind::ScientificUnit { .. } => "ScientificUnit",
            NodeKind::MathematicalUnit { .. } => "MathematicalUnit",
            NodeKind::EmbeddedLanguage { .. } => "EmbeddedLanguage",
            NodeKind::Comment { .. } => "Comment",
            NodeKind::Statement { .. } => "Statement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    pub span: NodeSpan,
    pub original: String,
}

impl Node {
    pub fn new(kind: NodeKind, span: NodeSpan, original: String) -> Self {
        Self {
            kind,
            span,
            original,
        }
    }

    pub fn node_type(&self) -> &'static str {
        self.kind.name()
    }

    /// Name of a user or system identifier node.
    pub fn identifier_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::UserIdentifier { name } | NodeKind::SystemIdentifier { name } => Some(name),
            _ => None,
        }
    }

    pub fn is_identifier(&self) -> bool {
        self.identifier_name().is_some()
    }

    /// Operator and operands of a binary operation.
    pub fn as_binary(&self) -> Option<(&str, &Node, &Node)> {
        match &self.kind {
            NodeKind::BinaryOperation {
                operator,
                left,
                right,
            } => Some((operator.as_str(), left, right)),
            _ => None,
        }
    }

    /// True for a binary operation spelled `operator`.
    pub fn is_binary(&self, operator: &str) -> bool {
        self.as_binary().is_some_and(|(op, _, _)| op == operator)
    }

    /// The source text without the whitespace absorbed in front of it.
    pub fn text(&self) -> &str {
        self.original.trim_start()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})@{}", self.node_type(), self.text(), self.span)
    }
}
