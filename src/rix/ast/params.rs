//! Records shared by several node variants: parameters, call arguments, generator steps,
//! calculus applications and tensor rows.

use super::node::Node;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A named parameter with an optional default value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub default: Option<Node>,
}

impl Parameter {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: Node) -> Self {
        Self {
            name: name.into(),
            default: Some(default),
        }
    }
}

/// Parameter set of a definition, lambda or parameter list.
///
/// Guards written as `name ? condition` are collected in `conditionals` in source order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Parameters {
    pub positional: Vec<Parameter>,
    pub keyword: Vec<Parameter>,
    pub conditionals: Vec<Node>,
    pub metadata: BTreeMap<String, Node>,
}

impl Parameters {
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    /// Names of all parameters, positional first.
    pub fn names(&self) -> Vec<&str> {
        self.positional
            .iter()
            .chain(&self.keyword)
            .map(|p| p.name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordArgument {
    pub name: String,
    pub value: Node,
}

/// Arguments of a call; keyword arguments follow the first `;`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Arguments {
    pub positional: Vec<Node>,
    pub keyword: Vec<KeywordArgument>,
}

impl Arguments {
    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lazy sequence operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GeneratorOp {
    Add,
    Multiply,
    Function,
    Filter,
    Limit,
    LazyLimit,
}

impl GeneratorOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "|+" => Some(GeneratorOp::Add),
            "|*" => Some(GeneratorOp::Multiply),
            "|:" => Some(GeneratorOp::Function),
            "|?" => Some(GeneratorOp::Filter),
            "|^" => Some(GeneratorOp::Limit),
            "|^:" => Some(GeneratorOp::LazyLimit),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            GeneratorOp::Add => "|+",
            GeneratorOp::Multiply => "|*",
            GeneratorOp::Function => "|:",
            GeneratorOp::Filter => "|?",
            GeneratorOp::Limit => "|^",
            GeneratorOp::LazyLimit => "|^:",
        }
    }
}

impl fmt::Display for GeneratorOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorStep {
    pub operator: GeneratorOp,
    pub operand: Box<Node>,
}

/// How a derivative or integral is applied to a trailing argument list.
///
/// Arguments that contain calculus themselves make the application symbolic
/// (`operations`); plain values make it an `evaluation`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "arguments", rename_all = "lowercase")]
pub enum CalculusApplication {
    Evaluation(Vec<Node>),
    Operations(Vec<Node>),
}

impl CalculusApplication {
    pub fn arguments(&self) -> &[Node] {
        match self {
            CalculusApplication::Evaluation(args) | CalculusApplication::Operations(args) => args,
        }
    }

    pub fn is_operations(&self) -> bool {
        matches!(self, CalculusApplication::Operations(_))
    }
}

/// One row of a tensor literal and the level of the `;` run that ended it (0 for the last).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TensorRow {
    pub elements: Vec<Node>,
    pub separator_level: usize,
}
