//! Function constructs: call arguments, definitions, lambdas and pattern-matching functions.
//!
//!     `f(x, y := 1; k := 2) :-> body` and `f :=> [cases]` both start from an already parsed
//!     left side. A `FunctionCall` left side supplies the name and is converted argument by
//!     argument into parameters; a bare identifier is a definition without parameters.
//!
//!     Positional parameters take three shapes: `name` (required), `name := default` and
//!     `name ? condition` (guarded; the condition goes to `conditionals`). Keyword parameters
//!     always carry a default.

use super::error::ParseError;
use super::parser::Parser;
use crate::rix::ast::{Arguments, KeywordArgument, Node, NodeKind, Parameter, Parameters};

/// Add `node` to `parameters` as a positional parameter.
pub(super) fn push_positional(node: Node, parameters: &mut Parameters) -> Result<(), ParseError> {
    if let Some(name) = node.identifier_name() {
        parameters.positional.push(Parameter::required(name));
        return Ok(());
    }
    let name = node
        .as_binary()
        .filter(|(op, _, _)| *op == ":=" || *op == "?")
        .and_then(|(_, left, _)| left.identifier_name())
        .map(str::to_string);
    match (name, node.kind) {
        (
            Some(name),
            NodeKind::BinaryOperation {
                operator, right, ..
            },
        ) => {
            if operator == ":=" {
                parameters.positional.push(Parameter::with_default(name, *right));
            } else {
                parameters.positional.push(Parameter::required(name));
                parameters.conditionals.push(*right);
            }
            Ok(())
        }
        _ => Err(ParseError::syntax(
            format!("Invalid parameter '{}'", node.original.trim()),
            node.span.start,
        )),
    }
}

/// A keyword parameter, which must be written `name := default`.
pub(super) fn keyword_parameter(node: Node) -> Result<Parameter, ParseError> {
    if let Some(name) = node.identifier_name() {
        return Err(ParseError::syntax(
            format!("Keyword parameter '{}' requires a default value", name),
            node.span.start,
        ));
    }
    let (name, value) = assignment_pair(node, "Keyword parameter must be written 'name := default'")?;
    Ok(Parameter::with_default(name, value))
}

/// Split `name := value` into its parts.
fn assignment_pair(node: Node, message: &str) -> Result<(String, Node), ParseError> {
    let name = node
        .as_binary()
        .filter(|(op, _, _)| *op == ":=")
        .and_then(|(_, left, _)| left.identifier_name())
        .map(str::to_string);
    match (name, node.kind) {
        (Some(name), NodeKind::BinaryOperation { right, .. }) => Ok((name, *right)),
        _ => Err(ParseError::syntax(message, node.span.start)),
    }
}

/// Identifier or guarded identifier accepted as a lambda parameter.
fn lambda_parameter(node: &Node, parameters: &mut Parameters) -> bool {
    if let Some(name) = node.identifier_name() {
        parameters.positional.push(Parameter::required(name));
        return true;
    }
    match node.as_binary() {
        Some(("?", left, condition)) => match left.identifier_name() {
            Some(name) => {
                parameters.positional.push(Parameter::required(name));
                parameters.conditionals.push(condition.clone());
                true
            }
            None => false,
        },
        _ => false,
    }
}

/// Parameters of a lambda's left side, or `None` when `->` is an ordinary operator there.
fn lambda_parameters(left: &Node) -> Option<Parameters> {
    let mut parameters = Parameters::default();
    let accepted = match &left.kind {
        NodeKind::Grouping { expression } => lambda_parameter(expression, &mut parameters),
        NodeKind::Tuple { elements } => elements
            .iter()
            .all(|element| lambda_parameter(element, &mut parameters)),
        NodeKind::ParameterList { parameters: list } => {
            parameters = list.clone();
            true
        }
        _ => false,
    };
    accepted.then_some(parameters)
}

impl<'c> Parser<'c> {
    /// Parse `( positional, ... ; keyword := value, ... )`.
    pub(super) fn parse_call_arguments(&mut self) -> Result<Arguments, ParseError> {
        self.expect("(", "to open argument list")?;
        let mut arguments = Arguments::default();
        let mut keyword_section = false;
        loop {
            self.skip_comments();
            if self.check(")") {
                break;
            }
            if self.at_statement_end() {
                self.advance();
                keyword_section = true;
                continue;
            }
            let element = self.parse_expression(0)?;
            if keyword_section {
                let (name, value) =
                    assignment_pair(element, "Keyword argument must be written 'name := value'")?;
                arguments.keyword.push(KeywordArgument { name, value });
            } else {
                arguments.positional.push(element);
            }
            self.skip_comments();
            if !self.eat(",") && !self.at_statement_end() {
                break;
            }
        }
        self.expect(")", "to close argument list")?;
        Ok(arguments)
    }

    /// `->`: a lambda when the left side reads as parameters, otherwise a binary operation.
    pub(super) fn build_arrow(&self, left: Box<Node>, right: Box<Node>) -> NodeKind {
        match lambda_parameters(&left) {
            Some(parameters) => NodeKind::FunctionLambda {
                parameters,
                body: right,
            },
            None => NodeKind::BinaryOperation {
                operator: "->".to_string(),
                left,
                right,
            },
        }
    }

    /// Name and parameters from the left side of `:->` or `:=>`.
    fn definition_signature(&self, left: Node) -> Result<(Node, Parameters), ParseError> {
        if left.is_identifier() {
            return Ok((left, Parameters::default()));
        }
        match left.kind {
            NodeKind::FunctionCall {
                function,
                arguments,
            } => {
                let mut parameters = Parameters::default();
                for argument in arguments.positional {
                    push_positional(argument, &mut parameters)?;
                }
                for keyword in arguments.keyword {
                    parameters
                        .keyword
                        .push(Parameter::with_default(keyword.name, keyword.value));
                }
                Ok((*function, parameters))
            }
            other => Err(ParseError::syntax(
                format!(
                    "Function definition needs a name or call on its left side, found {}",
                    other.name()
                ),
                left.span.start,
            )),
        }
    }

    pub(super) fn build_definition(&self, left: Node, right: Node) -> Result<NodeKind, ParseError> {
        let (name, parameters) = self.definition_signature(left)?;
        Ok(NodeKind::FunctionDefinition {
            name: Box::new(name),
            parameters,
            body: Box::new(right),
        })
    }

    /// `name :=> case` or `name :=> [case, ...]`, each case a lambda.
    pub(super) fn build_pattern_function(
        &self,
        left: Node,
        right: Node,
    ) -> Result<NodeKind, ParseError> {
        let (name, mut parameters) = self.definition_signature(left)?;
        let body = match right.kind {
            NodeKind::WithMetadata { primary, metadata } => {
                parameters.metadata = metadata;
                *primary
            }
            kind => Node::new(kind, right.span, right.original),
        };

        let position = body.span.start;
        let cases = if matches!(body.kind, NodeKind::FunctionLambda { .. }) {
            vec![body]
        } else if let NodeKind::Array { elements } = body.kind {
            elements
        } else {
            return Err(ParseError::syntax(
                "Pattern matching function needs a lambda or an array of lambdas",
                position,
            ));
        };
        if cases.is_empty() {
            return Err(ParseError::syntax(
                "Pattern matching function needs at least one case",
                position,
            ));
        }
        if let Some(case) = cases
            .iter()
            .find(|case| !matches!(case.kind, NodeKind::FunctionLambda { .. }))
        {
            return Err(ParseError::syntax(
                format!(
                    "Pattern matching cases must be lambdas like (x) -> body, found {}",
                    case.node_type()
                ),
                case.span.start,
            ));
        }

        Ok(NodeKind::PatternMatchingFunction {
            name: Box::new(name),
            parameters,
            cases,
        })
    }
}
