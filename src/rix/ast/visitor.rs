//! Read-only traversal over nodes.
//!
//!     [Node::children] lists the direct child nodes of every variant in source order, and
//!     [Node::accept] drives a [Visitor] depth first. Nothing here mutates the tree.

use super::node::{Node, NodeKind};
use super::params::{Arguments, CalculusApplication, Parameters};

pub trait Visitor {
    fn visit_node(&mut self, _node: &Node) {}
    fn leave_node(&mut self, _node: &Node) {}

    /// Returning false stops descent below the node just visited.
    fn descend(&self) -> bool {
        true
    }
}

fn push_parameters<'a>(out: &mut Vec<&'a Node>, parameters: &'a Parameters) {
    for param in parameters.positional.iter().chain(&parameters.keyword) {
        if let Some(default) = &param.default {
            out.push(default);
        }
    }
    out.extend(parameters.conditionals.iter());
    out.extend(parameters.metadata.values());
}

fn push_arguments<'a>(out: &mut Vec<&'a Node>, arguments: &'a Arguments) {
    out.extend(arguments.positional.iter());
    out.extend(arguments.keyword.iter().map(|kw| &kw.value));
}

fn push_application<'a>(out: &mut Vec<&'a Node>, application: &'a Option<CalculusApplication>) {
    if let Some(application) = application {
        out.extend(application.arguments().iter());
    }
}

impl Node {
    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node> {
        let mut out: Vec<&Node> = Vec::new();
        match &self.kind {
            NodeKind::Number { .. }
            | NodeKind::String { .. }
            | NodeKind::UserIdentifier { .. }
            | NodeKind::SystemIdentifier { .. }
            | NodeKind::PlaceHolder { .. }
            | NodeKind::Null
            | NodeKind::EmbeddedLanguage { .. }
            | NodeKind::Comment { .. } => {}

            NodeKind::BinaryOperation { left, right, .. }
            | NodeKind::Pipe { left, right }
            | NodeKind::ExplicitPipe { left, right }
            | NodeKind::PipeMap { left, right }
            | NodeKind::PipeFilter { left, right }
            | NodeKind::PipeReduce { left, right } => {
                out.push(left);
                out.push(right);
            }
            NodeKind::IntervalStepping { interval, step: other }
            | NodeKind::IntervalDivision {
                interval,
                count: other,
            }
            | NodeKind::IntervalPartition {
                interval,
                count: other,
            }
            | NodeKind::IntervalMediants {
                interval,
                levels: other,
            }
            | NodeKind::IntervalMediantPartition {
                interval,
                levels: other,
            }
            | NodeKind::IntervalRandom {
                interval,
                count: other,
            }
            | NodeKind::IntervalRandomPartition {
                interval,
                count: other,
            }
            | NodeKind::InfiniteSequence {
                start: interval,
                step: other,
            } => {
                out.push(interval);
                out.push(other);
            }
            NodeKind::UnaryOperation { operand, .. } => out.push(operand),
            NodeKind::TernaryOperation {
                condition,
                true_branch,
                false_branch,
            } => {
                out.push(condition);
                out.push(true_branch);
                out.push(false_branch);
            }
            NodeKind::FunctionCall {
                function: callee,
                arguments,
            }
            | NodeKind::Call {
                target: callee,
                arguments,
            } => {
                out.push(callee);
                push_arguments(&mut out, arguments);
            }
            NodeKind::FunctionDefinition {
                name,
                parameters,
                body,
            } => {
                out.push(name);
                push_parameters(&mut out, parameters);
                out.push(body);
            }
            NodeKind::PatternMatchingFunction {
                name,
                parameters,
                cases,
            } => {
                out.push(name);
                push_parameters(&mut out, parameters);
                out.extend(cases.iter());
            }
            NodeKind::FunctionLambda { parameters, body } => {
                push_parameters(&mut out, parameters);
                out.push(body);
            }
            NodeKind::ParameterList { parameters } => push_parameters(&mut out, parameters),
            NodeKind::Tuple { elements }
            | NodeKind::Array { elements }
            | NodeKind::Set { elements }
            | NodeKind::Map { elements }
            | NodeKind::System {
                equations: elements,
            }
            | NodeKind::CodeBlock {
                statements: elements,
            } => out.extend(elements.iter()),
            NodeKind::Grouping { expression }
            | NodeKind::Statement { expression }
            | NodeKind::ScientificUnit { expression, .. }
            | NodeKind::MathematicalUnit { expression, .. } => out.push(expression),
            NodeKind::Matrix { rows } => out.extend(rows.iter().flatten()),
            NodeKind::Tensor { structure, .. } => {
                out.extend(structure.iter().flat_map(|row| row.elements.iter()))
            }
            NodeKind::WithMetadata { primary, metadata } => {
                out.push(primary);
                out.extend(metadata.values());
            }
            NodeKind::GeneratorChain { start, operators } => {
                if let Some(start) = start {
                    out.push(start);
                }
                out.extend(operators.iter().map(|step| step.operand.as_ref()));
            }
            NodeKind::Derivative {
                function,
                variables,
                application,
                ..
            }
            | NodeKind::Integral {
                function,
                variables,
                application,
                ..
            } => {
                out.push(function);
                out.extend(variables.iter());
                push_application(&mut out, application);
            }
            NodeKind::PropertyAccess { object, property } => {
                out.push(object);
                out.push(property);
            }
            NodeKind::At { target, argument } | NodeKind::Ask { target, argument } => {
                out.push(target);
                out.push(argument);
            }
        }
        out
    }

    /// Depth-first walk: `visit_node`, children, `leave_node`.
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_node(self);
        if visitor.descend() {
            for child in self.children() {
                child.accept(visitor);
            }
        }
        visitor.leave_node(self);
    }
}

/// Finds derivatives, integrals and primed identifiers.
#[derive(Default)]
struct CalculusDetector {
    found: bool,
}

impl Visitor for CalculusDetector {
    fn visit_node(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Derivative { .. } | NodeKind::Integral { .. } => self.found = true,
            NodeKind::UserIdentifier { name } | NodeKind::SystemIdentifier { name }
                if name.contains('\'') =>
            {
                self.found = true
            }
            _ => {}
        }
    }

    fn descend(&self) -> bool {
        !self.found
    }
}

/// True when `node` or any descendant is calculus notation.
pub fn contains_calculus(node: &Node) -> bool {
    let mut detector = CalculusDetector::default();
    node.accept(&mut detector);
    detector.found
}

/// Counts nodes and the deepest nesting level.
#[derive(Default)]
pub struct NodeCounter {
    pub total: usize,
    pub max_depth: usize,
    depth: usize,
}

impl Visitor for NodeCounter {
    fn visit_node(&mut self, _node: &Node) {
        self.total += 1;
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
    }

    fn leave_node(&mut self, _node: &Node) {
        self.depth -= 1;
    }
}
