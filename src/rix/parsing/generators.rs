//! Generator chains.
//!
//!     `|+ |* |: |? |^ |^:` share the pipe band, so the climbing loop folds `a |+ 1 |^ 10` into
//!     nested left-associative binary operations like any other operator. Once the expression
//!     is complete (or before it becomes the left operand of a different operator) the spine is
//!     reshaped: generator steps are peeled off the right end, walking down the left side until
//!     a non-generator node is reached, which becomes the chain's start.
//!
//!     A chain written without a start (`|+ 2 |^ 5`) is headless and has `start: None`.

use super::error::ParseError;
use super::parser::Parser;
use crate::rix::ast::{GeneratorOp, GeneratorStep, Node, NodeKind};
use crate::rix::symbols::precedence;

fn generator_step(node: &Node) -> Option<GeneratorOp> {
    node.as_binary()
        .and_then(|(operator, _, _)| GeneratorOp::from_symbol(operator))
}

/// Rebuild a spine of generator binary operations as one `GeneratorChain`.
///
/// Any other node is returned unchanged.
pub(super) fn reshape_generator_chain(node: Node) -> Node {
    if generator_step(&node).is_none() {
        return node;
    }
    let span = node.span;
    let original = node.original.clone();

    let mut steps = Vec::new();
    let mut current = node;
    loop {
        let Some(operator) = generator_step(&current) else {
            break;
        };
        match current.kind {
            NodeKind::BinaryOperation { left, right, .. } => {
                steps.push(GeneratorStep {
                    operator,
                    operand: right,
                });
                current = *left;
            }
            kind => {
                current = Node::new(kind, current.span, current.original);
                break;
            }
        }
    }
    steps.reverse();

    let (start, operators) = match current.kind {
        NodeKind::GeneratorChain {
            start,
            mut operators,
        } => {
            operators.extend(steps);
            (start, operators)
        }
        kind => (
            Some(Box::new(Node::new(kind, current.span, current.original))),
            steps,
        ),
    };
    Node::new(NodeKind::GeneratorChain { start, operators }, span, original)
}

impl<'c> Parser<'c> {
    /// A chain opening with a generator operator instead of a start value.
    pub(super) fn parse_headless_generator(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let token = self.advance();
        let operator = GeneratorOp::from_symbol(&token.value).ok_or_else(|| {
            ParseError::syntax(
                format!("'{}' is not a generator operator", token.value),
                token.span.start,
            )
        })?;
        let operand = self.parse_expression(precedence::PIPE + 1)?;
        Ok(self.finish(
            NodeKind::GeneratorChain {
                start: None,
                operators: vec![GeneratorStep {
                    operator,
                    operand: Box::new(operand),
                }],
            },
            start,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::rix::ast::{to_sexpr, GeneratorOp, Node, NodeKind};
    use crate::rix::parsing::parse;

    fn chain(source: &str) -> (Option<Box<Node>>, Vec<GeneratorOp>) {
        match parse(source).unwrap().remove(0).kind {
            NodeKind::GeneratorChain { start, operators } => {
                (start, operators.iter().map(|s| s.operator).collect())
            }
            other => panic!("expected generator chain for {:?}, got {:?}", source, other),
        }
    }

    #[test]
    fn chain_collects_steps_in_source_order() {
        let (start, ops) = chain("1 |+ 2 |^ 10");
        assert_eq!(start.unwrap().text(), "1");
        assert_eq!(ops, vec![GeneratorOp::Add, GeneratorOp::Limit]);
    }

    #[test]
    fn headless_chain_has_no_start() {
        let (start, ops) = chain("|* 2 |? f |^: 5");
        assert!(start.is_none());
        assert_eq!(
            ops,
            vec![GeneratorOp::Multiply, GeneratorOp::Filter, GeneratorOp::LazyLimit]
        );
    }

    #[test]
    fn operands_bind_tighter_than_the_chain() {
        assert_eq!(
            to_sexpr(&parse("a |+ b + 1").unwrap()),
            "(GeneratorChain |+ (UserIdentifier a) (BinaryOperation + (UserIdentifier b) (Number 1)))"
        );
    }

    #[test]
    fn chain_inside_pipe_is_reshaped() {
        let nodes = parse("1 |+ 2 |> f").unwrap();
        match &nodes[0].kind {
            NodeKind::Pipe { left, .. } => assert_eq!(left.node_type(), "GeneratorChain"),
            other => panic!("expected pipe, got {:?}", other),
        }
    }

    #[test]
    fn chain_inside_array_element() {
        let nodes = parse("[1 |+ 1, 2]").unwrap();
        match &nodes[0].kind {
            NodeKind::Array { elements } => {
                assert_eq!(elements[0].node_type(), "GeneratorChain")
            }
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn chain_keeps_full_original_text() {
        let nodes = parse("x |: f |^ 3").unwrap();
        assert_eq!(nodes[0].original, "x |: f |^ 3");
        assert_eq!(nodes[0].span.start, 0);
        assert_eq!(nodes[0].span.end, 11);
    }
}
