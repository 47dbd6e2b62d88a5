//! Derivative and integral notation.
//!
//!     `f'`, `f''[x]`, `f'(2)` are derivatives: a run of quotes after a differentiable left side
//!     gives the order, an optional `[x, y]` names the variables and an optional `(args)`
//!     applies the result. `'f[x]` (quotes in prefix position) is the integral form and
//!     requires an identifier right after the quotes.
//!
//!     An application whose arguments contain calculus themselves is symbolic composition
//!     (`operations`); anything else is plain `evaluation`.

use super::error::ParseError;
use super::expression::identifier_kind;
use super::parser::{describe, Parser};
use crate::rix::ast::{contains_calculus, CalculusApplication, IntegralMetadata, Node, NodeKind};

impl<'c> Parser<'c> {
    fn count_quotes(&mut self) -> usize {
        let mut order = 0;
        while self.eat("'") {
            order += 1;
        }
        order
    }

    /// Optional `[variables]` and `(arguments)` after the quotes.
    fn parse_calculus_tail(
        &mut self,
    ) -> Result<(Vec<Node>, Option<CalculusApplication>), ParseError> {
        let variables = if self.check("[") {
            self.parse_variable_list()?
        } else {
            Vec::new()
        };
        let application = if self.check("(") {
            let arguments = self.parse_calculus_arguments()?;
            Some(if arguments.iter().any(contains_calculus) {
                CalculusApplication::Operations(arguments)
            } else {
                CalculusApplication::Evaluation(arguments)
            })
        } else {
            None
        };
        Ok((variables, application))
    }

    fn parse_variable_list(&mut self) -> Result<Vec<Node>, ParseError> {
        self.expect("[", "to open variable list")?;
        let mut variables = Vec::new();
        loop {
            self.skip_comments();
            if self.eat("]") {
                break;
            }
            if !self.peek().is_identifier() {
                return Err(self.error(format!(
                    "Calculus variables must be identifiers, found {}",
                    describe(self.peek())
                )));
            }
            let start = self.pos;
            let token = self.advance();
            variables.push(self.finish(identifier_kind(&token), start));
            self.skip_comments();
            if !self.eat(",") {
                self.expect("]", "to close variable list")?;
                break;
            }
        }
        Ok(variables)
    }

    fn parse_calculus_arguments(&mut self) -> Result<Vec<Node>, ParseError> {
        self.expect("(", "to open arguments")?;
        let mut arguments = Vec::new();
        loop {
            self.skip_comments();
            if self.check(")") {
                break;
            }
            arguments.push(self.parse_expression(0)?);
            self.skip_comments();
            if !self.eat(",") {
                break;
            }
        }
        self.expect(")", "to close arguments")?;
        Ok(arguments)
    }

    /// Derivative of `function`, whose tokens start at `start`; the cursor is on the first `'`.
    pub(super) fn parse_derivative(&mut self, function: Node, start: usize) -> Result<Node, ParseError> {
        let order = self.count_quotes();
        let (variables, application) = self.parse_calculus_tail()?;
        Ok(self.finish(
            NodeKind::Derivative {
                function: Box::new(function),
                order,
                variables,
                application,
            },
            start,
        ))
    }

    /// Integral notation: quotes in prefix position followed by an identifier.
    pub(super) fn parse_integral(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let order = self.count_quotes();
        if !self.peek().is_identifier() {
            return Err(self.error(format!(
                "Integral notation needs an identifier after the quotes, found {}",
                describe(self.peek())
            )));
        }
        let function_start = self.pos;
        let token = self.advance();
        let function = self.finish(identifier_kind(&token), function_start);
        let (variables, application) = self.parse_calculus_tail()?;
        Ok(self.finish(
            NodeKind::Integral {
                function: Box::new(function),
                order,
                variables,
                application,
                metadata: IntegralMetadata::default(),
            },
            start,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::rix::ast::{to_sexpr, CalculusApplication, Node, NodeKind};
    use crate::rix::parsing::parse;

    fn single(source: &str) -> Node {
        parse(source).unwrap().remove(0)
    }

    #[test]
    fn derivative_order_and_variables() {
        match single("f''[x, y]").kind {
            NodeKind::Derivative {
                order,
                variables,
                application,
                ..
            } => {
                assert_eq!(order, 2);
                assert_eq!(variables.len(), 2);
                assert!(application.is_none());
            }
            other => panic!("expected derivative, got {:?}", other),
        }
    }

    #[test]
    fn plain_arguments_are_evaluation() {
        match single("f'(2)").kind {
            NodeKind::Derivative {
                application: Some(CalculusApplication::Evaluation(args)),
                ..
            } => assert_eq!(args.len(), 1),
            other => panic!("expected evaluated derivative, got {:?}", other),
        }
    }

    #[test]
    fn calculus_arguments_are_operations() {
        match single("f'(g'(x))").kind {
            NodeKind::Derivative { application, .. } => {
                assert!(application.unwrap().is_operations())
            }
            other => panic!("expected derivative, got {:?}", other),
        }
    }

    #[test]
    fn derivative_of_call_and_property() {
        assert_eq!(single("f(x)'").node_type(), "Derivative");
        assert_eq!(single("a.f'").node_type(), "Derivative");
    }

    #[test]
    fn integral_carries_constant_metadata() {
        match single("'f[x]").kind {
            NodeKind::Integral {
                order, metadata, ..
            } => {
                assert_eq!(order, 1);
                assert_eq!(metadata.integration_constant, "c");
                assert_eq!(metadata.default_value, 0);
            }
            other => panic!("expected integral, got {:?}", other),
        }
    }

    #[test]
    fn integral_requires_identifier() {
        let err = parse("'2").unwrap_err();
        assert!(err.to_string().contains("needs an identifier"));
    }

    #[test]
    fn derivative_renders_order_as_label() {
        assert_eq!(
            to_sexpr(&parse("f''").unwrap()),
            "(Derivative '' (UserIdentifier f))"
        );
    }
}
