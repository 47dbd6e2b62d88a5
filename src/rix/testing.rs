//! Testing utilities for AST assertions
//!
//! # Parser Testing Guidelines
//!
//! Matching on nested [NodeKind](crate::rix::ast::NodeKind) variants by hand buries the
//! interesting part of a test under boilerplate:
//!
//! ```rust-example
//! match &nodes[0].kind {
//!     NodeKind::BinaryOperation { operator, left, right } => {
//!         assert_eq!(operator, "+");
//!         assert_eq!(left.identifier_name(), Some("a"));
//!         match &right.kind {
//!             NodeKind::BinaryOperation { operator, .. } => assert_eq!(operator, "*"),
//!             _ => panic!("Expected BinaryOperation"),
//!         }
//!     }
//!     _ => panic!("Expected BinaryOperation"),
//! }
//! ```
//!
//! The fluent API states the same thing directly, and every failure message carries the
//! path to the offending node (`nodes[0]:right:left`):
//!
//! ```rust-example
//! use crate::rix::testing::assert_program;
//!
//! assert_program(&nodes)
//!     .node_count(1)
//!     .node(0, |n| {
//!         n.assert_binary("+")
//!             .left(|l| { l.identifier("a"); })
//!             .right(|r| { r.assert_binary("*"); });
//!     });
//! ```
//!
//! For whole-tree checks prefer [NodeAssertion::sexpr], which compares against the
//! S-expression rendering from [crate::rix::ast::to_sexpr].

mod ast_assertions;

pub use ast_assertions::{
    assert_node, assert_program, BinaryAssertion, FunctionAssertion, NodeAssertion,
    ProgramAssertion,
};
