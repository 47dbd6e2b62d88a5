//! Abstract syntax tree
//!
//!     Parsing produces a sequence of top-level [Node]s. Each node is a [NodeKind] variant
//!     plus its `{start, end}` byte span and the exact source text it covers, leading
//!     whitespace included. Nodes are plain owned values: the tree is built bottom-up by the
//!     parser and never mutated afterwards.
//!
//! Traversal
//!
//!     [Node::children] and the [Visitor] trait give read-only, source-ordered traversal.
//!     Calculus detection ([contains_calculus]) and the snapshot renderers are built on it.
//!
//! Snapshots
//!
//!     [snapshot] normalizes a tree into [AstSnapshot] values that render as indented trees
//!     or S-expressions. Tests and the command line use these renderings.

pub mod node;
pub mod params;
pub mod snapshot;
pub mod visitor;

pub use node::{Fixity, IntegralMetadata, Node, NodeKind, NodeSpan};
pub use params::{
    Arguments, CalculusApplication, GeneratorOp, GeneratorStep, KeywordArgument, Parameter,
    Parameters, TensorRow,
};
pub use snapshot::{snapshot_node, snapshot_program, to_sexpr, AstSnapshot};
pub use visitor::{contains_calculus, NodeCounter, Visitor};
