//! Fluent assertion API for AST nodes

use crate::rix::ast::{snapshot_node, Node, NodeKind, Parameters};

// ============================================================================
// Entry Points
// ============================================================================

/// Create an assertion builder for a parsed program
pub fn assert_program(nodes: &[Node]) -> ProgramAssertion<'_> {
    ProgramAssertion { nodes }
}

/// Create an assertion builder for a single node
pub fn assert_node(node: &Node) -> NodeAssertion<'_> {
    NodeAssertion {
        node,
        context: "node".to_string(),
    }
}

fn summarize(nodes: &[&Node]) -> String {
    nodes
        .iter()
        .map(|node| node.node_type())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Program Assertions
// ============================================================================

pub struct ProgramAssertion<'a> {
    nodes: &'a [Node],
}

impl<'a> ProgramAssertion<'a> {
    pub fn node_count(self, expected: usize) -> Self {
        let actual = self.nodes.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} top-level nodes, found {}: [{}]",
            expected,
            actual,
            summarize(&self.nodes.iter().collect::<Vec<_>>())
        );
        self
    }

    pub fn node<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assert!(
            index < self.nodes.len(),
            "Node index {} out of bounds (program has {} nodes)",
            index,
            self.nodes.len()
        );
        assertion(NodeAssertion {
            node: &self.nodes[index],
            context: format!("nodes[{}]", index),
        });
        self
    }
}

// ============================================================================
// Node Assertions
// ============================================================================

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    fn nested(&self, node: &'a Node, step: &str) -> NodeAssertion<'a> {
        NodeAssertion {
            node,
            context: format!("{}:{}", self.context, step),
        }
    }

    pub fn node_type(self, expected: &str) -> Self {
        assert_eq!(
            self.node.node_type(),
            expected,
            "{}: Expected {}, found {} ({:?})",
            self.context,
            expected,
            self.node.node_type(),
            self.node.text()
        );
        self
    }

    /// Source text of the node, leading whitespace ignored
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.node.text(),
            expected,
            "{}: Expected text {:?}, found {:?}",
            self.context,
            expected,
            self.node.text()
        );
        self
    }

    pub fn span(self, start: usize, end: usize) -> Self {
        assert_eq!(
            (self.node.span.start, self.node.span.end),
            (start, end),
            "{}: Expected span {}..{}, found {}",
            self.context,
            start,
            end,
            self.node.span
        );
        self
    }

    pub fn sexpr(self, expected: &str) -> Self {
        let actual = snapshot_node(self.node).to_sexpr();
        assert_eq!(
            actual, expected,
            "{}: S-expression mismatch",
            self.context
        );
        self
    }

    pub fn identifier(self, expected: &str) -> Self {
        match self.node.identifier_name() {
            Some(name) => assert_eq!(
                name, expected,
                "{}: Expected identifier '{}', found '{}'",
                self.context, expected, name
            ),
            None => panic!(
                "{}: Expected identifier '{}', found {}",
                self.context,
                expected,
                self.node.node_type()
            ),
        }
        self
    }

    pub fn number(self, expected: &str) -> Self {
        match &self.node.kind {
            NodeKind::Number { value } => assert_eq!(
                value, expected,
                "{}: Expected number {}, found {}",
                self.context, expected, value
            ),
            _ => panic!(
                "{}: Expected Number {}, found {}",
                self.context,
                expected,
                self.node.node_type()
            ),
        }
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let children = self.node.children();
        assert_eq!(
            children.len(),
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            children.len(),
            summarize(&children)
        );
        self
    }

    /// Assert on the `index`-th child in traversal order
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let children = self.node.children();
        assert!(
            index < children.len(),
            "{}: Child index {} out of bounds (node has {} children)",
            self.context,
            index,
            children.len()
        );
        assertion(self.nested(children[index], &format!("children[{}]", index)));
        self
    }

    /// Assert this node is a BinaryOperation with the given operator
    pub fn assert_binary(self, operator: &str) -> BinaryAssertion<'a> {
        match self.node.as_binary() {
            Some((actual, left, right)) => {
                assert_eq!(
                    actual, operator,
                    "{}: Expected operator '{}', found '{}'",
                    self.context, operator, actual
                );
                BinaryAssertion {
                    left,
                    right,
                    context: self.context,
                }
            }
            None => panic!(
                "{}: Expected BinaryOperation '{}', found {}",
                self.context,
                operator,
                self.node.node_type()
            ),
        }
    }

    /// Assert this node is a function definition, lambda or pattern-matching function
    pub fn assert_function(self) -> FunctionAssertion<'a> {
        let (name, parameters, cases) = match &self.node.kind {
            NodeKind::FunctionDefinition {
                name, parameters, ..
            } => (Some(name.as_ref()), parameters, 0),
            NodeKind::PatternMatchingFunction {
                name,
                parameters,
                cases,
            } => (Some(name.as_ref()), parameters, cases.len()),
            NodeKind::FunctionLambda { parameters, .. } => (None, parameters, 0),
            _ => panic!(
                "{}: Expected a function, found {}",
                self.context,
                self.node.node_type()
            ),
        };
        FunctionAssertion {
            name,
            parameters,
            cases,
            context: self.context,
        }
    }
}

// ============================================================================
// Binary Operation Assertions
// ============================================================================

pub struct BinaryAssertion<'a> {
    left: &'a Node,
    right: &'a Node,
    context: String,
}

impl<'a> BinaryAssertion<'a> {
    pub fn left<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assertion(NodeAssertion {
            node: self.left,
            context: format!("{}:left", self.context),
        });
        self
    }

    pub fn right<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assertion(NodeAssertion {
            node: self.right,
            context: format!("{}:right", self.context),
        });
        self
    }
}

// ============================================================================
// Function Assertions
// ============================================================================

pub struct FunctionAssertion<'a> {
    name: Option<&'a Node>,
    parameters: &'a Parameters,
    cases: usize,
    context: String,
}

impl<'a> FunctionAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        let actual = self.name.and_then(Node::identifier_name);
        assert_eq!(
            actual,
            Some(expected),
            "{}: Expected function name '{}', found {:?}",
            self.context,
            expected,
            actual
        );
        self
    }

    /// Positional then keyword parameter names
    pub fn parameters(self, expected: &[&str]) -> Self {
        let actual = self.parameters.names();
        assert_eq!(
            actual, expected,
            "{}: Parameter names differ",
            self.context
        );
        self
    }

    pub fn keyword_count(self, expected: usize) -> Self {
        assert_eq!(
            self.parameters.keyword.len(),
            expected,
            "{}: Expected {} keyword parameters",
            self.context,
            expected
        );
        self
    }

    pub fn conditional_count(self, expected: usize) -> Self {
        assert_eq!(
            self.parameters.conditionals.len(),
            expected,
            "{}: Expected {} parameter conditions",
            self.context,
            expected
        );
        self
    }

    pub fn case_count(self, expected: usize) -> Self {
        assert_eq!(
            self.cases, expected,
            "{}: Expected {} pattern cases, found {}",
            self.context, expected, self.cases
        );
        self
    }
}
