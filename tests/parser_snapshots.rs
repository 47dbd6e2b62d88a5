//! Snapshot tests for rendered syntax trees
//!
//! Trees are rendered through the snapshot renderers so that a regression in shape, labels
//! or spans shows up as a readable diff.

use rix::rix::ast::{snapshot_program, to_sexpr};
use rix::rix::parsing::parse;

fn sexpr(source: &str) -> String {
    to_sexpr(&parse(source).expect("source to parse"))
}

#[test]
fn statements_as_sexpr() {
    insta::assert_snapshot!(
        sexpr("x := 1; y := x + 2"),
        @r"
    (Statement (BinaryOperation := (UserIdentifier x) (Number 1)))
    (BinaryOperation := (UserIdentifier y) (BinaryOperation + (UserIdentifier x) (Number 2)))
    "
    );
}

#[test]
fn statement_tree_with_spans() {
    let nodes = parse("x := 1;").expect("source to parse");
    insta::assert_snapshot!(
        snapshot_program(&nodes).to_tree(),
        @r"
    Program
      Statement span=0..7
        BinaryOperation := span=0..6
          UserIdentifier x span=0..1
          Number 1 span=5..6
    "
    );
}

#[test]
fn lambda_and_pipe() {
    insta::assert_snapshot!(
        sexpr("xs |>> (x) -> x + 1"),
        @"(PipeMap (UserIdentifier xs) (FunctionLambda [x] (BinaryOperation + (UserIdentifier x) (Number 1))))"
    );
}

#[test]
fn ternary_over_comparison() {
    insta::assert_snapshot!(
        sexpr("x > 0 ?? x ?: -x"),
        @"(TernaryOperation (BinaryOperation > (UserIdentifier x) (Number 0)) (UserIdentifier x) (UnaryOperation - (UserIdentifier x)))"
    );
}

#[test]
fn generator_chain_collects_steps() {
    insta::assert_snapshot!(
        sexpr("1 |+ 2 |^ 5"),
        @"(GeneratorChain |+|^ (Number 1) (Number 2) (Number 5))"
    );
}

#[test]
fn call_with_keyword_argument_and_units() {
    insta::assert_snapshot!(
        sexpr("f(2~[m], 3; tol := 0.1)"),
        @"(FunctionCall (UserIdentifier f) (ScientificUnit m (Number 2)) (Number 3) (Number 0.1))"
    );
}
