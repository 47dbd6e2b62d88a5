//! Parser behavior checked through the fluent assertion API

use rix::rix::ast::{NodeCounter, NodeKind};
use rix::rix::parsing::{parse, ParseError};
use rix::rix::testing::{assert_node, assert_program};

#[test]
fn multiplication_nests_under_addition() {
    let nodes = parse("1+2*3").unwrap();
    assert_program(&nodes).node_count(1).node(0, |n| {
        n.assert_binary("+")
            .left(|l| {
                l.number("1");
            })
            .right(|r| {
                r.assert_binary("*")
                    .left(|l| {
                        l.number("2");
                    })
                    .right(|r| {
                        r.number("3");
                    });
            });
    });
}

#[test]
fn exponent_groups_to_the_right() {
    let nodes = parse("2^3^2").unwrap();
    assert_node(&nodes[0])
        .assert_binary("^")
        .left(|l| {
            l.number("2");
        })
        .right(|r| {
            r.assert_binary("^");
        });
}

#[test]
fn terminated_assignment_is_a_statement() {
    let nodes = parse("x := 1;").unwrap();
    assert_program(&nodes).node_count(1).node(0, |n| {
        n.node_type("Statement")
            .span(0, 7)
            .text("x := 1;")
            .child(0, |c| {
                c.assert_binary(":=")
                    .left(|l| {
                        l.identifier("x");
                    })
                    .right(|r| {
                        r.number("1");
                    });
            });
    });
}

#[test]
fn definition_from_call_syntax() {
    let nodes = parse("f(x) :-> x^2").unwrap();
    assert_node(&nodes[0])
        .node_type("FunctionDefinition")
        .assert_function()
        .name("f")
        .parameters(&["x"])
        .keyword_count(0);
}

#[test]
fn placeholder_keeps_its_index() {
    let nodes = parse("_3").unwrap();
    assert_eq!(nodes[0].kind, NodeKind::PlaceHolder { index: 3 });
}

#[test]
fn matrix_and_tensor_literals() {
    let nodes = parse("[1,2;3,4]").unwrap();
    match &nodes[0].kind {
        NodeKind::Matrix { rows } => {
            let rows: Vec<Vec<&str>> = rows
                .iter()
                .map(|row| row.iter().map(|n| n.text()).collect())
                .collect();
            assert_eq!(rows, vec![vec!["1", "2"], vec!["3", "4"]]);
        }
        other => panic!("expected matrix, got {:?}", other),
    }

    let nodes = parse("[1,2;;3,4]").unwrap();
    match &nodes[0].kind {
        NodeKind::Tensor { max_dimension, .. } => assert_eq!(*max_dimension, 3),
        other => panic!("expected tensor, got {:?}", other),
    }
}

#[test]
fn brace_literals_are_classified_by_content() {
    let map = parse("{a := 1, b := 2}").unwrap();
    assert_node(&map[0]).node_type("Map").child_count(2);

    let system = parse("{x + y :=: 3; x - y :=: 1}").unwrap();
    assert_node(&system[0]).node_type("System").child_count(2);

    let set = parse("{1, x}").unwrap();
    assert_node(&set[0]).node_type("Set").child_count(2);
}

#[test]
fn short_quote_close_is_a_lex_error() {
    let err = parse("\"\"\"abc\"\"").unwrap_err();
    assert!(matches!(err, ParseError::Lex(_)));
    assert!(err.to_string().contains("need 3 closing quotes"));
}

#[test]
fn comments_become_program_nodes() {
    let nodes = parse("# heading\nx := 2; /* note */").unwrap();
    assert_program(&nodes)
        .node_count(3)
        .node(0, |n| {
            n.node_type("Comment");
        })
        .node(1, |n| {
            n.node_type("Statement");
        })
        .node(2, |n| {
            n.node_type("Comment");
        });
}

#[test]
fn pattern_matching_with_guards() {
    let nodes = parse("abs :=> [(x ? x < 0) -> -x, (x) -> x]").unwrap();
    assert_node(&nodes[0])
        .assert_function()
        .name("abs")
        .case_count(2);
}

#[test]
fn lambda_with_keyword_parameter() {
    let nodes = parse("(x; scale := 2) -> x * scale").unwrap();
    assert_node(&nodes[0])
        .node_type("FunctionLambda")
        .assert_function()
        .parameters(&["x", "scale"])
        .keyword_count(1);
}

#[test]
fn integral_and_derivative_compose() {
    let nodes = parse("'f[x](g'(1))").unwrap();
    match &nodes[0].kind {
        NodeKind::Integral {
            variables,
            application,
            ..
        } => {
            assert_eq!(variables.len(), 1);
            assert!(application.as_ref().unwrap().is_operations());
        }
        other => panic!("expected integral, got {:?}", other),
    }
}

#[test]
fn malformed_input_is_rejected() {
    let cases = [
        ("(1,,2)", "Consecutive commas"),
        ("[1, k := 2, 3]", "more than one element"),
        ("{x :=: 1, y :=: 2}", "separated by ';'"),
        ("f :=> 3", "lambda or an array of lambdas"),
        ("{{ x", "Unterminated code block"),
        ("a ?? b", "Expected '?:'"),
        ("x := ", "Unexpected end of input"),
        ("x := ;;", "Unexpected SemicolonSequence ';;'"),
    ];
    for (source, message) in cases {
        let err = parse(source).unwrap_err();
        assert!(
            err.to_string().contains(message),
            "{:?}: expected {:?} in {}",
            source,
            message,
            err
        );
    }
}

#[test]
fn missing_operand_points_at_the_offending_token() {
    assert_eq!(parse("x := ").unwrap_err().position(), 5);
    assert_eq!(parse("x := ;;").unwrap_err().position(), 5);
}

#[test]
fn node_counter_walks_parsed_programs() {
    let nodes = parse("x := 1 + 2; f(y)").unwrap();
    let mut counter = NodeCounter::default();
    for node in &nodes {
        node.accept(&mut counter);
    }
    // Statement, :=, x, +, 1, 2, then FunctionCall, f, y
    assert_eq!(counter.total, 9);
    assert_eq!(counter.max_depth, 4);
}
