//! Property-based tests for the RiX lexer and parser
//!
//! Random inputs are drawn from an alphabet that cannot open a count-delimited literal, so
//! tokenizing always succeeds and the invariants below must hold for every input.

use proptest::prelude::*;
use rix::rix::lexing::tokenize;
use rix::rix::parsing::parse;
use rix::rix::token::TokenKind;

fn source_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop::sample::select(vec![
            "a", "b", "Sin", "x1", "1", "2.5", "3/4", "1:2", "_", "_2", " ", "\n", "\t", "+",
            "-", "*", "^", "=", ":=", ":", ";", ";;", ",", "(", ")", "[", "]", "{", "}", "{{",
            "}}", "|>", "|+", "|^", "'", "?", "??", "?:", "@", "!", ".", "->", ":->", "~[",
            "# note\n", "é",
        ]),
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn originals_reconstruct_the_input(source in source_strategy()) {
        let tokens = tokenize(&source).unwrap();
        let rebuilt: String = tokens.iter().map(|t| t.original.as_str()).collect();
        prop_assert_eq!(rebuilt, source);
    }

    #[test]
    fn exactly_one_end_token_at_input_length(source in source_strategy()) {
        let tokens = tokenize(&source).unwrap();
        let ends = tokens.iter().filter(|t| t.kind == TokenKind::End).count();
        prop_assert_eq!(ends, 1);
        let last = tokens.last().unwrap();
        prop_assert_eq!(last.kind, TokenKind::End);
        prop_assert_eq!(last.span.start, source.len());
    }

    #[test]
    fn spans_are_ordered_and_in_bounds(source in source_strategy()) {
        let tokens = tokenize(&source).unwrap();
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].span.end <= pair[1].span.start);
        }
        for token in &tokens {
            prop_assert!(token.span.start <= token.span.inner);
            prop_assert!(token.span.inner <= token.span.end);
            prop_assert!(token.span.end <= source.len());
        }
    }

    #[test]
    fn parsing_never_panics_and_is_deterministic(source in source_strategy()) {
        let first = parse(&source);
        let second = parse(&source);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn node_originals_are_source_slices(source in source_strategy()) {
        if let Ok(nodes) = parse(&source) {
            for node in &nodes {
                prop_assert!(source.contains(node.original.as_str()));
                prop_assert!(node.span.start <= node.span.end);
            }
        }
    }
}
