//! Tokenizer behavior on representative RiX snippets

use rix::rix::lexing::{tokenize, Delimiter, LexError};
use rix::rix::token::{IdentifierKind, Span, StringKind, TokenKind};
use rstest::rstest;

fn kinds_and_values(source: &str) -> Vec<(TokenKind, String)> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| (t.kind, t.value))
        .collect()
}

#[test]
fn empty_input_is_one_end_token() {
    let tokens = tokenize("").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::End);
    assert_eq!(tokens[0].span, Span::new(0, 0, 0));
}

#[test]
fn assignment_statement() {
    use TokenKind::*;
    assert_eq!(
        kinds_and_values("x := 1;"),
        vec![
            (
                Identifier {
                    kind: IdentifierKind::User
                },
                "x".to_string()
            ),
            (Symbol, ":=".to_string()),
            (Number, "1".to_string()),
            (Symbol, ";".to_string()),
            (End, std::string::String::new()),
        ]
    );
}

#[rstest]
#[case("3/4", "3/4")]
#[case("1.5E-3", "1.5E-3")]
#[case("1:10", "1:10")]
#[case("0.#3", "0.#3")]
#[case("1.23[+-0.01]", "1.23[+-0.01]")]
fn numbers_keep_their_spelling(#[case] source: &str, #[case] value: &str) {
    let tokens = tokenize(source).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, value);
}

#[rstest]
#[case("sIN", IdentifierKind::User, "sin")]
#[case("Sin", IdentifierKind::System, "SIN")]
#[case("αβ", IdentifierKind::User, "αβ")]
fn identifiers_are_canonicalized(
    #[case] source: &str,
    #[case] kind: IdentifierKind,
    #[case] value: &str,
) {
    let tokens = tokenize(source).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Identifier { kind });
    assert_eq!(tokens[0].value, value);
}

#[test]
fn placeholder_and_null() {
    let tokens = tokenize("_3 + _").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::PlaceHolder { index: 3 });
    assert_eq!(tokens[2].kind, TokenKind::Symbol);
    assert_eq!(tokens[2].value, "_");
}

#[rstest]
#[case("a |>> f", "|>>")]
#[case("a :=: b", ":=:")]
#[case("a ::+ b", "::+")]
#[case("a |^: b", "|^:")]
#[case("a ?: b", "?:")]
fn longest_operator_wins(#[case] source: &str, #[case] symbol: &str) {
    let tokens = tokenize(source).unwrap();
    assert_eq!(tokens[1].kind, TokenKind::Symbol);
    assert_eq!(tokens[1].value, symbol);
}

#[test]
fn semicolon_runs_carry_their_count() {
    let tokens = tokenize("a;;;b").unwrap();
    assert_eq!(tokens[1].kind, TokenKind::SemicolonSequence { count: 3 });
}

#[test]
fn string_like_spans_mark_content_start() {
    let tokens = tokenize("\"hi\" `SQL:x`").unwrap();
    assert_eq!(
        tokens[0].kind,
        TokenKind::String {
            kind: StringKind::Quote
        }
    );
    assert_eq!(tokens[0].value, "hi");
    assert_eq!(tokens[0].span, Span::new(0, 1, 4));
    assert_eq!(
        tokens[1].kind,
        TokenKind::String {
            kind: StringKind::Backtick
        }
    );
    assert_eq!(tokens[1].value, "SQL:x");
    assert_eq!(tokens[1].span, Span::new(5, 6, 12));
}

#[test]
fn doubled_quote_is_the_empty_literal() {
    let tokens = tokenize("\"\"").unwrap();
    assert_eq!(tokens[0].value, "");
    assert_eq!(tokens[0].span, Span::new(0, 1, 2));
    assert!(tokens[1].is_end());
}

#[test]
fn quoted_literal_with_short_close_fails() {
    let err = tokenize("\"\"\"abc\"\"").unwrap_err();
    match &err {
        LexError::UnmatchedDelimiter {
            delimiter,
            count,
            position,
            remainder,
        } => {
            assert_eq!(*delimiter, Delimiter::Quote);
            assert_eq!(*count, 3);
            assert_eq!(*position, 0);
            assert_eq!(remainder, "abc\"\"");
        }
    }
    assert!(err.to_string().contains("need 3 closing quotes"));
}

#[test]
fn unclosed_backtick_reports_position() {
    let err = tokenize("x := `SQL:select").unwrap_err();
    assert_eq!(err.position(), 5);
}
