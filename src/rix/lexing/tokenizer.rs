//! The tokenizer proper.
//!
//!     At each position the tokenizer absorbs whitespace and then tries its matchers in a
//!     fixed priority order: number, string-like, identifier/placeholder, semicolon run,
//!     symbol. The first matcher that succeeds produces the token. A character no matcher
//!     accepts is absorbed silently and becomes part of the next token's original text, so
//!     the original texts of all tokens still concatenate back to the source.

use super::common::{Delimiter, LexError};
use super::delimiters::{find_closing, run_length};
use super::patterns::{
    match_number, match_symbol, IDENTIFIER_REGEX, PLACEHOLDER_REGEX, SEMICOLON_RUN_REGEX,
    SINGLE_SYMBOL_REGEX,
};
use crate::rix::token::{IdentifierKind, Span, StringKind, Token, TokenKind};
use tracing::debug;

/// A matched token before its absorbed prefix is attached.
struct Scanned {
    kind: TokenKind,
    value: String,
    span: Span,
}

/// Split `source` into tokens, always ending with exactly one `End` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut absorbed_from = 0;

    while let Some(ch) = source[pos..].chars().next() {
        if ch.is_whitespace() {
            pos += ch.len_utf8();
            continue;
        }
        match scan(source, pos)? {
            Some(scanned) => {
                let end = scanned.span.end;
                tokens.push(Token::new(
                    scanned.kind,
                    source[absorbed_from..end].to_string(),
                    scanned.value,
                    scanned.span,
                ));
                pos = end;
                absorbed_from = end;
            }
            None => pos += ch.len_utf8(),
        }
    }

    tokens.push(Token::end(source[absorbed_from..].to_string(), source.len()));
    debug!(tokens = tokens.len(), bytes = source.len(), "tokenized source");
    Ok(tokens)
}

fn scan(source: &str, pos: usize) -> Result<Option<Scanned>, LexError> {
    if let Some(scanned) = scan_number(source, pos) {
        return Ok(Some(scanned));
    }
    if let Some(scanned) = scan_string(source, pos)? {
        return Ok(Some(scanned));
    }
    Ok(scan_identifier(source, pos)
        .or_else(|| scan_semicolons(source, pos))
        .or_else(|| scan_symbol(source, pos)))
}

fn scan_number(source: &str, pos: usize) -> Option<Scanned> {
    let (_, len) = match_number(&source[pos..])?;
    Some(Scanned {
        kind: TokenKind::Number,
        value: source[pos..pos + len].to_string(),
        span: Span::raw(pos, pos + len),
    })
}

fn scan_string(source: &str, pos: usize) -> Result<Option<Scanned>, LexError> {
    let rest = &source[pos..];
    if rest.starts_with('#') {
        let content_start = pos + 1;
        let end = source[content_start..]
            .find('\n')
            .map_or(source.len(), |offset| content_start + offset);
        return Ok(Some(Scanned {
            kind: TokenKind::String {
                kind: StringKind::Comment,
            },
            value: source[content_start..end].to_string(),
            span: Span::new(pos, content_start, end),
        }));
    }
    if rest.starts_with("/*") {
        let stars = run_length(&rest[1..], '*');
        return counted_literal(source, pos, 1 + stars, stars, Delimiter::BlockComment).map(Some);
    }
    if rest.starts_with('"') {
        return quoted_literal(source, pos, '"', Delimiter::Quote).map(Some);
    }
    if rest.starts_with('`') {
        return quoted_literal(source, pos, '`', Delimiter::Backtick).map(Some);
    }
    Ok(None)
}

fn quoted_literal(
    source: &str,
    pos: usize,
    quote: char,
    delimiter: Delimiter,
) -> Result<Scanned, LexError> {
    let count = run_length(&source[pos..], quote);
    if count == 2 {
        // A bare doubled delimiter is the empty literal
        return Ok(Scanned {
            kind: string_kind(delimiter),
            value: String::new(),
            span: Span::new(pos, pos + 1, pos + 2),
        });
    }
    counted_literal(source, pos, count, count, delimiter)
}

/// A literal whose opening delimiter is `open_len` bytes long and whose close is a run of
/// exactly `count` delimiter characters.
fn counted_literal(
    source: &str,
    pos: usize,
    open_len: usize,
    count: usize,
    delimiter: Delimiter,
) -> Result<Scanned, LexError> {
    let content_start = pos + open_len;
    let body = &source[content_start..];
    match find_closing(body, delimiter, count) {
        Some((content_end, close_end)) => Ok(Scanned {
            kind: string_kind(delimiter),
            value: body[..content_end].to_string(),
            span: Span::new(pos, content_start, content_start + close_end),
        }),
        None => Err(LexError::UnmatchedDelimiter {
            delimiter,
            count,
            position: pos,
            remainder: body.to_string(),
        }),
    }
}

fn string_kind(delimiter: Delimiter) -> TokenKind {
    let kind = match delimiter {
        Delimiter::BlockComment => StringKind::Comment,
        Delimiter::Quote => StringKind::Quote,
        Delimiter::Backtick => StringKind::Backtick,
    };
    TokenKind::String { kind }
}

fn scan_identifier(source: &str, pos: usize) -> Option<Scanned> {
    let rest = &source[pos..];
    if let Some(captures) = PLACEHOLDER_REGEX.captures(rest) {
        let whole = captures.get(0)?;
        if let Ok(index) = captures[1].parse::<usize>() {
            return Some(Scanned {
                kind: TokenKind::PlaceHolder { index },
                value: whole.as_str().to_string(),
                span: Span::raw(pos, pos + whole.end()),
            });
        }
    }
    let found = IDENTIFIER_REGEX.find(rest)?;
    let (kind, value) = canonical_identifier(found.as_str());
    Some(Scanned {
        kind: TokenKind::Identifier { kind },
        value,
        span: Span::raw(pos, pos + found.end()),
    })
}

/// Case-normalize an identifier for matching.
///
/// The first character is kept as written and decides the class: uppercase makes a System
/// identifier with the rest upper-cased, anything else a User identifier with the rest
/// lower-cased.
pub fn canonical_identifier(text: &str) -> (IdentifierKind, String) {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return (IdentifierKind::User, String::new());
    };
    let rest = chars.as_str();
    if first.is_uppercase() {
        (
            IdentifierKind::System,
            format!("{}{}", first, rest.to_uppercase()),
        )
    } else {
        (
            IdentifierKind::User,
            format!("{}{}", first, rest.to_lowercase()),
        )
    }
}

fn scan_semicolons(source: &str, pos: usize) -> Option<Scanned> {
    let found = SEMICOLON_RUN_REGEX.find(&source[pos..])?;
    Some(Scanned {
        kind: TokenKind::SemicolonSequence { count: found.end() },
        value: found.as_str().to_string(),
        span: Span::raw(pos, pos + found.end()),
    })
}

fn scan_symbol(source: &str, pos: usize) -> Option<Scanned> {
    let rest = &source[pos..];
    let len = match match_symbol(rest) {
        Some(symbol) => symbol.len(),
        None => SINGLE_SYMBOL_REGEX.find(rest)?.end(),
    };
    Some(Scanned {
        kind: TokenKind::Symbol,
        value: rest[..len].to_string(),
        span: Span::raw(pos, pos + len),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(source: &str) -> Vec<String> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    #[test]
    fn empty_source_is_a_single_end_token() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_end());
        assert_eq!(tokens[0].span, Span::new(0, 0, 0));
    }

    #[test]
    fn whitespace_only_source_keeps_text_on_end_token() {
        let tokens = tokenize("  \n\t").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].original, "  \n\t");
        assert_eq!(tokens[0].span, Span::new(4, 4, 4));
    }

    #[test]
    fn leading_whitespace_is_absorbed_into_original() {
        let tokens = tokenize("x := 1").unwrap();
        let originals: Vec<&str> = tokens.iter().map(|t| t.original.as_str()).collect();
        assert_eq!(originals, vec!["x", " :=", " 1", ""]);
        assert_eq!(tokens[1].span, Span::new(2, 4, 4));
    }

    #[test]
    fn identifiers_are_case_normalized() {
        let tokens = tokenize("myVar Sin").unwrap();
        assert_eq!(
            tokens[0].kind,
            TokenKind::Identifier {
                kind: IdentifierKind::User
            }
        );
        assert_eq!(tokens[0].value, "myvar");
        assert_eq!(tokens[0].original, "myVar");
        assert_eq!(
            tokens[1].kind,
            TokenKind::Identifier {
                kind: IdentifierKind::System
            }
        );
        assert_eq!(tokens[1].value, "SIN");
    }

    #[test]
    fn unicode_identifiers() {
        let (kind, value) = canonical_identifier("Δx");
        assert_eq!(kind, IdentifierKind::System);
        assert_eq!(value, "ΔX");
        let (kind, value) = canonical_identifier("θA");
        assert_eq!(kind, IdentifierKind::User);
        assert_eq!(value, "θa");
    }

    #[test]
    fn placeholders_carry_their_index() {
        let tokens = tokenize("_3 _").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::PlaceHolder { index: 3 });
        assert_eq!(tokens[1].kind, TokenKind::Symbol);
        assert_eq!(tokens[1].value, "_");
    }

    #[test]
    fn semicolon_runs() {
        let tokens = tokenize("a;b;;;c").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Symbol);
        assert_eq!(tokens[3].kind, TokenKind::SemicolonSequence { count: 3 });
    }

    #[test]
    fn line_comment_runs_to_end_of_line() {
        let tokens = tokenize("1 # note\n2").unwrap();
        assert_eq!(
            tokens[1].kind,
            TokenKind::String {
                kind: StringKind::Comment
            }
        );
        assert_eq!(tokens[1].value, " note");
        assert_eq!(tokens[1].span, Span::new(2, 3, 8));
        assert_eq!(tokens[2].original, "\n2");
    }

    #[test]
    fn block_comment_with_matching_stars() {
        let tokens = tokenize("/** a */ b **/x").unwrap();
        assert_eq!(tokens[0].value, " a */ b ");
        assert_eq!(tokens[0].span, Span::new(0, 3, 14));
        assert_eq!(tokens[1].value, "x");
    }

    #[test]
    fn block_comment_with_wrong_star_count_fails() {
        let err = tokenize("/** a ***/").unwrap_err();
        assert!(err.to_string().contains("need 2 closing stars"));
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn quoted_literal_spans_point_at_content() {
        let tokens = tokenize("x \"\"\"a\"b\"\"\"").unwrap();
        assert_eq!(tokens[1].value, "a\"b");
        assert_eq!(tokens[1].span, Span::new(2, 5, 11));
    }

    #[test]
    fn unmatched_quotes_fail_with_required_count() {
        let err = tokenize("\"\"\"abc\"\"").unwrap_err();
        match &err {
            LexError::UnmatchedDelimiter {
                count, remainder, ..
            } => {
                assert_eq!(*count, 3);
                assert_eq!(remainder, "abc\"\"");
            }
        }
        assert!(err.to_string().contains("need 3 closing quotes"));
    }

    #[test]
    fn doubled_quote_is_empty_literal() {
        let tokens = tokenize("\"\" 1").unwrap();
        assert_eq!(tokens[0].value, "");
        assert_eq!(
            tokens[0].kind,
            TokenKind::String {
                kind: StringKind::Quote
            }
        );
        assert_eq!(tokens[1].value, "1");
    }

    #[test]
    fn backtick_literal() {
        let tokens = tokenize("`Python: x = 1`").unwrap();
        assert_eq!(
            tokens[0].kind,
            TokenKind::String {
                kind: StringKind::Backtick
            }
        );
        assert_eq!(tokens[0].value, "Python: x = 1");
        assert_eq!(tokens[0].span, Span::new(0, 1, 15));
    }

    #[test]
    fn numbers_take_priority_over_comments() {
        assert_eq!(values("1#2 #c"), vec!["1#2", "c", ""]);
    }

    #[test]
    fn symbols_use_longest_listed_spelling() {
        assert_eq!(
            values("a:=>b :>=: c->d"),
            vec!["a", ":=>", "b", ":>=:", "c", "->", "d", ""]
        );
    }

    #[test]
    fn unknown_characters_are_absorbed() {
        // U+203F is a word character no matcher accepts
        let tokens = tokenize("a \u{203F}b").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].value, "b");
        assert_eq!(tokens[1].original, " \u{203F}b");
    }
}
