//! Embedded-language blocks.
//!
//!     A backtick literal's content is read as `HEADER:BODY`. The header ends at the first
//!     colon outside parentheses, so `` `SQL(db:main):select 1` `` has the header `SQL(db:main)`.
//!     The header is either `LANGUAGE` or `LANGUAGE(CONTEXT)`.
//!
//!     Content without such a colon, or with nothing before it, is a plain `RiX-String`.

use super::error::ParseError;
use super::parser::Parser;
use crate::rix::ast::{Node, NodeKind};

pub const DEFAULT_LANGUAGE: &str = "RiX-String";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct EmbeddedBlock {
    pub language: String,
    pub context: Option<String>,
    pub body: String,
}

impl EmbeddedBlock {
    fn plain(body: &str) -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            context: None,
            body: body.to_string(),
        }
    }
}

/// Byte index of the header colon and whether a `)` without its `(` came before it.
fn header_colon(content: &str) -> (Option<usize>, bool) {
    let mut depth = 0usize;
    let mut unmatched_close = false;
    for (index, ch) in content.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => unmatched_close = true,
            ')' => depth -= 1,
            ':' if depth == 0 => return (Some(index), unmatched_close),
            _ => {}
        }
    }
    (None, unmatched_close)
}

fn parse_header(header: &str) -> Result<(String, Option<String>), String> {
    let Some(open) = header.find('(') else {
        return Ok((header.trim().to_string(), None));
    };
    let language = header[..open].trim();
    if language.is_empty() {
        return Err("Embedded language header needs a language name before '('".to_string());
    }

    let mut depth = 0usize;
    let mut close = None;
    for (index, ch) in header[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + index);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = close.ok_or_else(|| "Unmatched '(' in embedded language header".to_string())?;

    let rest = &header[close + 1..];
    if rest.contains('(') {
        return Err("Embedded language header allows only one '(...)' context group".to_string());
    }
    if !rest.is_empty() {
        return Err(format!(
            "')' in embedded language header must be followed directly by ':', found {:?}",
            rest
        ));
    }
    let context = header[open + 1..close].trim().to_string();
    Ok((language.to_string(), Some(context)))
}

/// Split backtick content into language, context and body.
pub(super) fn parse_embedded(content: &str) -> Result<EmbeddedBlock, String> {
    let (colon, unmatched_close) = header_colon(content);
    let Some(colon) = colon else {
        return Ok(EmbeddedBlock::plain(content));
    };
    let header = &content[..colon];
    let body = &content[colon + 1..];
    if header.trim().is_empty() {
        return Ok(EmbeddedBlock::plain(body));
    }
    if unmatched_close {
        return Err("Unmatched ')' in embedded language header".to_string());
    }

    let (language, context) = parse_header(header)?;
    Ok(EmbeddedBlock {
        language,
        context,
        body: body.to_string(),
    })
}

impl<'c> Parser<'c> {
    pub(super) fn parse_embedded_language(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        let token = self.advance();
        let block = parse_embedded(&token.value)
            .map_err(|message| ParseError::syntax(message, token.span.start))?;
        Ok(self.finish(
            NodeKind::EmbeddedLanguage {
                language: block.language,
                context: block.context,
                body: block.body,
            },
            start,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rix::ast::to_sexpr;
    use crate::rix::parsing::parse;
    use rstest::rstest;

    #[rstest]
    #[case("SQL:select 1", "SQL", None, "select 1")]
    #[case("Py(np:v2):x + 1", "Py", Some("np:v2"), "x + 1")]
    #[case("plain text", DEFAULT_LANGUAGE, None, "plain text")]
    #[case(":leading", DEFAULT_LANGUAGE, None, "leading")]
    #[case("note (draft", DEFAULT_LANGUAGE, None, "note (draft")]
    #[case("JS( ctx ):", "JS", Some("ctx"), "")]
    fn headers(
        #[case] content: &str,
        #[case] language: &str,
        #[case] context: Option<&str>,
        #[case] body: &str,
    ) {
        let block = parse_embedded(content).unwrap();
        assert_eq!(block.language, language);
        assert_eq!(block.context.as_deref(), context);
        assert_eq!(block.body, body);
    }

    #[rstest]
    #[case("SQL):x", "Unmatched ')'")]
    #[case("SQL(a)(b):x", "only one")]
    #[case("SQL(a) v2:x", "followed directly by ':'")]
    #[case("(ctx):x", "needs a language name")]
    fn header_errors(#[case] content: &str, #[case] message: &str) {
        let err = parse_embedded(content).unwrap_err();
        assert!(err.contains(message), "{:?} gave {}", content, err);
    }

    #[test]
    fn backtick_literal_becomes_embedded_node() {
        assert_eq!(
            to_sexpr(&parse("`Py(ctx):1 + 2`").unwrap()),
            "(EmbeddedLanguage Py(ctx))"
        );
    }

    #[test]
    fn header_error_is_located_at_the_literal() {
        let err = parse("x := `A):b`").unwrap_err();
        assert_eq!(err.position(), 5);
    }
}
