//! Closing-delimiter search for count-delimited literals.
//!
//!     Block comments, quoted literals and backtick literals open with a run of N delimiter
//!     characters and close only at a run of exactly N. A small logos lexer splits the text
//!     after the opening run into delimiter runs and plain text, so finding the close is a
//!     matter of looking at run lengths.

use super::common::Delimiter;
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum DelimiterRun {
    #[regex(r#""+"#)]
    Quotes,

    #[regex(r"`+")]
    Backticks,

    /// One or more stars directly followed by a slash.
    #[regex(r"\*+/")]
    CommentClose,

    #[token("*")]
    Star,

    #[regex(r#"[^"`*]+"#)]
    Text,
}

/// Byte offsets within `body` of the matching close: `(content_end, close_end)`.
///
/// `body` is the text right after the opening run of `count` delimiters.
pub fn find_closing(body: &str, delimiter: Delimiter, count: usize) -> Option<(usize, usize)> {
    let mut lexer = DelimiterRun::lexer(body);
    while let Some(run) = lexer.next() {
        let span = lexer.span();
        let matched = match (run, delimiter) {
            (Ok(DelimiterRun::Quotes), Delimiter::Quote) => span.len() == count,
            (Ok(DelimiterRun::Backticks), Delimiter::Backtick) => span.len() == count,
            (Ok(DelimiterRun::CommentClose), Delimiter::BlockComment) => span.len() - 1 == count,
            _ => false,
        };
        if matched {
            return Some((span.start, span.end));
        }
    }
    None
}

/// Length in bytes of the run of `ch` at the start of `text`.
pub fn run_length(text: &str, ch: char) -> usize {
    text.chars().take_while(|c| *c == ch).count() * ch.len_utf8()
}
