//! Ordered pattern tables for the lexer.
//!
//!     Number spellings overlap heavily (`1:2`, `1..2/3`, `1.2#3`, `1/2`, `1.2`, `1`), so the
//!     patterns are tried in declaration order and the first one that matches at the current
//!     position wins. The operator spellings work the same way: longer spellings are listed
//!     before any entry that is a prefix of them.
//!
//!     Everything here is compiled once and shared read-only across lexer calls.

use once_cell::sync::Lazy;
use regex::Regex;

const INTEGER: &str = r"\d+";
const DECIMAL: &str = r"\d+\.\d+";
const REPEATING: &str = r"\d+\.\d*#\d+";
const RATIONAL: &str = r"\d+/\d+";
const MIXED: &str = r"\d+\.\.\d+/\d+";

/// Number patterns as (name, regex source) rules.
/// Order matters: patterns are tried in declaration order for correct disambiguation
const NUMBER_PATTERNS: &[(&str, &str)] = &[
    // Interval pair: 1:2, 1.5:2/3, 0.#3:1..1/2
    ("interval", "^(?:{ATOM}):(?:{ATOM})"),
    // Scientific: 1.5E-3, 2e10, 0.1#6E2
    ("scientific", r"^(?:\d+\.\d*#\d+|\d+\.\d+|\d+)[Ee][+-]?\d+"),
    // Range / mixed number: 1..3/4
    ("mixed", "^{MIXED}"),
    // Repeating decimal: 1.23#45, 0.#3
    ("repeating", "^{REPEATING}"),
    // Rational with a hash separator: 3#4
    ("rational_hash", r"^\d+#\d+"),
    // Bracketed uncertainty: 1.23[+-0.01]
    ("uncertainty", r"^\d+\.\d+\[[^\]\n]*\]"),
    // Rational: 3/4
    ("rational", "^{RATIONAL}"),
    ("decimal", "^{DECIMAL}"),
    ("integer", "^{INTEGER}"),
];

fn expand(template: &str) -> String {
    let atom = format!("{}|{}|{}|{}|{}", MIXED, REPEATING, DECIMAL, RATIONAL, INTEGER);
    template
        .replace("{ATOM}", &atom)
        .replace("{MIXED}", MIXED)
        .replace("{REPEATING}", REPEATING)
        .replace("{RATIONAL}", RATIONAL)
        .replace("{DECIMAL}", DECIMAL)
        .replace("{INTEGER}", INTEGER)
}

/// Compiled number patterns, in priority order.
pub static NUMBER_REGEXES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    NUMBER_PATTERNS
        .iter()
        .map(|(name, source)| {
            let regex = Regex::new(&expand(source)).expect("number pattern must compile");
            (*name, regex)
        })
        .collect()
});

pub static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^_(\d+)").unwrap());

pub static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{L}[\p{L}\p{N}]*").unwrap());

pub static SEMICOLON_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^;{2,}").unwrap());

/// Any single character outside the word and space classes.
pub static SINGLE_SYMBOL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\w\s]").unwrap());

/// Operator spellings, longest first within each family.
pub const SYMBOLS: &[&str] = &[
    // Equation relations
    ":<=:", ":>=:", ":=:", ":<:", ":>:",
    // Function constructs
    ":->", ":=>",
    // Interval operations
    "::+", ":/:", ":~/", ":/%", "::", ":+", ":~", ":%",
    // Assignment
    ":=", "+=", "-=", "*=", "/=",
    // Pipes
    "||>", "|>>", "|>:", "|>?", "|>",
    // Generators
    "|^:", "|+", "|*", "|:", "|?", "|^",
    // Logic and comparison
    "||", "&&", "??", "?:", "==", "!=", "<=", ">=",
    // Arithmetic and arrows
    "->", "**", "//",
    // Code blocks and units
    "{{", "}}", "~[", "~{",
    // Null literal
    "_",
];

/// First operator spelling that starts `rest`.
pub fn match_symbol(rest: &str) -> Option<&'static str> {
    SYMBOLS.iter().copied().find(|symbol| rest.starts_with(symbol))
}

/// Name and length of the first number pattern matching at the start of `rest`.
pub fn match_number(rest: &str) -> Option<(&'static str, usize)> {
    NUMBER_REGEXES
        .iter()
        .find_map(|(name, regex)| regex.find(rest).map(|m| (*name, m.end())))
}
