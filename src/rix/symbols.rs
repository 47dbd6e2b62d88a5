//! Operator symbol table.
//!
//!     Every operator spelling the lexer can produce has one immutable entry describing how
//!     the expression engine treats it: its precedence on the ladder below, its
//!     associativity, its syntactic form and whether it may also appear as a prefix operator.
//!     The table is built once and shared read-only by all parser instances.
//!
//! Precedence Ladder
//!
//!     From loosest to tightest: statement, assignment, pipe, arrow, logical or, logical and,
//!     condition, equality, comparison, interval, addition, multiplication, exponentiation,
//!     unary, calculus, postfix, property access. Grouping and code block delimiters have
//!     precedence 0 and never act as operators in the climbing loop.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub mod precedence {
    pub const NONE: u16 = 0;
    pub const STATEMENT: u16 = 5;
    pub const ASSIGNMENT: u16 = 10;
    pub const PIPE: u16 = 20;
    pub const ARROW: u16 = 25;
    pub const LOGICAL_OR: u16 = 30;
    pub const LOGICAL_AND: u16 = 40;
    pub const CONDITION: u16 = 50;
    pub const EQUALITY: u16 = 60;
    pub const COMPARISON: u16 = 70;
    pub const INTERVAL: u16 = 75;
    pub const ADDITION: u16 = 80;
    pub const MULTIPLICATION: u16 = 90;
    pub const EXPONENTIATION: u16 = 100;
    pub const UNARY: u16 = 110;
    pub const CALCULUS: u16 = 115;
    pub const POSTFIX: u16 = 120;
    pub const PROPERTY: u16 = 130;
}

/// How operators of equal precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Associativity {
    Left,
    Right,
}

/// Syntactic role of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorForm {
    Infix,
    Prefix,
    Postfix,
    Statement,
    Separator,
    Grouping,
    CodeBlock,
    Calculus,
    Unknown,
}

impl OperatorForm {
    pub const STRS: &'static [&'static str] = &[
        "infix",
        "prefix",
        "postfix",
        "statement",
        "separator",
        "grouping",
        "codeblock",
        "calculus",
        "unknown",
    ];

    fn as_str(&self) -> &'static str {
        Self::STRS[*self as usize]
    }
}

/// Error returned when an associativity or form name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAttributeError {
    pub attribute: &'static str,
    pub value: String,
}

impl fmt::Display for ParseAttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.attribute, self.value)
    }
}

impl std::error::Error for ParseAttributeError {}

impl FromStr for Associativity {
    type Err = ParseAttributeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Associativity::Left),
            "right" => Ok(Associativity::Right),
            other => Err(ParseAttributeError {
                attribute: "associativity",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Associativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Associativity::Left => f.write_str("left"),
            Associativity::Right => f.write_str("right"),
        }
    }
}

impl FromStr for OperatorForm {
    type Err = ParseAttributeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "infix" => Ok(OperatorForm::Infix),
            "prefix" => Ok(OperatorForm::Prefix),
            "postfix" => Ok(OperatorForm::Postfix),
            "statement" => Ok(OperatorForm::Statement),
            "separator" => Ok(OperatorForm::Separator),
            "grouping" => Ok(OperatorForm::Grouping),
            "codeblock" => Ok(OperatorForm::CodeBlock),
            "calculus" => Ok(OperatorForm::Calculus),
            "unknown" => Ok(OperatorForm::Unknown),
            other => Err(ParseAttributeError {
                attribute: "operator form",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OperatorForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table entry for one operator spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymbolInfo {
    pub precedence: u16,
    pub associativity: Associativity,
    pub form: OperatorForm,
    /// `+` and `-` may also start an expression as unary operators.
    pub prefix: bool,
}

impl SymbolInfo {
    const fn new(precedence: u16, associativity: Associativity, form: OperatorForm) -> Self {
        Self {
            precedence,
            associativity,
            form,
            prefix: false,
        }
    }

    const fn left(precedence: u16) -> Self {
        Self::new(precedence, Associativity::Left, OperatorForm::Infix)
    }

    const fn right(precedence: u16) -> Self {
        Self::new(precedence, Associativity::Right, OperatorForm::Infix)
    }

    const fn form(precedence: u16, form: OperatorForm) -> Self {
        Self::new(precedence, Associativity::Left, form)
    }

    /// Binding power used for the right operand.
    pub fn right_binding(&self) -> u16 {
        match self.associativity {
            Associativity::Left => self.precedence.saturating_add(1),
            Associativity::Right => self.precedence,
        }
    }
}

/// Equation relations; their presence makes a brace container a system.
pub const EQUATION_RELATIONS: &[&str] = &[":=:", ":<:", ":>:", ":<=:", ":>=:"];

/// Lazy sequence operators that share the pipe band.
pub const GENERATOR_OPERATORS: &[&str] = &["|+", "|*", "|:", "|?", "|^", "|^:"];

/// Tokens that end an expression without being consumed by it.
pub const CLOSING_DELIMITERS: &[&str] = &[")", "]", "}", "}}"];

static SYMBOL_TABLE: Lazy<HashMap<&'static str, SymbolInfo>> = Lazy::new(|| {
    use precedence::*;
    use OperatorForm::*;

    let mut table = HashMap::new();
    let mut add = |symbols: &[&'static str], info: SymbolInfo| {
        for symbol in symbols {
            table.insert(*symbol, info);
        }
    };

    add(&[";"], SymbolInfo::form(STATEMENT, Statement));
    add(&[","], SymbolInfo::form(STATEMENT, Separator));

    add(&[":=", "+=", "-=", "*=", "/="], SymbolInfo::right(ASSIGNMENT));
    add(EQUATION_RELATIONS, SymbolInfo::right(ASSIGNMENT));
    add(&[":->", ":=>"], SymbolInfo::right(ASSIGNMENT));

    add(&["|>", "||>", "|>>", "|>:", "|>?"], SymbolInfo::left(PIPE));
    add(GENERATOR_OPERATORS, SymbolInfo::left(PIPE));

    add(&["->"], SymbolInfo::right(ARROW));
    add(&["||"], SymbolInfo::left(LOGICAL_OR));
    add(&["&&"], SymbolInfo::left(LOGICAL_AND));

    add(&["?"], SymbolInfo::left(CONDITION));
    add(&["??", "?:"], SymbolInfo::right(CONDITION));

    add(&["=", "==", "!="], SymbolInfo::left(EQUALITY));
    add(&["<", ">", "<=", ">="], SymbolInfo::left(COMPARISON));

    add(
        &[":", "::", ":+", ":/:", ":~", ":~/", ":%", ":/%", "::+"],
        SymbolInfo::left(INTERVAL),
    );

    add(
        &["+", "-"],
        SymbolInfo {
            prefix: true,
            ..SymbolInfo::left(ADDITION)
        },
    );
    add(&["*", "/", "//", "%"], SymbolInfo::left(MULTIPLICATION));
    add(&["^", "**"], SymbolInfo::right(EXPONENTIATION));

    add(&["'"], SymbolInfo::form(CALCULUS, Calculus));
    add(&["!", "~[", "~{"], SymbolInfo::form(POSTFIX, Postfix));
    add(&["@"], SymbolInfo::form(POSTFIX, Unknown));
    add(&["."], SymbolInfo::left(PROPERTY));

    add(&["(", ")", "[", "]", "{", "}"], SymbolInfo::form(NONE, Grouping));
    add(&["{{", "}}"], SymbolInfo::form(NONE, CodeBlock));
    add(&["_"], SymbolInfo::form(NONE, Unknown));

    table
});

/// Table entry for an operator spelling.
pub fn lookup(symbol: &str) -> Option<&'static SymbolInfo> {
    SYMBOL_TABLE.get(symbol)
}

pub fn is_equation_relation(symbol: &str) -> bool {
    EQUATION_RELATIONS.contains(&symbol)
}

pub fn is_generator_operator(symbol: &str) -> bool {
    GENERATOR_OPERATORS.contains(&symbol)
}

pub fn is_closing_delimiter(symbol: &str) -> bool {
    CLOSING_DELIMITERS.contains(&symbol)
}
