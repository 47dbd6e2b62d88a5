//! System identifier classification.
//!
//!     System identifiers (capitalized names such as `AND` or `MOD`) can act as operators.
//!     The parser does not decide this itself: whenever a System identifier appears where an
//!     infix or postfix operator could, it asks an injected [IdentifierClassifier]. The
//!     classifier must be a pure function of the canonical name so that a shared instance
//!     gives the same answers to concurrent parses.

use crate::rix::lexing::canonical_identifier;
use crate::rix::symbols::{
    precedence, Associativity, OperatorForm, ParseAttributeError, SymbolInfo,
};
use rix_config::OperatorConfig;
use std::collections::HashMap;

/// Operator metadata reported for a System identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSpec {
    pub precedence: u16,
    pub associativity: Associativity,
    pub form: OperatorForm,
}

impl Default for OperatorSpec {
    fn default() -> Self {
        Self {
            precedence: precedence::MULTIPLICATION,
            associativity: Associativity::Left,
            form: OperatorForm::Infix,
        }
    }
}

impl From<OperatorSpec> for SymbolInfo {
    fn from(spec: OperatorSpec) -> Self {
        SymbolInfo {
            precedence: spec.precedence,
            associativity: spec.associativity,
            form: spec.form,
            prefix: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Operator(OperatorSpec),
    Identifier,
}

pub trait IdentifierClassifier {
    fn classify(&self, name: &str) -> Classification;
}

impl<F> IdentifierClassifier for F
where
    F: Fn(&str) -> Classification,
{
    fn classify(&self, name: &str) -> Classification {
        self(name)
    }
}

/// Treats every System identifier as a plain identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClassifier;

impl IdentifierClassifier for DefaultClassifier {
    fn classify(&self, _name: &str) -> Classification {
        Classification::Identifier
    }
}

/// A fixed name-to-operator table, usually built from configuration.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
    operators: HashMap<String, OperatorSpec>,
}

impl OperatorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`; it is canonicalized the same way the lexer canonicalizes identifiers.
    pub fn insert(&mut self, name: &str, spec: OperatorSpec) {
        let (_, canonical) = canonical_identifier(name);
        self.operators.insert(canonical, spec);
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Build from `[[operators]]` entries. Missing fields fall back to a left-associative
    /// infix operator at multiplication precedence. Precedences above property access are
    /// rejected.
    pub fn from_config(entries: &[OperatorConfig]) -> Result<Self, ParseAttributeError> {
        let mut table = Self::new();
        for entry in entries {
            let defaults = OperatorSpec::default();
            let level = match entry.precedence {
                Some(value) if value > precedence::PROPERTY => {
                    return Err(ParseAttributeError {
                        attribute: "operator precedence",
                        value: format!(
                            "{} for {} (maximum {})",
                            value,
                            entry.name,
                            precedence::PROPERTY
                        ),
                    });
                }
                Some(value) => value,
                None => defaults.precedence,
            };
            let spec = OperatorSpec {
                precedence: level,
                associativity: match &entry.associativity {
                    Some(text) => text.parse()?,
                    None => defaults.associativity,
                },
                form: match &entry.form {
                    Some(text) => text.parse()?,
                    None => defaults.form,
                },
            };
            table.insert(&entry.name, spec);
        }
        Ok(table)
    }
}

impl IdentifierClassifier for OperatorTable {
    fn classify(&self, name: &str) -> Classification {
        match self.operators.get(name) {
            Some(spec) => Classification::Operator(*spec),
            None => Classification::Identifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, precedence: Option<u16>, assoc: Option<&str>) -> OperatorConfig {
        OperatorConfig {
            name: name.to_string(),
            precedence,
            associativity: assoc.map(str::to_string),
            form: None,
        }
    }

    #[test]
    fn default_classifier_never_reports_operators() {
        assert_eq!(DefaultClassifier.classify("AND"), Classification::Identifier);
    }

    #[test]
    fn closures_are_classifiers() {
        let modulo_only = |name: &str| {
            if name == "MOD" {
                Classification::Operator(OperatorSpec::default())
            } else {
                Classification::Identifier
            }
        };
        assert!(matches!(
            modulo_only.classify("MOD"),
            Classification::Operator(_)
        ));
        assert_eq!(modulo_only.classify("X"), Classification::Identifier);
    }

    #[test]
    fn table_from_config_applies_defaults() {
        let table = OperatorTable::from_config(&[
            entry("And", Some(precedence::LOGICAL_AND), Some("left")),
            entry("Mod", None, None),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);
        match table.classify("AND") {
            Classification::Operator(spec) => {
                assert_eq!(spec.precedence, precedence::LOGICAL_AND)
            }
            other => panic!("expected operator, got {:?}", other),
        }
        assert_eq!(
            table.classify("MOD"),
            Classification::Operator(OperatorSpec::default())
        );
    }

    #[test]
    fn table_rejects_precedence_above_property_access() {
        let err = OperatorTable::from_config(&[entry("Op", Some(u16::MAX), None)]).unwrap_err();
        assert_eq!(err.attribute, "operator precedence");
        assert_eq!(
            err.to_string(),
            "invalid operator precedence: 65535 for Op (maximum 130)"
        );

        let table =
            OperatorTable::from_config(&[entry("Op", Some(precedence::PROPERTY), None)]).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn table_rejects_unknown_associativity() {
        let err = OperatorTable::from_config(&[entry("OR", None, Some("both"))]).unwrap_err();
        assert_eq!(err.to_string(), "invalid associativity: both");
    }
}
