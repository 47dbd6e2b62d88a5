//! Shared configuration loader for the RiX toolchain.
//!
//! `defaults/rix.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`RixConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/rix.default.toml");

/// Project file picked up from the working directory when no file is named explicitly.
pub const LOCAL_CONFIG_FILE: &str = "rix.toml";

/// Top-level configuration consumed by RiX applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RixConfig {
    pub parser: ParserConfig,
    pub output: OutputConfig,
    /// System identifiers promoted to operators.
    #[serde(default)]
    pub operators: Vec<OperatorConfig>,
}

/// Limits applied while parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub max_depth: usize,
}

/// Controls how the CLI renders tokens and trees.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Json,
    Yaml,
    Tree,
    Sexpr,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "tree" => Ok(OutputFormat::Tree),
            "sexpr" => Ok(OutputFormat::Sexpr),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// One System identifier that the classifier reports as an operator.
///
/// Associativity and form are kept as text here; the parser crate owns their
/// vocabulary and validates them when building its classifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OperatorConfig {
    pub name: String,
    pub precedence: Option<u16>,
    pub associativity: Option<String>,
    pub form: Option<String>,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file that may not exist.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer inline TOML text.
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.builder = self.builder.add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<RixConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<RixConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.parser.max_depth, 64);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty);
        assert!(config.operators.is_empty());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "tree")
            .expect("override to apply")
            .set_override("parser.max_depth", 8i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Tree);
        assert_eq!(config.parser.max_depth, 8);
    }

    #[test]
    fn layers_operator_tables() {
        let config = Loader::new()
            .with_toml_str(
                r#"
                [[operators]]
                name = "AND"
                precedence = 40
                associativity = "left"

                [[operators]]
                name = "MOD"
                "#,
            )
            .build()
            .expect("config to build");

        assert_eq!(config.operators.len(), 2);
        assert_eq!(config.operators[0].name, "AND");
        assert_eq!(config.operators[0].precedence, Some(40));
        assert_eq!(config.operators[0].associativity.as_deref(), Some("left"));
        assert_eq!(config.operators[1].precedence, None);
        assert_eq!(config.operators[1].form, None);
    }

    #[test]
    fn optional_file_layers_when_present() {
        let missing = std::env::temp_dir().join("rix-config-missing-file.toml");
        let config = Loader::new()
            .with_optional_file(&missing)
            .build()
            .expect("missing optional file to be skipped");
        assert_eq!(config.parser.max_depth, 64);

        let present =
            std::env::temp_dir().join(format!("rix-config-{}.toml", std::process::id()));
        std::fs::write(&present, "[parser]\nmax_depth = 12\n").expect("temp file to write");
        let config = Loader::new()
            .with_optional_file(&present)
            .build()
            .expect("optional file to layer");
        std::fs::remove_file(&present).ok();
        assert_eq!(config.parser.max_depth, 12);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn output_format_from_str() {
        assert_eq!("yaml".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
