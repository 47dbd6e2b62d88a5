//! Command-line interface for rix
//! This binary tokenizes or parses RiX source and prints the result.
//!
//! Usage:
//!   rix tokenize `<path|->` [--format `<format>`] [--config `<file>`]
//!   rix parse `<path|->` [--format `<format>`] [--config `<file>`] [--max-depth `<n>`]
//!
//! Formats are json, yaml, tree and sexpr. Defaults come from the embedded rix-config
//! defaults, then `--config` (or `rix.toml` in the working directory if present), then the
//! flags. Set `RUST_LOG=rix=debug` for
//! lexer and parser tracing on stderr.

use clap::{Arg, ArgAction, ArgMatches, Command};
use rix::rix::ast::{snapshot_program, to_sexpr, NodeCounter};
use rix::{parse_with, tokenize, Node, OperatorTable, ParseOptions, Token};
use rix_config::{ConfigError, Loader, OutputFormat, RixConfig, LOCAL_CONFIG_FILE};
use std::io::Read;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("rix")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize and parse RiX expressions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults (default: ./rix.toml if present)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .global(true)
                .value_parser(["json", "yaml", "tree", "sexpr"])
                .help("Output format"),
        )
        .arg(
            Arg::new("compact")
                .long("compact")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print JSON on a single line"),
        )
        .subcommand(
            Command::new("tokenize")
                .about("Print the token sequence")
                .arg(source_arg()),
        )
        .subcommand(
            Command::new("parse")
                .about("Print the syntax tree")
                .arg(source_arg())
                .arg(
                    Arg::new("max-depth")
                        .long("max-depth")
                        .value_parser(clap::value_parser!(u32))
                        .help("Deepest allowed expression nesting"),
                ),
        )
        .get_matches();

    let Some((name, sub_matches)) = matches.subcommand() else {
        unreachable!()
    };
    let config = load_config(sub_matches).unwrap_or_else(|e| fail("Configuration error", e));
    let source = read_source(sub_matches).unwrap_or_else(|e| fail("Error reading input", e));

    let output = match name {
        "tokenize" => handle_tokenize(&source, &config),
        "parse" => handle_parse(&source, &config),
        _ => unreachable!(),
    };
    match output {
        Ok(text) => println!("{}", text),
        Err(message) => fail("Error", message),
    }
}

fn source_arg() -> Arg {
    Arg::new("path")
        .help("Path to the RiX source, or '-' for stdin")
        .required(true)
        .index(1)
}

fn fail(context: &str, error: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", context, error);
    std::process::exit(1);
}

fn load_config(matches: &ArgMatches) -> Result<RixConfig, ConfigError> {
    let mut loader = Loader::new();
    loader = match matches.get_one::<String>("config") {
        Some(path) => loader.with_file(path),
        None => loader.with_optional_file(LOCAL_CONFIG_FILE),
    };
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if matches.get_flag("compact") {
        loader = loader.set_override("output.pretty", false)?;
    }
    if let Ok(Some(depth)) = matches.try_get_one::<u32>("max-depth") {
        loader = loader.set_override("parser.max_depth", i64::from(*depth))?;
    }
    loader.build()
}

fn read_source(matches: &ArgMatches) -> std::io::Result<String> {
    match matches.get_one::<String>("path").map(String::as_str) {
        Some("-") | None => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
        Some(path) => std::fs::read_to_string(path),
    }
}

fn handle_tokenize(source: &str, config: &RixConfig) -> Result<String, String> {
    let tokens = tokenize(source).map_err(|e| e.to_string())?;
    debug!(tokens = tokens.len(), "tokenize command");
    match config.output.format {
        OutputFormat::Json | OutputFormat::Yaml => serialize(&tokens, config),
        OutputFormat::Tree | OutputFormat::Sexpr => Ok(render_tokens(&tokens)),
    }
}

fn handle_parse(source: &str, config: &RixConfig) -> Result<String, String> {
    let classifier =
        OperatorTable::from_config(&config.operators).map_err(|e| e.to_string())?;
    let options = ParseOptions::with_max_depth(config.parser.max_depth);
    let nodes = parse_with(source, &classifier, &options).map_err(String::from)?;
    let mut counter = NodeCounter::default();
    for node in &nodes {
        node.accept(&mut counter);
    }
    debug!(
        statements = nodes.len(),
        nodes = counter.total,
        depth = counter.max_depth,
        "parse command"
    );
    render_nodes(&nodes, config)
}

fn serialize<T: serde::Serialize>(value: &T, config: &RixConfig) -> Result<String, String> {
    match config.output.format {
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        _ if config.output.pretty => {
            serde_json::to_string_pretty(value).map_err(|e| e.to_string())
        }
        _ => serde_json::to_string(value).map_err(|e| e.to_string()),
    }
}

fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| format!("{} {:?} {}", token.kind, token.value, token.span))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_nodes(nodes: &[Node], config: &RixConfig) -> Result<String, String> {
    match config.output.format {
        OutputFormat::Json | OutputFormat::Yaml => serialize(&nodes, config),
        OutputFormat::Tree => Ok(snapshot_program(nodes).to_tree()),
        OutputFormat::Sexpr => Ok(to_sexpr(nodes)),
    }
}
