use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid TOML syntax in '{file}'")]
#[diagnostic(
    code(rtlgraph::config_parse_error),
    help("Check the TOML syntax near the highlighted position")
)]
pub struct ConfigParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: toml::de::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum RtlGraphError {
    #[error("Function '{name}' is already registered in the call graph")]
    #[diagnostic(
        code(rtlgraph::duplicate_node),
        help("This is likely an internal error - please report it")
    )]
    DuplicateNode { name: String },

    #[error("Function '{name}' is not part of the call graph")]
    #[diagnostic(
        code(rtlgraph::node_not_found),
        help("Check that the function is defined in one of the input dumps")
    )]
    NodeNotFound { name: String },

    #[error("Edge {from} -> {to} is registered under '{owner}'")]
    #[diagnostic(
        code(rtlgraph::malformed_edge),
        help("This is likely an internal error - please report it")
    )]
    MalformedEdge {
        owner: String,
        from: String,
        to: String,
    },

    #[error("External tool '{tool}' failed: {reason}")]
    #[diagnostic(
        code(rtlgraph::external_tool),
        help("Check that the tool is installed and on your PATH")
    )]
    ExternalTool { tool: String, reason: String },

    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(rtlgraph::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid ignore pattern '{pattern}'")]
    #[diagnostic(
        code(rtlgraph::invalid_pattern),
        help("The ignore pattern must be a valid regular expression")
    )]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigParseError(Box<ConfigParseError>),

    #[error("String formatting error")]
    #[diagnostic(
        code(rtlgraph::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(rtlgraph::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(rtlgraph::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },
}
