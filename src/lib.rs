//! # rtlgraph - Call Graphs from GCC RTL Dumps
//!
//! rtlgraph reads the RTL dumps GCC writes with `-fdump-rtl-expand` for each
//! translation unit, merges them into one call graph and emits it as a
//! Graphviz document.
//!
//! ## Main Components
//!
//! - **Parser**: Two-pass reader turning dump lines into functions, their
//!   instruction counts and the references between them
//! - **Graph**: Call graph storage with Graphviz attributes and the DOT
//!   renderer
//! - **Detector**: Finds edges that lie on a call cycle
//! - **Annotator**: Colors, sizes and styles the graph from its structure
//!
//! ## Usage
//!
//! ### Example: Graphing a Set of Dumps
//!
//! ```no_run
//! use std::path::Path;
//!
//! use rtlgraph::annotator::GraphAnnotator;
//! use rtlgraph::config::ParserConfig;
//! use rtlgraph::demangle::CxxFilt;
//! use rtlgraph::graph::GraphRenderer;
//! use rtlgraph::parser::{DumpModule, DumpParser};
//! use miette::IntoDiagnostic;
//!
//! # fn main() -> miette::Result<()> {
//! // Step 1: Load the dumps, one module per translation unit
//! let modules = vec![
//!     DumpModule::from_path(Path::new("build/main.c.233r.expand"))?,
//!     DumpModule::from_path(Path::new("build/list.c.233r.expand"))?,
//! ];
//!
//! // Step 2: Build the call graph, demangling C++ names with c++filt
//! let mut parser = DumpParser::new(ParserConfig::default(), Box::new(CxxFilt::default()));
//! let mut graph = parser.parse(&modules, None)?;
//!
//! // Step 3: Derive colors, sizes and cycle highlighting
//! let summary = GraphAnnotator::new().annotate(&mut graph)?;
//! println!("{} edges lie on call cycles", summary.cycle_edges);
//!
//! // Step 4: Write the DOT document
//! let dot = GraphRenderer::new().render_to_string(&graph)?;
//! std::fs::write("callgraph.dot", dot).into_diagnostic()?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Example: Finding Cycle Edges Only
//!
//! ```
//! use rtlgraph::detector::CycleDetector;
//! use rtlgraph::graph::CallGraph;
//!
//! # fn main() -> miette::Result<()> {
//! let mut graph = CallGraph::new();
//! let even = graph.create_node("is_even")?;
//! let odd = graph.create_node("is_odd")?;
//! graph.create_edge(even, odd, false)?;
//! graph.create_edge(odd, even, false)?;
//!
//! let mut detector = CycleDetector::new();
//! detector.detect_cycles(&graph);
//! assert_eq!(detector.cycle_edge_count(), 2);
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod input_discovery;
mod toolchain;

// Public modules
pub mod annotator;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod demangle;
pub mod detector;
pub mod error;
pub mod executors;
pub mod graph;
pub mod parser;
pub mod progress;
pub mod toml_parser;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use std::str::FromStr;

    use clap::Parser;
    use log::{LevelFilter, debug};

    use crate::cli::Cli;
    use crate::commands::execute_command;

    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });
    // A logger may already be installed when embedded
    let _ = env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .try_init();

    debug!(cli:?; "Parsed arguments");

    execute_command(cli)
}
