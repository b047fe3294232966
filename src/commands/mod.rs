//! Command implementations for the rtlgraph CLI
//!
//! rtlgraph has a single command: turn its inputs into an annotated call
//! graph. Parsing the command line into a configuration is kept apart from
//! executing it.

pub mod graph;

use miette::Result;

use crate::cli::Cli;

/// Execute the command described by the parsed command line
pub fn execute_command(cli: Cli) -> Result<()> {
    graph::execute_graph_command(cli)
}
