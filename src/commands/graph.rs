//! Graph command implementation

use miette::{Result, WrapErr};

use crate::cli::Cli;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::GraphOptions;
use crate::error::RtlGraphError;

impl FromCommand for GraphOptions {
    fn from_command(cli: Cli) -> Result<Self, RtlGraphError> {
        GraphOptions::builder()
            .with_inputs(cli.inputs)
            .with_output(cli.output)
            .with_format(cli.format)
            .with_config(cli.config)
            .with_demangle(!cli.no_demangle)
            .with_compiler(cli.compiler)
            .with_quiet(cli.quiet)
            .build()
    }
}

crate::impl_try_from_command!(GraphOptions);

/// Execute the graph command: parse, annotate and emit the call graph
pub fn execute_graph_command(cli: Cli) -> Result<()> {
    let config =
        GraphOptions::from_command(cli).wrap_err("Failed to parse command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::graph::GraphExecutor;
    GraphExecutor::execute(config)
}
