//! Graph command executor

use std::fs;
use std::io::{self, Write};

use console::style;
use log::info;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::annotator::{AnnotationSummary, GraphAnnotator};
use crate::common::ConfigBuilder;
use crate::config::{GraphOptions, ParserConfig};
use crate::demangle::CxxFilt;
use crate::executors::CommandExecutor;
use crate::graph::{CallGraph, GraphRenderer};
use crate::input_discovery::{Input, InputDiscovery};
use crate::parser::{DumpModule, DumpParser};
use crate::progress::ProgressReporter;
use crate::toml_parser::ConfigFile;
use crate::toolchain::{Compiler, Renderer};

pub struct GraphExecutor;

impl CommandExecutor for GraphExecutor {
    type Config = GraphOptions;

    fn execute(config: Self::Config) -> Result<()> {
        let mut progress = (!config.quiet).then(ProgressReporter::new);

        let parser_config = load_parser_config(&config)?;

        if let Some(p) = progress.as_mut() {
            p.start_discovery();
        }
        let inputs = InputDiscovery::new()
            .discover_all(&config.inputs, progress.as_ref())
            .wrap_err("Failed to discover inputs")?;
        let modules = load_modules(&inputs, &config, progress.as_ref())?;
        if let Some(p) = progress.as_mut() {
            p.finish_discovery(modules.len());
        }

        let mut parser = DumpParser::new(parser_config, Box::new(CxxFilt::default()));
        let mut graph = parser
            .parse(&modules, progress.as_ref())
            .wrap_err("Failed to build call graph")?;
        if let Some(p) = progress.as_ref() {
            p.finish_parsing();
        }

        let summary = GraphAnnotator::new()
            .annotate(&mut graph)
            .wrap_err("Failed to annotate call graph")?;

        // Render everything before touching the output
        let dot = GraphRenderer::new()
            .render_to_string(&graph)
            .wrap_err("Failed to render DOT graph")?;
        let bytes = match config.format.renderer_type() {
            None => dot.into_bytes(),
            Some(format) => Renderer::default()
                .render(&dot, format)
                .wrap_err_with(|| format!("Failed to render {format} output"))?,
        };

        match config.output.as_ref() {
            Some(path) => fs::write(path, &bytes)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write output file '{}'", path.display()))?,
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(&bytes).into_diagnostic()?;
                stdout.flush().into_diagnostic()?;
            }
        }

        info!(
            functions = graph.node_count(),
            calls = graph.edge_count(),
            cycle_edges = summary.cycle_edges;
            "Call graph written"
        );

        if !config.quiet {
            print_summary(&graph, &summary);
            if let Some(path) = config.output {
                eprintln!(
                    "{} Graph written to {}",
                    style("✓").green(),
                    style(path.display()).bold()
                );
            }
        }

        Ok(())
    }
}

/// Defaults, then the config file, then the command line
fn load_parser_config(config: &GraphOptions) -> Result<ParserConfig> {
    let mut builder = ParserConfig::builder();
    if let Some(path) = config.config.as_ref() {
        let file = ConfigFile::parse_file(path)
            .wrap_err_with(|| format!("Failed to load config file '{}'", path.display()))?;
        builder = builder.with_config_file(file);
    }
    if !config.demangle {
        builder = builder.with_demangle(false);
    }
    builder.build().wrap_err("Invalid parser configuration")
}

/// Read every dump into memory, compiling sources first
fn load_modules(
    inputs: &[Input],
    config: &GraphOptions,
    progress: Option<&ProgressReporter>,
) -> Result<Vec<DumpModule>> {
    let needs_compiler = inputs.iter().any(|i| matches!(i, Input::Source { .. }));
    let mut compiler = if needs_compiler {
        Some(Compiler::new(config.compiler.clone())?)
    } else {
        None
    };

    let mut modules = Vec::with_capacity(inputs.len());
    for input in inputs {
        match (input, compiler.as_mut()) {
            (Input::Dump(path), _) => modules.push(DumpModule::from_path(path)?),
            (Input::Source { path, language }, Some(compiler)) => {
                if let Some(p) = progress {
                    p.compiling(path);
                }
                let dumps = compiler
                    .compile(path, *language)
                    .wrap_err_with(|| format!("Failed to compile '{}'", path.display()))?;
                for dump in dumps {
                    modules.push(DumpModule::from_path(&dump)?);
                }
            }
            (Input::Source { .. }, None) => {}
        }
    }
    Ok(modules)
}

fn print_summary(graph: &CallGraph, summary: &AnnotationSummary) {
    let unreachable = match summary.unreachable {
        Some(count) => format!("{} unreachable from main", style(count).yellow()),
        None => style("no main function").dim().to_string(),
    };
    let cycles = if summary.cycle_edges == 0 {
        style(summary.cycle_edges).green()
    } else {
        style(summary.cycle_edges).red().bold()
    };

    eprintln!(
        "{} {} functions, {} calls, {} cycle edges, {}",
        style("📊").cyan(),
        style(graph.node_count()).bold(),
        style(graph.edge_count()).bold(),
        cycles,
        unreachable
    );
}
