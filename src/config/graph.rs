//! Graph command configuration

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::common::missing_field;

/// Configuration for one rtlgraph run
#[derive(Debug, Clone)]
pub struct GraphOptions {
    /// Dump files, directories, glob patterns or C/C++ sources
    pub inputs: Vec<String>,
    /// Output file (stdout if not specified)
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    /// Parser settings file (TOML)
    pub config: Option<PathBuf>,
    pub demangle: bool,
    /// Compiler used for source inputs; picked per language when unset
    pub compiler: Option<String>,
    pub quiet: bool,
}

impl GraphOptions {
    pub fn builder() -> GraphOptionsBuilder {
        GraphOptionsBuilder::new()
    }
}

#[derive(Default)]
pub struct GraphOptionsBuilder {
    inputs: Option<Vec<String>>,
    output: Option<Option<PathBuf>>,
    format: Option<OutputFormat>,
    config: Option<Option<PathBuf>>,
    demangle: Option<bool>,
    compiler: Option<Option<String>>,
    quiet: Option<bool>,
}

impl GraphOptionsBuilder {
    pub fn new() -> Self {
        Self {
            inputs: None,
            output: None,
            format: None,
            config: None,
            demangle: None,
            compiler: None,
            quiet: None,
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<String>) -> Self {
        self.inputs = Some(inputs);
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_config(mut self, config: Option<PathBuf>) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_demangle(mut self, demangle: bool) -> Self {
        self.demangle = Some(demangle);
        self
    }

    pub fn with_compiler(mut self, compiler: Option<String>) -> Self {
        self.compiler = Some(compiler);
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = Some(quiet);
        self
    }
}

impl crate::common::ConfigBuilder for GraphOptionsBuilder {
    type Config = GraphOptions;

    fn build(self) -> Result<Self::Config, crate::error::RtlGraphError> {
        let inputs = self.inputs.ok_or_else(|| missing_field("inputs"))?;
        if inputs.is_empty() {
            return Err(crate::error::RtlGraphError::ConfigurationError {
                message: "At least one input is required".to_string(),
            });
        }

        Ok(GraphOptions {
            inputs,
            output: self.output.ok_or_else(|| missing_field("output"))?,
            format: self.format.ok_or_else(|| missing_field("format"))?,
            config: self.config.unwrap_or_default(),
            demangle: self.demangle.ok_or_else(|| missing_field("demangle"))?,
            compiler: self.compiler.unwrap_or_default(),
            quiet: self.quiet.unwrap_or_default(),
        })
    }
}
