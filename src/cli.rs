use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::constants::output::{DEFAULT_FORMAT, DEFAULT_LOG_LEVEL};

#[derive(Parser, Debug)]
#[command(
    name = "rtlgraph",
    about = "Draw the call graph of a C/C++ program from GCC RTL dumps",
    long_about = "rtlgraph reads the RTL dumps GCC writes with -fdump-rtl-expand, builds a call \
                  graph across all of them and emits it as a Graphviz document. Functions are \
                  colored by the module defining them, sized by instruction count, address-taken \
                  references are dashed, edges on call cycles are drawn bold red and functions \
                  unreachable from main are faded. C and C++ sources given as inputs are compiled \
                  on the fly to produce their dumps.",
    version
)]
pub struct Cli {
    /// Dump files, directories containing dumps, glob patterns or C/C++
    /// sources
    #[arg(value_name = "INPUTS", required = true, num_args = 1..)]
    pub inputs: Vec<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long, env = "RTLGRAPH_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output format; anything but dot is rendered with Graphviz
    #[arg(
        short,
        long,
        value_enum,
        default_value = DEFAULT_FORMAT,
        env = "RTLGRAPH_FORMAT"
    )]
    pub format: OutputFormat,

    /// TOML file overriding the ignore pattern, seeds and translations
    #[arg(short, long, env = "RTLGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Keep mangled C++ symbol names
    #[arg(long, env = "RTLGRAPH_NO_DEMANGLE")]
    pub no_demangle: bool,

    /// Compiler used for source inputs (gcc for C, g++ for C++ by default)
    #[arg(long, value_name = "PROGRAM", env = "RTLGRAPH_COMPILER")]
    pub compiler: Option<String>,

    /// Suppress progress and summary output
    #[arg(short, long, env = "RTLGRAPH_QUIET")]
    pub quiet: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL, env = "RTLGRAPH_LOG_LEVEL")]
    pub log_level: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Graphviz source
    Dot,
    Svg,
    Png,
    Pdf,
}

impl OutputFormat {
    /// `-T` argument for the Graphviz renderer; `None` when the DOT text is
    /// written as is
    pub fn renderer_type(self) -> Option<&'static str> {
        match self {
            OutputFormat::Dot => None,
            OutputFormat::Svg => Some("svg"),
            OutputFormat::Png => Some("png"),
            OutputFormat::Pdf => Some("pdf"),
        }
    }
}
