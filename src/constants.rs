//! Configuration constants for rtlgraph
//!
//! This module contains the defaults used throughout the application. Parser
//! defaults can be overridden through a TOML configuration file, tool names
//! through command-line flags.

use std::time::Duration;

/// Progress bar configuration
pub mod progress {
    use super::*;

    /// Duration between progress bar updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames shown while dumps are compiled and parsed
    pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];
}

/// Output formatting configuration
pub mod output {
    /// Default output format when not specified
    pub const DEFAULT_FORMAT: &str = "dot";

    /// Default log level for the binary
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

/// Dump parser defaults
pub mod parser {
    /// Compiler-generated static initialisers and functions declared in
    /// `std::`; a leading return type (template instantiations) is skipped,
    /// parameter types are never looked at
    pub const DEFAULT_IGNORE_PATTERN: &str =
        r"^(__static_initialization_and_destruction|_GLOBAL__sub_)|^(?:[\w:]+(?:<[^()]*>)?[\s*&]+)*std::";

    /// Library functions that are always part of the graph
    pub const DEFAULT_SEEDS: &[&str] = &["malloc", "free", "fopen", "fclose", "exit"];

    /// Referenced names rewritten before edges are created
    pub const DEFAULT_TRANSLATIONS: &[(&str, &str)] =
        &[("realloc", "malloc"), ("calloc", "malloc")];
}

/// External programs
pub mod tools {
    pub const DEMANGLER: &str = "c++filt";
    pub const RENDERER: &str = "dot";
    pub const C_COMPILER: &str = "gcc";
    pub const CXX_COMPILER: &str = "g++";

    /// Flag asking GCC to write the RTL dump right after expansion
    pub const DUMP_FLAG: &str = "-fdump-rtl-expand";
}

/// Graphviz appearance
pub mod palette {
    /// Brewer qualitative scheme used for module fill colors
    pub const COLOR_SCHEME: &str = "set312";

    /// Number of colors in [`COLOR_SCHEME`]
    pub const SIZE: usize = 12;
}
