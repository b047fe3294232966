//! # Configuration Module
//!
//! Configuration structures for the dump parser and for a whole rtlgraph
//! run. Both follow the builder pattern: `with_*` setters followed by
//! [`ConfigBuilder::build`](crate::common::ConfigBuilder::build), which
//! validates the result.
//!
//! - **ParserConfig**: ignore pattern, seed functions, name translations and
//!   the demangling toggle; every field has a built-in default and can be
//!   overridden from a TOML file
//! - **GraphOptions**: inputs, output destination and format for one run
//!
//! ## Example
//!
//! ```
//! use rtlgraph::common::ConfigBuilder;
//! use rtlgraph::config::ParserConfig;
//!
//! let config = ParserConfig::builder()
//!     .with_seeds(vec!["malloc".into(), "free".into()])
//!     .with_demangle(false)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.is_seed("free"));
//! assert_eq!(config.translate("realloc"), "malloc");
//! ```

pub mod graph;
pub mod parser;

pub use graph::GraphOptions;
pub use parser::ParserConfig;
