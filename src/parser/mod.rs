//! # RTL Dump Parser
//!
//! Turns the `*.expand` dumps written by `gcc -fdump-rtl-expand` into a
//! [`CallGraph`](crate::graph::CallGraph).
//!
//! ## Line Grammar
//!
//! - `;; Function <name> (<symbol>, ...)` starts a function definition
//! - `(symbol_ref ... ("<symbol>") ...)` references a symbol
//! - `(call ...)` on the same line turns the reference into a direct call
//! - `(insn`, `(call_insn` and `(jump_insn` lines are counted as instructions
//!
//! ## Example
//!
//! ```
//! use rtlgraph::config::ParserConfig;
//! use rtlgraph::demangle::Identity;
//! use rtlgraph::parser::{DumpModule, DumpParser};
//!
//! # fn main() -> miette::Result<()> {
//! let dump = r#";; Function main (main, funcdef_no=0)
//! (call_insn 5 4 6 2 (call (mem:QI (symbol_ref:DI ("free") [flags 0x41]) [0 free S1 A8])
//! "#;
//!
//! let module = DumpModule::from_text("main.c.233r.expand", dump);
//! let mut parser = DumpParser::new(ParserConfig::default(), Box::new(Identity));
//! let graph = parser.parse(&[module], None)?;
//!
//! assert!(graph.has_node("main"));
//! assert_eq!(graph.legends()[0].label, "main.c");
//! assert_eq!(graph.edge_count(), 1);
//! # Ok(())
//! # }
//! ```

mod grammar;
mod module;
mod parser_impl;
mod state;

pub use grammar::{DumpLine, SymbolRef};
pub use module::DumpModule;
pub use parser_impl::DumpParser;
pub use state::FunctionState;
