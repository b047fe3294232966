//! # Graph Annotation
//!
//! Derives Graphviz attributes from the structure of a parsed call graph:
//! per-module fill colors, node heights from instruction counts, dashed
//! address-taken edges, highlighted cycle edges and faded functions that
//! `main` never reaches.
//!
//! Steps run in a fixed order and later steps overwrite attributes set by
//! earlier ones.
//!
//! ## Example
//!
//! ```
//! use rtlgraph::annotator::GraphAnnotator;
//! use rtlgraph::graph::{AttrValue, CallGraph};
//!
//! # fn main() -> miette::Result<()> {
//! let mut graph = CallGraph::new();
//! let main = graph.create_node("main")?;
//! graph.node_mut(main).module = Some(13);
//! graph.node_mut(main).size = 25;
//!
//! let summary = GraphAnnotator::new().annotate(&mut graph)?;
//!
//! let attrs = &graph.node(main).attrs;
//! assert_eq!(attrs.get("fillcolor"), Some(&AttrValue::Integer(1)));
//! assert_eq!(attrs.get("height"), Some(&AttrValue::Float(0.5)));
//! assert_eq!(summary.unreachable, Some(0));
//! # Ok(())
//! # }
//! ```

mod annotator_impl;

pub use annotator_impl::*;
