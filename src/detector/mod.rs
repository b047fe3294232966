//! # Cycle Edge Detection
//!
//! Finds the call edges that close a cycle so they can be highlighted.
//!
//! ## Algorithm
//!
//! For every function `N`, a breadth-first search is started at `N`; every
//! outbound edge examined during that search whose target is `N` is a cycle
//! edge. This is O(V·(V+E)) and reports a superset of a minimal cycle basis:
//! an edge is recorded once per root it leads back to.
//!
//! ## Example
//!
//! ```
//! use rtlgraph::detector::CycleDetector;
//! use rtlgraph::graph::CallGraph;
//!
//! # fn main() -> miette::Result<()> {
//! let mut graph = CallGraph::new();
//! let a = graph.create_node("a")?;
//! let b = graph.create_node("b")?;
//! graph.create_edge(a, b, false)?;
//! let back = graph.create_edge(b, a, false)?;
//!
//! let mut detector = CycleDetector::new();
//! detector.detect_cycles(&graph);
//!
//! assert!(detector.has_cycles());
//! assert!(detector.contains(back));
//! # Ok(())
//! # }
//! ```

mod detector_impl;

pub use detector_impl::*;
