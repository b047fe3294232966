//! # Call Graph Model and Rendering
//!
//! This module owns the call graph data model and its Graphviz serializer.
//!
//! ## Components
//!
//! ### Graph Model
//! - **CallGraph**: Owns every function node, call edge and legend entry;
//!   provides lookup by name and breadth-first reachability
//! - **FunctionNode**: A function observed in the dumps
//! - **CallEdge**: A direct call or an address-taken reference
//! - **Legend**: A display-only entry naming one source module
//! - **AttributeBag**: Ordered Graphviz attributes attached to all of the
//!   above
//!
//! ### Graph Rendering
//! - **GraphRenderer**: Writes the annotated graph as a `strict digraph` DOT
//!   document
//!
//! ## Example
//!
//! ```
//! use rtlgraph::graph::{CallGraph, GraphRenderer};
//!
//! # fn main() -> miette::Result<()> {
//! let mut graph = CallGraph::new();
//! let main = graph.create_node("main")?;
//! let helper = graph.create_node("helper")?;
//! graph.create_edge(main, helper, false)?;
//!
//! assert_eq!(graph.bfs(main), vec![main, helper]);
//!
//! let dot = GraphRenderer::new().render_to_string(&graph)?;
//! assert!(dot.starts_with("strict digraph"));
//! assert!(dot.contains("\"main\" -> \"helper\";"));
//! # Ok(())
//! # }
//! ```

mod attributes;
mod call_graph;
mod renderer;
mod types;

pub use attributes::{AttrValue, AttributeBag};
pub use call_graph::{CallGraph, EdgeId, NodeId};
pub use renderer::GraphRenderer;
pub use types::{CallEdge, FunctionNode, Legend, ModuleId};
