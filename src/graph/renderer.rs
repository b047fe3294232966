use std::io::Write;

use miette::Result;

use super::attributes::{AttributeBag, escape};
use super::call_graph::CallGraph;
use crate::error::RtlGraphError;

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(RtlGraphError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(RtlGraphError::from)
    };
}

/// Serializes an annotated [`CallGraph`] into Graphviz DOT
///
/// The document is a `strict digraph`: one line of default node attributes,
/// an optional legend cluster, then every node followed by every edge.
#[derive(Debug, Default)]
pub struct GraphRenderer;

impl GraphRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_dot(&self, graph: &CallGraph, output: &mut dyn Write) -> Result<()> {
        writeln_out!(output, "strict digraph callgraph {{")?;
        writeln_out!(output, "    node [{}];", graph.defaults())?;

        if !graph.legends().is_empty() {
            writeln_out!(output)?;
            writeln_out!(output, "    subgraph cluster_legend {{")?;
            writeln_out!(output, "        label=\"Modules\";")?;
            for legend in graph.legends() {
                let mut attrs = AttributeBag::new();
                attrs.set("label", legend.label.as_str());
                attrs.set("shape", "note");
                attrs.extend(&legend.attrs);
                writeln_out!(
                    output,
                    "        {} [{attrs}];  // {} instructions",
                    legend_id(legend.module),
                    legend.instructions
                )?;
            }
            let ids: Vec<String> = graph
                .legends()
                .iter()
                .map(|legend| legend_id(legend.module))
                .collect();
            writeln_out!(output, "        {{ rank=\"min\"; {}; }}", ids.join("; "))?;
            writeln_out!(output, "    }}")?;
        }

        writeln_out!(output)?;
        for (_, node) in graph.nodes() {
            let id = quote(node.name());
            let stanza = if node.attrs.is_empty() {
                format!("    {id};")
            } else {
                format!("    {id} [{}];", node.attrs)
            };
            if node.size != 0 {
                writeln_out!(output, "{stanza}  // {} instructions", node.size)?;
            } else {
                writeln_out!(output, "{stanza}")?;
            }
        }

        writeln_out!(output)?;
        for edge_id in graph.find_all_edges()? {
            let (from, to) = graph.endpoints(edge_id)?;
            let edge = graph.edge(edge_id);
            let from = quote(graph.node(from).name());
            let to = quote(graph.node(to).name());
            if edge.attrs.is_empty() {
                writeln_out!(output, "    {from} -> {to};")?;
            } else {
                writeln_out!(output, "    {from} -> {to} [{}];", edge.attrs)?;
            }
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    /// Render into an in-memory string
    pub fn render_to_string(&self, graph: &CallGraph) -> Result<String> {
        let mut buffer = Vec::new();
        self.render_dot(graph, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn quote(name: &str) -> String {
    format!("\"{}\"", escape(name))
}

fn legend_id(module: usize) -> String {
    format!("\"__legend_{module}\"")
}
