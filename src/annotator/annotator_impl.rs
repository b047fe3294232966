use std::collections::HashSet;

use log::debug;

use crate::constants::palette::{COLOR_SCHEME, SIZE as PALETTE_SIZE};
use crate::detector::CycleDetector;
use crate::error::RtlGraphError;
use crate::graph::{AttrValue, CallGraph, ModuleId, NodeId};

mod colors {
    pub const LIBRARY_FILL: &str = "#D9D9D9"; // Light grey
    pub const CYCLE_EDGE: &str = "#FF0000"; // Red
    pub const GRADIENT_START: &str = "#FFFFFF"; // White
}

/// Name of the function reachability is computed from
const ENTRY_POINT: &str = "main";

/// Counts reported by [`GraphAnnotator::annotate`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub cycle_edges: usize,
    pub indirect_edges: usize,
    /// `None` when the graph has no `main`
    pub unreachable: Option<usize>,
}

/// Palette slot for a module: 1..=12, wrapping
pub fn palette_index(module: ModuleId) -> usize {
    (module.saturating_sub(1) % PALETTE_SIZE) + 1
}

/// Node height for an instruction count
pub fn node_height(size: u64) -> Option<f64> {
    (size > 0).then(|| (size as f64).sqrt() / 10.0)
}

#[derive(Debug, Default)]
pub struct GraphAnnotator;

impl GraphAnnotator {
    pub fn new() -> Self {
        Self
    }

    pub fn annotate(&self, graph: &mut CallGraph) -> Result<AnnotationSummary, RtlGraphError> {
        self.set_defaults(graph);
        self.style_library_functions(graph);
        self.color_modules(graph);
        self.size_nodes(graph);
        let indirect_edges = self.dash_indirect_edges(graph)?;
        let cycle_edges = self.highlight_cycles(graph);
        let unreachable = self.fade_unreachable(graph);

        let summary = AnnotationSummary {
            cycle_edges,
            indirect_edges,
            unreachable,
        };
        debug!(summary:?; "Annotation finished");
        Ok(summary)
    }

    fn set_defaults(&self, graph: &mut CallGraph) {
        let defaults = graph.defaults_mut();
        defaults.set("shape", "box");
        defaults.set("style", "rounded,filled");
        defaults.set("colorscheme", COLOR_SCHEME);
    }

    fn style_library_functions(&self, graph: &mut CallGraph) {
        let library: Vec<NodeId> = graph
            .nodes()
            .filter(|(_, node)| node.always)
            .map(|(id, _)| id)
            .collect();

        for id in library {
            let attrs = &mut graph.node_mut(id).attrs;
            attrs.set("shape", "octagon");
            attrs.set("style", "filled");
            attrs.set("fillcolor", colors::LIBRARY_FILL);
        }
    }

    fn color_modules(&self, graph: &mut CallGraph) {
        let ids: Vec<NodeId> = graph.node_ids().collect();
        for id in ids {
            let node = graph.node_mut(id);
            if let Some(module) = node.module {
                node.attrs.set("fillcolor", palette_index(module));
            }
        }

        for legend in graph.legends_mut() {
            legend.attrs.set("fillcolor", palette_index(legend.module));
        }
    }

    fn size_nodes(&self, graph: &mut CallGraph) {
        let ids: Vec<NodeId> = graph.node_ids().collect();
        for id in ids {
            let node = graph.node_mut(id);
            if let Some(height) = node_height(node.size) {
                node.attrs.set("height", height);
            }
        }
    }

    fn dash_indirect_edges(&self, graph: &mut CallGraph) -> Result<usize, RtlGraphError> {
        let mut count = 0;
        for edge in graph.find_all_edges()? {
            let edge = graph.edge_mut(edge);
            if edge.indirect {
                edge.attrs.set("style", "dashed");
                count += 1;
            }
        }
        Ok(count)
    }

    fn highlight_cycles(&self, graph: &mut CallGraph) -> usize {
        let mut detector = CycleDetector::new();
        detector.detect_cycles(graph);

        for edge in detector.edges() {
            let attrs = &mut graph.edge_mut(*edge).attrs;
            attrs.set("color", colors::CYCLE_EDGE);
            attrs.set("style", "bold");
        }
        detector.cycle_edge_count()
    }

    /// Fade every function `main` cannot reach
    fn fade_unreachable(&self, graph: &mut CallGraph) -> Option<usize> {
        let Ok(main) = graph.get_node(ENTRY_POINT) else {
            debug!("No main function, skipping reachability");
            return None;
        };

        let reachable: HashSet<NodeId> = graph.bfs(main).into_iter().collect();
        let default_fill = graph.defaults().get("fillcolor").cloned();
        let unreachable: Vec<NodeId> = graph
            .nodes()
            .map(|(id, _)| id)
            .filter(|id| !reachable.contains(id))
            .collect();

        for id in &unreachable {
            let attrs = &mut graph.node_mut(*id).attrs;
            let fill = attrs.get("fillcolor").cloned().or_else(|| default_fill.clone());
            let gradient = match fill {
                Some(color) => format!("{}:{color}", colors::GRADIENT_START),
                None => colors::GRADIENT_START.to_string(),
            };
            attrs.set("style", "dashed,filled,radial");
            attrs.set("fillcolor", AttrValue::Text(gradient));
        }

        Some(unreachable.len())
    }
}
