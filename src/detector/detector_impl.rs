use log::debug;

use crate::graph::{CallGraph, EdgeId};

/// Detector for edges lying on a call cycle
pub struct CycleDetector {
    edges: Vec<EdgeId>,
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleDetector {
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// Collect every edge that leads back to the root of a breadth-first
    /// search, trying each node as the root
    pub fn detect_cycles(&mut self, graph: &CallGraph) {
        self.edges.clear();

        for root in graph.node_ids() {
            for node in graph.bfs(root) {
                for (edge, target) in graph.outbound(node) {
                    if target == root {
                        self.edges.push(edge);
                    }
                }
            }
        }

        debug!(cycle_edges = self.edges.len(); "Cycle detection finished");
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn has_cycles(&self) -> bool {
        !self.edges.is_empty()
    }

    pub fn cycle_edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, edge: EdgeId) -> bool {
        self.edges.contains(&edge)
    }
}

impl CallGraph {
    /// Edges closing a cycle, see [`CycleDetector`]
    pub fn find_edges_of_cycles(&self) -> Vec<EdgeId> {
        let mut detector = CycleDetector::new();
        detector.detect_cycles(self);
        detector.edges
    }
}
