use std::collections::{HashMap, HashSet, VecDeque};

use log::trace;
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use super::attributes::AttributeBag;
use super::types::{CallEdge, FunctionNode, Legend, ModuleId};
use crate::error::RtlGraphError;

pub type NodeId = NodeIndex;
pub type EdgeId = EdgeIndex;

/// Directed call graph keyed by unique function name
///
/// Nodes are kept in insertion order and each node's outbound edges in the
/// order they were created, so rendering is deterministic. Parallel edges
/// between the same pair of functions are allowed.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    graph: DiGraph<FunctionNode, CallEdge>,
    indices: HashMap<String, NodeIndex>,
    legends: Vec<Legend>,
    defaults: AttributeBag,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new function
    pub fn create_node(&mut self, name: &str) -> Result<NodeId, RtlGraphError> {
        if self.indices.contains_key(name) {
            return Err(RtlGraphError::DuplicateNode {
                name: name.to_string(),
            });
        }

        let id = self.graph.add_node(FunctionNode::new(name));
        self.indices.insert(name.to_string(), id);
        trace!(name; "Created node");
        Ok(id)
    }

    pub fn get_node(&self, name: &str) -> Result<NodeId, RtlGraphError> {
        self.indices
            .get(name)
            .copied()
            .ok_or_else(|| RtlGraphError::NodeNotFound {
                name: name.to_string(),
            })
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    pub fn node(&self, id: NodeId) -> &FunctionNode {
        &self.graph[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut FunctionNode {
        &mut self.graph[id]
    }

    /// Node ids in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_indices()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &FunctionNode)> + '_ {
        self.graph
            .node_indices()
            .map(move |id| (id, &self.graph[id]))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Append an edge to `from`'s outbound list
    pub fn create_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        indirect: bool,
    ) -> Result<EdgeId, RtlGraphError> {
        for id in [from, to] {
            if self.graph.node_weight(id).is_none() {
                return Err(RtlGraphError::NodeNotFound {
                    name: format!("#{}", id.index()),
                });
            }
        }

        let edge = self.graph.add_edge(from, to, CallEdge::new(indirect));
        trace!(
            from = self.graph[from].name(),
            to = self.graph[to].name(),
            indirect;
            "Created edge"
        );
        Ok(edge)
    }

    pub fn edge(&self, id: EdgeId) -> &CallEdge {
        &self.graph[id]
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> &mut CallEdge {
        &mut self.graph[id]
    }

    pub fn endpoints(&self, id: EdgeId) -> Result<(NodeId, NodeId), RtlGraphError> {
        self.graph
            .edge_endpoints(id)
            .ok_or_else(|| RtlGraphError::NodeNotFound {
                name: format!("endpoints of edge #{}", id.index()),
            })
    }

    /// Outbound `(edge, target)` pairs of `id` in creation order
    pub fn outbound(&self, id: NodeId) -> Vec<(EdgeId, NodeId)> {
        // petgraph yields the most recently added edge first
        let mut edges: Vec<(EdgeId, NodeId)> = self
            .graph
            .edges_directed(id, Direction::Outgoing)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        edges.sort_by_key(|(edge, _)| *edge);
        edges
    }

    /// Every edge, grouped by owning node in node insertion order
    pub fn find_all_edges(&self) -> Result<Vec<EdgeId>, RtlGraphError> {
        let mut all = Vec::with_capacity(self.graph.edge_count());
        for owner in self.graph.node_indices() {
            for (edge, _) in self.outbound(owner) {
                let (from, to) = self.endpoints(edge)?;
                if from != owner {
                    return Err(RtlGraphError::MalformedEdge {
                        owner: self.graph[owner].name().to_string(),
                        from: self.graph[from].name().to_string(),
                        to: self.graph[to].name().to_string(),
                    });
                }
                all.push(edge);
            }
        }
        Ok(all)
    }

    /// Nodes reachable from `start`, in breadth-first visiting order
    ///
    /// `start` is always the first element and every node appears once.
    pub fn bfs(&self, start: NodeId) -> Vec<NodeId> {
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut order = Vec::new();

        while let Some(node) = queue.pop_front() {
            order.push(node);
            for (_, target) in self.outbound(node) {
                if visited.insert(target) {
                    queue.push_back(target);
                }
            }
        }

        order
    }

    pub fn add_legend(&mut self, label: &str, module: ModuleId, instructions: u64) {
        self.legends.push(Legend::new(label, module, instructions));
    }

    pub fn legends(&self) -> &[Legend] {
        &self.legends
    }

    pub fn legends_mut(&mut self) -> &mut [Legend] {
        &mut self.legends
    }

    /// Attributes applied to every node at render time
    pub fn defaults(&self) -> &AttributeBag {
        &self.defaults
    }

    pub fn defaults_mut(&mut self) -> &mut AttributeBag {
        &mut self.defaults
    }
}
