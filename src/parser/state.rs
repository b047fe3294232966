use crate::graph::NodeId;

/// Function whose body is being scanned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FunctionState {
    #[default]
    NoCurrentFunction,
    InFunction(NodeId),
}

impl FunctionState {
    /// Transition taken on a definition header
    pub fn enter(node: Option<NodeId>) -> Self {
        node.map_or(FunctionState::NoCurrentFunction, FunctionState::InFunction)
    }

    pub fn current(&self) -> Option<NodeId> {
        match self {
            FunctionState::InFunction(node) => Some(*node),
            FunctionState::NoCurrentFunction => None,
        }
    }
}
