//! Core graph types
//!
//! This module contains the data carried by nodes, edges and legend entries
//! of the call graph.

use super::attributes::AttributeBag;

/// Sequential id of a processed dump file, starting at 1
pub type ModuleId = usize;

/// A function observed in the dumps
#[derive(Debug, Clone)]
pub struct FunctionNode {
    name: String,
    pub attrs: AttributeBag,
    /// Shown regardless of reachability
    pub always: bool,
    /// Number of instructions attributed to the function, 0 when unknown
    pub size: u64,
    /// Module that first defined the function; `None` for seed functions
    pub module: Option<ModuleId>,
}

impl FunctionNode {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attrs: AttributeBag::new(),
            always: false,
            size: 0,
            module: None,
        }
    }

    /// Unique name, also used as the rendered label
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A reference or call from one function to another
#[derive(Debug, Clone, Default)]
pub struct CallEdge {
    pub attrs: AttributeBag,
    /// Address taken without an observed call
    pub indirect: bool,
}

impl CallEdge {
    pub fn new(indirect: bool) -> Self {
        Self {
            attrs: AttributeBag::new(),
            indirect,
        }
    }
}

/// Display-only entry naming a source module
#[derive(Debug, Clone)]
pub struct Legend {
    pub label: String,
    pub module: ModuleId,
    /// Instructions seen in the whole module
    pub instructions: u64,
    pub attrs: AttributeBag,
}

impl Legend {
    pub fn new(label: &str, module: ModuleId, instructions: u64) -> Self {
        Self {
            label: label.to_string(),
            module,
            instructions,
            attrs: AttributeBag::new(),
        }
    }
}
