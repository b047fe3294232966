use log::{debug, info};

use super::grammar::DumpLine;
use super::module::DumpModule;
use super::state::FunctionState;
use crate::config::ParserConfig;
use crate::demangle::{DemangleCache, Demangler, Identity};
use crate::error::RtlGraphError;
use crate::graph::{CallGraph, ModuleId, NodeId};
use crate::progress::ProgressReporter;

/// Two-pass reader turning RTL dumps into a [`CallGraph`]
///
/// The first pass creates a node for every function defined in any module
/// and counts its instructions; the second pass adds an edge for every
/// reference from a defined function to another known function. Demangled
/// names are cached for the lifetime of the parser.
pub struct DumpParser {
    config: ParserConfig,
    names: DemangleCache,
}

impl DumpParser {
    pub fn new(config: ParserConfig, demangler: Box<dyn Demangler>) -> Self {
        let demangler: Box<dyn Demangler> = if config.demangle {
            demangler
        } else {
            Box::new(Identity)
        };

        Self {
            config,
            names: DemangleCache::new(demangler),
        }
    }

    /// Build the call graph of `modules`; module ids follow slice order,
    /// starting at 1
    pub fn parse(
        &mut self,
        modules: &[DumpModule],
        progress: Option<&ProgressReporter>,
    ) -> Result<CallGraph, RtlGraphError> {
        let mut graph = CallGraph::new();

        for seed in &self.config.seeds {
            let id = graph.create_node(seed)?;
            graph.node_mut(id).always = true;
        }

        for (index, module) in modules.iter().enumerate() {
            let module_id = index + 1;
            if let Some(p) = progress {
                p.parsing_module(module.name());
            }

            let instructions = self.scan_definitions(&mut graph, module, module_id)?;
            graph.add_legend(&module.source_name(), module_id, instructions);
            debug!(
                module = module.name(),
                module_id,
                instructions;
                "Scanned function definitions"
            );
        }

        for module in modules {
            self.scan_references(&mut graph, module)?;
        }

        info!(
            modules = modules.len(),
            functions = graph.node_count(),
            edges = graph.edge_count();
            "Call graph built"
        );
        Ok(graph)
    }

    /// First pass over one module; returns the module's instruction count
    fn scan_definitions(
        &mut self,
        graph: &mut CallGraph,
        module: &DumpModule,
        module_id: ModuleId,
    ) -> Result<u64, RtlGraphError> {
        let mut state = FunctionState::default();
        let mut instructions = 0;

        for line in module.lines() {
            match DumpLine::classify(line) {
                DumpLine::FunctionHeader(symbol) => {
                    let name = self.names.resolve(symbol)?;
                    state = FunctionState::enter(self.define(graph, &name, module_id)?);
                }
                DumpLine::Instruction { .. } => {
                    instructions += 1;
                    if let Some(current) = state.current() {
                        graph.node_mut(current).size += 1;
                    }
                }
                DumpLine::Reference(_) | DumpLine::Other => {}
            }
        }

        Ok(instructions)
    }

    /// Node that instructions under a definition of `name` are attributed to
    fn define(
        &self,
        graph: &mut CallGraph,
        name: &str,
        module_id: ModuleId,
    ) -> Result<Option<NodeId>, RtlGraphError> {
        if self.config.is_ignored(name) || self.config.is_seed(name) {
            debug!(name; "Skipping function");
            return Ok(None);
        }

        // Same-named functions from different modules share one node
        if graph.has_node(name) {
            return graph.get_node(name).map(Some);
        }

        let id = graph.create_node(name)?;
        graph.node_mut(id).module = Some(module_id);
        Ok(Some(id))
    }

    /// Second pass over one module
    fn scan_references(
        &mut self,
        graph: &mut CallGraph,
        module: &DumpModule,
    ) -> Result<(), RtlGraphError> {
        let mut state = FunctionState::default();

        for line in module.lines() {
            let line = DumpLine::classify(line);

            if let DumpLine::FunctionHeader(symbol) = line {
                let name = self.names.resolve(symbol)?;
                let node = if graph.has_node(&name) {
                    Some(graph.get_node(&name)?)
                } else {
                    None
                };
                state = FunctionState::enter(node);
                continue;
            }

            let (Some(current), Some(reference)) = (state.current(), line.reference()) else {
                continue;
            };

            let name = self.names.resolve(reference.symbol)?;
            let target = self.config.translate(&name);
            if graph.has_node(target) {
                let to = graph.get_node(target)?;
                graph.create_edge(current, to, !reference.call)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::common::ConfigBuilder;

    fn parser() -> DumpParser {
        DumpParser::new(ParserConfig::default(), Box::new(Identity))
    }

    fn names(graph: &CallGraph, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|id| graph.node(*id).name().to_string())
            .collect()
    }

    fn edges(graph: &CallGraph) -> Vec<(String, String, bool)> {
        graph
            .find_all_edges()
            .unwrap()
            .into_iter()
            .map(|edge| {
                let (from, to) = graph.endpoints(edge).unwrap();
                (
                    graph.node(from).name().to_string(),
                    graph.node(to).name().to_string(),
                    graph.edge(edge).indirect,
                )
            })
            .collect()
    }

    const ABC: &str = r#";; Function a (a, funcdef_no=0, decl_uid=1, cgraph_uid=1, symbol_order=0)
(insn 5 2 6 2 (set (reg/f:DI 82)
        (symbol_ref:DI ("c") [flags 0x3]  <function_decl 0x1 c>)) "abc.c":3:5 -1
     (nil))
(call_insn 6 5 0 2 (call (mem:QI (symbol_ref:DI ("b") [flags 0x3]  <function_decl 0x2 b>) [0 b S1 A8])
        (const_int 0 [0])) "abc.c":4:5 -1
     (nil))

;; Function b (b, funcdef_no=1, decl_uid=2, cgraph_uid=2, symbol_order=1)
(insn 1 0 0 2 (set (reg:SI 0 ax) (const_int 0 [0])) -1
     (nil))

;; Function c (c, funcdef_no=2, decl_uid=3, cgraph_uid=3, symbol_order=2)
(note 1 0 0 NOTE_INSN_DELETED)
"#;

    #[test]
    fn test_seeds_are_always_nodes() {
        let graph = parser().parse(&[], None).unwrap();

        let seeds: Vec<NodeId> = graph.node_ids().collect();
        assert_eq!(
            names(&graph, &seeds),
            ["malloc", "free", "fopen", "fclose", "exit"]
        );
        assert!(seeds.iter().all(|id| graph.node(*id).always));
        assert!(seeds.iter().all(|id| graph.node(*id).module.is_none()));
        assert!(graph.legends().is_empty());
    }

    #[test]
    fn test_definitions_references_and_calls() {
        let module = DumpModule::from_text("abc.c.233r.expand", ABC);
        let graph = parser().parse(&[module], None).unwrap();

        for name in ["a", "b", "c"] {
            let node = graph.node(graph.get_node(name).unwrap());
            assert_eq!(node.module, Some(1));
            assert!(!node.always);
        }
        assert_eq!(graph.node(graph.get_node("a").unwrap()).size, 2);
        assert_eq!(graph.node(graph.get_node("b").unwrap()).size, 1);
        assert_eq!(graph.node(graph.get_node("c").unwrap()).size, 0);

        assert_eq!(
            edges(&graph),
            [
                ("a".to_string(), "c".to_string(), true),
                ("a".to_string(), "b".to_string(), false),
            ]
        );

        assert_eq!(graph.legends().len(), 1);
        assert_eq!(graph.legends()[0].label, "abc.c");
        assert_eq!(graph.legends()[0].module, 1);
        assert_eq!(graph.legends()[0].instructions, 3);
    }

    #[test]
    fn test_same_name_in_two_modules_is_merged() {
        let first = DumpModule::from_text(
            "one.c.233r.expand",
            ";; Function dup (dup, funcdef_no=0)\n(insn 1 0 0 2 (nil))\n",
        );
        let second = DumpModule::from_text(
            "two.c.233r.expand",
            ";; Function dup (dup, funcdef_no=0)\n(insn 1 0 0 2 (nil))\n(insn 2 1 0 2 (nil))\n",
        );

        let graph = parser().parse(&[first, second], None).unwrap();

        let dup = graph.node(graph.get_node("dup").unwrap());
        assert_eq!(graph.node_count(), 6);
        assert_eq!(dup.module, Some(1));
        assert_eq!(dup.size, 3);
        assert_eq!(
            graph
                .legends()
                .iter()
                .map(|l| (l.label.as_str(), l.module))
                .collect::<Vec<_>>(),
            [("one.c", 1), ("two.c", 2)]
        );
    }

    #[test]
    fn test_translated_reference_targets_malloc() {
        let module = DumpModule::from_text(
            "grow.c.233r.expand",
            r#";; Function grow (grow, funcdef_no=0)
(call_insn 7 6 8 2 (set (reg:DI 0 ax)
        (call (mem:QI (symbol_ref:DI ("realloc") [flags 0x41]) [0 realloc S1 A8])
"#,
        );

        let graph = parser().parse(&[module], None).unwrap();

        assert!(!graph.has_node("realloc"));
        assert_eq!(
            edges(&graph),
            [("grow".to_string(), "malloc".to_string(), false)]
        );
    }

    #[test]
    fn test_ignored_and_seed_definitions_are_not_attributed() {
        let module = DumpModule::from_text(
            "init.cpp.233r.expand",
            r#";; Function _GLOBAL__sub_I_main (_GLOBAL__sub_I_main, funcdef_no=5)
(insn 1 0 2 2 (nil))
(call_insn 2 1 0 2 (call (mem:QI (symbol_ref:DI ("helper"))))
;; Function exit (exit, funcdef_no=6)
(insn 3 0 0 2 (nil))
;; Function helper (helper, funcdef_no=7)
(insn 4 0 0 2 (nil))
"#,
        );

        let graph = parser().parse(&[module], None).unwrap();

        assert!(!graph.has_node("_GLOBAL__sub_I_main"));
        let exit = graph.node(graph.get_node("exit").unwrap());
        assert_eq!(exit.size, 0);
        assert!(exit.module.is_none());
        assert_eq!(graph.node(graph.get_node("helper").unwrap()).size, 1);
        assert_eq!(graph.legends()[0].instructions, 4);
        assert!(edges(&graph).is_empty());
    }

    #[test]
    fn test_references_outside_functions_are_ignored() {
        let module = DumpModule::from_text(
            "data.c.233r.expand",
            r#"        (symbol_ref:DI ("used") [flags 0x3])
;; Function used (used, funcdef_no=0)
(insn 1 0 0 2 (nil))
"#,
        );

        let graph = parser().parse(&[module], None).unwrap();

        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_demangling_toggle() {
        struct Upper;
        impl Demangler for Upper {
            fn demangle(&self, symbol: &str) -> Result<String, RtlGraphError> {
                Ok(symbol.to_uppercase())
            }
        }

        let module = DumpModule::from_text("m.c.233r.expand", ";; Function f (f)\n");

        let graph = DumpParser::new(ParserConfig::default(), Box::new(Upper))
            .parse(std::slice::from_ref(&module), None)
            .unwrap();
        assert!(graph.has_node("F"));

        let config = ParserConfig::builder().with_demangle(false).build().unwrap();
        let graph = DumpParser::new(config, Box::new(Upper))
            .parse(&[module], None)
            .unwrap();
        assert!(graph.has_node("f"));
    }

    #[test]
    fn test_demangler_failure_is_fatal() {
        struct Broken;
        impl Demangler for Broken {
            fn demangle(&self, _symbol: &str) -> Result<String, RtlGraphError> {
                Err(RtlGraphError::ExternalTool {
                    tool: "c++filt".to_string(),
                    reason: "exit status: 1".to_string(),
                })
            }
        }

        let module = DumpModule::from_text("m.cpp.233r.expand", ";; Function f (_Z1fv)\n");
        let result = DumpParser::new(ParserConfig::default(), Box::new(Broken)).parse(&[module], None);

        assert!(matches!(result, Err(RtlGraphError::ExternalTool { .. })));
    }

    #[test]
    fn test_functions_taking_std_types_are_kept() {
        struct Table;
        impl Demangler for Table {
            fn demangle(&self, symbol: &str) -> Result<String, RtlGraphError> {
                Ok(match symbol {
                    LOG_SYMBOL => LOG_NAME.to_string(),
                    "_ZNSolsEi" => "std::ostream::operator<<(int)".to_string(),
                    other => other.to_string(),
                })
            }
        }

        const LOG_SYMBOL: &str = "_Z3logRKNSt7__cxx1112basic_stringIcSt11char_traitsIcESaIcEEE";
        const LOG_NAME: &str =
            "log(std::__cxx11::basic_string<char, std::char_traits<char>, std::allocator<char> > const&)";

        let module = DumpModule::from_text(
            "main.cpp.233r.expand",
            r#";; Function log (_Z3logRKNSt7__cxx1112basic_stringIcSt11char_traitsIcESaIcEEE, funcdef_no=1)
(call_insn 4 3 0 2 (call (mem:QI (symbol_ref:DI ("_ZNSolsEi") [flags 0x41]) [0 S1 A8])
;; Function main (main, funcdef_no=2)
(call_insn 9 8 0 2 (call (mem:QI (symbol_ref:DI ("_Z3logRKNSt7__cxx1112basic_stringIcSt11char_traitsIcESaIcEEE") [flags 0x3]) [0 S1 A8])
"#,
        );

        let graph = DumpParser::new(ParserConfig::default(), Box::new(Table))
            .parse(&[module], None)
            .unwrap();

        assert!(graph.has_node(LOG_NAME));
        assert!(!graph.has_node("std::ostream::operator<<(int)"));
        assert_eq!(
            edges(&graph),
            [("main".to_string(), LOG_NAME.to_string(), false)]
        );
    }

    #[test]
    fn test_duplicate_seed_is_fatal() {
        let config = ParserConfig {
            seeds: vec!["malloc".to_string(), "malloc".to_string()],
            ..ParserConfig::default()
        };

        let result = DumpParser::new(config, Box::new(Identity)).parse(&[], None);

        assert!(matches!(result, Err(RtlGraphError::DuplicateNode { ref name }) if name == "malloc"));
    }
}
