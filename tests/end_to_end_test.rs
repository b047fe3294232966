//! Integration tests for rtlgraph using the library interface

use std::fs;
use std::path::Path;

use clap::Parser;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rtlgraph::annotator::{AnnotationSummary, GraphAnnotator};
use rtlgraph::cli::Cli;
use rtlgraph::common::ConfigBuilder;
use rtlgraph::config::{GraphOptions, ParserConfig};
use rtlgraph::demangle::Identity;
use rtlgraph::executors::CommandExecutor;
use rtlgraph::executors::graph::GraphExecutor;
use rtlgraph::graph::{CallGraph, GraphRenderer};
use rtlgraph::parser::{DumpModule, DumpParser};
use tempfile::TempDir;

const ABC_DUMP: &str = r#"
;; Function a (a, funcdef_no=0, decl_uid=1945, cgraph_uid=1, symbol_order=0)

(note 1 0 3 NOTE_INSN_DELETED)
(insn 5 2 6 2 (set (reg/f:DI 82)
        (symbol_ref:DI ("c") [flags 0x3]  <function_decl 0x7f c>)) "abc.c":3:5 -1
     (nil))
(call_insn 6 5 0 2 (call (mem:QI (symbol_ref:DI ("b") [flags 0x3]  <function_decl 0x7f b>) [0 b S1 A8])
        (const_int 0 [0])) "abc.c":4:5 -1
     (nil))

;; Function b (b, funcdef_no=1, decl_uid=1946, cgraph_uid=2, symbol_order=1)

(insn 2 0 0 2 (set (reg:SI 0 ax) (const_int 0 [0])) "abc.c":8:1 -1
     (nil))

;; Function c (c, funcdef_no=2, decl_uid=1947, cgraph_uid=3, symbol_order=2)

(note 1 0 0 NOTE_INSN_DELETED)
"#;

const MAIN_DUMP: &str = r#"
;; Function main (main, funcdef_no=0, decl_uid=2001, cgraph_uid=1, symbol_order=0)

(call_insn 7 6 8 2 (call (mem:QI (symbol_ref:DI ("ping") [flags 0x41]  <function_decl 0x7f ping>) [0 ping S1 A8])
        (const_int 0 [0])) "main.c":5:5 -1
     (nil))
(call_insn 9 8 10 2 (call (mem:QI (symbol_ref:DI ("realloc") [flags 0x41]  <function_decl 0x7f realloc>) [0 realloc S1 A8])
        (const_int 0 [0])) "main.c":6:5 -1
     (nil))
(insn 10 9 0 2 (set (reg:SI 0 ax) (const_int 0 [0])) "main.c":7:1 -1
     (nil))
"#;

const PINGPONG_DUMP: &str = r#"
;; Function ping (ping, funcdef_no=0, decl_uid=2101, cgraph_uid=1, symbol_order=0)

(call_insn 5 4 0 2 (call (mem:QI (symbol_ref:DI ("pong") [flags 0x3]  <function_decl 0x7f pong>) [0 pong S1 A8])
        (const_int 0 [0])) "pingpong.c":3:5 -1
     (nil))

;; Function pong (pong, funcdef_no=1, decl_uid=2102, cgraph_uid=2, symbol_order=1)

(call_insn 5 4 0 2 (call (mem:QI (symbol_ref:DI ("ping") [flags 0x3]  <function_decl 0x7f ping>) [0 ping S1 A8])
        (const_int 0 [0])) "pingpong.c":8:5 -1
     (nil))

;; Function orphan (orphan, funcdef_no=2, decl_uid=2103, cgraph_uid=3, symbol_order=2)

(insn 2 0 0 2 (set (reg:SI 0 ax) (const_int 1 [0x1])) "pingpong.c":12:1 -1
     (nil))
"#;

fn build(modules: &[DumpModule]) -> (CallGraph, AnnotationSummary) {
    let mut parser = DumpParser::new(ParserConfig::default(), Box::new(Identity));
    let mut graph = parser.parse(modules, None).unwrap();
    let summary = GraphAnnotator::new().annotate(&mut graph).unwrap();
    (graph, summary)
}

fn render(graph: &CallGraph) -> String {
    GraphRenderer::new().render_to_string(graph).unwrap()
}

#[test]
fn test_single_module_call_graph() {
    let (graph, summary) = build(&[DumpModule::from_text("abc.c.233r.expand", ABC_DUMP)]);

    assert_eq!(
        summary,
        AnnotationSummary {
            cycle_edges: 0,
            indirect_edges: 1,
            unreachable: None,
        }
    );
    assert_eq!(graph.node_count(), 8);
    assert_eq!(graph.edge_count(), 2);

    let dot = render(&graph);
    for expected in [
        "strict digraph callgraph {\n",
        "    node [shape=\"box\"; style=\"rounded,filled\"; colorscheme=\"set312\"];\n",
        "        \"__legend_1\" [label=\"abc.c\"; shape=\"note\"; fillcolor=\"1\"];  // 3 instructions\n",
        "    \"malloc\" [shape=\"octagon\"; style=\"filled\"; fillcolor=\"#D9D9D9\"];\n",
        "    \"b\" [fillcolor=\"1\"; height=\"0.1\"];  // 1 instructions\n",
        "    \"c\" [fillcolor=\"1\"];\n",
        "    \"a\" -> \"b\";\n",
        "    \"a\" -> \"c\" [style=\"dashed\"];\n",
    ] {
        assert!(
            predicate::str::contains(expected).eval(&dot),
            "missing {expected:?} in:\n{dot}"
        );
    }
    assert!(predicate::str::contains("radial").not().eval(&dot));
    assert!(predicate::str::contains("#FF0000").not().eval(&dot));
}

#[test]
fn test_modules_cycles_and_reachability() {
    let (graph, summary) = build(&[
        DumpModule::from_text("main.c.233r.expand", MAIN_DUMP),
        DumpModule::from_text("pingpong.c.233r.expand", PINGPONG_DUMP),
    ]);

    assert_eq!(summary.cycle_edges, 2);
    assert_eq!(summary.indirect_edges, 0);
    // orphan plus every seed main never calls
    assert_eq!(summary.unreachable, Some(5));

    let dot = render(&graph);
    assert!(predicate::str::contains("    \"main\" -> \"malloc\";\n").eval(&dot));
    assert!(predicate::str::contains("realloc").not().eval(&dot));
    assert!(
        predicate::str::contains("    \"ping\" -> \"pong\" [color=\"#FF0000\"; style=\"bold\"];\n")
            .eval(&dot)
    );
    assert!(
        predicate::str::contains("    \"pong\" -> \"ping\" [color=\"#FF0000\"; style=\"bold\"];\n")
            .eval(&dot)
    );
    assert!(predicate::str::contains("    \"main\" -> \"ping\";\n").eval(&dot));
    assert!(
        predicate::str::contains(
            "    \"orphan\" [fillcolor=\"#FFFFFF:2\"; height=\"0.1\"; style=\"dashed,filled,radial\"];"
        )
        .eval(&dot)
    );
    assert!(
        predicate::str::contains(
            "    \"free\" [shape=\"octagon\"; style=\"dashed,filled,radial\"; fillcolor=\"#FFFFFF:#D9D9D9\"];\n"
        )
        .eval(&dot)
    );
    assert!(
        predicate::str::contains(
            "    \"malloc\" [shape=\"octagon\"; style=\"filled\"; fillcolor=\"#D9D9D9\"];\n"
        )
        .eval(&dot)
    );
    assert!(predicate::str::contains("{ rank=\"min\"; \"__legend_1\"; \"__legend_2\"; }").eval(&dot));
}

#[test]
fn test_custom_parser_config() {
    let config = ParserConfig::builder()
        .with_seeds(vec![])
        .with_ignore_pattern("^c$")
        .build()
        .unwrap();
    let mut parser = DumpParser::new(config, Box::new(Identity));
    let graph = parser
        .parse(&[DumpModule::from_text("abc.c.233r.expand", ABC_DUMP)], None)
        .unwrap();

    let names: Vec<&str> = graph.nodes().map(|(_, node)| node.name()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(graph.edge_count(), 1);
}

fn write_dump(dir: &Path, name: &str, text: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), text).unwrap();
}

#[test]
fn test_graph_command_writes_dot_file() {
    let temp = TempDir::new().unwrap();
    let build_dir = temp.path().join("build");
    write_dump(&build_dir, "pingpong.c.233r.expand", PINGPONG_DUMP);
    write_dump(&build_dir.join("app"), "main.c.233r.expand", MAIN_DUMP);
    fs::write(build_dir.join("main.o"), "not a dump").unwrap();
    let output = temp.path().join("callgraph.dot");

    let cli = Cli::try_parse_from([
        "rtlgraph".to_string(),
        "--quiet".to_string(),
        "-o".to_string(),
        output.display().to_string(),
        build_dir.display().to_string(),
    ])
    .unwrap();
    GraphExecutor::execute(GraphOptions::try_from(cli).unwrap()).unwrap();

    let dot = fs::read_to_string(&output).unwrap();
    let pingpong = dot.find("label=\"pingpong.c\"").unwrap();
    let main = dot.find("label=\"main.c\"").unwrap();
    // Directory entries are taken in sorted order: "app/" before "pingpong.c"
    assert!(main < pingpong);
    assert!(predicate::str::contains("\"main\" -> \"ping\"").eval(&dot));
}

#[test]
fn test_graph_command_reads_config_file() {
    let temp = TempDir::new().unwrap();
    write_dump(temp.path(), "abc.c.233r.expand", ABC_DUMP);
    let config = temp.path().join("rtlgraph.toml");
    fs::write(&config, "seeds = [\"exit\"]\nignore = \"^b$\"\n").unwrap();
    let output = temp.path().join("out.dot");

    let cli = Cli::try_parse_from([
        "rtlgraph".to_string(),
        "-q".to_string(),
        "-c".to_string(),
        config.display().to_string(),
        "-o".to_string(),
        output.display().to_string(),
        temp.path().join("abc.c.233r.expand").display().to_string(),
    ])
    .unwrap();
    GraphExecutor::execute(GraphOptions::try_from(cli).unwrap()).unwrap();

    let dot = fs::read_to_string(&output).unwrap();
    assert!(predicate::str::contains("\"exit\"").eval(&dot));
    assert!(predicate::str::contains("\"malloc\"").not().eval(&dot));
    assert!(predicate::str::contains("\"b\"").not().eval(&dot));
    assert!(predicate::str::contains("\"a\" -> \"c\" [style=\"dashed\"];").eval(&dot));
}

#[test]
fn test_graph_command_fails_without_inputs() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out.dot");

    let cli = Cli::try_parse_from([
        "rtlgraph".to_string(),
        "-q".to_string(),
        "-o".to_string(),
        output.display().to_string(),
        temp.path().display().to_string(),
    ])
    .unwrap();
    let result = GraphExecutor::execute(GraphOptions::try_from(cli).unwrap());

    assert!(result.is_err());
    assert!(!output.exists());
}
