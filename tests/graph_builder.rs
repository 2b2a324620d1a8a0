use fortdeps::core::{
    graph::{GraphBuilder, UnitNode},
    merge_units, MergePolicy, UnitGraph, UnitKind,
};
use fortdeps::parsers::{MacroTable, UnitExtractor};
use std::path::{Path, PathBuf};

#[test]
fn graph_builder_adds_nodes_and_edges() {
    let mut gb = GraphBuilder::new();

    gb.add_node(UnitNode::defined(
        "kinds".to_string(),
        UnitKind::Module,
        PathBuf::from("kinds.f90"),
    ));
    gb.add_node(UnitNode::defined(
        "main".to_string(),
        UnitKind::Program,
        PathBuf::from("main.f90"),
    ));
    gb.add_node(UnitNode::unknown("mpi".to_string()));

    assert!(gb.add_edge("main", "kinds").is_some());
    assert!(gb.add_edge("main", "mpi").is_some());
    // repeated edges collapse
    assert!(gb.add_edge("main", "kinds").is_some());

    let graph: UnitGraph = gb.build();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn add_edge_returns_none_when_missing_nodes() {
    let mut gb = GraphBuilder::new();
    gb.add_node(UnitNode::unknown("lonely".to_string()));

    assert!(gb.add_edge("lonely", "missing").is_none());
    assert!(gb.get_node_index("missing").is_none());
}

#[test]
fn graph_from_project_includes_unknown_imports() {
    let macros = MacroTable::new();
    let extractor = UnitExtractor::new(&macros);
    let files = vec![
        extractor
            .parse_source(Path::new("a.f90"), "module alpha\nend module alpha\n")
            .unwrap(),
        extractor
            .parse_source(
                Path::new("b.f90"),
                "module beta\n  use alpha\n  use ghost\nend module beta\n",
            )
            .unwrap(),
    ];
    let project = merge_units(files, MergePolicy::LastWins).resolve();

    let graph = GraphBuilder::from_project(&project);
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);

    let ghost = graph
        .node_weights()
        .find(|node| node.name == "ghost")
        .unwrap();
    assert!(!ghost.is_defined());
    assert_eq!(ghost.kind, None);
}
