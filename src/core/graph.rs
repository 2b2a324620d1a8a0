use petgraph::{graph::NodeIndex, Directed, Graph};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use super::model::UnitKind;
use super::project::Project;
use super::resolver::Dependency;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UnitNode {
    pub name: String,
    /// `None` for imported names that no file defines.
    pub kind: Option<UnitKind>,
    pub file: Option<PathBuf>,
}

impl UnitNode {
    pub fn defined(name: String, kind: UnitKind, file: PathBuf) -> Self {
        Self {
            name,
            kind: Some(kind),
            file: Some(file),
        }
    }

    pub fn unknown(name: String) -> Self {
        Self {
            name,
            kind: None,
            file: None,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.file.is_some()
    }
}

impl fmt::Display for UnitNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A `use` of one unit by another.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct ImportEdge;

impl fmt::Display for ImportEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("use")
    }
}

/// Edges point from the importing unit to the imported one.
pub type UnitGraph = Graph<UnitNode, ImportEdge, Directed>;

pub struct GraphBuilder {
    graph: UnitGraph,
    node_map: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Builds the unit graph of a resolved project, including a node for
    /// every unknown import.
    pub fn from_project(project: &Project) -> UnitGraph {
        let mut builder = Self::new();

        for unit in project.units() {
            builder.add_node(UnitNode::defined(
                unit.name.clone(),
                unit.kind,
                unit.file.clone(),
            ));
        }

        for (name, dependencies) in project.unit_dependencies() {
            for dependency in dependencies {
                if let Dependency::Unknown { name: unknown } = dependency {
                    if builder.get_node_index(unknown).is_none() {
                        builder.add_node(UnitNode::unknown(unknown.clone()));
                    }
                }
                builder.add_edge(name, dependency.name());
            }
        }

        builder.build()
    }

    /// Adding a node whose name is already present replaces the mapping but
    /// keeps the old node in the graph.
    pub fn add_node(&mut self, node: UnitNode) -> NodeIndex {
        let name = node.name.clone();
        let index = self.graph.add_node(node);
        self.node_map.insert(name, index);
        index
    }

    pub fn add_edge(&mut self, source: &str, target: &str) -> Option<petgraph::graph::EdgeIndex> {
        let source_idx = self.node_map.get(source)?;
        let target_idx = self.node_map.get(target)?;
        Some(self.graph.update_edge(*source_idx, *target_idx, ImportEdge))
    }

    pub fn build(self) -> UnitGraph {
        self.graph
    }

    pub fn get_node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
