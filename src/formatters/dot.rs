use anyhow::Result;
use petgraph::dot::{Config, Dot};
use std::path::Path;

use crate::core::{GraphBuilder, Project};

/// Graphviz source for the unit dependency graph.
pub struct DotFormatter;

impl DotFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_to_file<F>(
        &self,
        project: &Project,
        output_path: &Path,
        confirm_overwrite: F,
    ) -> Result<bool>
    where
        F: FnOnce(&Path) -> bool,
    {
        super::write_output(output_path, &self.format_project(project), confirm_overwrite)
    }

    pub fn format_project(&self, project: &Project) -> String {
        let graph = GraphBuilder::from_project(project);
        format!(
            "// {}\n{}",
            project.name(),
            Dot::with_config(&graph, &[Config::EdgeNoLabel])
        )
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}
