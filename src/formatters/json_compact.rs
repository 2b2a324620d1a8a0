use anyhow::Result;
use serde_json::{json, Value};
use std::path::Path;

use crate::core::{Dependency, Project};

/// JSON report of a resolved project.
pub struct JsonCompactFormatter {
    pretty: bool,
}

impl JsonCompactFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
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
        let content = self.format_project(project)?;
        super::write_output(output_path, &content, confirm_overwrite)
    }

    pub fn format_project(&self, project: &Project) -> Result<String> {
        let value = self.build_report(project);
        let mut content = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        content.push('\n');
        Ok(content)
    }

    pub fn build_report(&self, project: &Project) -> Value {
        let files: Vec<Value> = project
            .file_dependencies()
            .iter()
            .map(|(path, dependencies)| {
                let units: Vec<&str> = project
                    .file(path)
                    .map(|file| {
                        file.units
                            .keys()
                            .filter(|name| {
                                project
                                    .unit(name)
                                    .is_some_and(|unit| unit.file == file.path)
                            })
                            .map(String::as_str)
                            .collect()
                    })
                    .unwrap_or_default();
                let depends: Vec<String> = dependencies
                    .iter()
                    .map(|dependency| dependency.display().to_string())
                    .collect();
                json!({
                    "path": path.display().to_string(),
                    "units": units,
                    "depends": depends,
                })
            })
            .collect();

        let units: Vec<Value> = project
            .units()
            .map(|unit| {
                let depends: Vec<Value> = project
                    .depends_on_unit(&unit.name)
                    .unwrap_or_default()
                    .iter()
                    .map(dependency_value)
                    .collect();
                json!({
                    "name": unit.name,
                    "kind": unit.kind.as_str(),
                    "file": unit.file.display().to_string(),
                    "depends": depends,
                })
            })
            .collect();

        let unresolved: Vec<&str> = {
            let mut names: Vec<&str> = project
                .unit_dependencies()
                .values()
                .flatten()
                .filter(|dependency| !dependency.is_resolved())
                .map(Dependency::name)
                .collect();
            names.sort_unstable();
            names.dedup();
            names
        };

        let diagnostics: Vec<String> = project
            .diagnostics()
            .iter()
            .map(ToString::to_string)
            .collect();

        json!({
            "meta": {
                "project": project.name(),
                "files": files.len(),
                "units": units.len(),
            },
            "files": files,
            "units": units,
            "unresolved": unresolved,
            "diagnostics": diagnostics,
        })
    }
}

fn dependency_value(dependency: &Dependency) -> Value {
    json!({
        "name": dependency.name(),
        "file": dependency.file().map(|file| file.display().to_string()),
    })
}

impl Default for JsonCompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}
