use crate::core::{Project, Unit};

/// Human readable "X depends on:" listings.
pub struct VerboseFormatter;

impl VerboseFormatter {
    pub fn new() -> Self {
        Self
    }

    /// One block per unit, ordered by defining file and then unit name.
    pub fn format_units(&self, project: &Project) -> String {
        let mut units: Vec<&Unit> = project.units().collect();
        units.sort_by(|a, b| a.file.cmp(&b.file).then_with(|| a.name.cmp(&b.name)));

        let mut output = String::new();
        for unit in units {
            output.push_str(&format!("{} depends on:\n", unit.name));
            for dependency in project.depends_on_unit(&unit.name).unwrap_or_default() {
                output.push_str(&format!("\t{}\n", dependency.name()));
            }
        }
        output
    }

    /// One block per file, in path order.
    pub fn format_files(&self, project: &Project) -> String {
        let mut output = String::new();
        for (file, dependencies) in project.file_dependencies() {
            output.push_str(&format!("{} depends on:\n", file.display()));
            for dependency in dependencies {
                output.push_str(&format!("\t{}\n", dependency.display()));
            }
        }
        output
    }
}

impl Default for VerboseFormatter {
    fn default() -> Self {
        Self::new()
    }
}
