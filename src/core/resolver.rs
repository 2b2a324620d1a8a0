use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use super::diagnostic::{Diagnostic, Recovery};
use super::project::ProjectSources;

/// A unit that another unit imports.
///
/// Ordering puts resolved units first, sorted by defining file then name,
/// followed by unknown names in alphabetical order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dependency {
    Resolved { file: PathBuf, name: String },
    /// Imported but not defined in any loaded file.
    Unknown { name: String },
}

impl Dependency {
    pub fn name(&self) -> &str {
        match self {
            Dependency::Resolved { name, .. } | Dependency::Unknown { name } => name,
        }
    }

    pub fn file(&self) -> Option<&Path> {
        match self {
            Dependency::Resolved { file, .. } => Some(file),
            Dependency::Unknown { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Dependency::Resolved { .. })
    }
}

/// Resolves imported names against the merged unit index.
pub struct DependencyResolver<'a> {
    sources: &'a ProjectSources,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(sources: &'a ProjectSources) -> Self {
        Self { sources }
    }

    /// Maps every indexed unit to the units it imports. Names with no
    /// definition become [`Dependency::Unknown`] and are reported.
    pub fn resolve_units(
        &self,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> BTreeMap<String, Vec<Dependency>> {
        let mut depends = BTreeMap::new();

        for unit in self.sources.units() {
            let mut graph = Vec::with_capacity(unit.imports.len());
            for used in &unit.imports {
                match self.sources.unit(used) {
                    Some(target) => graph.push(Dependency::Resolved {
                        file: target.file.clone(),
                        name: target.name.clone(),
                    }),
                    None => {
                        let diagnostic = Diagnostic::UnresolvedImport {
                            name: used.clone(),
                            importer: unit.name.clone(),
                            recovery: Recovery::Placeholder,
                        };
                        diagnostic.emit();
                        diagnostics.push(diagnostic);
                        graph.push(Dependency::Unknown { name: used.clone() });
                    }
                }
            }
            graph.sort();
            depends.insert(unit.name.clone(), graph);
        }

        depends
    }

    /// Maps every file to the other files defining the units it imports.
    /// Files never depend on themselves and unresolved names are dropped.
    pub fn resolve_files(
        &self,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> BTreeMap<PathBuf, Vec<PathBuf>> {
        let mut depends = BTreeMap::new();

        for (index, source_file) in self.sources.files().iter().enumerate() {
            let mut graph: BTreeSet<&Path> = BTreeSet::new();
            for used in &source_file.imports {
                match self.sources.defining_file_index(used) {
                    Some(target) if target == index => {}
                    Some(target) => {
                        if let Some(target_file) = self.sources.files().get(target) {
                            graph.insert(target_file.path());
                        }
                    }
                    None => {
                        let diagnostic = Diagnostic::UnresolvedImport {
                            name: used.clone(),
                            importer: source_file.path.display().to_string(),
                            recovery: Recovery::Skipped,
                        };
                        diagnostic.emit();
                        diagnostics.push(diagnostic);
                    }
                }
            }
            depends.insert(
                source_file.path.clone(),
                graph.into_iter().map(Path::to_path_buf).collect(),
            );
        }

        depends
    }
}
