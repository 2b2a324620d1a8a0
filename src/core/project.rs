use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::config::{MergePolicy, ProjectConfig};
use super::diagnostic::Diagnostic;
use super::error::Result;
use super::model::{normalize_name, SourceFile, Unit};
use super::resolver::{Dependency, DependencyResolver};
use super::scanner::FileScanner;
use crate::parsers::UnitExtractor;

const DEFAULT_PROJECT_NAME: &str = "project";

/// Loaded source files plus the global index from unit name to defining
/// file. This is the state before any import is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSources {
    files: Vec<SourceFile>,
    /// Unit name -> index into `files`.
    units: BTreeMap<String, usize>,
    diagnostics: Vec<Diagnostic>,
}

/// Builds the global unit index from files in the given order.
///
/// When two files define the same unit name, `policy` picks the survivor and
/// a [`Diagnostic::DuplicateUnit`] is recorded.
pub fn merge_units(files: Vec<SourceFile>, policy: MergePolicy) -> ProjectSources {
    let mut units: BTreeMap<String, usize> = BTreeMap::new();
    let mut diagnostics = Vec::new();

    for (index, source_file) in files.iter().enumerate() {
        for name in source_file.units.keys() {
            let Some(&previous) = units.get(name) else {
                units.insert(name.clone(), index);
                continue;
            };

            let (kept, dropped) = match policy {
                MergePolicy::LastWins => {
                    units.insert(name.clone(), index);
                    (index, previous)
                }
                MergePolicy::FirstWins => (previous, index),
            };
            let diagnostic = Diagnostic::DuplicateUnit {
                name: name.clone(),
                kept: files[kept].path.clone(),
                dropped: files[dropped].path.clone(),
            };
            diagnostic.emit();
            diagnostics.push(diagnostic);
        }
    }

    ProjectSources {
        files,
        units,
        diagnostics,
    }
}

impl ProjectSources {
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn file(&self, path: &Path) -> Option<&SourceFile> {
        self.files.iter().find(|file| file.path == path)
    }

    /// Indexed units in name order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units
            .iter()
            .filter_map(|(name, &index)| self.files.get(index)?.units.get(name))
    }

    pub fn unit(&self, name: &str) -> Option<&Unit> {
        let index = self.defining_file_index(name)?;
        self.files.get(index)?.units.get(name)
    }

    pub fn defining_file_index(&self, name: &str) -> Option<usize> {
        self.units.get(name).copied()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Takes the named units out of the index and out of every import list.
    /// Names that are not present are ignored.
    pub fn remove_ignored_modules<I, S>(&mut self, ignore_modules: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for ignored in ignore_modules {
            let ignored = normalize_name(ignored.as_ref());
            if self.units.remove(&ignored).is_some() {
                debug!("Ignoring module {}", ignored);
            }
            for source_file in &mut self.files {
                source_file.remove_import(&ignored);
            }
        }
    }

    pub fn resolve(self) -> Project {
        let mut diagnostics = self.diagnostics.clone();
        let resolver = DependencyResolver::new(&self);
        let unit_deps = resolver.resolve_units(&mut diagnostics);
        let file_deps = resolver.resolve_files(&mut diagnostics);

        Project {
            name: DEFAULT_PROJECT_NAME.to_string(),
            sources: ProjectSources {
                diagnostics: Vec::new(),
                ..self
            },
            unit_deps,
            file_deps,
            diagnostics,
        }
    }
}

/// A fully resolved dependency graph over a set of source files.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    sources: ProjectSources,
    unit_deps: BTreeMap<String, Vec<Dependency>>,
    file_deps: BTreeMap<PathBuf, Vec<PathBuf>>,
    diagnostics: Vec<Diagnostic>,
}

impl Project {
    /// Runs the whole pipeline: find files, extract units, merge, drop
    /// ignored modules, then resolve unit and file dependencies.
    ///
    /// A structurally broken file aborts the build.
    pub fn load(config: &ProjectConfig) -> Result<Self> {
        let paths = source_paths(config)?;
        debug!("Loading {} source file(s)", paths.len());

        let extractor = UnitExtractor::new(&config.macros);
        let files = paths
            .par_iter()
            .map(|path| extractor.load_file(path))
            .collect::<Result<Vec<_>>>()?;

        let mut sources = merge_units(files, config.merge_policy);
        sources.remove_ignored_modules(&config.ignore_modules);

        let name = config
            .name
            .clone()
            .unwrap_or_else(|| project_name_from_root(&config.root));
        Ok(sources.resolve().with_name(name))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[SourceFile] {
        self.sources.files()
    }

    pub fn file(&self, path: &Path) -> Option<&SourceFile> {
        self.sources.file(path)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.sources.units()
    }

    pub fn unit(&self, name: &str) -> Option<&Unit> {
        self.sources.unit(name)
    }

    pub fn unit_dependencies(&self) -> &BTreeMap<String, Vec<Dependency>> {
        &self.unit_deps
    }

    pub fn file_dependencies(&self) -> &BTreeMap<PathBuf, Vec<PathBuf>> {
        &self.file_deps
    }

    pub fn depends_on_unit(&self, name: &str) -> Option<&[Dependency]> {
        self.unit_deps.get(name).map(Vec::as_slice)
    }

    pub fn depends_on_file(&self, path: &Path) -> Option<&[PathBuf]> {
        self.file_deps.get(path).map(Vec::as_slice)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

fn source_paths(config: &ProjectConfig) -> Result<Vec<PathBuf>> {
    let candidates = match &config.files {
        Some(files) => files.clone(),
        None => FileScanner::new().scan_directory(&config.root, &config.extensions)?,
    };

    let excluded: HashSet<PathBuf> = config
        .exclude_files
        .iter()
        .map(|path| strip_current_dir(path))
        .collect();
    let mut seen = HashSet::new();
    Ok(candidates
        .iter()
        .map(|path| strip_current_dir(path))
        .filter(|path| !excluded.contains(path))
        .filter(|path| seen.insert(path.clone()))
        .collect())
}

/// `./main.f90` and `main.f90` name the same file.
fn strip_current_dir(path: &Path) -> PathBuf {
    let stripped: PathBuf = path
        .components()
        .skip_while(|component| matches!(component, Component::CurDir))
        .collect();
    if stripped.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        stripped
    }
}

fn project_name_from_root(root: &Path) -> String {
    root.canonicalize()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string())
}
