use std::path::PathBuf;

use super::scanner::DEFAULT_EXTENSIONS;
use crate::parsers::MacroTable;

/// Which definition survives when two files declare a unit with the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// The file merged later replaces the earlier definition.
    #[default]
    LastWins,
    /// The first definition is kept and later ones are dropped.
    FirstWins,
}

/// Everything the pipeline needs to build a [`Project`](super::Project).
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub name: Option<String>,
    /// Directory searched when no explicit file list is given.
    pub root: PathBuf,
    pub files: Option<Vec<PathBuf>>,
    pub extensions: Vec<String>,
    pub exclude_files: Vec<PathBuf>,
    pub ignore_modules: Vec<String>,
    pub macros: MacroTable,
    pub merge_policy: MergePolicy,
}

impl ProjectConfig {
    pub fn new() -> Self {
        Self {
            name: None,
            root: PathBuf::from("."),
            files: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            exclude_files: Vec::new(),
            ignore_modules: Vec::new(),
            macros: MacroTable::new(),
            merge_policy: MergePolicy::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = Some(files.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.exclude_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ignore_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_modules = modules.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_macros(mut self, macros: MacroTable) -> Self {
        self.macros = macros;
        self
    }

    pub fn with_merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self::new()
    }
}
