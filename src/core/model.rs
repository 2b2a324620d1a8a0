use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Module,
    Program,
}

impl UnitKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "module" => Some(UnitKind::Module),
            "program" => Some(UnitKind::Program),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitKind::Module => "module",
            UnitKind::Program => "program",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named `module` or `program` block found in a source file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Unit {
    pub kind: UnitKind,
    /// Lowercased unit name.
    pub name: String,
    /// Path of the file that defines this unit.
    pub file: PathBuf,
    /// Line index of the opening statement (0-based).
    pub start_line: usize,
    /// Line index of the closing statement; imports are read from the lines in between.
    pub end_line: usize,
    /// Imported unit names after macro substitution, lowercased.
    pub imports: BTreeSet<String>,
}

impl Unit {
    pub fn new(kind: UnitKind, name: &str, file: PathBuf) -> Self {
        Self {
            kind,
            name: normalize_name(name),
            file,
            start_line: 0,
            end_line: 0,
            imports: BTreeSet::new(),
        }
    }

    pub fn with_span(mut self, start_line: usize, end_line: usize) -> Self {
        self.start_line = start_line;
        self.end_line = end_line;
        self
    }

    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.imports = imports
            .into_iter()
            .map(|name| normalize_name(name.as_ref()))
            .collect();
        self
    }
}

/// One source file and the units it defines.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub units: BTreeMap<String, Unit>,
    /// Sorted union of the imports of every unit in this file.
    pub imports: BTreeSet<String>,
}

impl SourceFile {
    pub fn new(path: PathBuf, units: BTreeMap<String, Unit>) -> Self {
        let imports = units
            .values()
            .flat_map(|unit| unit.imports.iter().cloned())
            .collect();
        Self {
            path,
            units,
            imports,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drops `name` from the file-level imports and from every unit's imports.
    pub fn remove_import(&mut self, name: &str) {
        self.imports.remove(name);
        for unit in self.units.values_mut() {
            unit.imports.remove(name);
        }
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
