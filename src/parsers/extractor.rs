use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::debug;

use super::macros::MacroTable;
use super::patterns::{match_unit_close, match_unit_open, match_use, UnitOpen};
use crate::core::error::{DependError, Result};
use crate::core::model::{normalize_name, SourceFile, Unit};

/// Splits a source file into its units and collects each unit's imports.
pub struct UnitExtractor<'a> {
    macros: &'a MacroTable,
}

impl<'a> UnitExtractor<'a> {
    pub fn new(macros: &'a MacroTable) -> Self {
        Self { macros }
    }

    pub fn load_file(&self, path: &Path) -> Result<SourceFile> {
        let bytes = fs::read(path).map_err(|source| DependError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let contents = String::from_utf8_lossy(&bytes);
        let source = self.parse_source(path, &contents)?;
        debug!("{}: {} unit(s)", path.display(), source.units.len());
        Ok(source)
    }

    pub fn parse_source(&self, path: &Path, contents: &str) -> Result<SourceFile> {
        let units = self.extract(path, contents)?;
        Ok(SourceFile::new(path.to_path_buf(), units))
    }

    /// Opens and closes are paired by position, not by name. A later unit
    /// with the same name replaces an earlier one.
    pub fn extract(&self, path: &Path, contents: &str) -> Result<BTreeMap<String, Unit>> {
        let lines: Vec<&str> = contents.lines().collect();

        let mut opens: Vec<UnitOpen> = Vec::new();
        let mut starts: Vec<usize> = Vec::new();
        let mut ends: Vec<usize> = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            if let Some(open) = match_unit_open(line) {
                opens.push(open);
                starts.push(index);
            }
            if match_unit_close(line).is_some() {
                ends.push(index);
            }
        }

        if opens.len() != starts.len() || starts.len() != ends.len() {
            return Err(DependError::Structural {
                path: path.to_path_buf(),
                begins: starts.len(),
                ends: ends.len(),
            });
        }

        let mut units = BTreeMap::new();
        for ((open, start), end) in opens.into_iter().zip(starts).zip(ends) {
            let body = lines.get(start + 1..end).unwrap_or(&[]);
            let unit = Unit::new(open.kind, &open.name, path.to_path_buf())
                .with_span(start, end)
                .with_imports(self.collect_imports(body));
            units.insert(unit.name.clone(), unit);
        }

        Ok(units)
    }

    fn collect_imports(&self, body: &[&str]) -> BTreeSet<String> {
        body.iter()
            .filter_map(|line| match_use(line))
            .map(|raw| normalize_name(&self.macros.substitute(raw)))
            .collect()
    }
}
