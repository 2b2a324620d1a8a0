use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::{DependError, Result};

pub const DEFAULT_EXTENSIONS: &[&str] = &["f90", "F90"];

/// Finds source files directly inside a directory.
pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    /// Lists files in `root` (not its subdirectories) whose extension is one
    /// of `extensions`. Extension matching is case-sensitive, so `f90` and
    /// `F90` are distinct. The result is sorted by path.
    pub fn scan_directory(&self, root_path: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
        let entries = WalkDir::new(root_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|err| DependError::Io {
                path: root_path.to_path_buf(),
                source: err.into(),
            })?;

        let mut files: Vec<PathBuf> = entries
            .par_iter()
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let path = entry.path();
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .filter(|ext| extensions.iter().any(|wanted| wanted == *ext))
                    .map(|_| path.to_path_buf())
            })
            .collect();

        files.sort();
        Ok(files)
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}
