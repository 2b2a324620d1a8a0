use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::core::Project;

const HEADER: &str = "# This file is generated automatically. DO NOT EDIT!\n";

/// Emits Makefile rules making each object file depend on the objects of
/// the files it imports from.
pub struct MakefileFormatter {
    /// Directory prepended to every object file name.
    build_dir: PathBuf,
    object_extension: String,
}

impl MakefileFormatter {
    pub fn new() -> Self {
        Self {
            build_dir: PathBuf::new(),
            object_extension: "o".to_string(),
        }
    }

    pub fn with_build_dir(mut self, build_dir: impl Into<PathBuf>) -> Self {
        self.build_dir = build_dir.into();
        self
    }

    pub fn with_object_extension(mut self, extension: impl Into<String>) -> Self {
        self.object_extension = extension.into();
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
        super::write_output(output_path, &self.format_project(project), confirm_overwrite)
    }

    pub fn format_project(&self, project: &Project) -> String {
        let mut output = String::from(HEADER);

        for (file, dependencies) in project.file_dependencies() {
            output.push_str(&format!("\n{} : ", self.object_name(file)));
            for dependency in dependencies {
                output.push_str(&format!(" \\\n\t{}", self.object_name(dependency)));
            }
            output.push('\n');
        }

        output
    }

    /// `src/foo.f90` becomes `<build_dir>/foo.o`.
    pub fn object_name(&self, source: &Path) -> String {
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let object = format!("{}.{}", stem, self.object_extension);
        self.build_dir.join(object).display().to_string()
    }
}

impl Default for MakefileFormatter {
    fn default() -> Self {
        Self::new()
    }
}
