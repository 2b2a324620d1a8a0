use std::fmt;
use std::path::PathBuf;
use tracing::warn;

/// How resolution carried on after failing to find an imported unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// An empty placeholder took the unit's place.
    Placeholder,
    /// The edge was left out.
    Skipped,
}

/// Non-fatal problems found while building a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnresolvedImport {
        name: String,
        /// Unit name for unit-level resolution, file path for file-level.
        importer: String,
        recovery: Recovery,
    },
    DuplicateUnit {
        name: String,
        kept: PathBuf,
        dropped: PathBuf,
    },
}

impl Diagnostic {
    pub fn emit(&self) {
        warn!("{}", self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedImport {
                name,
                recovery: Recovery::Placeholder,
                ..
            } => write!(f, "module {} not defined in any files; creating empty", name),
            Diagnostic::UnresolvedImport {
                name,
                recovery: Recovery::Skipped,
                ..
            } => write!(f, "module {} not defined in any files; skipping...", name),
            Diagnostic::DuplicateUnit {
                name,
                kept,
                dropped,
            } => write!(
                f,
                "module {} defined in both {} and {}; using {}",
                name,
                kept.display(),
                dropped.display(),
                kept.display()
            ),
        }
    }
}
