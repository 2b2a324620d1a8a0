use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DependError>;

#[derive(Error, Debug)]
pub enum DependError {
    /// Unit open and close lines do not pair up; fatal for the whole build.
    #[error("Unmatched start/end of units in {} ({begins} begins/{ends} ends)", path.display())]
    Structural {
        path: PathBuf,
        begins: usize,
        ends: usize,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid macro pattern '{pattern}': {source}")]
    InvalidMacro {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid macro definition '{0}', expected NAME=VALUE")]
    MacroDefinition(String),
}
