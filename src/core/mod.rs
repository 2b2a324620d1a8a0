pub mod config;
pub mod diagnostic;
pub mod error;
pub mod graph;
pub mod model;
pub mod project;
pub mod resolver;
pub mod scanner;

pub use config::{MergePolicy, ProjectConfig};
pub use diagnostic::{Diagnostic, Recovery};
pub use error::{DependError, Result};
pub use graph::{GraphBuilder, ImportEdge, UnitGraph, UnitNode};
pub use model::{SourceFile, Unit, UnitKind};
pub use project::{merge_units, Project, ProjectSources};
pub use resolver::{Dependency, DependencyResolver};
pub use scanner::FileScanner;
