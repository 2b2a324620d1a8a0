//! # FORTDEPS
//!
//! Module-level dependency discovery for Fortran sources.
//!
//! Every `module`/`program` block in a set of files is indexed by name, its
//! `use` statements are resolved to the defining units, and the result is
//! projected onto files so a build tool can order compilation.
//!
//! ## Output Formats
//!
//! - **Makefile**: `obj.o : dep.o ...` rules
//! - **JSON**: files, units and unresolved imports
//! - **DOT**: the unit graph as Graphviz source

pub mod core;
pub mod formatters;
pub mod parsers;
