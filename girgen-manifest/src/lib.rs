// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Manifest and side-file loading for the girgen binding generator.

mod error;
mod manifest;
mod side_files;

pub use error::{Error, Result, SourceContext};
pub use manifest::{GirgenToml, MANIFEST_FILE, Manifest, ModuleConfig};
pub use side_files::{
    DEFAULT_CALLBACK_SUFFIXES, FilterSet, SideFiles, parse_namespace_replacements,
};
