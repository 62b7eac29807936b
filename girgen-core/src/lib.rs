//! Core utilities and types for the girgen binding generator.
//!
//! This crate provides file writing primitives and string helpers used
//! across the girgen workspace.

mod file;
mod utils;

// File operations
pub use file::{OutputFile, WriteMode, WriteResult, remove_stale};
// String utilities
pub use utils::{module_name, non_empty_lines, to_camel_case, to_pascal_case};
