//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod output;

pub use check::{CheckReport, FilterCounts, ModuleCheck};
pub use generate::{GenerateReport, ModuleSummary};
use girgen_codegen::Diagnostic;
pub use output::{Report, TerminalOutput};

/// One-line description of a diagnostic, pointing at its file if any.
pub(crate) fn describe(diagnostic: &Diagnostic) -> String {
    match &diagnostic.location {
        Some(loc) => format!("{}\n  --> {}", diagnostic.message, loc.display()),
        None => format!("{} ({})", diagnostic.message, diagnostic.stage),
    }
}
