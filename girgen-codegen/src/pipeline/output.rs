//! Result of a pipeline run.

use std::{collections::BTreeSet, path::PathBuf};

use girgen_ir::Category;

use super::Diagnostic;
use crate::VerboseReport;

/// Counters collected while generating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Declarations with non-empty text, per category in processing order.
    pub generated: Vec<(Category, usize)>,
    /// Blacklisted declarations skipped over all categories.
    pub blacklisted: usize,
    /// Names of elided private records.
    pub elided: Vec<String>,
}

impl RunStats {
    /// Declarations with non-empty text over all categories.
    pub fn total_generated(&self) -> usize {
        self.generated.iter().map(|(_, n)| n).sum()
    }

    /// Declarations with non-empty text in one category.
    pub fn generated_in(&self, category: Category) -> usize {
        self.generated
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Everything a run produced, handed to post-processing.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Module base name.
    pub module: String,
    /// Resolved package config name.
    pub pkg_config_name: String,
    /// Unified output; empty when writing files.
    pub unified: String,
    /// Output directory, if files were written.
    pub output_dir: Option<PathBuf>,
    /// Files written this run.
    pub files: BTreeSet<PathBuf>,
    /// Diagnostics from every stage.
    pub diagnostics: Vec<Diagnostic>,
    pub stats: RunStats,
    /// Present on verbose runs.
    pub report: Option<VerboseReport>,
}

impl RunOutput {
    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }

    /// Get all error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    /// Produced file names relative to the output directory.
    pub fn file_names(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|path| {
                let relative = self
                    .output_dir
                    .as_deref()
                    .and_then(|dir| path.strip_prefix(dir).ok())
                    .unwrap_or(path.as_path());
                relative.to_string_lossy().into_owned()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Stage;

    fn output() -> RunOutput {
        RunOutput {
            module: "Test".to_string(),
            pkg_config_name: "test".to_string(),
            unified: String::new(),
            output_dir: Some(PathBuf::from("out")),
            files: [PathBuf::from("out/Test.swift"), PathBuf::from("out/Test-A.swift")]
                .into_iter()
                .collect(),
            diagnostics: vec![
                Diagnostic::warning(Stage::Write, "disk full"),
                Diagnostic::error(Stage::Generate, "panicked"),
            ],
            stats: RunStats {
                generated: vec![(Category::Alias, 2), (Category::Class, 3)],
                ..RunStats::default()
            },
            report: None,
        }
    }

    #[test]
    fn test_file_names_are_relative_and_sorted() {
        assert_eq!(output().file_names(), ["Test-A.swift", "Test.swift"]);
    }

    #[test]
    fn test_diagnostic_filters() {
        let output = output();
        assert!(output.has_errors());
        assert_eq!(output.warnings().count(), 1);
        assert_eq!(output.errors().count(), 1);
    }

    #[test]
    fn test_stats() {
        let stats = output().stats;
        assert_eq!(stats.total_generated(), 5);
        assert_eq!(stats.generated_in(Category::Class), 3);
        assert_eq!(stats.generated_in(Category::Record), 0);
    }
}
