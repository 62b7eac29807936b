//! Check command report data structures.

use std::path::PathBuf;

use girgen_ir::Category;

use super::output::{Output, Report};

/// Report data from resolving a run without generating code.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Manifest file, if one was found.
    pub manifest: Option<PathBuf>,
    pub modules: Vec<ModuleCheck>,
}

/// Resolution results for one module.
#[derive(Debug, Default)]
pub struct ModuleCheck {
    pub module: String,
    /// Declared and selected declarations per category, in processing order.
    pub categories: Vec<(Category, usize, usize)>,
    pub filters: FilterCounts,
    /// Whitelisted names that were known before eviction.
    pub evicted: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Sizes of the loaded side files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FilterCounts {
    pub blacklist: usize,
    pub whitelist: usize,
    pub namespace_replacements: usize,
    pub callback_suffixes: usize,
    pub verbatim: usize,
    pub overrides: usize,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.modules.iter().all(|m| m.errors.is_empty())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        if let Some(manifest) = &self.manifest {
            out.key_value("Manifest", &manifest.display().to_string());
            out.newline();
        }
        for module in &self.modules {
            module.render(out);
        }
    }
}

impl ModuleCheck {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }

        let declared: usize = self.categories.iter().map(|(_, n, _)| n).sum();
        let selected: usize = self.categories.iter().map(|(_, _, n)| n).sum();
        let mark = if self.errors.is_empty() { "✓" } else { "✗" };
        out.preformatted(&format!(
            "{mark} {}: {declared} declarations, {selected} selected\n",
            self.module
        ));

        out.section("Side files");
        let f = &self.filters;
        out.key_value_indented("blacklist", &f.blacklist.to_string());
        out.key_value_indented(
            "whitelist",
            &format!("{} ({} known names evicted)", f.whitelist, self.evicted),
        );
        out.key_value_indented("namespace replacements", &f.namespace_replacements.to_string());
        out.key_value_indented("callback suffixes", &f.callback_suffixes.to_string());
        out.key_value_indented("verbatim constants", &f.verbatim.to_string());
        out.key_value_indented("overrides", &f.overrides.to_string());

        let non_empty: Vec<_> = self.categories.iter().filter(|(_, n, _)| *n > 0).collect();
        if !non_empty.is_empty() {
            out.section("Declarations");
            for (category, declared, selected) in non_empty {
                out.list_item(&format!("{category}: {declared} ({selected} selected)"));
            }
        }
        out.newline();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::CapturedOutput;

    #[test]
    fn test_render_module() {
        let report = CheckReport {
            manifest: None,
            modules: vec![ModuleCheck {
                module: "GLib-2.0".to_string(),
                categories: vec![
                    (Category::Alias, 0, 0),
                    (Category::Record, 3, 2),
                    (Category::Function, 5, 4),
                ],
                filters: FilterCounts {
                    blacklist: 2,
                    whitelist: 1,
                    callback_suffixes: 4,
                    ..FilterCounts::default()
                },
                evicted: 1,
                warnings: vec![],
                errors: vec![],
            }],
        };
        let mut out = CapturedOutput::default();
        report.render(&mut out);

        assert!(report.is_valid());
        assert_eq!(out.lines, [
            "✓ GLib-2.0: 8 declarations, 6 selected",
            "Side files:",
            "  blacklist: 2",
            "  whitelist: 1 (1 known names evicted)",
            "  namespace replacements: 0",
            "  callback suffixes: 4",
            "  verbatim constants: 0",
            "  overrides: 0",
            "Declarations:",
            "  - record: 3 (2 selected)",
            "  - function: 5 (4 selected)",
            "",
        ]);
    }

    #[test]
    fn test_errors_invalidate_the_report() {
        let report = CheckReport {
            manifest: Some(PathBuf::from("girgen.toml")),
            modules: vec![ModuleCheck {
                module: "Broken".to_string(),
                errors: vec!["unreadable".to_string()],
                ..ModuleCheck::default()
            }],
        };
        assert!(!report.is_valid());
    }
}
