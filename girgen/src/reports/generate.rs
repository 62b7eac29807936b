//! Generate command report data structures.

use std::path::PathBuf;

use girgen_codegen::{RunOutput, VerboseReport};

use super::{
    describe,
    output::{Output, Report},
};

/// Report data from generating one or more modules.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub modules: Vec<ModuleSummary>,
}

impl GenerateReport {
    /// Number of error diagnostics over all modules.
    pub fn error_count(&self) -> usize {
        self.modules.iter().map(|m| m.errors.len()).sum()
    }
}

/// Summary of one module's run.
#[derive(Debug)]
pub struct ModuleSummary {
    pub module: String,
    pub pkg_config_name: String,
    /// Output directory; `None` when the unified output went to stdout.
    pub output_dir: Option<PathBuf>,
    /// Number of files written.
    pub files: usize,
    /// Declarations with generated text.
    pub generated: usize,
    pub blacklisted: usize,
    pub elided: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub verbose: Option<VerboseReport>,
}

impl From<&RunOutput> for ModuleSummary {
    fn from(output: &RunOutput) -> Self {
        Self {
            module: output.module.clone(),
            pkg_config_name: output.pkg_config_name.clone(),
            output_dir: output.output_dir.clone(),
            files: output.files.len(),
            generated: output.stats.total_generated(),
            blacklisted: output.stats.blacklisted,
            elided: output.stats.elided.clone(),
            warnings: output.warnings().map(describe).collect(),
            errors: output.errors().map(describe).collect(),
            verbose: output.report.clone(),
        }
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for summary in &self.modules {
            summary.render(out);
        }
    }
}

impl ModuleSummary {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        for error in &self.errors {
            out.error(error);
        }

        if let Some(dir) = &self.output_dir {
            out.key_value(
                &self.module,
                &format!(
                    "{} declarations in {} files under {}",
                    self.generated,
                    self.files,
                    dir.display()
                ),
            );
            out.key_value_indented("pkg-config", &self.pkg_config_name);
            if self.blacklisted > 0 {
                out.key_value_indented("blacklisted", &self.blacklisted.to_string());
            }
            if !self.elided.is_empty() {
                out.key_value_indented("elided", &self.elided.join(", "));
            }
        }

        if let Some(report) = &self.verbose {
            out.preformatted(&report.to_string());
        }
    }
}
