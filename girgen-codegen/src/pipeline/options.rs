//! Run parameters.

use std::path::PathBuf;

use crate::partition::OutputPolicy;

/// Parameters of one pipeline run, resolved by the caller from the command
/// line and the manifest.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Module base name (e.g. `GLib-2.0`), used for side files and file names.
    pub module_name: String,
    /// Directory holding the module's side files.
    pub config_dir: PathBuf,
    /// Output directory; `None` selects unified output.
    pub output_dir: Option<PathBuf>,
    /// Disable private-record elision.
    pub generate_all: bool,
    /// Split type categories into 27 alpha buckets.
    pub alpha_names: bool,
    /// Write one file per interface, record and class.
    pub single_file_per_class: bool,
    /// Module boilerplate prepended to the IR's own boilerplate.
    pub boilerplate: String,
    /// Package config name handed to post-processing.
    pub pkg_config_name: Option<String>,
    /// Attach a [`VerboseReport`](crate::VerboseReport) to the output.
    pub verbose: bool,
}

impl RunOptions {
    /// Options for `module_name` with side files in the current directory.
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            config_dir: PathBuf::from("."),
            output_dir: None,
            generate_all: false,
            alpha_names: false,
            single_file_per_class: false,
            boilerplate: String::new(),
            pkg_config_name: None,
            verbose: false,
        }
    }

    pub fn config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn generate_all(mut self, yes: bool) -> Self {
        self.generate_all = yes;
        self
    }

    pub fn alpha_names(mut self, yes: bool) -> Self {
        self.alpha_names = yes;
        self
    }

    pub fn single_file_per_class(mut self, yes: bool) -> Self {
        self.single_file_per_class = yes;
        self
    }

    pub fn boilerplate(mut self, text: impl Into<String>) -> Self {
        self.boilerplate = text.into();
        self
    }

    pub fn pkg_config_name(mut self, name: impl Into<String>) -> Self {
        self.pkg_config_name = Some(name.into());
        self
    }

    pub fn verbose(mut self, yes: bool) -> Self {
        self.verbose = yes;
        self
    }

    /// The output policy these options select.
    pub fn policy(&self) -> OutputPolicy {
        OutputPolicy::select(
            self.output_dir.as_deref(),
            self.alpha_names,
            self.single_file_per_class,
        )
    }

    /// Package config name, defaulting to the lower-cased module name.
    pub fn resolved_pkg_config_name(&self) -> String {
        self.pkg_config_name
            .clone()
            .unwrap_or_else(|| self.module_name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::TypeSplit;

    #[test]
    fn test_default_pkg_config_name() {
        let options = RunOptions::new("GLib-2.0");
        assert_eq!(options.resolved_pkg_config_name(), "glib-2.0");

        let options = options.pkg_config_name("glib-2.0-custom");
        assert_eq!(options.resolved_pkg_config_name(), "glib-2.0-custom");
    }

    #[test]
    fn test_policy_precedence() {
        assert_eq!(RunOptions::new("Test").policy(), OutputPolicy::Unified);

        let options = RunOptions::new("Test")
            .output_dir("out")
            .single_file_per_class(true)
            .alpha_names(true);
        assert_eq!(options.policy(), OutputPolicy::Files {
            dir: PathBuf::from("out"),
            split: TypeSplit::AlphaBuckets,
        });
    }
}
