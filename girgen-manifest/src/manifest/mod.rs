//! Manifest types and parsing for girgen.toml files.

mod file;
mod parse;

use std::path::PathBuf;

pub use file::GirgenToml;
pub use parse::MANIFEST_FILE;
use serde::Deserialize;

/// Root manifest for girgen.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// Module generation settings
    #[serde(default)]
    pub module: ModuleConfig,
}

/// Settings for the module to generate.
///
/// Every value can be overridden on the command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ModuleConfig {
    /// IR file of the module to generate
    pub ir: Option<PathBuf>,

    /// Library name passed to post-processing (defaults to the lower-cased module name)
    pub pkg_config: Option<String>,

    /// Directory to write generated files into; unified output when absent
    pub output_dir: Option<PathBuf>,

    /// Write type declarations into 27 fixed alphabetical files
    #[serde(default)]
    pub alpha_names: bool,

    /// IR files whose declarations are preloaded into the registry
    #[serde(default)]
    pub prerequisites: Vec<PathBuf>,
}
