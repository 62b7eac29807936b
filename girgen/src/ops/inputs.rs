//! Input resolution.
//!
//! Merges `girgen.toml` with the command line and loads IR files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};
use girgen_codegen::RunOptions;
use girgen_ir::{Module, Registry};
use girgen_manifest::Manifest;

/// Input values given on the command line.
#[derive(Debug)]
pub struct InputArgs<'a> {
    pub config_dir: &'a Path,
    pub ir: &'a [PathBuf],
    pub prerequisites: &'a [PathBuf],
    pub output_dir: Option<&'a Path>,
    pub pkg_config_name: Option<&'a str>,
    pub alpha_names: bool,
}

impl Default for InputArgs<'_> {
    fn default() -> Self {
        Self {
            config_dir: Path::new("."),
            ir: &[],
            prerequisites: &[],
            output_dir: None,
            pkg_config_name: None,
            alpha_names: false,
        }
    }
}

/// Resolved inputs of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    /// Directory holding the manifest and side files.
    pub config_dir: PathBuf,
    /// IR files of the modules to generate, in order.
    pub ir_files: Vec<PathBuf>,
    /// IR files preloaded into the registry.
    pub prerequisites: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub pkg_config_name: Option<String>,
    pub alpha_names: bool,
}

impl Inputs {
    /// Merge command line values with the manifest.
    ///
    /// Command line values win; IR files and prerequisites from both sources
    /// are combined. Manifest paths are relative to the config directory.
    pub fn resolve(args: InputArgs<'_>, manifest: Option<&Manifest>) -> Self {
        let config_dir = args.config_dir.to_path_buf();
        let module = manifest.map(|m| &m.module).cloned().unwrap_or_default();
        let in_config = |path: PathBuf| config_dir.join(path);

        let mut ir_files: Vec<PathBuf> = module.ir.into_iter().map(in_config).collect();
        extend_unique(&mut ir_files, args.ir.iter().cloned());

        let mut prerequisites: Vec<PathBuf> =
            module.prerequisites.into_iter().map(in_config).collect();
        extend_unique(&mut prerequisites, args.prerequisites.iter().cloned());

        Self {
            output_dir: args
                .output_dir
                .map(Path::to_path_buf)
                .or_else(|| module.output_dir.map(in_config)),
            pkg_config_name: args
                .pkg_config_name
                .map(str::to_string)
                .or(module.pkg_config),
            alpha_names: args.alpha_names || module.alpha_names,
            ir_files,
            prerequisites,
            config_dir,
        }
    }

    /// Run options for one IR file.
    pub fn run_options(&self, ir: &Path) -> RunOptions {
        let mut options = RunOptions::new(girgen_core::module_name(ir))
            .config_dir(&self.config_dir)
            .alpha_names(self.alpha_names);
        if let Some(dir) = &self.output_dir {
            options = options.output_dir(dir);
        }
        if let Some(name) = &self.pkg_config_name {
            options = options.pkg_config_name(name);
        }
        options
    }
}

fn extend_unique(paths: &mut Vec<PathBuf>, more: impl IntoIterator<Item = PathBuf>) {
    for path in more {
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
}

/// Load a module from its JSON IR.
pub fn load_module(path: &Path) -> Result<Module> {
    let content =
        fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).wrap_err_with(|| format!("Invalid IR in {}", path.display()))
}

/// Preload the declarations of every prerequisite into a registry.
pub fn load_registry(prerequisites: &[PathBuf]) -> Result<Registry> {
    let mut registry = Registry::new();
    for path in prerequisites {
        let module = load_module(path)?;
        tracing::debug!(
            path = %path.display(),
            declarations = module.declarations.len(),
            "prerequisite loaded"
        );
        registry.preload(&module);
    }
    Ok(registry)
}
