use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use girgen_manifest::GirgenToml;

use super::UnwrapOrExit;
use crate::{
    ops::{self, InputArgs, Inputs},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// IR files to check (defaults to the one in girgen.toml)
    pub ir: Vec<PathBuf>,

    /// Directory holding girgen.toml and the module side files
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,

    /// IR files whose names are known but not generated
    #[arg(short, long = "prerequisite")]
    pub prerequisites: Vec<PathBuf>,

    /// Count private records as selected
    #[arg(short = 'a', long)]
    pub generate_all: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let manifest = GirgenToml::find(&self.config_dir).unwrap_or_exit();
        let inputs = Inputs::resolve(
            InputArgs {
                config_dir: &self.config_dir,
                ir: &self.ir,
                prerequisites: &self.prerequisites,
                ..InputArgs::default()
            },
            manifest.as_ref().map(GirgenToml::manifest),
        );

        let report = ops::check(
            &inputs,
            manifest.as_ref().map(GirgenToml::path),
            self.generate_all,
        )?;
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
