use std::{fs, path::PathBuf};

use clap::Args;
use eyre::{Context, Result, bail};
use girgen_manifest::GirgenToml;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions, InputArgs, Inputs},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// IR files to generate code for
    pub ir: Vec<PathBuf>,

    /// Directory for generated files (prints to stdout when omitted)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Directory holding girgen.toml and the module side files
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,

    /// IR files whose names are known but not generated
    #[arg(short, long = "prerequisite")]
    pub prerequisites: Vec<PathBuf>,

    /// Keep private records
    #[arg(short = 'a', long)]
    pub generate_all: bool,

    /// Write one file per interface, record and class
    #[arg(short, long)]
    pub single_file_per_class: bool,

    /// Group type declarations into one file per initial letter
    #[arg(long)]
    pub alpha_names: bool,

    /// Name used to link against the C library
    #[arg(long)]
    pub pkg_config_name: Option<String>,

    /// File whose content precedes the generated module file
    #[arg(short = 'm', long)]
    pub boilerplate: Option<PathBuf>,
}

impl GenerateCommand {
    /// Run the generate command
    pub async fn run(&self, verbose: bool) -> Result<()> {
        let manifest = GirgenToml::find(&self.config_dir).unwrap_or_exit();
        let inputs = Inputs::resolve(
            InputArgs {
                config_dir: &self.config_dir,
                ir: &self.ir,
                prerequisites: &self.prerequisites,
                output_dir: self.output_dir.as_deref(),
                pkg_config_name: self.pkg_config_name.as_deref(),
                alpha_names: self.alpha_names,
            },
            manifest.as_ref().map(GirgenToml::manifest),
        );
        if inputs.ir_files.is_empty() {
            bail!("No IR files given and none configured in girgen.toml");
        }

        let boilerplate = match &self.boilerplate {
            Some(path) => fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read boilerplate {}", path.display()))?,
            None => String::new(),
        };
        let opts = GenerateOptions {
            generate_all: self.generate_all,
            single_file_per_class: self.single_file_per_class,
            boilerplate,
            verbose,
        };

        let report = ops::generate(&inputs, &opts).await?;
        report.render(&mut TerminalOutput::stderr());

        match report.error_count() {
            0 => Ok(()),
            1 => bail!("Generation finished with 1 error"),
            n => bail!("Generation finished with {n} errors"),
        }
    }
}
