use std::{fs::File, io, path::PathBuf};

use clap::{Args, CommandFactory};
use eyre::{Context, Result};

use super::Cli;

#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    shell: clap_complete::Shell,

    /// Write the script to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl CompletionsCommand {
    pub fn run(&self) -> Result<()> {
        let mut cmd = Cli::command();
        let bin = cmd.get_name().to_string();
        match &self.output {
            Some(path) => {
                let mut file = File::create(path)
                    .wrap_err_with(|| format!("Failed to create {}", path.display()))?;
                clap_complete::generate(self.shell, &mut cmd, bin, &mut file);
            }
            None => clap_complete::generate(self.shell, &mut cmd, bin, &mut io::stdout()),
        }
        Ok(())
    }
}
