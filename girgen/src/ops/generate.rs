//! Generate operation - code generation for IR files.

use std::io::Write;

use eyre::{Context, Result};
use girgen_codegen::{Pipeline, PostProcess, RunOutput, SkeletonSynthesizer};

use super::inputs::{Inputs, load_module, load_registry};
use crate::reports::{GenerateReport, ModuleSummary};

/// Options for the generate operation that are not part of [`Inputs`].
#[derive(Debug, Default)]
pub struct GenerateOptions {
    /// Keep private records.
    pub generate_all: bool,
    /// One file per interface, record and class.
    pub single_file_per_class: bool,
    /// Module boilerplate text.
    pub boilerplate: String,
    pub verbose: bool,
}

/// Post-processing step printing the unified output on stdout.
pub struct PrintUnified;

impl PostProcess for PrintUnified {
    fn name(&self) -> &'static str {
        "print-unified"
    }

    fn run(&self, output: &RunOutput) -> Result<()> {
        if output.unified.is_empty() {
            return Ok(());
        }
        print_code(&output.unified).wrap_err("Failed to write generated code to stdout")
    }
}

fn print_code(code: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(code.as_bytes())?;
    if !code.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()
}

/// Execute the generate operation.
///
/// Every IR file is generated with its own copy of the preloaded registry,
/// one after the other.
pub async fn generate(inputs: &Inputs, opts: &GenerateOptions) -> Result<GenerateReport> {
    let registry = load_registry(&inputs.prerequisites)?;
    let pipeline = Pipeline::new(SkeletonSynthesizer).post_process(PrintUnified);

    let mut report = GenerateReport::default();
    for ir in &inputs.ir_files {
        let module = load_module(ir)?;
        let options = inputs
            .run_options(ir)
            .generate_all(opts.generate_all)
            .single_file_per_class(opts.single_file_per_class)
            .boilerplate(opts.boilerplate.as_str())
            .verbose(opts.verbose);

        let output = pipeline.run(module, registry.clone(), &options).await;
        report.modules.push(ModuleSummary::from(&output));
    }
    Ok(report)
}
