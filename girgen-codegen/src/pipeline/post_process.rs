//! Post-processing hook.

use eyre::Result;

use super::RunOutput;

/// A step run once after the barrier, with the complete output of the run.
///
/// Failures are recorded as diagnostics; they do not undo written files.
///
/// # Example
///
/// ```ignore
/// struct PrintFiles;
///
/// impl PostProcess for PrintFiles {
///     fn name(&self) -> &'static str { "print-files" }
///
///     fn run(&self, output: &RunOutput) -> Result<()> {
///         for file in &output.files {
///             println!("{}", file.display());
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait PostProcess: Send + Sync {
    /// The name of this step (for diagnostics and logging).
    fn name(&self) -> &'static str;

    /// Run the step.
    ///
    /// # Errors
    ///
    /// An error is downgraded to a diagnostic of the run.
    fn run(&self, output: &RunOutput) -> Result<()>;
}
