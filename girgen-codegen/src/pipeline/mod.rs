//! Generation pipeline.
//!
//! This module provides the [`Pipeline`] orchestrator that takes a module's
//! declarations from filtering to written files. The pipeline provides:
//!
//! - One concurrent task per declaration category
//! - A barrier that waits for every background write
//! - Post-processing hooks run once per run
//! - Unified diagnostics collection
//!
//! # Example
//!
//! ```ignore
//! use girgen_codegen::{Pipeline, RunOptions, SkeletonSynthesizer};
//!
//! let options = RunOptions::new("GLib-2.0").output_dir("Sources/GLib");
//! let output = Pipeline::new(SkeletonSynthesizer)
//!     .run(module, registry, &options)
//!     .await;
//!
//! // Check for warnings
//! for diag in output.warnings() {
//!     eprintln!("warning: {}", diag.message);
//! }
//! ```

mod diagnostic;
mod options;
mod output;
mod post_process;
mod runner;

pub use diagnostic::{Diagnostic, Severity, Stage};
pub use options::RunOptions;
pub use output::{RunOutput, RunStats};
pub use post_process::PostProcess;
pub use runner::Pipeline;
