//! Concurrent code generation pipeline for girgen.
//!
//! This crate turns the declarations of a [`girgen_ir::Module`] into
//! generated source files.
//!
//! # Module Organization
//!
//! - [`filter`] - Side file resolution and declaration selection
//! - [`partition`] - Output policies and the assignment of text to files
//! - [`writer`] - Background writes, bucket serialization and the produced file set
//! - [`pipeline`] - The orchestrator, run options and diagnostics
//! - [`skeleton`] - A synthesizer emitting Swift skeleton declarations

mod context;
pub mod filter;
pub mod partition;
pub mod pipeline;
mod report;
pub mod skeleton;
mod synth;
pub mod writer;

pub use context::{Configuring, GenerationContext};
pub use partition::{Bucket, FileNamer, OutputPolicy, TypeSplit};
pub use pipeline::{
    Diagnostic, Pipeline, PostProcess, RunOptions, RunOutput, RunStats, Severity, Stage,
};
pub use report::VerboseReport;
pub use skeleton::SkeletonSynthesizer;
pub use synth::Synthesizer;
