//! Core operations.
//!
//! This module contains the business logic for girgen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod inputs;

pub use check::check;
pub use generate::{GenerateOptions, generate};
pub use inputs::{InputArgs, Inputs};
