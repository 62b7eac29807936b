//! Intermediate representation types for the girgen binding generator.
//!
//! This crate provides the declaration model shared by the whole pipeline.
//! An external parser turns library metadata into a [`Module`]; the codegen
//! crate consumes it.
//!
//! # Architecture
//!
//! ```text
//! metadata (external parser) → girgen-ir (Module, Registry) → girgen-codegen
//! ```
//!
//! The IR types are designed to be:
//! - Language-agnostic (no Swift-specific concerns)
//! - Ordered (declaration order is part of the contract)
//! - Serializable (the binary reads modules as JSON)

mod module;
mod registry;
mod types;

pub use module::{Declaration, DeclKind, Field, Member, Module, Param, Signature};
pub use registry::{KnownType, Registry};
pub use types::Category;
