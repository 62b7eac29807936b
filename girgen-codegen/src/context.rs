//! Generation context.
//!
//! A run mutates its registry and filters only while configuring. Once
//! configuration is done, [`Configuring::freeze`] turns them into a
//! [`GenerationContext`] that is shared read-only by every category task.

use std::sync::Arc;

use girgen_ir::Registry;
use girgen_manifest::FilterSet;

use crate::pipeline::Diagnostic;

/// Mutable state of a run before generation starts.
#[derive(Debug)]
pub struct Configuring {
    /// Module base name (e.g. `GLib-2.0`).
    pub module_name: String,
    /// Known types, records and functions.
    pub registry: Registry,
    /// Filter rules loaded from side files.
    pub filters: FilterSet,
    /// Diagnostics collected while configuring.
    pub diagnostics: Vec<Diagnostic>,
}

impl Configuring {
    /// Start configuring a run with a preloaded registry.
    pub fn new(module_name: impl Into<String>, registry: Registry) -> Self {
        Self {
            module_name: module_name.into(),
            registry,
            filters: FilterSet::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Finish configuring; nothing can mutate the registry afterwards.
    pub fn freeze(self) -> (Arc<GenerationContext>, Vec<Diagnostic>) {
        let ctx = GenerationContext {
            module_name: self.module_name,
            registry: self.registry,
            filters: self.filters,
        };
        (Arc::new(ctx), self.diagnostics)
    }
}

/// Read-only view of the registry and filters during generation.
#[derive(Debug)]
pub struct GenerationContext {
    module_name: String,
    registry: Registry,
    filters: FilterSet,
}

impl GenerationContext {
    /// Module base name.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Known types, records and functions.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Filter rules.
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Text prefixed to fresh output files.
    pub fn preamble(&self) -> &str {
        &self.filters.preamble
    }
}
