//! Diagnostic types for the generation pipeline.
//!
//! Nothing that goes wrong during a run aborts it. Unreadable side files,
//! failed writes and failing post-processing hooks are all downgraded to a
//! [`Diagnostic`] so that the barrier completes and partial output stays
//! usable.

use std::path::PathBuf;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// An operation failed; its output is missing.
    Error,
    /// Something was skipped or fell back to a default.
    Warning,
    /// Informational message about the run.
    Info,
}

impl Severity {
    /// Returns true if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns true if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Pipeline stage that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Side files, registry and output directory preparation.
    Configure,
    /// Per-category synthesis.
    Generate,
    /// Background file writes.
    Write,
    /// Post-processing hooks.
    PostProcess,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Configure => write!(f, "configure"),
            Stage::Generate => write!(f, "generate"),
            Stage::Write => write!(f, "write"),
            Stage::PostProcess => write!(f, "post-process"),
        }
    }
}

/// A diagnostic message from a pipeline stage.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The stage that produced this diagnostic.
    pub stage: Stage,
    /// The diagnostic message.
    pub message: String,
    /// The file the diagnostic refers to, if any.
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(stage: Stage, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, stage, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(stage: Stage, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, stage, message)
    }

    /// Create a new info diagnostic.
    pub fn info(stage: Stage, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, stage, message)
    }

    fn new(severity: Severity, stage: Stage, message: impl Into<String>) -> Self {
        Self {
            severity,
            stage,
            message: message.into(),
            location: None,
        }
    }

    /// Add a file location to this diagnostic.
    pub fn at(mut self, location: impl Into<PathBuf>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Emit this diagnostic as a tracing event.
    pub(crate) fn trace(&self) {
        let location = self
            .location
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        match self.severity {
            Severity::Error => {
                tracing::error!(stage = %self.stage, location = %location, "{}", self.message)
            }
            Severity::Warning => {
                tracing::warn!(stage = %self.stage, location = %location, "{}", self.message)
            }
            Severity::Info => {
                tracing::info!(stage = %self.stage, location = %location, "{}", self.message)
            }
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.stage, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc.display())?;
        }
        Ok(())
    }
}
