use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// How an output file is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace the file with `preamble + content`.
    Overwrite,
    /// Add `content` to the end of the file.
    ///
    /// Only valid for files created earlier in the same run. Callers are
    /// responsible for never appending to a file left over from a previous
    /// run; a missing file is created with the preamble instead.
    Append,
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was created or replaced
    Created,
    /// Content was appended to an existing file
    Appended,
}

/// A file to be written by the generator
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: PathBuf,
    content: String,
    mode: WriteMode,
}

impl OutputFile {
    /// Create a file that replaces any existing content
    pub fn overwrite(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            mode: WriteMode::Overwrite,
        }
    }

    /// Create a file whose content is appended to an existing file
    pub fn append(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            mode: WriteMode::Append,
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the write mode
    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Write the file, prefixing fresh files with `preamble`
    pub fn write(&self, preamble: &str) -> Result<WriteResult> {
        match self.mode {
            WriteMode::Append if self.path.exists() => {
                let existing = std::fs::read_to_string(&self.path)
                    .wrap_err_with(|| format!("failed to read '{}'", self.path.display()))?;
                write_file(&self.path, &(existing + &self.content))?;
                Ok(WriteResult::Appended)
            }
            WriteMode::Append | WriteMode::Overwrite => {
                write_file(&self.path, &format!("{}{}", preamble, self.content))?;
                Ok(WriteResult::Created)
            }
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

/// Remove a file if it exists.
///
/// Returns true if a file was removed.
pub fn remove_stale(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).wrap_err_with(|| format!("failed to remove '{}'", path.display())),
    }
}
