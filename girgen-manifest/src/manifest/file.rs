use std::path::{Path, PathBuf};

use super::{Manifest, parse::MANIFEST_FILE};
use crate::{Error, Result};

/// Represents a girgen.toml file with both raw content and parsed manifest.
pub struct GirgenToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl GirgenToml {
    /// Open and parse a girgen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Open the girgen.toml in `dir`, if there is one.
    pub fn find(dir: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = dir.as_ref().join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        Self::open(path).map(Some)
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_find_missing_manifest() {
        let temp = TempDir::new().unwrap();
        assert!(GirgenToml::find(temp.path()).unwrap().is_none());
    }

    #[test]
    fn test_find_existing_manifest() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(MANIFEST_FILE),
            "[module]\nir = \"GLib-2.0.json\"\nalpha-names = true\n",
        )
        .unwrap();

        let toml = GirgenToml::find(temp.path()).unwrap().unwrap();
        assert!(toml.manifest().module.alpha_names);
        assert!(toml.content().contains("alpha-names"));
        assert_eq!(toml.path(), temp.path().join(MANIFEST_FILE));
    }
}
