//! Manifest parsing from files and strings.

use std::str::FromStr;

use super::Manifest;
use crate::{Error, Result, error::SourceContext};

/// File name of the manifest inside the configuration directory.
pub const MANIFEST_FILE: &str = "girgen.toml";

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, MANIFEST_FILE)
    }
}

impl Manifest {
    /// Parse a girgen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, &source_ctx)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    let module = &manifest.module;

    if module.pkg_config.as_deref().is_some_and(str::is_empty) {
        return Err(ctx.validation_error("pkg-config name must not be empty", "pkg-config"));
    }
    if module
        .output_dir
        .as_ref()
        .is_some_and(|dir| dir.as_os_str().is_empty())
    {
        return Err(ctx.validation_error("output directory must not be empty", "output-dir"));
    }
    if let Some(ir) = &module.ir
        && module.prerequisites.contains(ir)
    {
        return Err(ctx.validation_error(
            format!("'{}' cannot be its own prerequisite", ir.display()),
            "prerequisites",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let manifest: Manifest = r#"
            [module]
            ir = "GLib-2.0.json"
            pkg-config = "glib-2.0"
            output-dir = "Sources/GLib"
            alpha-names = true
            prerequisites = ["GObject-2.0.json"]
        "#
        .parse()
        .unwrap();

        let module = manifest.module;
        assert_eq!(module.ir, Some(PathBuf::from("GLib-2.0.json")));
        assert_eq!(module.pkg_config.as_deref(), Some("glib-2.0"));
        assert_eq!(module.output_dir, Some(PathBuf::from("Sources/GLib")));
        assert!(module.alpha_names);
        assert_eq!(module.prerequisites, [PathBuf::from("GObject-2.0.json")]);
    }

    #[test]
    fn test_parse_empty_manifest() {
        let manifest: Manifest = "".parse().unwrap();
        assert!(manifest.module.ir.is_none());
        assert!(!manifest.module.alpha_names);
    }

    #[test]
    fn test_parse_error() {
        let err = "[module]\nalpha-names = \"yes\"\n".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = "[module]\nsplit = true\n".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_empty_pkg_config_rejected() {
        let err = "[module]\npkg-config = \"\"\n".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_self_prerequisite_rejected() {
        let err = "[module]\nir = \"A.json\"\nprerequisites = [\"A.json\"]\n"
            .parse::<Manifest>()
            .unwrap_err();
        assert_eq!(err.to_string(), "'A.json' cannot be its own prerequisite");
    }
}
