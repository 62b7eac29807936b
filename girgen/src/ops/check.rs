//! Check operation - side file and IR resolution without generating code.

use std::path::Path;

use eyre::Result;
use girgen_codegen::{Configuring, Severity, filter};
use girgen_ir::Category;

use super::inputs::{Inputs, load_module, load_registry};
use crate::reports::{CheckReport, FilterCounts, ModuleCheck, describe};

/// Execute the check operation.
///
/// Loads every IR file and prerequisite, resolves the side files of each
/// module and counts the declarations that would be generated.
pub fn check(inputs: &Inputs, manifest: Option<&Path>, generate_all: bool) -> Result<CheckReport> {
    let registry = load_registry(&inputs.prerequisites)?;
    let mut report = CheckReport {
        manifest: manifest.map(Path::to_path_buf),
        modules: Vec::new(),
    };

    for ir in &inputs.ir_files {
        let module = load_module(ir)?;
        let name = girgen_core::module_name(ir);

        let mut configuring = Configuring::new(&name, registry.clone());
        filter::resolve(&mut configuring, &inputs.config_dir);
        let (ctx, diagnostics) = configuring.freeze();
        let filters = ctx.filters();

        let categories = Category::ALL
            .into_iter()
            .map(|category| {
                let declared = module.of(category).count();
                let selected = filter::select(&module, category, filters, generate_all)
                    .declarations
                    .len();
                (category, declared, selected)
            })
            .collect();

        let (errors, warnings): (Vec<_>, Vec<_>) = diagnostics
            .iter()
            .filter(|d| d.severity != Severity::Info)
            .partition(|d| d.severity.is_error());

        report.modules.push(ModuleCheck {
            categories,
            filters: FilterCounts {
                blacklist: filters.blacklist.len(),
                whitelist: filters.whitelist.len(),
                namespace_replacements: filters.namespace_replacements.len(),
                callback_suffixes: filters.callback_suffixes.len(),
                verbatim: filters.verbatim_constants.len(),
                overrides: filters.overrides.len(),
            },
            evicted: filters
                .whitelist
                .iter()
                .filter(|name| registry.is_known(name))
                .count(),
            warnings: warnings.into_iter().map(describe).collect(),
            errors: errors.into_iter().map(describe).collect(),
            module: name,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_check_counts_selected_declarations() {
        let temp = TempDir::new().unwrap();
        let gobject = temp.path().join("GObject-2.0.json");
        fs::write(
            &gobject,
            r#"{ "declarations": [ { "name": "Object", "kind": "class" } ] }"#,
        )
        .unwrap();
        let gtk = temp.path().join("Gtk-3.0.json");
        fs::write(
            &gtk,
            r#"{ "declarations": [
                { "name": "Widget", "kind": "class" },
                { "name": "WidgetPrivate", "kind": "record" },
                { "name": "Border", "kind": "record" },
                { "name": "Hidden", "kind": "record" }
            ] }"#,
        )
        .unwrap();
        fs::write(temp.path().join("Gtk-3.0.blacklist"), "Hidden\n").unwrap();
        fs::write(temp.path().join("Gtk-3.0.whitelist"), "Object\nMissing\n").unwrap();

        let inputs = Inputs {
            config_dir: temp.path().to_path_buf(),
            ir_files: vec![gtk],
            prerequisites: vec![gobject],
            output_dir: None,
            pkg_config_name: None,
            alpha_names: false,
        };
        let report = check(&inputs, None, false).unwrap();

        assert!(report.is_valid());
        let module = &report.modules[0];
        assert_eq!(module.module, "Gtk-3.0");
        assert!(module.categories.contains(&(Category::Record, 3, 1)));
        assert!(module.categories.contains(&(Category::Class, 1, 1)));
        assert_eq!(module.filters.blacklist, 1);
        assert_eq!(module.filters.whitelist, 2);
        assert_eq!(module.evicted, 1);
    }

    #[test]
    fn test_check_without_ir_files() {
        let inputs = Inputs {
            config_dir: PathBuf::from("."),
            ir_files: vec![],
            prerequisites: vec![],
            output_dir: None,
            pkg_config_name: None,
            alpha_names: false,
        };
        let report = check(&inputs, None, false).unwrap();
        assert!(report.modules.is_empty());
    }
}
