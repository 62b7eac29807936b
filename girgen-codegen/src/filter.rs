//! Filter resolution and declaration selection.
//!
//! The resolver runs while configuring: it loads the module's side files,
//! reports unreadable ones and evicts whitelisted names from the registry.
//! During generation [`select`] picks the declarations of one category that
//! survive the blacklist and private-record elision.

use std::path::Path;

use girgen_ir::{Category, Declaration, Module, Registry};
use girgen_manifest::FilterSet;

use crate::{
    context::Configuring,
    pipeline::{Diagnostic, Stage},
};

/// Suffix marking implementation-detail records.
pub const PRIVATE_SUFFIX: &str = "Private";

/// Load the side files of the module from `config_dir` and apply them.
pub fn resolve(configuring: &mut Configuring, config_dir: &Path) {
    let (filters, errors) = FilterSet::load(config_dir, &configuring.module_name);
    for error in errors {
        let diagnostic = Diagnostic::warning(
            Stage::Configure,
            format!("{error}, using the default instead"),
        );
        diagnostic.trace();
        configuring.diagnostics.push(diagnostic);
    }

    let evicted = apply_whitelist(&mut configuring.registry, &filters);
    tracing::debug!(
        module = %configuring.module_name,
        blacklisted = filters.blacklist.len(),
        evicted,
        "filters resolved"
    );
    configuring.filters = filters;
}

/// Remove every whitelisted name from the registry.
///
/// Returns the number of names that were known before.
pub fn apply_whitelist(registry: &mut Registry, filters: &FilterSet) -> usize {
    filters
        .whitelist
        .iter()
        .filter(|name| registry.evict(name))
        .count()
}

/// Returns true if `record` is an implementation detail of a class.
///
/// A record named `FooPrivate` is private when every field of class `Foo`
/// either does not reference it or is itself private. A missing class or a
/// class without fields also counts as private.
pub fn is_private_record(record: &Declaration, module: &Module) -> bool {
    let Some(class_name) = record.name.strip_suffix(PRIVATE_SUFFIX) else {
        return false;
    };
    match module.class(class_name) {
        Some(class) => class
            .fields()
            .iter()
            .all(|field| field.type_name != record.name || field.private),
        None => true,
    }
}

/// Declarations selected for generation.
#[derive(Debug, Default)]
pub struct Selection<'m> {
    /// Declarations to synthesize, in IR order.
    pub declarations: Vec<&'m Declaration>,
    /// Number of blacklisted declarations skipped.
    pub blacklisted: usize,
    /// Names of private records elided.
    pub elided: Vec<String>,
}

/// Select the declarations of one category.
///
/// Blacklisted names are dropped in every category. Private records are
/// dropped unless `generate_all` is set.
pub fn select<'m>(
    module: &'m Module,
    category: Category,
    filters: &FilterSet,
    generate_all: bool,
) -> Selection<'m> {
    let mut selection = Selection::default();
    for decl in module.of(category) {
        if filters.is_blacklisted(&decl.name) {
            selection.blacklisted += 1;
        } else if category == Category::Record
            && !generate_all
            && is_private_record(decl, module)
        {
            selection.elided.push(decl.name.clone());
        } else {
            selection.declarations.push(decl);
        }
    }
    selection
}

#[cfg(test)]
mod tests {
    use std::fs;

    use girgen_ir::{DeclKind, Field};
    use tempfile::TempDir;

    use super::*;

    fn class_with_fields(name: &str, fields: Vec<Field>) -> Declaration {
        Declaration::new(name, DeclKind::Class {
            parent: None,
            fields,
        })
    }

    fn record(name: &str) -> Declaration {
        Declaration::new(name, DeclKind::record())
    }

    #[test]
    fn test_private_record_without_references() {
        let module = Module::new("Test")
            .with(class_with_fields("Foo", vec![Field::new("parent", "Object")]))
            .with(record("FooPrivate"));

        assert!(is_private_record(&module.declarations[1], &module));
    }

    #[test]
    fn test_private_record_with_private_reference() {
        let module = Module::new("Test")
            .with(class_with_fields("Foo", vec![
                Field::new("priv", "FooPrivate").private(),
            ]))
            .with(record("FooPrivate"));

        assert!(is_private_record(&module.declarations[1], &module));
    }

    #[test]
    fn test_record_with_public_reference_is_kept() {
        let module = Module::new("Test")
            .with(class_with_fields("Foo", vec![Field::new("priv", "FooPrivate")]))
            .with(record("FooPrivate"));

        assert!(!is_private_record(&module.declarations[1], &module));
    }

    #[test]
    fn test_private_record_without_class() {
        let module = Module::new("Test").with(record("BarPrivate"));
        assert!(is_private_record(&module.declarations[0], &module));
    }

    #[test]
    fn test_record_without_suffix_is_public() {
        let module = Module::new("Test").with(record("Rectangle"));
        assert!(!is_private_record(&module.declarations[0], &module));
    }

    #[test]
    fn test_select_applies_blacklist_and_elision() {
        let module = Module::new("Test")
            .with(class_with_fields("Foo", vec![]))
            .with(record("FooPrivate"))
            .with(record("Rectangle"))
            .with(record("Hidden"));
        let mut filters = FilterSet::default();
        filters.blacklist.insert("Hidden".to_string());

        let selection = select(&module, Category::Record, &filters, false);
        let names: Vec<_> = selection.declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Rectangle"]);
        assert_eq!(selection.blacklisted, 1);
        assert_eq!(selection.elided, ["FooPrivate"]);

        let selection = select(&module, Category::Record, &filters, true);
        let names: Vec<_> = selection.declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["FooPrivate", "Rectangle"]);
        assert!(selection.elided.is_empty());
    }

    #[test]
    fn test_resolve_evicts_whitelisted_names() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Test.whitelist"), "Object\nUnknown\n").unwrap();

        let mut registry = Registry::new();
        registry.preload(&Module::new("GObject").with(class_with_fields("Object", vec![])));
        assert!(registry.is_known("Object"));

        let mut configuring = Configuring::new("Test", registry);
        resolve(&mut configuring, temp.path());

        assert!(!configuring.registry.is_known("Object"));
        assert!(configuring.filters.whitelist.contains("Unknown"));
        assert!(configuring.diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_reports_unreadable_side_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("Test.callbackSuffixes")).unwrap();

        let mut configuring = Configuring::new("Test", Registry::new());
        resolve(&mut configuring, temp.path());

        assert_eq!(configuring.diagnostics.len(), 1);
        assert!(configuring.diagnostics[0].severity.is_warning());
        assert_eq!(configuring.filters.callback_suffixes.len(), 4);
    }
}
