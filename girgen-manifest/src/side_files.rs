//! Per-module side files.
//!
//! Side files live next to the manifest and are named after the module,
//! e.g. `GLib-2.0.blacklist`. Every file is optional: a missing file yields
//! the documented default, never an error.
//!
//! | file | content |
//! |------|---------|
//! | `{module}.blacklist` | names excluded from generation |
//! | `{module}.whitelist` | names evicted from the registry |
//! | `{module}.callbackSuffixes` | suffixes recognizing callback aliases |
//! | `{module}.namespaceReplacements` | `key<TAB>value` or `key value` lines |
//! | `{module}.verbatim` | constants emitted verbatim |
//! | `{module}.override` | names emitted with the `override` keyword |
//! | `{module}.preamble` | text prefixed to every fresh output file |

use std::path::{Path, PathBuf};

use girgen_core::non_empty_lines;
use indexmap::{IndexMap, IndexSet};

use crate::Error;

/// Callback suffixes used when no `.callbackSuffixes` file exists.
pub const DEFAULT_CALLBACK_SUFFIXES: [&str; 4] = ["Notify", "Func", "Marshaller", "Callback"];

/// Filter rules for one module.
#[derive(Debug, Clone)]
pub struct FilterSet {
    /// Names excluded from generation in every category.
    pub blacklist: IndexSet<String>,
    /// Names removed from the registry before generation.
    pub whitelist: IndexSet<String>,
    /// Ordered suffixes recognizing callback aliases.
    pub callback_suffixes: Vec<String>,
    /// Namespace replacement table.
    pub namespace_replacements: IndexMap<String, String>,
    /// Constants emitted verbatim.
    pub verbatim_constants: IndexSet<String>,
    /// Names emitted with the `override` keyword.
    pub overrides: IndexSet<String>,
    /// Text prefixed to every freshly created output file.
    pub preamble: String,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            blacklist: IndexSet::new(),
            whitelist: IndexSet::new(),
            callback_suffixes: DEFAULT_CALLBACK_SUFFIXES.map(String::from).to_vec(),
            namespace_replacements: IndexMap::new(),
            verbatim_constants: IndexSet::new(),
            overrides: IndexSet::new(),
            preamble: String::new(),
        }
    }
}

impl FilterSet {
    /// Load the side files of `module` from `dir`.
    ///
    /// Missing files fall back to defaults. Files that exist but cannot be
    /// read also fall back to defaults; their errors are returned alongside
    /// so the caller can report them.
    pub fn load(dir: &Path, module: &str) -> (Self, Vec<Box<Error>>) {
        let files = SideFiles::new(dir, module);
        let mut errors = Vec::new();
        let mut read = |ext: &str| match read_optional(&files.path(ext)) {
            Ok(content) => content,
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let mut filters = FilterSet::default();
        if let Some(text) = read("blacklist") {
            filters.blacklist = parse_names(&text);
        }
        if let Some(text) = read("whitelist") {
            filters.whitelist = parse_names(&text);
        }
        if let Some(text) = read("callbackSuffixes") {
            filters.callback_suffixes = non_empty_lines(&text).map(String::from).collect();
        }
        if let Some(text) = read("namespaceReplacements") {
            filters.namespace_replacements = parse_namespace_replacements(&text);
        }
        if let Some(text) = read("verbatim") {
            filters.verbatim_constants = parse_names(&text);
        }
        if let Some(text) = read("override") {
            filters.overrides = parse_names(&text);
        }
        if let Some(text) = read("preamble") {
            filters.preamble = text;
        }

        (filters, errors)
    }

    /// Returns true if the name is excluded from generation.
    pub fn is_blacklisted(&self, name: &str) -> bool {
        self.blacklist.contains(name)
    }

    /// Returns true if the name ends with one of the callback suffixes.
    pub fn is_callback_name(&self, name: &str) -> bool {
        self.callback_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
    }

    /// Replace a namespace according to the replacement table.
    pub fn replace_namespace<'a>(&'a self, namespace: &'a str) -> &'a str {
        self.namespace_replacements
            .get(namespace)
            .map(String::as_str)
            .unwrap_or(namespace)
    }

    /// Returns true if the constant is emitted verbatim.
    pub fn is_verbatim(&self, name: &str) -> bool {
        self.verbatim_constants.contains(name)
    }

    /// Returns true if the name is emitted with the `override` keyword.
    pub fn is_overridden(&self, name: &str) -> bool {
        self.overrides.contains(name)
    }
}

/// Locations of the side files of one module.
#[derive(Debug, Clone)]
pub struct SideFiles {
    dir: PathBuf,
    module: String,
}

impl SideFiles {
    pub fn new(dir: impl Into<PathBuf>, module: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            module: module.into(),
        }
    }

    /// Path of the side file with the given extension.
    pub fn path(&self, ext: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", self.module, ext))
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, Box<Error>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

fn parse_names(text: &str) -> IndexSet<String> {
    non_empty_lines(text).map(String::from).collect()
}

/// Parse a namespace replacement table.
///
/// Each line is split on tabs when that yields two tokens, otherwise on
/// whitespace. Lines with fewer than two tokens are skipped; a key seen
/// twice keeps the last value.
pub fn parse_namespace_replacements(text: &str) -> IndexMap<String, String> {
    let mut replacements = IndexMap::new();
    for line in non_empty_lines(text) {
        let tabbed: Vec<&str> = line.split('\t').filter(|t| !t.is_empty()).collect();
        let tokens = if tabbed.len() >= 2 {
            tabbed
        } else {
            line.split_whitespace().collect()
        };
        if let [key, value, ..] = tokens.as_slice() {
            replacements.insert(key.to_string(), value.to_string());
        }
    }
    replacements
}
