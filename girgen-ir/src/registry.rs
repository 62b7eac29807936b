//! Known-type registry.
//!
//! The registry records which names already have generated bindings, so that
//! synthesizers can resolve references across modules. Prerequisite modules
//! are preloaded into it before the main module is generated.

use indexmap::IndexMap;

use crate::{Category, Declaration, Module};

/// Metadata about a known name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownType {
    /// IR name.
    pub name: String,
    /// Category of the declaring entry.
    pub category: Category,
    /// Underlying C type, if any.
    pub c_type: Option<String>,
}

impl KnownType {
    fn from_declaration(decl: &Declaration) -> Self {
        Self {
            name: decl.name.clone(),
            category: decl.category(),
            c_type: decl.c_type.clone(),
        }
    }
}

/// Registry of known data types, records and functions.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    data_types: IndexMap<String, KnownType>,
    records: IndexMap<String, KnownType>,
    functions: IndexMap<String, KnownType>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every declaration of a prerequisite module.
    pub fn preload(&mut self, module: &Module) {
        for decl in &module.declarations {
            self.register(decl);
        }
    }

    /// Register a single declaration.
    ///
    /// Functions go to the function table; records and classes are both a
    /// data type and a record; everything else is a data type.
    pub fn register(&mut self, decl: &Declaration) {
        let known = KnownType::from_declaration(decl);
        match decl.category() {
            Category::Function => {
                self.functions.insert(decl.name.clone(), known);
            }
            Category::Record | Category::Class => {
                self.records.insert(decl.name.clone(), known.clone());
                self.data_types.insert(decl.name.clone(), known);
            }
            _ => {
                self.data_types.insert(decl.name.clone(), known);
            }
        }
    }

    /// Remove a name from all three tables.
    ///
    /// Returns true if the name was known in at least one of them.
    pub fn evict(&mut self, name: &str) -> bool {
        let data_type = self.data_types.shift_remove(name).is_some();
        let record = self.records.shift_remove(name).is_some();
        let function = self.functions.shift_remove(name).is_some();
        data_type || record || function
    }

    /// Returns true if the name is known in any table.
    pub fn is_known(&self, name: &str) -> bool {
        self.data_types.contains_key(name)
            || self.records.contains_key(name)
            || self.functions.contains_key(name)
    }

    /// Look up a known data type.
    pub fn data_type(&self, name: &str) -> Option<&KnownType> {
        self.data_types.get(name)
    }

    /// Look up a known record or class.
    pub fn record(&self, name: &str) -> Option<&KnownType> {
        self.records.get(name)
    }

    /// Look up a known function.
    pub fn function(&self, name: &str) -> Option<&KnownType> {
        self.functions.get(name)
    }

    /// Total number of known names across all tables.
    pub fn len(&self) -> usize {
        self.data_types.len() + self.records.len() + self.functions.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
