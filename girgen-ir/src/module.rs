//! Module Intermediate Representation.
//!
//! A [`Module`] is the parsed API surface of one library: an ordered list of
//! declarations, each tagged with its category through [`DeclKind`].
//!
//! # Architecture
//!
//! ```text
//! metadata → parser (external) → Module (IR) → pipeline (codegen)
//! ```
//!
//! Declaration order is preserved exactly as the parser produced it. The
//! output partitioner relies on it, so the IR is a sequence and never a set.

use serde::{Deserialize, Serialize};

use crate::Category;

/// Parsed API surface of a single library.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Module {
    /// Namespace name (e.g. `GLib`).
    #[serde(default)]
    pub namespace: String,
    /// Boilerplate text the parser attaches to the module prefix.
    #[serde(default)]
    pub boilerplate: String,
    /// All declarations in IR order.
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl Module {
    /// Create an empty module for the given namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Append a declaration, keeping IR order.
    pub fn with(mut self, declaration: Declaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Declarations of one category, in IR order.
    pub fn of(&self, category: Category) -> impl Iterator<Item = &Declaration> {
        self.declarations
            .iter()
            .filter(move |d| d.category() == category)
    }

    /// Find the class declaration with the given name.
    pub fn class(&self, name: &str) -> Option<&Declaration> {
        self.of(Category::Class).find(|d| d.name == name)
    }
}

/// One IR entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// IR name, used by the filters.
    pub name: String,
    /// Name used for grouping and file naming (defaults to `name`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Underlying C type, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_type: Option<String>,
    /// Category-specific payload.
    #[serde(flatten)]
    pub kind: DeclKind,
}

impl Declaration {
    /// Create a declaration with the given name and kind.
    pub fn new(name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            c_type: None,
            kind,
        }
    }

    /// Set the display name.
    pub fn display_as(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Set the C type.
    pub fn c_type(mut self, c_type: impl Into<String>) -> Self {
        self.c_type = Some(c_type.into());
        self
    }

    /// The name used for grouping and file naming.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// The category this declaration belongs to.
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Fields of a record, class or union; empty for other kinds.
    pub fn fields(&self) -> &[Field] {
        match &self.kind {
            DeclKind::Record { fields }
            | DeclKind::Class { fields, .. }
            | DeclKind::Union { fields } => fields,
            _ => &[],
        }
    }
}

/// Category-specific declaration data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeclKind {
    /// Type alias.
    Alias { target: String },
    /// Callback type.
    Callback {
        #[serde(default)]
        signature: Signature,
    },
    /// Constant value.
    Constant {
        #[serde(rename = "type")]
        type_name: String,
        value: String,
    },
    /// Enumeration.
    Enumeration {
        #[serde(default)]
        members: Vec<Member>,
    },
    /// Bit field (flags).
    Bitfield {
        #[serde(default)]
        members: Vec<Member>,
    },
    /// C union.
    Union {
        #[serde(default)]
        fields: Vec<Field>,
    },
    /// Interface.
    Interface {
        #[serde(default)]
        prerequisites: Vec<String>,
    },
    /// Record (struct).
    Record {
        #[serde(default)]
        fields: Vec<Field>,
    },
    /// Class.
    Class {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent: Option<String>,
        #[serde(default)]
        fields: Vec<Field>,
    },
    /// Free function.
    Function {
        #[serde(default)]
        signature: Signature,
    },
}

impl DeclKind {
    /// The category of this kind.
    pub fn category(&self) -> Category {
        match self {
            DeclKind::Alias { .. } => Category::Alias,
            DeclKind::Callback { .. } => Category::Callback,
            DeclKind::Constant { .. } => Category::Constant,
            DeclKind::Enumeration { .. } => Category::Enumeration,
            DeclKind::Bitfield { .. } => Category::Bitfield,
            DeclKind::Union { .. } => Category::Union,
            DeclKind::Interface { .. } => Category::Interface,
            DeclKind::Record { .. } => Category::Record,
            DeclKind::Class { .. } => Category::Class,
            DeclKind::Function { .. } => Category::Function,
        }
    }

    /// An empty record.
    pub fn record() -> Self {
        DeclKind::Record { fields: Vec::new() }
    }

    /// A class without parent or fields.
    pub fn class() -> Self {
        DeclKind::Class {
            parent: None,
            fields: Vec::new(),
        }
    }

    /// An interface without prerequisites.
    pub fn interface() -> Self {
        DeclKind::Interface {
            prerequisites: Vec::new(),
        }
    }
}

/// A field of a record, class or union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    /// Name of the referenced type.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub private: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            private: false,
        }
    }

    /// Mark the field as private.
    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }
}

/// An enumeration or bitfield member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub value: i64,
}

/// Callable signature of a function or callback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
}

/// A parameter of a callable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_defaults_to_name() {
        let decl = Declaration::new("Widget", DeclKind::class());
        assert_eq!(decl.display_name(), "Widget");

        let decl = decl.display_as("WidgetRef");
        assert_eq!(decl.display_name(), "WidgetRef");
    }

    #[test]
    fn test_of_preserves_ir_order() {
        let module = Module::new("Test")
            .with(Declaration::new("B", DeclKind::record()))
            .with(Declaration::new("x", DeclKind::Function {
                signature: Signature::default(),
            }))
            .with(Declaration::new("A", DeclKind::record()));

        let names: Vec<_> = module.of(Category::Record).map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn test_fields_only_for_aggregates() {
        let class = Declaration::new("Foo", DeclKind::Class {
            parent: None,
            fields: vec![Field::new("priv", "FooPrivate").private()],
        });
        assert_eq!(class.fields().len(), 1);
        assert!(class.fields()[0].private);

        let alias = Declaration::new("Bar", DeclKind::Alias {
            target: "gint".to_string(),
        });
        assert!(alias.fields().is_empty());
    }

    #[test]
    fn test_deserialize_module() {
        let json = r#"{
            "namespace": "GLib",
            "declarations": [
                { "name": "Quark", "kind": "alias", "target": "guint32" },
                { "name": "MAJOR", "kind": "constant", "type": "gint", "value": "2" },
                { "name": "Object", "kind": "class", "fields": [
                    { "name": "priv", "type": "ObjectPrivate", "private": true }
                ]}
            ]
        }"#;

        let module: Module = serde_json::from_str(json).unwrap();
        assert_eq!(module.namespace, "GLib");
        assert_eq!(module.declarations.len(), 3);
        assert_eq!(module.declarations[0].category(), Category::Alias);
        assert_eq!(module.declarations[1].kind, DeclKind::Constant {
            type_name: "gint".to_string(),
            value: "2".to_string(),
        });
        assert_eq!(module.class("Object").unwrap().fields()[0].type_name, "ObjectPrivate");
    }
}
