//! Core type definitions.

use serde::{Deserialize, Serialize};

/// Declaration category.
///
/// Every category is generated by its own task, and [`Category::ALL`] fixes
/// the order in which their output is concatenated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Alias,
    Callback,
    Constant,
    Enumeration,
    Bitfield,
    Union,
    Interface,
    Record,
    Class,
    Function,
}

impl Category {
    /// All categories in processing order.
    pub const ALL: [Category; 10] = [
        Category::Alias,
        Category::Callback,
        Category::Constant,
        Category::Enumeration,
        Category::Bitfield,
        Category::Union,
        Category::Interface,
        Category::Record,
        Category::Class,
        Category::Function,
    ];

    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Alias => "alias",
            Category::Callback => "callback",
            Category::Constant => "constant",
            Category::Enumeration => "enumeration",
            Category::Bitfield => "bitfield",
            Category::Union => "union",
            Category::Interface => "interface",
            Category::Record => "record",
            Category::Class => "class",
            Category::Function => "function",
        }
    }

    /// Returns true for interfaces, records and classes.
    ///
    /// Type categories are split over several files; all other categories
    /// are written to a single file each.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            Category::Interface | Category::Record | Category::Class
        )
    }

    /// File name suffix for a simple category, `None` for type categories.
    pub fn file_suffix(&self) -> Option<&'static str> {
        match self {
            Category::Alias => Some("aliases"),
            Category::Callback => Some("callbacks"),
            Category::Constant => Some("constants"),
            Category::Enumeration => Some("enumerations"),
            Category::Bitfield => Some("bitfields"),
            Category::Union => Some("unions"),
            Category::Function => Some("functions"),
            Category::Interface | Category::Record | Category::Class => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_order() {
        let names: Vec<_> = Category::ALL.iter().map(Category::as_str).collect();
        assert_eq!(
            names,
            [
                "alias",
                "callback",
                "constant",
                "enumeration",
                "bitfield",
                "union",
                "interface",
                "record",
                "class",
                "function"
            ]
        );
    }

    #[test]
    fn test_type_categories_have_no_suffix() {
        for category in Category::ALL {
            assert_eq!(category.is_type(), category.file_suffix().is_none());
        }
        assert_eq!(Category::ALL.iter().filter(|c| c.is_type()).count(), 3);
    }

    #[test]
    fn test_file_suffix() {
        assert_eq!(Category::Alias.file_suffix(), Some("aliases"));
        assert_eq!(Category::Function.file_suffix(), Some("functions"));
        assert_eq!(Category::Record.file_suffix(), None);
    }
}
