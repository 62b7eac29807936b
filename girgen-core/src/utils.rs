//! Shared utility functions for code generation.

use std::path::Path;

/// Split text into lines, dropping empty ones.
pub fn non_empty_lines(s: &str) -> impl Iterator<Item = &str> {
    s.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
}

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            }
        })
        .collect()
}

/// Convert a string to camelCase (e.g., "HELLO_WORLD" -> "helloWorld")
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Derive a module name from an IR file path.
///
/// Strips the directory and the `.json` and `.gir` extensions
/// (e.g., "gir/GLib-2.0.gir.json" -> "GLib-2.0").
pub fn module_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = file_name.strip_suffix(".json").unwrap_or(&file_name);
    let name = name.strip_suffix(".gir").unwrap_or(name);
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_lines() {
        let lines: Vec<_> = non_empty_lines("a\n\nb\r\n\n").collect();
        assert_eq!(lines, ["a", "b"]);
        assert_eq!(non_empty_lines("").count(), 0);
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("hello"), "Hello");
        assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
        assert_eq!(to_pascal_case("PRIORITY_HIGH"), "PriorityHigh");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("PRIORITY_HIGH"), "priorityHigh");
        assert_eq!(to_camel_case("none"), "none");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_module_name() {
        assert_eq!(module_name(Path::new("gir/GLib-2.0.gir.json")), "GLib-2.0");
        assert_eq!(module_name(Path::new("Gtk-3.0.json")), "Gtk-3.0");
        assert_eq!(module_name(Path::new("/usr/share/gir-1.0/Pango-1.0.gir")), "Pango-1.0");
    }
}
