//! Mapping of IR type names to Swift types.

use crate::GenerationContext;

/// Swift type for a fundamental IR type, if `name` is one.
pub fn fundamental(name: &str) -> Option<&'static str> {
    let swift = match name {
        "none" => "Void",
        "gboolean" => "Bool",
        "gchar" | "gint8" => "Int8",
        "guchar" | "guint8" => "UInt8",
        "gshort" | "gint16" => "Int16",
        "gushort" | "guint16" => "UInt16",
        "gint" | "gint32" => "Int32",
        "guint" | "guint32" | "gunichar" => "UInt32",
        "gint64" => "Int64",
        "guint64" => "UInt64",
        "glong" => "CLong",
        "gulong" => "CUnsignedLong",
        "gssize" | "gsize" | "goffset" => "Int",
        "gfloat" => "Float",
        "gdouble" => "Double",
        "utf8" | "filename" => "String",
        "gpointer" => "UnsafeMutableRawPointer?",
        "gconstpointer" => "UnsafeRawPointer?",
        _ => return None,
    };
    Some(swift)
}

/// Apply namespace replacements to a possibly qualified name.
///
/// A namespace replaced by the empty string is dropped.
pub fn qualified_name(name: &str, ctx: &GenerationContext) -> String {
    match name.split_once('.') {
        Some((namespace, local)) => match ctx.filters().replace_namespace(namespace) {
            "" => local.to_string(),
            replaced => format!("{replaced}.{local}"),
        },
        None => name.to_string(),
    }
}

/// Resolve an IR type name to the Swift type used in skeletons.
///
/// Qualified names (`GObject.Object`) have their namespace replaced. Known
/// records are referenced through their `Ref` wrapper.
pub fn swift_type(name: &str, ctx: &GenerationContext) -> String {
    if let Some(swift) = fundamental(name) {
        return swift.to_string();
    }
    let qualified = qualified_name(name, ctx);
    let bare = name.rsplit('.').next().unwrap_or(name);
    if ctx.registry().record(bare).is_some() {
        format!("{qualified}Ref")
    } else {
        qualified
    }
}

/// Quote a string constant as a Swift literal.
pub fn string_literal(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
