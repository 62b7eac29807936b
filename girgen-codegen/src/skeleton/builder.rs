//! Indented source builder for skeleton declarations.

/// One indentation level of generated Swift.
const INDENT: &str = "    ";

/// Fluent API for building source text with proper indentation.
///
/// # Example
///
/// ```
/// use girgen_codegen::skeleton::SwiftBuilder;
///
/// let code = SwiftBuilder::new()
///     .block("public struct Point {", "}", |b| {
///         b.line("public var x: Double")
///     })
///     .build();
///
/// assert_eq!(code, "public struct Point {\n    public var x: Double\n}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SwiftBuilder {
    indent_level: usize,
    buffer: String,
}

impl SwiftBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a `///` doc comment line.
    pub fn doc(self, text: &str) -> Self {
        self.line(&format!("/// {text}"))
    }

    /// Add an indented block between `header` and `close`.
    pub fn block<F>(mut self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self = self.line(header);
        self.indent_level += 1;
        let mut inner = f(self);
        inner.indent_level = inner.indent_level.saturating_sub(1);
        inner.line(close)
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the text without the final newline.
    pub fn build(self) -> String {
        let mut buffer = self.buffer;
        buffer.truncate(buffer.trim_end_matches('\n').len());
        buffer
    }
}
