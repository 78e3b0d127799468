//! Rendering shapes back to source spelling.

use crate::types::{TypeShape, TypeTag};
use std::fmt;

/// Renders `TypeShape`s as `int[]`, `function<int(string, ...)>` and so on.
#[derive(Clone, Debug)]
pub struct TypeFormatter {
    unknown_text: String,
}

impl Default for TypeFormatter {
    fn default() -> Self {
        TypeFormatter {
            unknown_text: "?".to_string(),
        }
    }
}

impl TypeFormatter {
    pub fn new() -> TypeFormatter {
        TypeFormatter::default()
    }

    /// Text used for `Unknown` tags.
    #[must_use]
    pub fn with_unknown_text(mut self, text: impl Into<String>) -> TypeFormatter {
        self.unknown_text = text.into();
        self
    }

    pub fn format(&self, shape: &TypeShape) -> String {
        let mut out = String::new();
        self.write(shape, &mut out);
        out
    }

    fn write(&self, shape: &TypeShape, out: &mut String) {
        match (&shape.tag, &shape.signature) {
            (TypeTag::Unknown, _) => out.push_str(&self.unknown_text),
            (TypeTag::Function, Some(signature)) => {
                out.push_str("function<");
                self.write(&signature.return_type, out);
                out.push('(');
                for (i, param) in signature.parameters.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write(param, out);
                }
                if signature.variadic {
                    if !signature.parameters.is_empty() {
                        out.push_str(", ");
                    }
                    out.push_str("...");
                }
                out.push_str(")>");
            }
            (tag, _) => out.push_str(tag.name()),
        }
        for _ in 0..shape.array_depth {
            out.push_str("[]");
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TypeFormatter::default().format(self))
    }
}
