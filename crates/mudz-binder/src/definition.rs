//! Named definitions extracted from declarations.

use mudz_parser::{ModifierFlags, NodeIndex};
use serde::Serialize;

/// Index of a definition in its `ContextTree`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DefinitionId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DefinitionKind {
    Variable,
    Function,
    Class,
    Parameter,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParameterInfo {
    pub name: String,
    pub type_node: NodeIndex,
    pub type_text: String,
    pub variadic: bool,
}

/// Signature of a function definition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FunctionDefinition {
    pub parameters: Vec<ParameterInfo>,
    /// Accepts extra arguments (`...` marker or a variadic last parameter).
    pub variadic: bool,
    pub has_body: bool,
}

/// A named symbol. Created once when its declaration is bound and never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub name: String,
    pub kind: DefinitionKind,
    /// Offset of the name; the key of this definition in its context.
    pub offset: u32,
    /// The declaring node (declaration, parameter or binding).
    pub declaration: NodeIndex,
    /// Declared type, or return type for functions; NONE when untyped.
    pub type_node: NodeIndex,
    pub type_text: String,
    pub modifiers: ModifierFlags,
    pub function: Option<FunctionDefinition>,
}

impl Definition {
    #[inline]
    pub fn is_function(&self) -> bool {
        self.kind == DefinitionKind::Function
    }

    /// Parameters of a function definition; empty for everything else.
    pub fn parameters(&self) -> &[ParameterInfo] {
        self.function
            .as_ref()
            .map_or(&[], |function| function.parameters.as_slice())
    }

    /// `name(type a, type b)` for functions, `type name` otherwise.
    pub fn signature(&self) -> String {
        match &self.function {
            Some(function) => {
                let mut params: Vec<String> = function
                    .parameters
                    .iter()
                    .map(|p| {
                        let suffix = if p.variadic { "..." } else { "" };
                        format!("{} {}{suffix}", p.type_text, p.name)
                    })
                    .collect();
                if function.variadic && !function.parameters.iter().any(|p| p.variadic) {
                    params.push("...".to_string());
                }
                format!("{} {}({})", self.type_text, self.name, params.join(", "))
            }
            None if self.type_text.is_empty() => self.name.clone(),
            None => format!("{} {}", self.type_text, self.name),
        }
    }
}
