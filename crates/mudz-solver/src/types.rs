//! Owned type shapes.

use mudz_scanner::SyntaxKind;
use serde::Serialize;

/// Base type of a shape, without array dimensions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeTag {
    /// Absent or unparsed; compatible with everything.
    Unknown,
    Void,
    Any,
    Bool,
    Int,
    String,
    Symbol,
    Object,
    Mapping,
    Function,
    Nil,
    /// A class name.
    Named(String),
}

impl TypeTag {
    /// Tag for a `TypeName` node's keyword; identifiers become `Named`.
    pub fn from_keyword(keyword: SyntaxKind, name: &str) -> TypeTag {
        match keyword {
            SyntaxKind::VoidKeyword => TypeTag::Void,
            SyntaxKind::AnyKeyword => TypeTag::Any,
            SyntaxKind::BoolKeyword => TypeTag::Bool,
            SyntaxKind::IntKeyword => TypeTag::Int,
            SyntaxKind::StringKeyword => TypeTag::String,
            SyntaxKind::SymbolKeyword => TypeTag::Symbol,
            SyntaxKind::ObjectKeyword => TypeTag::Object,
            SyntaxKind::MappingKeyword => TypeTag::Mapping,
            SyntaxKind::FunctionKeyword => TypeTag::Function,
            SyntaxKind::NilKeyword => TypeTag::Nil,
            SyntaxKind::Identifier => TypeTag::Named(name.to_string()),
            _ => TypeTag::Unknown,
        }
    }

    /// Source spelling of the tag.
    pub fn name(&self) -> &str {
        match self {
            TypeTag::Unknown => "unknown",
            TypeTag::Void => "void",
            TypeTag::Any => "any",
            TypeTag::Bool => "bool",
            TypeTag::Int => "int",
            TypeTag::String => "string",
            TypeTag::Symbol => "symbol",
            TypeTag::Object => "object",
            TypeTag::Mapping => "mapping",
            TypeTag::Function => "function",
            TypeTag::Nil => "nil",
            TypeTag::Named(name) => name,
        }
    }
}

/// Signature of a function-reference type `function<ret(params)>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct FunctionSignature {
    pub return_type: TypeShape,
    pub parameters: Vec<TypeShape>,
    pub variadic: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TypeShape {
    pub tag: TypeTag,
    pub array_depth: u32,
    /// Present only for function-reference types spelled with a signature.
    pub signature: Option<Box<FunctionSignature>>,
}

impl TypeShape {
    pub fn new(tag: TypeTag) -> TypeShape {
        TypeShape {
            tag,
            array_depth: 0,
            signature: None,
        }
    }

    pub fn unknown() -> TypeShape {
        TypeShape::new(TypeTag::Unknown)
    }

    pub fn array_of(tag: TypeTag, array_depth: u32) -> TypeShape {
        TypeShape {
            tag,
            array_depth,
            signature: None,
        }
    }

    pub fn function(signature: FunctionSignature) -> TypeShape {
        TypeShape {
            tag: TypeTag::Function,
            array_depth: 0,
            signature: Some(Box::new(signature)),
        }
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.tag == TypeTag::Unknown
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.array_depth > 0
    }

    /// Function-reference type, with or without a signature.
    #[inline]
    pub fn is_function_reference(&self) -> bool {
        self.tag == TypeTag::Function
    }

    #[must_use]
    pub fn with_array_depth(mut self, array_depth: u32) -> TypeShape {
        self.array_depth = array_depth;
        self
    }
}
