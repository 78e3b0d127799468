//! Shapes of literal-like expressions.

use crate::lower::lower_type;
use crate::types::{TypeShape, TypeTag};
use mudz_parser::{LiteralValue, NodeArena, NodeData, NodeIndex};

/// Shape of an expression whose type is evident from its syntax; everything
/// else is `Unknown`.
pub fn infer_literal_type(arena: &NodeArena, index: NodeIndex) -> TypeShape {
    let mut current = index;
    // Parentheses are peeled iteratively.
    loop {
        let Some(node) = arena.get(current) else {
            return TypeShape::unknown();
        };
        let tag = match &node.data {
            NodeData::Literal { value } => match value {
                LiteralValue::Int(_) | LiteralValue::Char(_) => TypeTag::Int,
                LiteralValue::String(_) => TypeTag::String,
                LiteralValue::Symbol(_) => TypeTag::Symbol,
                LiteralValue::Bool(_) => TypeTag::Bool,
                LiteralValue::Nil => TypeTag::Nil,
                LiteralValue::This => TypeTag::Object,
            },
            NodeData::StringConcat { .. } => TypeTag::String,
            NodeData::ArrayLiteral { .. } => return TypeShape::array_of(TypeTag::Any, 1),
            NodeData::MappingLiteral { .. } => TypeTag::Mapping,
            NodeData::New { target, .. } => {
                if arena.string_value(*target).is_some() {
                    TypeTag::Object
                } else {
                    return lower_type(arena, *target).unwrap_or_else(|_| TypeShape::unknown());
                }
            }
            NodeData::Cast { ty, .. } => {
                return lower_type(arena, *ty).unwrap_or_else(|_| TypeShape::unknown());
            }
            NodeData::Parenthesized { expression } => {
                current = *expression;
                continue;
            }
            _ => TypeTag::Unknown,
        };
        return TypeShape::new(tag);
    }
}
