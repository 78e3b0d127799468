//! Lowering type-denoting AST nodes into `TypeShape`s.

use crate::types::{FunctionSignature, TypeShape, TypeTag};
use mudz_parser::{NodeArena, NodeData, NodeIndex, NodeKind};
use thiserror::Error;

/// A relation was asked of a node that denotes no type. This is a caller
/// defect, not an incompatibility.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RelationError {
    #[error("{kind:?} node does not denote a type")]
    NotATypeNode { kind: NodeKind },
    #[error("node {0:?} is not in the arena")]
    UnknownNode(NodeIndex),
}

/// Lower a type node, or a declaration that embeds one, into a shape.
///
/// Declarations are unwrapped to their declared type (the return type for
/// functions). Sentinels in a type slot lower to `Unknown`.
pub fn lower_type(arena: &NodeArena, index: NodeIndex) -> Result<TypeShape, RelationError> {
    let node = arena.get(index).ok_or(RelationError::UnknownNode(index))?;
    match &node.data {
        NodeData::TypeName {
            keyword,
            name,
            array_depth,
        } => Ok(TypeShape::array_of(
            TypeTag::from_keyword(*keyword, name),
            *array_depth,
        )),
        NodeData::FunctionType {
            return_type,
            parameters,
            variadic,
            array_depth,
        } => {
            let return_type = lower_slot(arena, *return_type)?;
            let mut lowered = Vec::with_capacity(parameters.len());
            for &param in parameters {
                if arena.kind(param) == Some(NodeKind::Ellipsis) {
                    continue;
                }
                lowered.push(lower_slot(arena, param)?);
            }
            Ok(TypeShape::function(FunctionSignature {
                return_type,
                parameters: lowered,
                variadic: *variadic,
            })
            .with_array_depth(*array_depth))
        }
        NodeData::Missing { .. } | NodeData::Wrong { .. } => Ok(TypeShape::unknown()),
        NodeData::Parameter { ty, .. } | NodeData::VariableDeclaration { ty, .. } => {
            lower_slot(arena, *ty)
        }
        NodeData::Binding { ty, .. } => lower_slot(arena, *ty),
        NodeData::FunctionDeclaration { return_type, .. } => lower_slot(arena, *return_type),
        _ => Err(RelationError::NotATypeNode { kind: node.kind() }),
    }
}

/// Lower an optional type slot; an empty slot is `Unknown`.
fn lower_slot(arena: &NodeArena, index: NodeIndex) -> Result<TypeShape, RelationError> {
    if index.is_none() {
        return Ok(TypeShape::unknown());
    }
    lower_type(arena, index)
}
