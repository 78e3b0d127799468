//! Assignability between type shapes.
//!
//! `is_assignable_from(target, source)` answers whether a value of `source`
//! may be stored where `target` is declared. The relation is neither
//! symmetric nor transitive. Rules are tried in order; the first that applies
//! decides.

use crate::lower::{RelationError, lower_type};
use crate::types::{TypeShape, TypeTag};
use mudz_parser::{NodeArena, NodeIndex};
use tracing::trace;

pub fn is_assignable_from(target: &TypeShape, source: &TypeShape) -> bool {
    let result = check(target, source);
    trace!(target = ?target.tag, source = ?source.tag, result, "assignability");
    result
}

/// Lower both nodes and compare them. Fails when either node denotes no type.
pub fn is_node_assignable_from(
    arena: &NodeArena,
    target: NodeIndex,
    source: NodeIndex,
) -> Result<bool, RelationError> {
    let target = lower_type(arena, target)?;
    let source = lower_type(arena, source)?;
    Ok(is_assignable_from(&target, &source))
}

fn check(target: &TypeShape, source: &TypeShape) -> bool {
    if target.is_unknown() || source.is_unknown() {
        return true;
    }

    let same_depth = target.array_depth == source.array_depth;
    match &target.tag {
        // `any` accepts everything, whatever the array depth on either side.
        TypeTag::Any => true,
        TypeTag::Object => !matches!(
            source.tag,
            TypeTag::Any | TypeTag::Bool | TypeTag::Int | TypeTag::Function
        ),
        TypeTag::Int | TypeTag::Bool => {
            matches!(source.tag, TypeTag::Int | TypeTag::Bool) && same_depth
        }
        TypeTag::String => matches!(source.tag, TypeTag::String | TypeTag::Nil) && same_depth,
        TypeTag::Symbol => matches!(source.tag, TypeTag::Symbol | TypeTag::Nil) && same_depth,
        TypeTag::Function => {
            source.is_function_reference() && same_depth && signatures_match(target, source)
        }
        tag => *tag == source.tag && same_depth,
    }
}

/// Function references: a bare `function` matches any signature; otherwise
/// return types must be mutually compatible, arities equal and parameters
/// pairwise compatible in declared order.
fn signatures_match(target: &TypeShape, source: &TypeShape) -> bool {
    let (Some(target), Some(source)) = (&target.signature, &source.signature) else {
        return true;
    };
    check(&target.return_type, &source.return_type)
        && check(&source.return_type, &target.return_type)
        && target.parameters.len() == source.parameters.len()
        && target
            .parameters
            .iter()
            .zip(&source.parameters)
            .all(|(t, s)| check(t, s))
}
