//! Cursor classification.
//!
//! `classify` walks from the root towards the cursor and stops at the first
//! node kind with a rule for the slot the cursor sits in. Range tests are
//! closed at both ends: a cursor touching either edge of a node is inside it.

use mudz_parser::{ExpectedKind, Node, NodeArena, NodeData, NodeIndex};
use serde::Serialize;
use tracing::trace;

/// Which families of suggestions belong at a cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SuggestionType {
    Literal,
    Any,
    LiteralOrIdentifier,
    Identifier,
    Type,
    Modifier,
    TypeOrModifier,
}

impl From<ExpectedKind> for SuggestionType {
    fn from(kind: ExpectedKind) -> Self {
        match kind {
            ExpectedKind::Literal => SuggestionType::Literal,
            ExpectedKind::Type => SuggestionType::Type,
            ExpectedKind::Identifier => SuggestionType::Identifier,
        }
    }
}

enum Step {
    Done(SuggestionType),
    Descend(NodeIndex),
}

pub fn classify(arena: &NodeArena, root: NodeIndex, offset: u32) -> SuggestionType {
    let mut current = root;
    // Every step moves to a strictly smaller subtree, so this terminates.
    loop {
        let Some(node) = arena.get(current) else {
            return SuggestionType::Any;
        };
        match classify_node(arena, current, node, offset) {
            Step::Done(result) => {
                trace!(offset, kind = ?node.kind(), ?result, "classified");
                return result;
            }
            Step::Descend(child) => current = child,
        }
    }
}

#[inline]
fn touches(arena: &NodeArena, index: NodeIndex, offset: u32) -> bool {
    arena
        .get(index)
        .is_some_and(|node| node.pos <= offset && offset <= node.end)
}

fn any_touches(arena: &NodeArena, indices: &[NodeIndex], offset: u32) -> bool {
    indices.iter().any(|&index| touches(arena, index, offset))
}

fn classify_node(arena: &NodeArena, index: NodeIndex, node: &Node, offset: u32) -> Step {
    match &node.data {
        NodeData::FunctionDeclaration {
            modifiers,
            return_type,
            name,
            ..
        } => {
            if let Some(step) = type_slot_step(arena, modifiers, *return_type, offset) {
                return step;
            }
            if touches(arena, *name, offset) {
                return Step::Done(SuggestionType::Literal);
            }
        }
        NodeData::VariableDeclaration { modifiers, ty, .. } => {
            if let Some(step) = type_slot_step(arena, modifiers, *ty, offset) {
                return step;
            }
        }
        NodeData::VariableDeclarator { name, .. } => {
            if touches(arena, *name, offset) {
                return Step::Done(SuggestionType::Literal);
            }
        }
        NodeData::ClassDeclaration {
            modifiers, name, ..
        } => {
            if any_touches(arena, modifiers, offset) {
                return Step::Done(SuggestionType::Modifier);
            }
            if touches(arena, *name, offset) {
                return Step::Done(SuggestionType::Literal);
            }
        }
        NodeData::Parameter { ty, name, .. } => {
            if touches(arena, *ty, offset) {
                return Step::Done(SuggestionType::Type);
            }
            if touches(arena, *name, offset) {
                return Step::Done(SuggestionType::Literal);
            }
        }
        NodeData::IncludeDirective { .. } | NodeData::Inherit { .. } => {
            return Step::Done(SuggestionType::Literal);
        }
        NodeData::Call { callee, arguments } => {
            if touches(arena, *callee, offset) {
                return Step::Done(SuggestionType::Identifier);
            }
            return argument_step(arena, &arguments.items, offset);
        }
        NodeData::Cast { ty, expression } => {
            if touches(arena, *ty, offset) {
                return Step::Done(SuggestionType::Type);
            }
            if touches(arena, *expression, offset) && arena.has_children(*expression) {
                return Step::Descend(*expression);
            }
            return Step::Done(SuggestionType::LiteralOrIdentifier);
        }
        NodeData::Binary { left, right, .. } => {
            let left_end = arena.get(*left).map_or(node.pos, |n| n.end);
            return Step::Descend(if offset <= left_end { *left } else { *right });
        }
        NodeData::Missing { expected, .. } | NodeData::Wrong { expected, .. } => {
            return Step::Done(expected.map_or(SuggestionType::Any, SuggestionType::from));
        }
        _ => {}
    }

    arena
        .children(index)
        .into_iter()
        .find(|&child| touches(arena, child, offset))
        .map_or(Step::Done(SuggestionType::Any), Step::Descend)
}

/// Modifiers and the declared type of a declaration. A placeholder standing
/// in for the type is classified by what it expected.
fn type_slot_step(
    arena: &NodeArena,
    modifiers: &[NodeIndex],
    ty: NodeIndex,
    offset: u32,
) -> Option<Step> {
    if touches(arena, ty, offset) && is_placeholder(arena, ty) {
        return Some(Step::Descend(ty));
    }
    if any_touches(arena, modifiers, offset) || touches(arena, ty, offset) {
        return Some(Step::Done(SuggestionType::TypeOrModifier));
    }
    None
}

fn is_placeholder(arena: &NodeArena, index: NodeIndex) -> bool {
    arena
        .get(index)
        .is_some_and(|node| matches!(node.data, NodeData::Missing { .. } | NodeData::Wrong { .. }))
}

/// Inside a call, past the callee.
fn argument_step(arena: &NodeArena, arguments: &[NodeIndex], offset: u32) -> Step {
    for &argument in arguments {
        if touches(arena, argument, offset) {
            return if arena.has_children(argument) {
                Step::Descend(argument)
            } else {
                Step::Done(SuggestionType::Identifier)
            };
        }
    }
    Step::Done(SuggestionType::LiteralOrIdentifier)
}
