//! Binder for the mudz object language.
//!
//! A single forward walk over the AST builds a `ContextTree`: a tree of
//! lexical scopes, each holding the definitions made directly inside it keyed
//! by source offset. Completion asks the tree which definitions are visible
//! at a cursor offset.

pub mod context;
pub mod definition;
pub mod state;

pub use context::{
    Context, ContextEntry, ContextId, ContextKind, ContextTree, Dependency, DependencyKind,
};
pub use definition::{Definition, DefinitionId, DefinitionKind, FunctionDefinition, ParameterInfo};
pub use state::{BinderState, build_scopes};

#[cfg(test)]
#[path = "../tests/scope_tests.rs"]
mod scope_tests;
#[cfg(test)]
#[path = "../tests/definition_tests.rs"]
mod definition_tests;
