//! Structural type relations for the mudz object language.
//!
//! Type-denoting AST nodes are lowered into owned `TypeShape` values, which
//! answer the assignability question without touching the arena again:
//!
//! - `lower` - AST type nodes (and declarations wrapping them) to shapes
//! - `compat` - the `is_assignable_from` relation
//! - `infer` - shapes of literal-like expressions
//! - `format` - shapes back to source spelling

pub mod compat;
pub mod format;
pub mod infer;
pub mod lower;
pub mod types;

pub use compat::{is_assignable_from, is_node_assignable_from};
pub use format::TypeFormatter;
pub use infer::infer_literal_type;
pub use lower::{RelationError, lower_type};
pub use types::{FunctionSignature, TypeShape, TypeTag};

#[cfg(test)]
#[path = "../tests/compat_tests.rs"]
mod compat_tests;
#[cfg(test)]
#[path = "../tests/lower_tests.rs"]
mod lower_tests;
#[cfg(test)]
#[path = "../tests/infer_tests.rs"]
mod infer_tests;
