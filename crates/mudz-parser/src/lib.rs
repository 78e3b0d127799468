//! Parser and AST for the mudz object language.
//!
//! The parser never fails: malformed input produces `Missing` and `Wrong`
//! sentinel nodes in the tree plus a parse diagnostic for each anomaly.

pub mod parser;

pub use parser::{
    ArgumentList, ExpectedKind, LiteralValue, ModifierFlags, Node, NodeArena, NodeData, NodeIndex,
    NodeKind, ParseDiagnostic, ParserState, Visitor, walk,
};
