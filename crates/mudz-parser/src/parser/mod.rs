//! Parser module - the arena AST and the recursive-descent `ParserState`.

mod base;
pub mod node;
mod node_access;
mod node_arena;
pub mod state;
mod state_expressions;
mod state_statements;
mod state_types;
pub mod visitor;

pub use base::NodeIndex;
pub use node::{
    ArgumentList, ExpectedKind, LiteralValue, ModifierFlags, Node, NodeArena, NodeData, NodeKind,
};
pub use node_access::Children;
pub use state::{ParseDiagnostic, ParserState};
pub use visitor::{Visitor, walk};

#[cfg(test)]
#[path = "../../tests/state_statement_tests.rs"]
mod state_statement_tests;
#[cfg(test)]
#[path = "../../tests/state_expression_tests.rs"]
mod state_expression_tests;
#[cfg(test)]
#[path = "../../tests/state_type_tests.rs"]
mod state_type_tests;
#[cfg(test)]
#[path = "../../tests/recovery_tests.rs"]
mod recovery_tests;
#[cfg(test)]
#[path = "../../tests/visitor_tests.rs"]
mod visitor_tests;
