//! mudz: error-tolerant analysis for an LPC-style object language.
//!
//! The root package re-exports the phase crates under short names and owns
//! tracing setup for the binaries.
//!
//! Pipeline: `scanner` → `parser` → `binder` (scope tree) → `lsp`
//! (classification, completions, resolution). `solver` holds the type
//! relation used on declared types.

pub use mudz_binder as binder;
pub use mudz_common as common;
pub use mudz_lsp as lsp;
pub use mudz_parser as parser;
pub use mudz_scanner as scanner;
pub use mudz_solver as solver;

pub use mudz_binder::{ContextTree, Definition, build_scopes};
pub use mudz_common::{Diagnostic, LineMap, Position, Range};
pub use mudz_lsp::{
    AnalyzedFile, CompletionResult, Completions, FileResolver, SuggestionType, analyze,
};
pub use mudz_parser::{NodeArena, NodeIndex, ParserState};
pub use mudz_scanner::{ScannerState, SyntaxKind, Token};
pub use mudz_solver::{TypeShape, is_assignable_from, lower_type};

pub mod tracing_config;
