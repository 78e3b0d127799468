//! Centralized limits for the analysis pipeline.
//!
//! The parser runs on every keystroke over arbitrary, mostly invalid input,
//! so recursion and include chasing are bounded rather than trusted.

/// Maximum syntactic nesting (expressions, statements, types) the parser
/// descends into before reporting the construct as wrong and skipping it.
pub const MAX_NESTING_DEPTH: u32 = 256;

/// Maximum depth of transitive `#include`/`inherit` resolution.
pub const MAX_INCLUDE_DEPTH: usize = 32;

/// Default time a blocking loader waits for a remote reply.
pub const DEFAULT_LOADER_TIMEOUT_MS: u64 = 10_000;

/// Upper bound on tree walks that follow parent links.
pub const MAX_TREE_WALK_ITERATIONS: usize = 10_000;
