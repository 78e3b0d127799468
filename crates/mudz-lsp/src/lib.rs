//! Editor-facing services for the mudz object language.
//!
//! This crate provides:
//! - Cursor classification (`classify`) and completion assembly
//! - A shared, lazily filled cache of analyzed files (`FileResolver`)
//! - Source loaders for the file system, memory and remote responders
//! - Semantic tokens for highlighting
//! - Diagnostics with line/column ranges
//! - `mudz.json` project configuration

pub mod analysis;
pub mod classifier;
pub mod completions;
pub mod config;
pub mod diagnostics;
pub mod loader;
pub mod resolver;
pub mod semantic_tokens;

pub use analysis::{AnalyzedFile, analyze};
pub use classifier::{SuggestionType, classify};
pub use completions::{
    CompletionOptions, CompletionResult, Completions, Suggestion, SuggestionKind,
};
pub use config::{CompletionConfig, ConfigError, ProjectConfig};
pub use diagnostics::{LocatedDiagnostic, collect_diagnostics};
pub use loader::{ChannelLoader, FsLoader, LoadError, LoaderRequest, MemoryLoader, SourceLoader};
pub use resolver::{FileResolver, ResolveError, ResolverStats};
pub use semantic_tokens::{HighlightClass, SemanticToken, semantic_tokens};

#[cfg(test)]
#[path = "../tests/classifier_tests.rs"]
mod classifier_tests;
#[cfg(test)]
#[path = "../tests/completions_tests.rs"]
mod completions_tests;
#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
#[cfg(test)]
#[path = "../tests/loader_tests.rs"]
mod loader_tests;
#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod resolver_tests;
#[cfg(test)]
#[path = "../tests/semantic_tokens_tests.rs"]
mod semantic_tokens_tests;
