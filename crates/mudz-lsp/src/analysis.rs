//! One file run through the whole pipeline: scan, parse, bind.

use crate::classifier::{SuggestionType, classify};
use mudz_binder::{ContextTree, Definition, build_scopes};
use mudz_common::LineMap;
use mudz_parser::{NodeArena, NodeIndex, ParseDiagnostic, ParserState};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Parsed and bound source file. Immutable once built; shared through `Arc`
/// by the resolver cache.
#[derive(Debug)]
pub struct AnalyzedFile {
    pub file_name: Arc<str>,
    pub source: Arc<str>,
    pub arena: NodeArena,
    pub root: NodeIndex,
    pub parse_diagnostics: Vec<ParseDiagnostic>,
    pub scopes: ContextTree,
    pub line_map: LineMap,
}

impl AnalyzedFile {
    /// Definitions visible at a cursor offset.
    pub fn visible_at(&self, offset: u32) -> Vec<&Definition> {
        self.scopes.visible_at(offset)
    }

    /// Suggestion category at a cursor offset.
    pub fn classify(&self, offset: u32) -> SuggestionType {
        classify(&self.arena, self.root, offset)
    }

    /// Definitions other files see through `#include` or `inherit`.
    pub fn exported_definitions(&self) -> Vec<&Definition> {
        self.scopes.top_level_definitions()
    }

    pub fn has_errors(&self) -> bool {
        !self.parse_diagnostics.is_empty()
    }
}

/// Analyze a whole buffer. Never fails; malformed input yields a tree with
/// sentinel nodes and parse diagnostics.
#[instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn analyze(file_name: &str, source: &str) -> AnalyzedFile {
    let mut parser = ParserState::new(file_name.to_string(), source.to_string());
    let root = parser.parse_source_file();
    let (arena, parse_diagnostics) = parser.into_parts();
    let scopes = build_scopes(&arena, root);
    debug!(
        nodes = arena.len(),
        diagnostics = parse_diagnostics.len(),
        definitions = scopes.definitions().len(),
        "analyzed file"
    );
    AnalyzedFile {
        file_name: Arc::from(file_name),
        source: Arc::from(source),
        arena,
        root,
        parse_diagnostics,
        scopes,
        line_map: LineMap::build(source),
    }
}
