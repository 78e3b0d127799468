//! Completion assembly.
//!
//! The classifier decides which families of candidates belong at the cursor;
//! the scope tree (plus the exported definitions of resolved `#include` and
//! `inherit` targets) supplies the names. Candidates are then filtered by the
//! word left of the cursor, deduplicated and truncated.

use crate::analysis::AnalyzedFile;
use crate::classifier::SuggestionType;
use crate::config::CompletionConfig;
use crate::resolver::FileResolver;
use mudz_binder::{Definition, DefinitionKind};
use mudz_parser::{NodeArena, NodeIndex};
use mudz_scanner::{KEYWORDS, token_is_modifier, token_is_type_keyword};
use mudz_solver::{TypeFormatter, lower_type};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;

/// Display kind of a suggestion. Not part of suggestion equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SuggestionKind {
    Literal,
    Snippet,
    Variable,
    Parameter,
    Function,
    Class,
    Type,
    Modifier,
    Keyword,
}

/// One completion candidate.
#[derive(Clone, Debug, Serialize)]
pub struct Suggestion {
    pub insert_text: String,
    pub description: String,
    /// Where to put the caret after insertion, relative to the end of the
    /// inserted text.
    pub cursor_offset: Option<i32>,
    /// Annotation shown to the right: the declared type, or the return type
    /// of a function, as the formatter spells it.
    pub right_hand: Option<String>,
    pub kind: SuggestionKind,
}

impl PartialEq for Suggestion {
    fn eq(&self, other: &Self) -> bool {
        self.insert_text == other.insert_text
            && self.description == other.description
            && self.cursor_offset == other.cursor_offset
            && self.right_hand == other.right_hand
    }
}

impl Eq for Suggestion {}

impl Hash for Suggestion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.insert_text.hash(state);
        self.description.hash(state);
        self.cursor_offset.hash(state);
        self.right_hand.hash(state);
    }
}

impl Suggestion {
    fn plain(text: &str, description: &str, kind: SuggestionKind) -> Suggestion {
        Suggestion {
            insert_text: text.to_string(),
            description: description.to_string(),
            cursor_offset: None,
            right_hand: None,
            kind,
        }
    }

    fn from_definition(arena: &NodeArena, definition: &Definition) -> Suggestion {
        let right_hand = declared_type(arena, definition.type_node);
        match definition.kind {
            DefinitionKind::Function => {
                let takes_arguments = definition
                    .function
                    .as_ref()
                    .is_some_and(|f| !f.parameters.is_empty() || f.variadic);
                Suggestion {
                    insert_text: format!("{}()", definition.name),
                    description: definition.signature(),
                    cursor_offset: takes_arguments.then_some(-1),
                    right_hand,
                    kind: SuggestionKind::Function,
                }
            }
            DefinitionKind::Class => Suggestion {
                insert_text: definition.name.clone(),
                description: format!("class {}", definition.name),
                cursor_offset: None,
                right_hand: None,
                kind: SuggestionKind::Class,
            },
            DefinitionKind::Variable | DefinitionKind::Parameter => Suggestion {
                insert_text: definition.name.clone(),
                description: definition.signature(),
                cursor_offset: None,
                right_hand,
                kind: if definition.kind == DefinitionKind::Parameter {
                    SuggestionKind::Parameter
                } else {
                    SuggestionKind::Variable
                },
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletionOptions {
    pub case_sensitive: bool,
    pub max_items: Option<usize>,
}

impl From<&CompletionConfig> for CompletionOptions {
    fn from(config: &CompletionConfig) -> Self {
        CompletionOptions {
            case_sensitive: config.case_sensitive,
            max_items: config.max_items,
        }
    }
}

/// Suggestions for one cursor, plus the category used to pick them.
#[derive(Clone, Debug, Serialize)]
pub struct CompletionResult {
    pub suggestion_type: SuggestionType,
    /// Word left of the cursor the suggestions were filtered by.
    pub prefix: String,
    pub suggestions: Vec<Suggestion>,
}

const LITERALS: &[(&str, &str)] = &[
    ("nil", "the nil value"),
    ("true", "boolean true"),
    ("false", "boolean false"),
    ("this", "the current object"),
];

pub struct Completions<'a> {
    file: &'a AnalyzedFile,
    resolver: Option<&'a FileResolver>,
    options: CompletionOptions,
}

impl<'a> Completions<'a> {
    pub fn new(file: &'a AnalyzedFile) -> Self {
        Completions {
            file,
            resolver: None,
            options: CompletionOptions::default(),
        }
    }

    /// Also offer definitions from the file's `#include`/`inherit` targets.
    #[must_use]
    pub fn with_resolver(mut self, resolver: &'a FileResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn complete(&self, offset: u32) -> CompletionResult {
        let offset = offset.min(self.file.source.len() as u32);
        let suggestion_type = self.file.classify(offset);
        let prefix = word_before(&self.file.source, offset).to_string();

        let mut candidates = Vec::new();
        let dependencies = self.dependency_files();
        let visible = self.visible_definitions(offset, &dependencies);

        let (literal, identifier, types, modifiers, keywords) = families(suggestion_type);
        if literal {
            self.push_literals(&mut candidates);
        }
        if identifier {
            candidates.extend(
                visible
                    .iter()
                    .filter(|(_, def)| def.kind != DefinitionKind::Class)
                    .map(|(arena, def)| Suggestion::from_definition(arena, def)),
            );
        }
        if types {
            candidates.extend(
                KEYWORDS
                    .iter()
                    .filter(|(_, kind)| token_is_type_keyword(*kind))
                    .map(|(text, _)| Suggestion::plain(text, "type", SuggestionKind::Type)),
            );
            candidates.extend(
                visible
                    .iter()
                    .filter(|(_, def)| def.kind == DefinitionKind::Class)
                    .map(|(arena, def)| Suggestion::from_definition(arena, def)),
            );
        }
        if modifiers {
            candidates.extend(
                KEYWORDS
                    .iter()
                    .filter(|(_, kind)| token_is_modifier(*kind))
                    .map(|(text, _)| Suggestion::plain(text, "modifier", SuggestionKind::Modifier)),
            );
        }
        if keywords {
            candidates.extend(
                KEYWORDS
                    .iter()
                    .filter(|(_, kind)| !token_is_type_keyword(*kind) && !token_is_modifier(*kind))
                    .filter(|(text, _)| !LITERALS.iter().any(|(literal, _)| literal == text))
                    .map(|(text, _)| Suggestion::plain(text, "keyword", SuggestionKind::Keyword)),
            );
        }

        let suggestions = self.filter(candidates, &prefix);
        debug!(
            offset,
            ?suggestion_type,
            %prefix,
            count = suggestions.len(),
            "completions"
        );
        CompletionResult {
            suggestion_type,
            prefix,
            suggestions,
        }
    }

    fn push_literals(&self, out: &mut Vec<Suggestion>) {
        out.extend(LITERALS.iter().map(|(text, description)| {
            Suggestion::plain(text, description, SuggestionKind::Literal)
        }));
        out.push(Suggestion {
            insert_text: "({ })".to_string(),
            description: "array literal".to_string(),
            cursor_offset: Some(-2),
            right_hand: Some("any[]".to_string()),
            kind: SuggestionKind::Snippet,
        });
        out.push(Suggestion {
            insert_text: "([ ])".to_string(),
            description: "mapping literal".to_string(),
            cursor_offset: Some(-2),
            right_hand: Some("mapping".to_string()),
            kind: SuggestionKind::Snippet,
        });
    }

    fn dependency_files(&self) -> Vec<Arc<AnalyzedFile>> {
        match self.resolver {
            Some(resolver) => resolver.resolve_dependencies(self.file),
            None => Vec::new(),
        }
    }

    /// Local definitions visible at the cursor, then everything the
    /// dependencies export, each with the arena its nodes live in.
    fn visible_definitions<'d>(
        &'d self,
        offset: u32,
        dependencies: &'d [Arc<AnalyzedFile>],
    ) -> Vec<(&'d NodeArena, &'d Definition)> {
        let mut visible: Vec<_> = self
            .file
            .visible_at(offset)
            .into_iter()
            .map(|def| (&self.file.arena, def))
            .collect();
        for dependency in dependencies {
            visible.extend(
                dependency
                    .exported_definitions()
                    .into_iter()
                    .map(|def| (&dependency.arena, def)),
            );
        }
        visible
    }

    fn filter(&self, candidates: Vec<Suggestion>, prefix: &str) -> Vec<Suggestion> {
        let prefix_folded = prefix.to_lowercase();
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for candidate in candidates {
            let matches = if self.options.case_sensitive {
                candidate.insert_text.starts_with(prefix)
            } else {
                candidate.insert_text.to_lowercase().starts_with(&prefix_folded)
            };
            if matches && seen.insert(candidate.clone()) {
                out.push(candidate);
            }
        }
        if let Some(max) = self.options.max_items {
            out.truncate(max);
        }
        out
    }
}

/// Spelling of a declared type; `None` when untyped or unparsed.
fn declared_type(arena: &NodeArena, type_node: NodeIndex) -> Option<String> {
    if type_node.is_none() {
        return None;
    }
    let shape = lower_type(arena, type_node).ok()?;
    (!shape.is_unknown()).then(|| TypeFormatter::new().format(&shape))
}

/// (literal, identifier, type, modifier, keyword) families for a category.
fn families(suggestion_type: SuggestionType) -> (bool, bool, bool, bool, bool) {
    match suggestion_type {
        SuggestionType::Literal => (true, false, false, false, false),
        SuggestionType::Identifier => (false, true, false, false, false),
        SuggestionType::LiteralOrIdentifier => (true, true, false, false, false),
        SuggestionType::Type => (false, false, true, false, false),
        SuggestionType::Modifier => (false, false, false, true, false),
        SuggestionType::TypeOrModifier => (false, false, true, true, false),
        SuggestionType::Any => (true, true, true, true, true),
    }
}

/// The identifier characters immediately left of `offset`.
fn word_before(source: &str, offset: u32) -> &str {
    let end = (offset as usize).min(source.len());
    let Some(head) = source.get(..end) else {
        return "";
    };
    let start = head
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric() || matches!(c, '_' | '$' | '#'))
        .last()
        .map_or(end, |(i, _)| i);
    &head[start..]
}
