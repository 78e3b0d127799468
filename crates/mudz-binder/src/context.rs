//! Lexical scope tree.
//!
//! Contexts are stored in an arena and addressed by `ContextId`. A child only
//! records its parent's id; the parent owns the child through an entry in its
//! offset-ordered map. Definitions are stored once in the tree and referenced
//! from their owning context by `DefinitionId`.

use crate::definition::{Definition, DefinitionId};
use mudz_common::limits::MAX_TREE_WALK_ITERATIONS;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContextId(pub u32);

impl ContextId {
    /// The file-level context.
    pub const ROOT: ContextId = ContextId(0);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ContextKind {
    File,
    Function,
    Block,
    Class,
}

/// What a context owns at a given offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ContextEntry {
    Child(ContextId),
    Definition(DefinitionId),
}

#[derive(Clone, Debug, Serialize)]
pub struct Context {
    pub id: ContextId,
    pub parent: Option<ContextId>,
    pub kind: ContextKind,
    pub begin: u32,
    /// Stamped when the builder leaves the construct.
    pub end: u32,
    pub entries: BTreeMap<u32, ContextEntry>,
}

impl Context {
    /// Definitions owned directly by this context, in offset order.
    pub fn definition_ids(&self) -> impl Iterator<Item = (u32, DefinitionId)> + '_ {
        self.entries.iter().filter_map(|(&offset, entry)| match entry {
            ContextEntry::Definition(id) => Some((offset, *id)),
            ContextEntry::Child(_) => None,
        })
    }

    /// Child contexts, in offset order.
    pub fn child_ids(&self) -> impl Iterator<Item = ContextId> + '_ {
        self.entries.values().filter_map(|entry| match entry {
            ContextEntry::Child(id) => Some(*id),
            ContextEntry::Definition(_) => None,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DependencyKind {
    Include,
    /// `#include <name>`
    SystemInclude,
    Inherit,
}

/// An `#include` or `inherit` target named in the file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub kind: DependencyKind,
    pub path: String,
    pub offset: u32,
}

/// Scope tree for one source file.
#[derive(Clone, Debug, Serialize)]
pub struct ContextTree {
    pub(crate) contexts: Vec<Context>,
    pub(crate) definitions: Vec<Definition>,
    pub(crate) dependencies: Vec<Dependency>,
    pub(crate) source_len: u32,
}

impl ContextTree {
    /// A tree holding only the root context over `[0, source_len)`.
    pub fn new(source_len: u32) -> ContextTree {
        ContextTree {
            contexts: vec![Context {
                id: ContextId::ROOT,
                parent: None,
                kind: ContextKind::File,
                begin: 0,
                end: source_len,
                entries: BTreeMap::new(),
            }],
            definitions: Vec::new(),
            dependencies: Vec::new(),
            source_len,
        }
    }

    #[inline]
    pub fn root(&self) -> &Context {
        &self.contexts[0]
    }

    #[inline]
    pub fn context(&self, id: ContextId) -> Option<&Context> {
        self.contexts.get(id.0 as usize)
    }

    #[inline]
    pub fn definition(&self, id: DefinitionId) -> Option<&Definition> {
        self.definitions.get(id.0 as usize)
    }

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    /// Every definition in the file, in registration order.
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Definitions owned by the root context. These are what other files see
    /// through `#include` and `inherit`.
    pub fn top_level_definitions(&self) -> Vec<&Definition> {
        self.owned_definitions(ContextId::ROOT, u32::MAX)
    }

    /// Open a child context under `parent` starting at `begin`.
    pub(crate) fn push_context(
        &mut self,
        parent: ContextId,
        kind: ContextKind,
        begin: u32,
    ) -> ContextId {
        let id = ContextId(self.contexts.len() as u32);
        self.contexts.push(Context {
            id,
            parent: Some(parent),
            kind,
            begin,
            end: begin,
            entries: BTreeMap::new(),
        });
        self.insert_entry(parent, begin, ContextEntry::Child(id));
        id
    }

    pub(crate) fn close_context(&mut self, id: ContextId, end: u32) {
        if let Some(context) = self.contexts.get_mut(id.0 as usize) {
            context.end = end.max(context.begin);
        }
    }

    pub(crate) fn add_definition(
        &mut self,
        context: ContextId,
        definition: Definition,
    ) -> DefinitionId {
        let id = DefinitionId(self.definitions.len() as u32);
        let offset = definition.offset;
        self.definitions.push(definition);
        self.insert_entry(context, offset, ContextEntry::Definition(id));
        id
    }

    fn insert_entry(&mut self, context: ContextId, offset: u32, entry: ContextEntry) {
        let Some(owner) = self.contexts.get_mut(context.0 as usize) else {
            return;
        };
        if owner.entries.contains_key(&offset) {
            warn!(offset, ?entry, "context entry offset already taken");
            return;
        }
        owner.entries.insert(offset, entry);
    }

    /// Whether `offset` lies inside the context. A context that runs to the
    /// end of input also contains the end offset itself.
    pub fn contains(&self, id: ContextId, offset: u32) -> bool {
        self.context(id).is_some_and(|context| {
            (context.begin <= offset && offset < context.end)
                || (offset == context.end && context.end == self.source_len)
        })
    }

    /// Innermost context containing `offset`; the root when no child does.
    pub fn context_at(&self, offset: u32) -> ContextId {
        let mut current = ContextId::ROOT;
        for _ in 0..MAX_TREE_WALK_ITERATIONS {
            let Some(context) = self.context(current) else {
                break;
            };
            // Sibling contexts never overlap, so only the last child starting
            // at or before the offset can contain it.
            let candidate = context
                .entries
                .range(..=offset)
                .rev()
                .find_map(|(_, entry)| match entry {
                    ContextEntry::Child(id) => Some(*id),
                    ContextEntry::Definition(_) => None,
                });
            match candidate {
                Some(child) if self.contains(child, offset) => current = child,
                _ => break,
            }
        }
        current
    }

    /// Ancestors of `id`, outermost first, ending with `id` itself.
    pub fn scope_chain(&self, id: ContextId) -> Vec<ContextId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(next) = current {
            if chain.len() >= MAX_TREE_WALK_ITERATIONS {
                warn!(context = next.0, "scope chain exceeds walk bound");
                break;
            }
            chain.push(next);
            current = self.context(next).and_then(|context| context.parent);
        }
        chain.reverse();
        chain
    }

    /// Definitions visible from context `id` at `offset`: everything the
    /// parent sees at the same offset, then this context's own definitions
    /// whose key is strictly before `offset`, in ascending offset order.
    pub fn available_instructions(&self, id: ContextId, offset: u32) -> Vec<&Definition> {
        self.scope_chain(id)
            .into_iter()
            .flat_map(|context| self.owned_definitions(context, offset))
            .collect()
    }

    /// `available_instructions` for the innermost context at `offset`.
    pub fn visible_at(&self, offset: u32) -> Vec<&Definition> {
        self.available_instructions(self.context_at(offset), offset)
    }

    fn owned_definitions(&self, id: ContextId, before: u32) -> Vec<&Definition> {
        let Some(context) = self.context(id) else {
            return Vec::new();
        };
        context
            .entries
            .range(..before)
            .filter_map(|(_, entry)| match entry {
                ContextEntry::Definition(def) => self.definition(*def),
                ContextEntry::Child(_) => None,
            })
            .collect()
    }
}
