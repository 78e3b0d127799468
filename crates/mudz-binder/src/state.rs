//! Binder state - one forward pass over the AST building the scope tree.
//!
//! The walk is pre-order and has no leave hook, so every scope pushed is
//! paired with its end offset on a pending stack. Before each node is visited
//! the scopes that end at or before the node's start are popped and closed.

use crate::context::{ContextId, ContextKind, ContextTree, Dependency, DependencyKind};
use crate::definition::{Definition, DefinitionKind, FunctionDefinition, ParameterInfo};
use mudz_parser::{
    ArgumentList, ModifierFlags, Node, NodeArena, NodeData, NodeIndex, NodeKind, Visitor, walk,
};
use rustc_hash::FxHashSet;
use tracing::{debug, instrument, trace};

pub struct BinderState {
    tree: ContextTree,
    current: ContextId,
    /// Open scopes and the offset at which each one closes, innermost last.
    pending: Vec<(ContextId, u32)>,
    /// Function bodies whose scope was already opened by their declaration.
    function_bodies: FxHashSet<NodeIndex>,
}

impl BinderState {
    pub fn new() -> BinderState {
        BinderState {
            tree: ContextTree::new(0),
            current: ContextId::ROOT,
            pending: Vec::new(),
            function_bodies: FxHashSet::default(),
        }
    }

    /// Bind a parsed source file. `root` must be its `SourceFile` node.
    #[instrument(level = "debug", skip_all)]
    pub fn bind_source_file(&mut self, arena: &NodeArena, root: NodeIndex) {
        let source_len = arena.get(root).map_or(0, |node| node.end);
        self.tree = ContextTree::new(source_len);
        self.current = ContextId::ROOT;
        self.pending.clear();
        self.function_bodies.clear();

        walk(arena, root, self);

        while let Some((id, end)) = self.pending.pop() {
            trace!(context = id.0, end, "close scope at end of input");
            self.tree.close_context(id, end);
        }
        self.current = ContextId::ROOT;
        debug!(
            contexts = self.tree.contexts.len(),
            definitions = self.tree.definitions.len(),
            dependencies = self.tree.dependencies.len(),
            "bound source file"
        );
    }

    pub fn tree(&self) -> &ContextTree {
        &self.tree
    }

    pub fn into_tree(self) -> ContextTree {
        self.tree
    }

    // =========================================================================
    // Scope stack
    // =========================================================================

    fn enter_scope(&mut self, kind: ContextKind, begin: u32, end: u32) {
        let id = self.tree.push_context(self.current, kind, begin);
        trace!(context = id.0, ?kind, begin, end, "push scope");
        self.pending.push((id, end));
        self.current = id;
    }

    /// Close every open scope that ends at or before `pos`.
    fn leave_scopes_before(&mut self, pos: u32) {
        while let Some(&(id, end)) = self.pending.last() {
            if end > pos {
                break;
            }
            self.pending.pop();
            self.tree.close_context(id, end);
            self.current = self
                .tree
                .context(id)
                .and_then(|context| context.parent)
                .unwrap_or(ContextId::ROOT);
            trace!(context = id.0, end, "pop scope");
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn bind_function(
        &mut self,
        arena: &NodeArena,
        index: NodeIndex,
        node: &Node,
        data: FunctionParts<'_>,
    ) {
        let FunctionParts {
            flags,
            return_type,
            name,
            parameters,
            body,
        } = data;

        let signature = function_signature(arena, parameters, flags, body.is_some());
        if let Some(name_text) = arena.identifier_text(name) {
            let offset = arena.get(name).map_or(node.pos, |n| n.pos);
            self.declare(Definition {
                name: name_text.to_string(),
                kind: DefinitionKind::Function,
                offset,
                declaration: index,
                type_node: return_type,
                type_text: arena.type_text(return_type),
                modifiers: flags,
                function: Some(signature),
            });
        }

        self.enter_scope(ContextKind::Function, parameters.pos, node.end);
        if body.is_some() {
            self.function_bodies.insert(body);
        }
    }

    fn bind_variables(
        &mut self,
        arena: &NodeArena,
        declaration: NodeIndex,
        ty: NodeIndex,
        flags: ModifierFlags,
        declarators: &[NodeIndex],
    ) {
        let type_text = arena.type_text(ty);
        for &declarator in declarators {
            let Some(NodeData::VariableDeclarator { name, .. }) =
                arena.get(declarator).map(|n| &n.data)
            else {
                continue;
            };
            let (Some(name_text), Some(name_node)) =
                (arena.identifier_text(*name), arena.get(*name))
            else {
                continue;
            };
            self.declare(Definition {
                name: name_text.to_string(),
                kind: DefinitionKind::Variable,
                offset: name_node.pos,
                declaration,
                type_node: ty,
                type_text: type_text.clone(),
                modifiers: flags,
                function: None,
            });
        }
    }

    /// Parameters and `foreach`/`catch` bindings.
    fn bind_local(
        &mut self,
        arena: &NodeArena,
        declaration: NodeIndex,
        kind: DefinitionKind,
        ty: NodeIndex,
        name: NodeIndex,
    ) {
        let (Some(name_text), Some(name_node)) = (arena.identifier_text(name), arena.get(name))
        else {
            return;
        };
        self.declare(Definition {
            name: name_text.to_string(),
            kind,
            offset: name_node.pos,
            declaration,
            type_node: ty,
            type_text: arena.type_text(ty),
            modifiers: ModifierFlags::empty(),
            function: None,
        });
    }

    fn bind_class(
        &mut self,
        arena: &NodeArena,
        index: NodeIndex,
        node: &Node,
        name: NodeIndex,
        flags: ModifierFlags,
    ) {
        let name_node = arena.get(name);
        if let (Some(name_text), Some(name_node)) = (arena.identifier_text(name), name_node) {
            self.declare(Definition {
                name: name_text.to_string(),
                kind: DefinitionKind::Class,
                offset: name_node.pos,
                declaration: index,
                type_node: NodeIndex::NONE,
                type_text: name_text.to_string(),
                modifiers: flags,
                function: None,
            });
        }
        let begin = name_node.map_or(node.pos, |n| n.end);
        self.enter_scope(ContextKind::Class, begin, node.end);
    }

    fn declare(&mut self, definition: Definition) {
        trace!(
            name = %definition.name,
            kind = ?definition.kind,
            offset = definition.offset,
            context = self.current.0,
            "declare"
        );
        self.tree.add_definition(self.current, definition);
    }

    fn record_dependency(&mut self, arena: &NodeArena, kind: DependencyKind, path: NodeIndex) {
        let Some(value) = arena.string_value(path) else {
            return;
        };
        let offset = arena.get(path).map_or(0, |n| n.pos);
        self.tree.dependencies.push(Dependency {
            kind,
            path: value,
            offset,
        });
    }
}

impl Default for BinderState {
    fn default() -> Self {
        Self::new()
    }
}

struct FunctionParts<'a> {
    flags: ModifierFlags,
    return_type: NodeIndex,
    name: NodeIndex,
    parameters: &'a ArgumentList,
    body: NodeIndex,
}

impl Visitor for BinderState {
    fn visit(&mut self, arena: &NodeArena, index: NodeIndex, node: &Node) {
        self.leave_scopes_before(node.pos);

        match &node.data {
            NodeData::FunctionDeclaration {
                flags,
                return_type,
                name,
                parameters,
                body,
                ..
            } => self.bind_function(
                arena,
                index,
                node,
                FunctionParts {
                    flags: *flags,
                    return_type: *return_type,
                    name: *name,
                    parameters,
                    body: *body,
                },
            ),
            NodeData::Parameter { ty, name, .. } => {
                self.bind_local(arena, index, DefinitionKind::Parameter, *ty, *name)
            }
            NodeData::VariableDeclaration {
                flags,
                ty,
                declarators,
                ..
            } => self.bind_variables(arena, index, *ty, *flags, declarators),
            NodeData::Binding { ty, name } => {
                self.bind_local(arena, index, DefinitionKind::Variable, *ty, *name)
            }
            NodeData::ClassDeclaration { name, flags, .. } => {
                self.bind_class(arena, index, node, *name, *flags)
            }
            NodeData::Block { .. } => {
                if !self.function_bodies.remove(&index) {
                    self.enter_scope(ContextKind::Block, node.pos, node.end);
                }
            }
            NodeData::IncludeDirective { path, system } => {
                let kind = if *system {
                    DependencyKind::SystemInclude
                } else {
                    DependencyKind::Include
                };
                self.record_dependency(arena, kind, *path);
            }
            NodeData::Inherit { path } => {
                self.record_dependency(arena, DependencyKind::Inherit, *path)
            }
            _ => {}
        }
    }

    fn should_descend(&self, kind: NodeKind) -> bool {
        // Type nodes and directive payloads declare nothing.
        !kind.is_type() && !matches!(kind, NodeKind::IncludeDirective | NodeKind::Inherit)
    }
}

fn function_signature(
    arena: &NodeArena,
    parameters: &ArgumentList,
    flags: ModifierFlags,
    has_body: bool,
) -> FunctionDefinition {
    let mut signature = FunctionDefinition {
        parameters: Vec::new(),
        variadic: flags.contains(ModifierFlags::VARARGS),
        has_body,
    };
    for &item in &parameters.items {
        match arena.get(item).map(|n| &n.data) {
            Some(NodeData::Parameter { ty, name, variadic }) => {
                signature.variadic |= *variadic;
                signature.parameters.push(ParameterInfo {
                    name: arena.identifier_text(*name).unwrap_or_default().to_string(),
                    type_node: *ty,
                    type_text: arena.type_text(*ty),
                    variadic: *variadic,
                });
            }
            Some(NodeData::Ellipsis) => signature.variadic = true,
            _ => {}
        }
    }
    signature
}

/// Build the scope tree of a parsed source file.
pub fn build_scopes(arena: &NodeArena, root: NodeIndex) -> ContextTree {
    let mut binder = BinderState::new();
    binder.bind_source_file(arena, root);
    binder.into_tree()
}
