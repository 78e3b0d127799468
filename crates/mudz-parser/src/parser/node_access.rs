//! NodeArena access methods: lookup, child enumeration and text helpers.

use super::base::NodeIndex;
use super::node::{LiteralValue, Node, NodeArena, NodeData, NodeKind};
use smallvec::SmallVec;
use std::fmt::Write as _;

/// Child list of one node, in source order.
pub type Children = SmallVec<[NodeIndex; 4]>;

/// Children of a payload in source order, skipping absent slots.
pub(crate) fn data_children(data: &NodeData) -> Children {
    let mut out = Children::new();
    let mut push = |index: NodeIndex| {
        if index.is_some() {
            out.push(index);
        }
    };

    match data {
        NodeData::SourceFile { statements, .. } => statements.iter().copied().for_each(&mut push),
        NodeData::IncludeDirective { path, .. } | NodeData::Inherit { path } => push(*path),
        NodeData::ClassDeclaration {
            modifiers,
            name,
            members,
            ..
        } => {
            modifiers.iter().copied().for_each(&mut push);
            push(*name);
            members.iter().copied().for_each(&mut push);
        }
        NodeData::FunctionDeclaration {
            modifiers,
            return_type,
            name,
            parameters,
            body,
            ..
        } => {
            modifiers.iter().copied().for_each(&mut push);
            push(*return_type);
            push(*name);
            parameters.items.iter().copied().for_each(&mut push);
            push(*body);
        }
        NodeData::VariableDeclaration {
            modifiers,
            ty,
            declarators,
            ..
        } => {
            modifiers.iter().copied().for_each(&mut push);
            push(*ty);
            declarators.iter().copied().for_each(&mut push);
        }
        NodeData::VariableDeclarator { name, initializer } => {
            push(*name);
            push(*initializer);
        }
        NodeData::Parameter { ty, name, .. } | NodeData::Binding { ty, name } => {
            push(*ty);
            push(*name);
        }
        NodeData::FunctionType {
            return_type,
            parameters,
            ..
        } => {
            push(*return_type);
            parameters.iter().copied().for_each(&mut push);
        }
        NodeData::Block { statements } => statements.iter().copied().for_each(&mut push),
        NodeData::If {
            condition,
            then_statement,
            else_statement,
        } => {
            push(*condition);
            push(*then_statement);
            push(*else_statement);
        }
        NodeData::While { condition, body } => {
            push(*condition);
            push(*body);
        }
        NodeData::Do { body, condition } => {
            push(*body);
            push(*condition);
        }
        NodeData::For {
            initializer,
            condition,
            incrementor,
            body,
        } => {
            push(*initializer);
            push(*condition);
            push(*incrementor);
            push(*body);
        }
        NodeData::Foreach {
            bindings,
            iterable,
            body,
        } => {
            bindings.iter().copied().for_each(&mut push);
            push(*iterable);
            push(*body);
        }
        NodeData::Switch {
            expression,
            clauses,
        } => {
            push(*expression);
            clauses.iter().copied().for_each(&mut push);
        }
        NodeData::CaseClause {
            label,
            range_end,
            statements,
        } => {
            push(*label);
            push(*range_end);
            statements.iter().copied().for_each(&mut push);
        }
        NodeData::Try {
            try_block,
            catch_binding,
            catch_block,
        } => {
            push(*try_block);
            push(*catch_binding);
            push(*catch_block);
        }
        NodeData::Return { expression }
        | NodeData::ExpressionStatement { expression }
        | NodeData::Parenthesized { expression }
        | NodeData::Spread { expression } => push(*expression),
        NodeData::StringConcat { parts } => parts.iter().copied().for_each(&mut push),
        NodeData::Binary { left, right, .. } => {
            push(*left);
            push(*right);
        }
        NodeData::PrefixUnary { operand, .. } | NodeData::PostfixUnary { operand, .. } => {
            push(*operand)
        }
        NodeData::Conditional {
            condition,
            when_true,
            when_false,
        } => {
            push(*condition);
            push(*when_true);
            push(*when_false);
        }
        NodeData::Call { callee, arguments } => {
            push(*callee);
            arguments.items.iter().copied().for_each(&mut push);
        }
        NodeData::MemberAccess {
            expression, name, ..
        } => {
            push(*expression);
            push(*name);
        }
        NodeData::New { target, arguments } => {
            push(*target);
            if let Some(arguments) = arguments {
                arguments.items.iter().copied().for_each(&mut push);
            }
        }
        NodeData::Cast { ty, expression } => {
            push(*ty);
            push(*expression);
        }
        NodeData::Index {
            expression,
            index,
            range_end,
            ..
        } => {
            push(*expression);
            push(*index);
            push(*range_end);
        }
        NodeData::ArrayLiteral { elements } => elements.iter().copied().for_each(&mut push),
        NodeData::MappingLiteral { entries } => entries.iter().copied().for_each(&mut push),
        NodeData::MappingEntry { key, value } => {
            push(*key);
            push(*value);
        }
        NodeData::Modifier { .. }
        | NodeData::Ellipsis
        | NodeData::TypeName { .. }
        | NodeData::Break
        | NodeData::Continue
        | NodeData::EmptyStatement
        | NodeData::Identifier { .. }
        | NodeData::Literal { .. }
        | NodeData::Missing { .. }
        | NodeData::Wrong { .. } => {}
    }
    out
}

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<NodeKind> {
        self.get(index).map(Node::kind)
    }

    /// Direct children of a node in source order.
    pub fn children(&self, index: NodeIndex) -> Children {
        self.get(index)
            .map(|node| data_children(&node.data))
            .unwrap_or_default()
    }

    /// Whether the node has any child nodes ("sub-expressions").
    pub fn has_children(&self, index: NodeIndex) -> bool {
        !self.children(index).is_empty()
    }

    /// Top-level statements of a `SourceFile` node.
    pub fn source_file_statements(&self, root: NodeIndex) -> &[NodeIndex] {
        match self.get(root).map(|n| &n.data) {
            Some(NodeData::SourceFile { statements, .. }) => statements,
            _ => &[],
        }
    }

    /// Name of an `Identifier` node.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        match self.get(index).map(|n| &n.data) {
            Some(NodeData::Identifier { name }) => Some(name),
            _ => None,
        }
    }

    /// Value of a string literal or of a run of adjacent string literals.
    pub fn string_value(&self, index: NodeIndex) -> Option<String> {
        match self.get(index).map(|n| &n.data)? {
            NodeData::Literal {
                value: LiteralValue::String(text),
            } => Some(text.clone()),
            NodeData::StringConcat { parts } => {
                let mut out = String::new();
                for &part in parts {
                    out.push_str(&self.string_value(part)?);
                }
                Some(out)
            }
            _ => None,
        }
    }

    /// Render a type node back to source spelling; sentinels render as `?`.
    pub fn type_text(&self, index: NodeIndex) -> String {
        let mut out = String::new();
        self.write_type_text(index, &mut out);
        out
    }

    fn write_type_text(&self, index: NodeIndex, out: &mut String) {
        let Some(node) = self.get(index) else {
            return;
        };
        match &node.data {
            NodeData::TypeName {
                name, array_depth, ..
            } => {
                out.push_str(name);
                push_array_suffix(out, *array_depth);
            }
            NodeData::FunctionType {
                return_type,
                parameters,
                array_depth,
                ..
            } => {
                out.push_str("function<");
                self.write_type_text(*return_type, out);
                out.push('(');
                for (i, &param) in parameters.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_type_text(param, out);
                }
                out.push_str(")>");
                push_array_suffix(out, *array_depth);
            }
            NodeData::Ellipsis => out.push_str("..."),
            _ => out.push('?'),
        }
    }

    /// Indented one-line-per-node dump of a subtree, for debugging and the CLI.
    pub fn dump(&self, root: NodeIndex) -> String {
        let mut out = String::new();
        let mut stack = vec![(root, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            let Some(node) = self.get(index) else {
                continue;
            };
            let _ = write!(
                out,
                "{:indent$}{:?} [{}, {})",
                "",
                node.kind(),
                node.pos,
                node.end,
                indent = depth * 2
            );
            match &node.data {
                NodeData::Identifier { name } => {
                    let _ = write!(out, " {name}");
                }
                NodeData::Literal { value } => {
                    let _ = write!(out, " {value:?}");
                }
                NodeData::TypeName { .. } | NodeData::FunctionType { .. } => {
                    let _ = write!(out, " {}", self.type_text(index));
                }
                NodeData::Binary { operator, .. }
                | NodeData::PrefixUnary { operator, .. }
                | NodeData::PostfixUnary { operator, .. } => {
                    let _ = write!(out, " {operator:?}");
                }
                NodeData::Missing { message, .. } | NodeData::Wrong { message, .. } => {
                    let _ = write!(out, " {message:?}");
                }
                _ => {}
            }
            out.push('\n');
            for &child in data_children(&node.data).iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }
}

fn push_array_suffix(out: &mut String, depth: u32) {
    for _ in 0..depth {
        out.push_str("[]");
    }
}
