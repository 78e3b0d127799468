//! Tests for AST traversal.
use crate::parser::{Node, NodeArena, NodeIndex, NodeKind, ParserState, Visitor, walk};

struct KindCollector {
    kinds: Vec<NodeKind>,
    skip_bodies: bool,
}

impl Visitor for KindCollector {
    fn visit(&mut self, _arena: &NodeArena, _index: NodeIndex, node: &Node) {
        self.kinds.push(node.kind());
    }

    fn should_descend(&self, kind: NodeKind) -> bool {
        !(self.skip_bodies && kind == NodeKind::FunctionDeclaration)
    }
}

fn collect(source: &str, skip_bodies: bool) -> Vec<NodeKind> {
    let mut parser = ParserState::new("test.c".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let mut collector = KindCollector {
        kinds: Vec::new(),
        skip_bodies,
    };
    walk(parser.get_arena(), root, &mut collector);
    collector.kinds
}

#[test]
fn walk_visits_in_source_order() {
    let kinds = collect("int a = 1; a++;", false);
    assert_eq!(
        kinds,
        vec![
            NodeKind::SourceFile,
            NodeKind::VariableDeclaration,
            NodeKind::TypeName,
            NodeKind::VariableDeclarator,
            NodeKind::Identifier,
            NodeKind::Literal,
            NodeKind::ExpressionStatement,
            NodeKind::PostfixUnary,
            NodeKind::Identifier,
        ]
    );
}

#[test]
fn should_descend_prunes_subtrees() {
    let kinds = collect("void f() { int hidden; } int shown;", true);
    assert!(kinds.contains(&NodeKind::FunctionDeclaration));
    assert_eq!(
        kinds.iter().filter(|&&k| k == NodeKind::VariableDeclaration).count(),
        1
    );
    assert!(!kinds.contains(&NodeKind::Block));
}

#[test]
fn walk_handles_long_operator_chains() {
    let source = format!("x = {};", vec!["1"; 20_000].join(" + "));
    let kinds = collect(&source, false);
    assert_eq!(kinds.iter().filter(|&&k| k == NodeKind::Literal).count(), 20_000);
}

#[test]
fn dump_lists_every_node() {
    let mut parser = ParserState::new("test.c".to_string(), "int x;".to_string());
    let root = parser.parse_source_file();
    let dump = parser.get_arena().dump(root);
    assert_eq!(dump.lines().count(), parser.get_arena().len());
    assert!(dump.contains("TypeName [0, 3) int"));
}
