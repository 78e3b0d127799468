//! Error recovery and structural properties of the tree over malformed input.
use crate::parser::{NodeArena, NodeData, NodeIndex, NodeKind, ParserState};
use mudz_common::TextRange;

fn parse_source(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.c".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

fn count_kind(arena: &NodeArena, kind: NodeKind) -> usize {
    arena.iter().filter(|(_, n)| n.kind() == kind).count()
}

/// Every child lies inside its parent and siblings never overlap.
fn assert_well_nested(arena: &NodeArena, root: NodeIndex, source: &str) {
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        let Some(node) = arena.get(index) else {
            continue;
        };
        let children = arena.children(index);
        let mut previous: Option<TextRange> = None;
        for &child in &children {
            let Some(child_node) = arena.get(child) else {
                continue;
            };
            assert!(
                node.range().covers(child_node.range()),
                "{source:?}: {:?} {:?} does not cover {:?} {:?}",
                node.kind(),
                node.range(),
                child_node.kind(),
                child_node.range()
            );
            if let Some(prev) = previous {
                assert!(
                    !prev.overlaps(child_node.range()) && prev.end <= child_node.pos,
                    "{source:?}: siblings overlap at {:?}",
                    child_node.range()
                );
            }
            previous = Some(child_node.range());
            stack.push(child);
        }
    }
}

fn shape(arena: &NodeArena) -> Vec<(NodeKind, u32, u32)> {
    arena.iter().map(|(_, n)| (n.kind(), n.pos, n.end)).collect()
}

const MALFORMED: &[&str] = &[
    "int ;",
    "int x = ;",
    "void f( { }",
    "void f(int a, { return a +; }",
    "if (x { y(); }",
    "foo(1, , 3",
    "}}} int y;",
    "class { int",
    "x = ({ 1, 2 ;",
    "m = ([ 1 : , 2 ]);",
    "switch (x) { y(); case : }",
    "for (int i = 0; i <",
    "#include",
    "inherit ;",
    "@@@ $$$ `",
    "\"unterminated",
    "(int)",
    "a->",
    "function<int(> f;",
    "try catch",
    "foreach (in) {}",
    "new",
];

#[test]
fn missing_declared_name_produces_one_missing_node() {
    let (parser, root) = parse_source("int ;");
    let arena = parser.get_arena();
    assert_eq!(count_kind(arena, NodeKind::Missing), 1);
    assert_eq!(parser.get_diagnostics().len(), 1);

    let statement = arena.source_file_statements(root)[0];
    let node = arena.get(statement).unwrap();
    assert_eq!(node.kind(), NodeKind::VariableDeclaration);
    assert_eq!(node.end, 5, "declaration ends at the semicolon");

    let missing = arena
        .iter()
        .find(|(_, n)| n.kind() == NodeKind::Missing)
        .map(|(_, n)| n)
        .unwrap();
    assert_eq!((missing.pos, missing.end), (4, 4));
    assert!(matches!(
        missing.data,
        NodeData::Missing {
            expected: Some(crate::parser::ExpectedKind::Literal),
            ..
        }
    ));
}

#[test]
fn malformed_sources_parse_to_well_nested_trees() {
    for source in MALFORMED {
        let (parser, root) = parse_source(source);
        assert!(!parser.get_diagnostics().is_empty(), "{source:?} should report");
        assert_well_nested(parser.get_arena(), root, source);
    }
}

#[test]
fn valid_source_parses_to_well_nested_tree() {
    let source = r#"
inherit "/std/object";
private mapping[] cache = ({ });
int query(string key, varargs int flags...) {
    foreach (string k, int v in cache[0]) {
        if (k == key && (v & flags)) return v;
    }
    return cache[0][key] ? (int)cache[0][key] : -1;
}
"#;
    let (parser, root) = parse_source(source);
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    assert_well_nested(parser.get_arena(), root, source);
}

#[test]
fn parsing_is_idempotent() {
    for source in MALFORMED.iter().chain(["int a; { int b; }"].iter()) {
        let (first, _) = parse_source(source);
        let (second, _) = parse_source(source);
        assert_eq!(shape(first.get_arena()), shape(second.get_arena()), "{source:?}");
        assert_eq!(first.get_diagnostics(), second.get_diagnostics());
    }
}

#[test]
fn parsing_continues_after_an_error() {
    let (parser, root) = parse_source("int x = ;\nint y = 2;");
    let arena = parser.get_arena();
    let kinds: Vec<NodeKind> = arena
        .source_file_statements(root)
        .iter()
        .filter_map(|&s| arena.kind(s))
        .collect();
    assert_eq!(
        kinds,
        vec![NodeKind::VariableDeclaration, NodeKind::VariableDeclaration]
    );
}

#[test]
fn stray_tokens_become_wrong_nodes() {
    let (parser, _) = parse_source("} ) int y;");
    let arena = parser.get_arena();
    assert_eq!(count_kind(arena, NodeKind::Wrong), 2);
    assert_eq!(count_kind(arena, NodeKind::VariableDeclaration), 1);
}

#[test]
fn missing_cast_operand_is_zero_width_at_end() {
    let (parser, root) = parse_source("(int)");
    let arena = parser.get_arena();
    let missing: Vec<_> = arena
        .iter()
        .filter(|(_, n)| n.kind() == NodeKind::Missing)
        .map(|(_, n)| (n.pos, n.end))
        .collect();
    assert_eq!(missing, vec![(5, 5)]);
    assert_well_nested(arena, root, "(int)");
}

#[test]
fn deep_nesting_is_bounded() {
    // Run on a large stack; the bound caps recursion, not frame size.
    let handle = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let source = format!("x = {}1{};", "(".repeat(1000), ")".repeat(1000));
            let (parser, root) = parse_source(&source);
            assert!(count_kind(parser.get_arena(), NodeKind::Wrong) > 0);
            assert_well_nested(parser.get_arena(), root, "deep");
        })
        .unwrap();
    handle.join().unwrap();
}

#[test]
fn unterminated_block_extends_to_end_of_input() {
    let source = "void f() { int x; ";
    let (parser, root) = parse_source(source);
    let arena = parser.get_arena();
    let block = arena
        .iter()
        .find(|(_, n)| n.kind() == NodeKind::Block)
        .map(|(_, n)| n)
        .unwrap();
    assert_eq!(block.end, source.len() as u32);
    assert_well_nested(arena, root, source);
}
