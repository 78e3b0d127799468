//! Lowering parsed type nodes and formatting shapes.
use crate::{RelationError, TypeFormatter, TypeTag, is_node_assignable_from, lower_type};
use mudz_parser::{NodeArena, NodeIndex, NodeKind, ParserState};

fn parse(source: &str) -> (NodeArena, Vec<NodeIndex>) {
    let mut parser = ParserState::new("test.c".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let statements = arena.source_file_statements(root).to_vec();
    (arena, statements)
}

fn first_of_kind(arena: &NodeArena, kind: NodeKind) -> NodeIndex {
    arena
        .iter()
        .find(|(_, node)| node.kind() == kind)
        .map(|(index, _)| index)
        .expect("node of kind")
}

#[test]
fn declarations_unwrap_to_their_declared_type() {
    let (arena, statements) = parse("int[][] grid; Room here; void reset(int force) { }");
    let grid = lower_type(&arena, statements[0]).unwrap();
    assert_eq!((grid.tag, grid.array_depth), (TypeTag::Int, 2));

    let here = lower_type(&arena, statements[1]).unwrap();
    assert_eq!(here.tag, TypeTag::Named("Room".to_string()));

    let reset = lower_type(&arena, statements[2]).unwrap();
    assert_eq!(reset.tag, TypeTag::Void);

    let force = lower_type(&arena, first_of_kind(&arena, NodeKind::Parameter)).unwrap();
    assert_eq!(force.tag, TypeTag::Int);
}

#[test]
fn function_type_carries_its_signature() {
    let (arena, statements) = parse("function<int(string, ...)> cb;");
    let cb = lower_type(&arena, statements[0]).unwrap();
    assert!(cb.is_function_reference());
    let signature = cb.signature.as_ref().expect("signature");
    assert_eq!(signature.return_type.tag, TypeTag::Int);
    assert_eq!(signature.parameters.len(), 1);
    assert_eq!(signature.parameters[0].tag, TypeTag::String);
    assert!(signature.variadic);
}

#[test]
fn bare_function_type_has_no_signature() {
    let (arena, statements) = parse("function f;");
    let f = lower_type(&arena, statements[0]).unwrap();
    assert_eq!(f.tag, TypeTag::Function);
    assert!(f.signature.is_none());
}

#[test]
fn sentinel_in_type_slot_is_unknown() {
    let (arena, _) = parse("void f(int) { }");
    let missing = first_of_kind(&arena, NodeKind::Missing);
    assert!(lower_type(&arena, missing).unwrap().is_unknown());
}

#[test]
fn non_type_node_is_a_contract_violation() {
    let (arena, statements) = parse("x = 1;");
    assert_eq!(
        lower_type(&arena, statements[0]),
        Err(RelationError::NotATypeNode {
            kind: NodeKind::ExpressionStatement
        })
    );
    assert_eq!(
        lower_type(&arena, NodeIndex(9999)),
        Err(RelationError::UnknownNode(NodeIndex(9999)))
    );
}

#[test]
fn node_relation_lowers_both_sides() {
    let (arena, statements) = parse("object o; string s; int n; x = 1;");
    assert_eq!(is_node_assignable_from(&arena, statements[0], statements[1]), Ok(true));
    assert_eq!(is_node_assignable_from(&arena, statements[0], statements[2]), Ok(false));
    assert!(is_node_assignable_from(&arena, statements[0], statements[3]).is_err());
}

#[test]
fn formatter_matches_source_spelling() {
    for source in [
        "int[] a;",
        "mapping[][] m;",
        "Room r;",
        "function f;",
        "function<int(string, ...)> cb;",
        "function<void()>[] handlers;",
        "function<function<int()>(string[])> nested;",
    ] {
        let (arena, statements) = parse(source);
        let shape = lower_type(&arena, statements[0]).unwrap();
        let spelled = source[..source.rfind(' ').unwrap()].to_string();
        assert_eq!(TypeFormatter::new().format(&shape), spelled, "{source}");
        assert_eq!(shape.to_string(), spelled);
    }
}

#[test]
fn formatter_unknown_text_is_configurable() {
    let shape = crate::TypeShape::unknown().with_array_depth(1);
    assert_eq!(TypeFormatter::new().format(&shape), "?[]");
    assert_eq!(
        TypeFormatter::new().with_unknown_text("mixed").format(&shape),
        "mixed[]"
    );
}
