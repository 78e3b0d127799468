//! Tests for type parsing.
use crate::parser::{NodeArena, NodeData, NodeIndex, NodeKind, ParserState};
use mudz_scanner::SyntaxKind;

/// Parse a one-variable declaration and return its type node.
fn declared_type(source: &str) -> (NodeArena, NodeIndex) {
    let mut parser = ParserState::new("test.c".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "{source}: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.into_arena();
    let statement = arena.source_file_statements(root)[0];
    let ty = match arena.get(statement).map(|n| &n.data) {
        Some(NodeData::VariableDeclaration { ty, .. }) => *ty,
        Some(NodeData::FunctionDeclaration { return_type, .. }) => *return_type,
        other => panic!("expected declaration, got {other:?}"),
    };
    (arena, ty)
}

#[test]
fn keyword_types() {
    for keyword in ["void", "int", "bool", "string", "symbol", "object", "mapping", "any"] {
        let (arena, ty) = declared_type(&format!("{keyword} x;"));
        assert_eq!(arena.type_text(ty), keyword);
    }
}

#[test]
fn array_suffixes_count_depth() {
    let (arena, ty) = declared_type("int[][] grid;");
    let Some(NodeData::TypeName {
        keyword,
        array_depth,
        ..
    }) = arena.get(ty).map(|n| &n.data)
    else {
        panic!("expected type name");
    };
    assert_eq!(*keyword, SyntaxKind::IntKeyword);
    assert_eq!(*array_depth, 2);
    assert_eq!(arena.type_text(ty), "int[][]");
}

#[test]
fn class_name_type() {
    let (arena, ty) = declared_type("Point[] points;");
    let Some(NodeData::TypeName { keyword, name, .. }) = arena.get(ty).map(|n| &n.data) else {
        panic!("expected type name");
    };
    assert_eq!(*keyword, SyntaxKind::Identifier);
    assert_eq!(name, "Point");
}

#[test]
fn function_reference_type() {
    let (arena, ty) = declared_type("function<int(string, ...)> callback;");
    let Some(NodeData::FunctionType {
        parameters,
        variadic,
        array_depth,
        ..
    }) = arena.get(ty).map(|n| &n.data)
    else {
        panic!("expected function type");
    };
    assert_eq!(parameters.len(), 2);
    assert!(*variadic);
    assert_eq!(*array_depth, 0);
    assert_eq!(arena.type_text(ty), "function<int(string, ...)>");
}

#[test]
fn bare_function_type_is_a_type_name() {
    let (arena, ty) = declared_type("function f;");
    assert_eq!(arena.kind(ty), Some(NodeKind::TypeName));
    assert_eq!(arena.type_text(ty), "function");
}

#[test]
fn nested_function_types() {
    let (arena, ty) = declared_type("function<function<void()>(int)>[] table;");
    assert_eq!(arena.type_text(ty), "function<function<void()>(int)>[]");
}

#[test]
fn function_return_type_is_parsed() {
    let (arena, ty) = declared_type("mapping[] lookup(string key) { return nil; }");
    assert_eq!(arena.type_text(ty), "mapping[]");
}
