//! Tests for declaration and statement parsing.
use crate::parser::{NodeArena, NodeData, NodeIndex, NodeKind, ParserState};

fn parse_source(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.c".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

fn top_level_kinds(arena: &NodeArena, root: NodeIndex) -> Vec<NodeKind> {
    arena
        .source_file_statements(root)
        .iter()
        .filter_map(|&s| arena.kind(s))
        .collect()
}

#[test]
fn parse_directives_and_declarations() {
    let source = r#"
#include "std.h"
#include <sys/types.h>
inherit "/lib/base";
private static int counter = 0, limit;
void create() { counter = 1; }
"#;
    let (parser, root) = parse_source(source);
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    assert_eq!(
        top_level_kinds(arena, root),
        vec![
            NodeKind::IncludeDirective,
            NodeKind::IncludeDirective,
            NodeKind::Inherit,
            NodeKind::VariableDeclaration,
            NodeKind::FunctionDeclaration,
        ]
    );

    let statements = arena.source_file_statements(root);
    let Some(NodeData::IncludeDirective { path, system }) =
        arena.get(statements[1]).map(|n| &n.data)
    else {
        panic!("expected include");
    };
    assert!(*system);
    assert_eq!(arena.string_value(*path).as_deref(), Some("sys/types.h"));

    let Some(NodeData::VariableDeclaration {
        modifiers,
        declarators,
        ..
    }) = arena.get(statements[3]).map(|n| &n.data)
    else {
        panic!("expected variable declaration");
    };
    assert_eq!(modifiers.len(), 2);
    assert_eq!(declarators.len(), 2);
}

#[test]
fn parse_function_with_parameters_and_prototype() {
    let (parser, root) =
        parse_source("int add(int a, string b...); varargs void log(string fmt, ...) {}");
    let arena = parser.get_arena();
    let statements = arena.source_file_statements(root);

    let Some(NodeData::FunctionDeclaration {
        parameters, body, ..
    }) = arena.get(statements[0]).map(|n| &n.data)
    else {
        panic!("expected function");
    };
    assert_eq!(parameters.items.len(), 2);
    assert!(body.is_none());

    let Some(NodeData::FunctionDeclaration {
        parameters, body, ..
    }) = arena.get(statements[1]).map(|n| &n.data)
    else {
        panic!("expected function");
    };
    assert_eq!(arena.kind(parameters.items[1]), Some(NodeKind::Ellipsis));
    assert_eq!(arena.kind(*body), Some(NodeKind::Block));
}

#[test]
fn parse_class_declaration_with_members() {
    let (parser, root) = parse_source("class Point { int x; int y; int length() { return x; } }");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let statements = arena.source_file_statements(root);
    let Some(NodeData::ClassDeclaration { name, members, .. }) =
        arena.get(statements[0]).map(|n| &n.data)
    else {
        panic!("expected class");
    };
    assert_eq!(arena.identifier_text(*name), Some("Point"));
    assert_eq!(members.len(), 3);
}

#[test]
fn class_typed_declaration_is_not_an_expression() {
    let (parser, root) = parse_source("Point p; Point[] ps; p = q;");
    let arena = parser.get_arena();
    assert_eq!(
        top_level_kinds(arena, root),
        vec![
            NodeKind::VariableDeclaration,
            NodeKind::VariableDeclaration,
            NodeKind::ExpressionStatement,
        ]
    );
}

#[test]
fn parse_control_flow_statements() {
    let source = r#"
void f() {
    if (a) b(); else { c(); }
    while (x < 3) x++;
    do { x--; } while (x);
    for (int i = 0; i < 10; i++) ;
    for (;;) break;
    foreach (string k, mixed v in m) continue;
    switch (x) { case 1..3: y(); break; case 4: default: z(); }
    try { risky(); } catch (err) { handle(err); }
    return;
}
"#;
    let (parser, root) = parse_source(source);
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let function = arena.source_file_statements(root)[0];
    let Some(NodeData::FunctionDeclaration { body, .. }) = arena.get(function).map(|n| &n.data)
    else {
        panic!("expected function");
    };
    let Some(NodeData::Block { statements }) = arena.get(*body).map(|n| &n.data) else {
        panic!("expected body");
    };
    let kinds: Vec<NodeKind> = statements.iter().filter_map(|&s| arena.kind(s)).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::If,
            NodeKind::While,
            NodeKind::Do,
            NodeKind::For,
            NodeKind::For,
            NodeKind::Foreach,
            NodeKind::Switch,
            NodeKind::Try,
            NodeKind::Return,
        ]
    );
}

#[test]
fn switch_clauses_keep_ranges_and_statements() {
    let (parser, root) = parse_source("switch (x) { case 1..3: a(); b(); default: c(); }");
    let arena = parser.get_arena();
    let switch = arena.source_file_statements(root)[0];
    let Some(NodeData::Switch { clauses, .. }) = arena.get(switch).map(|n| &n.data) else {
        panic!("expected switch");
    };
    assert_eq!(clauses.len(), 2);
    let Some(NodeData::CaseClause {
        range_end,
        statements,
        ..
    }) = arena.get(clauses[0]).map(|n| &n.data)
    else {
        panic!("expected case clause");
    };
    assert!(range_end.is_some());
    assert_eq!(statements.len(), 2);
    let Some(NodeData::CaseClause { label, .. }) = arena.get(clauses[1]).map(|n| &n.data) else {
        panic!("expected default clause");
    };
    assert!(label.is_none());
}

#[test]
fn top_level_statements_are_accepted() {
    let (parser, root) = parse_source("x = 1; foo();");
    assert!(parser.get_diagnostics().is_empty());
    assert_eq!(
        top_level_kinds(parser.get_arena(), root),
        vec![NodeKind::ExpressionStatement, NodeKind::ExpressionStatement]
    );
}
