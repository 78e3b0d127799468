//! Definitions extracted from declarations.
use crate::{ContextTree, DefinitionKind, build_scopes};
use mudz_parser::{ModifierFlags, ParserState};

fn bind(source: &str) -> ContextTree {
    let mut parser = ParserState::new("test.c".to_string(), source.to_string());
    let root = parser.parse_source_file();
    build_scopes(parser.get_arena(), root)
}

#[test]
fn declarators_share_the_declared_type() {
    let tree = bind("private static int a = 1, b;");
    let defs = tree.definitions();
    assert_eq!(defs.len(), 2);
    for (def, name) in defs.iter().zip(["a", "b"]) {
        assert_eq!(def.name, name);
        assert_eq!(def.kind, DefinitionKind::Variable);
        assert_eq!(def.type_text, "int");
        assert_eq!(def.modifiers, ModifierFlags::PRIVATE | ModifierFlags::STATIC);
        assert!(def.function.is_none());
    }
    assert_eq!(defs[0].offset, 19);
    assert_eq!(defs[1].offset, 26);
}

#[test]
fn missing_name_declares_nothing() {
    let tree = bind("int ;");
    assert!(tree.definitions().is_empty());
}

#[test]
fn array_and_function_types_keep_their_spelling() {
    let tree = bind("int[][] grid; function<int(string, ...)> cb;");
    let types: Vec<_> = tree
        .definitions()
        .iter()
        .map(|def| def.type_text.as_str())
        .collect();
    assert_eq!(types, ["int[][]", "function<int(string, ...)>"]);
}

#[test]
fn function_signature_records_parameters() {
    let tree = bind("int sum(int a, int b...);");
    let sum = &tree.definitions()[0];
    assert!(sum.is_function());
    assert_eq!(sum.type_text, "int");
    let function = sum.function.as_ref().expect("function definition");
    assert!(function.variadic);
    assert!(!function.has_body);
    let params: Vec<_> = sum
        .parameters()
        .iter()
        .map(|p| (p.type_text.as_str(), p.name.as_str(), p.variadic))
        .collect();
    assert_eq!(params, [("int", "a", false), ("int", "b", true)]);
    assert_eq!(sum.signature(), "int sum(int a, int b...)");
}

#[test]
fn ellipsis_parameter_marks_the_function_variadic() {
    let tree = bind("void log(string fmt, ...) { }");
    let log = &tree.definitions()[0];
    assert_eq!(log.parameters().len(), 1);
    let function = log.function.as_ref().expect("function definition");
    assert!(function.variadic);
    assert!(function.has_body);
    assert_eq!(log.signature(), "void log(string fmt, ...)");
}

#[test]
fn varargs_modifier_marks_the_function_variadic() {
    let tree = bind("varargs void notify(string msg) { }");
    let notify = &tree.definitions()[0];
    assert!(notify.modifiers.contains(ModifierFlags::VARARGS));
    assert!(notify.function.as_ref().is_some_and(|f| f.variadic));
}

#[test]
fn parameters_are_parameter_definitions() {
    let tree = bind("void f(int x, object who) { }");
    let kinds: Vec<_> = tree
        .definitions()
        .iter()
        .map(|def| (def.name.as_str(), def.kind))
        .collect();
    assert_eq!(
        kinds,
        [
            ("f", DefinitionKind::Function),
            ("x", DefinitionKind::Parameter),
            ("who", DefinitionKind::Parameter),
        ]
    );
    assert_eq!(tree.definitions()[2].type_text, "object");
}

#[test]
fn class_definition_names_its_type() {
    let tree = bind("class Room { string short; }");
    let room = &tree.definitions()[0];
    assert_eq!(room.kind, DefinitionKind::Class);
    assert_eq!(room.type_text, "Room");
    assert_eq!(room.signature(), "Room Room");
}

#[test]
fn untyped_binding_has_no_type_text() {
    let tree = bind("void f() { try { } catch (err) { } }");
    let err = tree
        .definitions()
        .iter()
        .find(|def| def.name == "err")
        .expect("catch binding");
    assert!(err.type_text.is_empty());
    assert!(err.type_node.is_none());
    assert_eq!(err.signature(), "err");
}
