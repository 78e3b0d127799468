//! Diagnostics with line/column ranges.
use crate::{analyze, collect_diagnostics};
use mudz_common::Position;

#[test]
fn valid_source_has_no_diagnostics() {
    let file = analyze("ok.c", "int a;\nvoid f() { a = 1; }\n");
    assert!(collect_diagnostics(&file).is_empty());
}

#[test]
fn missing_name_is_located() {
    let file = analyze("bad.c", "int a;\nint ;\n");
    let diagnostics = collect_diagnostics(&file);
    assert_eq!(diagnostics.len(), 1);
    let first = &diagnostics[0];
    assert_eq!(first.diagnostic.file, "bad.c");
    assert_eq!(first.diagnostic.start, 11);
    assert_eq!(first.range.start, Position::new(1, 4));
    assert_eq!(first.range.end, Position::new(1, 4));
}

#[test]
fn diagnostics_are_in_source_order() {
    let file = analyze("bad.c", "void f( { x = ; }\nint ;");
    let diagnostics = collect_diagnostics(&file);
    assert!(diagnostics.len() >= 2);
    for pair in diagnostics.windows(2) {
        assert!(pair[0].diagnostic.start <= pair[1].diagnostic.start);
    }
}
