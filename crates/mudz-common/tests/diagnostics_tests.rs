use super::diagnostics::format_message;
use super::*;

#[test]
fn test_format_message_fills_placeholders() {
    assert_eq!(format_message("'{0}' expected.", &[";"]), "';' expected.");
    assert_eq!(format_message("{1} before {0}", &["a", "b"]), "b before a");
}

#[test]
fn test_format_message_does_not_rescan_arguments() {
    assert_eq!(format_message("'{0}' then {1}", &["{1}", "x"]), "'{1}' then x");
}

#[test]
fn test_format_message_keeps_unmatched_braces() {
    assert_eq!(format_message("{2} and {0}", &["a"]), "{2} and a");
    assert_eq!(format_message("({}) {x} {", &["a"]), "({}) {x} {");
    assert_eq!(format_message("{0", &["a"]), "{0");
}

#[test]
fn test_error_diagnostic_end() {
    let diagnostic = Diagnostic::error("a.c", 4, 3, "oops");
    assert_eq!(diagnostic.category, DiagnosticCategory::Error);
    assert_eq!(diagnostic.end(), 7);
}
