//! Highlight classes for tokens.
use crate::{HighlightClass, semantic_tokens};

fn classes(source: &str, emit_comments: bool) -> Vec<(HighlightClass, &str)> {
    semantic_tokens(source, emit_comments)
        .into_iter()
        .map(|t| (t.class, &source[t.pos as usize..t.end as usize]))
        .collect()
}

#[test]
fn declaration_tokens() {
    use HighlightClass::*;
    assert_eq!(
        classes("static int x = 42;", false),
        [
            (Modifier, "static"),
            (Type, "int"),
            (Identifier, "x"),
            (Operator, "="),
            (Number, "42"),
            (Punctuation, ";"),
        ]
    );
}

#[test]
fn literal_kinds() {
    use HighlightClass::*;
    let tokens = classes("f(\"s\", 'c', #'sym', nil);", false);
    let kinds: Vec<_> = tokens.iter().map(|(class, _)| *class).collect();
    assert_eq!(
        kinds,
        [
            Identifier,
            Punctuation,
            String,
            Punctuation,
            Character,
            Punctuation,
            Symbol,
            Punctuation,
            Keyword,
            Punctuation,
            Punctuation,
        ]
    );
}

#[test]
fn comments_only_when_requested() {
    let source = "int a; // note\n/* block */";
    assert!(
        !classes(source, false)
            .iter()
            .any(|(class, _)| *class == HighlightClass::Comment)
    );
    let with_comments = classes(source, true);
    let comments: Vec<_> = with_comments
        .iter()
        .filter(|(class, _)| *class == HighlightClass::Comment)
        .collect();
    assert_eq!(comments.len(), 2);
}

#[test]
fn tokens_are_ordered_and_disjoint() {
    let source = "varargs void f(string s...) { foreach (int i in ({1,2})) g(i->x); }";
    let tokens = semantic_tokens(source, true);
    for pair in tokens.windows(2) {
        assert!(pair[0].end <= pair[1].pos);
    }
}
