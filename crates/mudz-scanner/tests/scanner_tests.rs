//! Tests for the tokenizer.
use crate::{ScannerState, SyntaxKind, Token, TokenFlags, TokenValue};

fn scan_all(source: &str) -> Vec<Token> {
    ScannerState::new(source, false).collect()
}

fn kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).into_iter().map(|t| t.kind).collect()
}

#[test]
fn empty_source_yields_single_eof() {
    let tokens = scan_all("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, SyntaxKind::EndOfFileToken);
    assert_eq!((tokens[0].pos, tokens[0].end), (0, 0));
}

#[test]
fn next_token_repeats_eof() {
    let mut scanner = ScannerState::new("x", false);
    assert_eq!(scanner.next_token().kind, SyntaxKind::Identifier);
    assert_eq!(scanner.next_token().kind, SyntaxKind::EndOfFileToken);
    assert_eq!(scanner.next_token().kind, SyntaxKind::EndOfFileToken);
}

#[test]
fn punctuation_prefers_longest_spelling() {
    assert_eq!(
        kinds("... .. . <= < <<= ->"),
        vec![
            SyntaxKind::DotDotDotToken,
            SyntaxKind::DotDotToken,
            SyntaxKind::DotToken,
            SyntaxKind::LessThanEqualsToken,
            SyntaxKind::LessThanToken,
            SyntaxKind::LessThanLessThanEqualsToken,
            SyntaxKind::MinusGreaterThanToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn adjacent_punctuation_without_whitespace() {
    assert_eq!(
        kinds("a...b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn array_and_mapping_openers() {
    assert_eq!(
        kinds("({ 1 }) ([ ])"),
        vec![
            SyntaxKind::OpenParenBraceToken,
            SyntaxKind::IntegerLiteral,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::CloseParenToken,
            SyntaxKind::OpenParenBracketToken,
            SyntaxKind::CloseBracketToken,
            SyntaxKind::CloseParenToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn keywords_and_identifiers() {
    let tokens = scan_all("#include int foo_bar $x");
    assert_eq!(tokens[0].kind, SyntaxKind::HashIncludeKeyword);
    assert_eq!(tokens[1].kind, SyntaxKind::IntKeyword);
    assert_eq!(tokens[2].kind, SyntaxKind::Identifier);
    assert_eq!(tokens[2].text(), Some("foo_bar"));
    assert_eq!(tokens[3].text(), Some("$x"));
}

#[test]
fn integer_literals_with_radix_prefixes() {
    let values: Vec<Option<i64>> = scan_all("42 0x1F 0o17 0b101 1_000")
        .iter()
        .filter(|t| t.kind == SyntaxKind::IntegerLiteral)
        .map(Token::integer)
        .collect();
    assert_eq!(values, vec![Some(42), Some(31), Some(15), Some(5), Some(1000)]);
}

#[test]
fn malformed_number_becomes_identifier() {
    let tokens = scan_all("0x 12abc");
    assert_eq!(tokens[0].kind, SyntaxKind::Identifier);
    assert_eq!(tokens[1].kind, SyntaxKind::Identifier);
    assert_eq!(tokens[1].text(), Some("12abc"));
}

#[test]
fn escaped_quote_does_not_terminate_string() {
    let source = r#""a\"b""#;
    let tokens = scan_all(source);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, SyntaxKind::StringLiteral);
    assert_eq!((tokens[0].pos, tokens[0].end), (0, source.len() as u32));
    assert_eq!(tokens[0].text(), Some("a\"b"));
    assert!(tokens[0].flags.is_empty());
}

#[test]
fn even_backslash_run_terminates_string() {
    // "a\\" followed by b
    let tokens = scan_all(r#""a\\" b"#);
    assert_eq!(tokens[0].kind, SyntaxKind::StringLiteral);
    assert_eq!(tokens[0].text(), Some("a\\"));
    assert_eq!(tokens[1].text(), Some("b"));
}

#[test]
fn string_escapes_are_decoded() {
    let tokens = scan_all(r#""\n\t\x41\q""#);
    assert_eq!(tokens[0].text(), Some("\n\tAq"));
}

#[test]
fn unterminated_string_runs_to_end() {
    let tokens = scan_all("\"abc");
    assert_eq!(tokens[0].kind, SyntaxKind::StringLiteral);
    assert_eq!(tokens[0].end, 4);
    assert!(tokens[0].flags.contains(TokenFlags::UNTERMINATED));
    assert_eq!(tokens[1].kind, SyntaxKind::EndOfFileToken);
}

#[test]
fn character_literal() {
    let tokens = scan_all(r"'a' '\n'");
    assert_eq!(tokens[0].kind, SyntaxKind::CharacterLiteral);
    assert_eq!(tokens[0].character(), Some('a'));
    assert_eq!(tokens[1].value, Some(TokenValue::Char('\n')));
}

#[test]
fn symbol_literal_forms() {
    let tokens = scan_all("#'foo bar' #:baz;");
    assert_eq!(tokens[0].kind, SyntaxKind::SymbolLiteral);
    assert_eq!(tokens[0].text(), Some("foo bar"));
    assert_eq!(tokens[1].kind, SyntaxKind::SymbolLiteral);
    assert_eq!(tokens[1].text(), Some("baz"));
    assert_eq!(tokens[2].kind, SyntaxKind::SemicolonToken);
}

#[test]
fn words_end_at_the_first_non_word_character() {
    let tokens = scan_all("#:sym+count_2 0x1F;");
    assert_eq!(tokens[0].text(), Some("sym"));
    assert_eq!((tokens[0].pos, tokens[0].end), (0, 5));
    assert_eq!(tokens[1].kind, SyntaxKind::PlusToken);
    assert_eq!(tokens[2].text(), Some("count_2"));
    assert_eq!((tokens[2].pos, tokens[2].end), (6, 13));
    assert_eq!(tokens[3].integer(), Some(31));
    assert_eq!(tokens[4].kind, SyntaxKind::SemicolonToken);
}

#[test]
fn doc_block_is_a_string() {
    let tokens = scan_all("/*! hello */ world !*/ x");
    assert_eq!(tokens[0].kind, SyntaxKind::StringLiteral);
    assert_eq!(tokens[0].text(), Some(" hello */ world "));
    assert!(tokens[0].flags.contains(TokenFlags::DOC_STRING));
    assert_eq!(tokens[1].text(), Some("x"));
}

#[test]
fn comments_are_skipped_by_default() {
    assert_eq!(
        kinds("a /* b */ c // d\ne"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn comments_are_emitted_in_highlighting_mode() {
    let tokens: Vec<Token> = ScannerState::new("a /* b */ // c\n", true).collect();
    assert_eq!(tokens[1].kind, SyntaxKind::MultiLineCommentTrivia);
    assert_eq!((tokens[1].pos, tokens[1].end), (2, 9));
    assert_eq!(tokens[2].kind, SyntaxKind::SingleLineCommentTrivia);
    assert_eq!(tokens[2].text(), Some(" c"));
}

#[test]
fn unterminated_block_comment_is_flagged() {
    let tokens: Vec<Token> = ScannerState::new("/* open", true).collect();
    assert_eq!(tokens[0].kind, SyntaxKind::MultiLineCommentTrivia);
    assert!(tokens[0].flags.contains(TokenFlags::UNTERMINATED));
}

#[test]
fn degenerate_characters_always_advance() {
    let tokens = scan_all("@`\\");
    assert_eq!(tokens.len(), 4);
    for token in &tokens[..3] {
        assert_eq!(token.kind, SyntaxKind::Identifier);
        assert!(token.flags.contains(TokenFlags::DEGENERATE));
        assert_eq!(token.end - token.pos, 1);
    }
}

#[test]
fn multibyte_degenerate_character() {
    let tokens = scan_all("€");
    assert_eq!(tokens[0].end, 3);
    assert_eq!(tokens[0].text(), Some("€"));
}

#[test]
fn push_back_returns_same_token() {
    let mut scanner = ScannerState::new("a b", false);
    let first = scanner.next_token();
    scanner.push_back(first.clone());
    assert_eq!(scanner.next_token(), first);
    assert_eq!(scanner.next_token().text(), Some("b"));
}

#[test]
fn snapshot_restores_position() {
    let mut scanner = ScannerState::new("a b c", false);
    scanner.next_token();
    let snapshot = scanner.save_state();
    assert_eq!(scanner.next_token().text(), Some("b"));
    assert_eq!(scanner.next_token().text(), Some("c"));
    scanner.restore_state(snapshot);
    assert_eq!(scanner.next_token().text(), Some("b"));
}

#[test]
fn retokenizing_token_text_round_trips() {
    let source = r#"
        #include "std.h"
        inherit "/lib/base";
        private static int *x = ({ 1, 0x2, 'c' });
        string s = "a\"b" "tail";
        mapping m = ([ #'key' : #:sym ]);
        void f(int a, ...) { if (a >= 3) return; a <<= 1; }
        @ ~
    "#;
    let mut scanner = ScannerState::new(source, false);
    loop {
        let token = scanner.next_token();
        if token.kind == SyntaxKind::EndOfFileToken {
            break;
        }
        let text = scanner.token_text(&token).to_string();
        let again: Vec<Token> = ScannerState::new(text.as_str(), false).collect();
        assert_eq!(again.len(), 2, "{text:?} should rescan as one token");
        assert_eq!(again[0].kind, token.kind, "{text:?}");
        assert_eq!(again[0].value, token.value, "{text:?}");
    }
}
