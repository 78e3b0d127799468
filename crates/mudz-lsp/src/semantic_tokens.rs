//! Token classification for syntax highlighting.

use mudz_scanner::{
    ScannerState, SyntaxKind, TokenFlags, token_is_keyword, token_is_modifier,
    token_is_type_keyword,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum HighlightClass {
    Keyword,
    Type,
    Modifier,
    Identifier,
    Number,
    String,
    Character,
    Symbol,
    Comment,
    Operator,
    Punctuation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SemanticToken {
    pub class: HighlightClass,
    pub pos: u32,
    pub end: u32,
}

/// Classify every token of `source`, in order. Comment tokens are produced
/// only when `emit_comments` is set.
pub fn semantic_tokens(source: &str, emit_comments: bool) -> Vec<SemanticToken> {
    ScannerState::new(source, emit_comments)
        .filter(|token| token.kind != SyntaxKind::EndOfFileToken)
        .map(|token| SemanticToken {
            class: highlight_class(token.kind, token.flags),
            pos: token.pos,
            end: token.end,
        })
        .collect()
}

fn highlight_class(kind: SyntaxKind, flags: TokenFlags) -> HighlightClass {
    match kind {
        SyntaxKind::Identifier if flags.contains(TokenFlags::DEGENERATE) => {
            HighlightClass::Punctuation
        }
        SyntaxKind::Identifier => HighlightClass::Identifier,
        SyntaxKind::IntegerLiteral => HighlightClass::Number,
        SyntaxKind::StringLiteral => HighlightClass::String,
        SyntaxKind::CharacterLiteral => HighlightClass::Character,
        SyntaxKind::SymbolLiteral => HighlightClass::Symbol,
        SyntaxKind::SingleLineCommentTrivia | SyntaxKind::MultiLineCommentTrivia => {
            HighlightClass::Comment
        }
        kind if token_is_type_keyword(kind) => HighlightClass::Type,
        kind if token_is_modifier(kind) => HighlightClass::Modifier,
        kind if token_is_keyword(kind) => HighlightClass::Keyword,
        kind if is_delimiter(kind) => HighlightClass::Punctuation,
        _ => HighlightClass::Operator,
    }
}

fn is_delimiter(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenParenToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::OpenParenBraceToken
            | SyntaxKind::OpenParenBracketToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::CommaToken
            | SyntaxKind::DotDotDotToken
    )
}
