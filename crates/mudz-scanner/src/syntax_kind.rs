//! Token kinds and the fixed spelling table of the object language.
//!
//! The keyword and punctuation tables below are the lexical contract of the
//! language: editors colour by them and the parser dispatches on them. The
//! punctuation table is ordered longest spelling first so that a linear scan
//! picks `...` over `..` over `.`, and `<=` over `<`.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::borrow::Cow;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,

    // Literals
    Identifier,
    IntegerLiteral,
    StringLiteral,
    CharacterLiteral,
    SymbolLiteral,

    // Punctuation
    DotDotDotToken,
    DotDotToken,
    DotToken,
    MinusGreaterThanToken,
    ColonColonToken,
    ColonToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    LessThanToken,
    GreaterThanToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsToken,
    ExclamationToken,
    AmpersandAmpersandToken,
    BarBarToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    TildeToken,
    PlusPlusToken,
    MinusMinusToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    OpenParenBraceToken,
    OpenParenBracketToken,
    OpenParenToken,
    CloseParenToken,
    OpenBraceToken,
    CloseBraceToken,
    OpenBracketToken,
    CloseBracketToken,
    SemicolonToken,
    CommaToken,
    QuestionToken,

    // Keywords
    HashIncludeKeyword,
    InheritKeyword,
    ClassKeyword,
    IfKeyword,
    ElseKeyword,
    WhileKeyword,
    DoKeyword,
    ForKeyword,
    ForeachKeyword,
    InKeyword,
    SwitchKeyword,
    CaseKeyword,
    DefaultKeyword,
    TryKeyword,
    CatchKeyword,
    ReturnKeyword,
    BreakKeyword,
    ContinueKeyword,
    NewKeyword,
    NilKeyword,
    TrueKeyword,
    FalseKeyword,
    ThisKeyword,

    // Type keywords
    VoidKeyword,
    IntKeyword,
    BoolKeyword,
    StringKeyword,
    SymbolKeyword,
    ObjectKeyword,
    MappingKeyword,
    AnyKeyword,
    FunctionKeyword,

    // Modifier keywords
    PublicKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    StaticKeyword,
    NomaskKeyword,
    VarargsKeyword,
    NosaveKeyword,
    OverrideKeyword,
}

/// Punctuation spellings, longest first.
pub const PUNCTUATION: &[(&str, SyntaxKind)] = &[
    ("...", SyntaxKind::DotDotDotToken),
    ("<<=", SyntaxKind::LessThanLessThanEqualsToken),
    (">>=", SyntaxKind::GreaterThanGreaterThanEqualsToken),
    ("..", SyntaxKind::DotDotToken),
    ("->", SyntaxKind::MinusGreaterThanToken),
    ("::", SyntaxKind::ColonColonToken),
    ("<<", SyntaxKind::LessThanLessThanToken),
    (">>", SyntaxKind::GreaterThanGreaterThanToken),
    ("<=", SyntaxKind::LessThanEqualsToken),
    (">=", SyntaxKind::GreaterThanEqualsToken),
    ("==", SyntaxKind::EqualsEqualsToken),
    ("!=", SyntaxKind::ExclamationEqualsToken),
    ("&&", SyntaxKind::AmpersandAmpersandToken),
    ("||", SyntaxKind::BarBarToken),
    ("&=", SyntaxKind::AmpersandEqualsToken),
    ("|=", SyntaxKind::BarEqualsToken),
    ("^=", SyntaxKind::CaretEqualsToken),
    ("++", SyntaxKind::PlusPlusToken),
    ("--", SyntaxKind::MinusMinusToken),
    ("+=", SyntaxKind::PlusEqualsToken),
    ("-=", SyntaxKind::MinusEqualsToken),
    ("*=", SyntaxKind::AsteriskEqualsToken),
    ("/=", SyntaxKind::SlashEqualsToken),
    ("%=", SyntaxKind::PercentEqualsToken),
    ("({", SyntaxKind::OpenParenBraceToken),
    ("([", SyntaxKind::OpenParenBracketToken),
    (".", SyntaxKind::DotToken),
    (":", SyntaxKind::ColonToken),
    ("<", SyntaxKind::LessThanToken),
    (">", SyntaxKind::GreaterThanToken),
    ("=", SyntaxKind::EqualsToken),
    ("!", SyntaxKind::ExclamationToken),
    ("&", SyntaxKind::AmpersandToken),
    ("|", SyntaxKind::BarToken),
    ("^", SyntaxKind::CaretToken),
    ("~", SyntaxKind::TildeToken),
    ("+", SyntaxKind::PlusToken),
    ("-", SyntaxKind::MinusToken),
    ("*", SyntaxKind::AsteriskToken),
    ("/", SyntaxKind::SlashToken),
    ("%", SyntaxKind::PercentToken),
    ("(", SyntaxKind::OpenParenToken),
    (")", SyntaxKind::CloseParenToken),
    ("{", SyntaxKind::OpenBraceToken),
    ("}", SyntaxKind::CloseBraceToken),
    ("[", SyntaxKind::OpenBracketToken),
    ("]", SyntaxKind::CloseBracketToken),
    (";", SyntaxKind::SemicolonToken),
    (",", SyntaxKind::CommaToken),
    ("?", SyntaxKind::QuestionToken),
];

/// Keyword spellings.
pub const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("#include", SyntaxKind::HashIncludeKeyword),
    ("inherit", SyntaxKind::InheritKeyword),
    ("class", SyntaxKind::ClassKeyword),
    ("if", SyntaxKind::IfKeyword),
    ("else", SyntaxKind::ElseKeyword),
    ("while", SyntaxKind::WhileKeyword),
    ("do", SyntaxKind::DoKeyword),
    ("for", SyntaxKind::ForKeyword),
    ("foreach", SyntaxKind::ForeachKeyword),
    ("in", SyntaxKind::InKeyword),
    ("switch", SyntaxKind::SwitchKeyword),
    ("case", SyntaxKind::CaseKeyword),
    ("default", SyntaxKind::DefaultKeyword),
    ("try", SyntaxKind::TryKeyword),
    ("catch", SyntaxKind::CatchKeyword),
    ("return", SyntaxKind::ReturnKeyword),
    ("break", SyntaxKind::BreakKeyword),
    ("continue", SyntaxKind::ContinueKeyword),
    ("new", SyntaxKind::NewKeyword),
    ("nil", SyntaxKind::NilKeyword),
    ("true", SyntaxKind::TrueKeyword),
    ("false", SyntaxKind::FalseKeyword),
    ("this", SyntaxKind::ThisKeyword),
    ("void", SyntaxKind::VoidKeyword),
    ("int", SyntaxKind::IntKeyword),
    ("bool", SyntaxKind::BoolKeyword),
    ("string", SyntaxKind::StringKeyword),
    ("symbol", SyntaxKind::SymbolKeyword),
    ("object", SyntaxKind::ObjectKeyword),
    ("mapping", SyntaxKind::MappingKeyword),
    ("any", SyntaxKind::AnyKeyword),
    ("function", SyntaxKind::FunctionKeyword),
    ("public", SyntaxKind::PublicKeyword),
    ("private", SyntaxKind::PrivateKeyword),
    ("protected", SyntaxKind::ProtectedKeyword),
    ("static", SyntaxKind::StaticKeyword),
    ("nomask", SyntaxKind::NomaskKeyword),
    ("varargs", SyntaxKind::VarargsKeyword),
    ("nosave", SyntaxKind::NosaveKeyword),
    ("override", SyntaxKind::OverrideKeyword),
];

static KEYWORD_MAP: Lazy<FxHashMap<&'static str, SyntaxKind>> =
    Lazy::new(|| KEYWORDS.iter().copied().collect());

/// Look up a word in the keyword table.
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    KEYWORD_MAP.get(text).copied()
}

pub fn keyword_to_text(kind: SyntaxKind) -> Option<Cow<'static, str>> {
    KEYWORDS
        .iter()
        .find(|(_, k)| *k == kind)
        .map(|(text, _)| Cow::Borrowed(*text))
}

pub fn punctuation_to_text(kind: SyntaxKind) -> Option<Cow<'static, str>> {
    PUNCTUATION
        .iter()
        .find(|(_, k)| *k == kind)
        .map(|(text, _)| Cow::Borrowed(*text))
}

/// Fixed spelling of a keyword or punctuation kind.
pub fn token_to_text(kind: SyntaxKind) -> Option<Cow<'static, str>> {
    keyword_to_text(kind).or_else(|| punctuation_to_text(kind))
}

pub fn token_is_keyword(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::HashIncludeKeyword
}

pub fn token_is_type_keyword(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::VoidKeyword && kind <= SyntaxKind::FunctionKeyword
}

pub fn token_is_modifier(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::PublicKeyword && kind <= SyntaxKind::OverrideKeyword
}

pub fn token_is_punctuation(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::DotDotDotToken && kind <= SyntaxKind::QuestionToken
}

pub fn token_is_literal(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IntegerLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::CharacterLiteral
            | SyntaxKind::SymbolLiteral
    )
}

pub fn token_is_assignment_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::EqualsToken
            | SyntaxKind::PlusEqualsToken
            | SyntaxKind::MinusEqualsToken
            | SyntaxKind::AsteriskEqualsToken
            | SyntaxKind::SlashEqualsToken
            | SyntaxKind::PercentEqualsToken
            | SyntaxKind::AmpersandEqualsToken
            | SyntaxKind::BarEqualsToken
            | SyntaxKind::CaretEqualsToken
            | SyntaxKind::LessThanLessThanEqualsToken
            | SyntaxKind::GreaterThanGreaterThanEqualsToken
    )
}
