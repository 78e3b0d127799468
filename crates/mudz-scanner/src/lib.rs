//! Tokenizer for the mudz object language.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token kinds, and the keyword/punctuation spelling table
//! - `ScannerState` - Lazy tokenizer with one-token pushback and snapshots
//! - `char_codes` - Character classification utilities

pub mod char_codes;
pub mod numeric;
pub mod scanner_impl;
pub mod syntax_kind;

pub use numeric::decode_integer;
pub use scanner_impl::{ScannerSnapshot, ScannerState, Token, TokenFlags, TokenValue};
pub use syntax_kind::{
    KEYWORDS, PUNCTUATION, SyntaxKind, keyword_to_text, punctuation_to_text, text_to_keyword,
    token_is_assignment_operator, token_is_keyword, token_is_literal, token_is_modifier,
    token_is_punctuation, token_is_type_keyword, token_to_text,
};

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod scanner_tests;
#[cfg(test)]
#[path = "../tests/syntax_kind_tests.rs"]
mod syntax_kind_tests;
