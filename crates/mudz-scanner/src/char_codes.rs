//! Character classification for the tokenizer.

/// Whitespace skipped between tokens.
#[inline]
pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n' | '\u{000B}' | '\u{000C}')
}

/// Characters that may appear inside a word (keyword, identifier, number).
///
/// `#` is a word character so that `#include` reads as one keyword.
#[inline]
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$' || ch == '#'
}

#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}
