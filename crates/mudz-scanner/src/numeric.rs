//! Integer literal decoding.
//!
//! Words that are not keywords are offered here first; only when decoding
//! fails does the word become an identifier.

/// Decode an integer literal word.
///
/// Accepts decimal, `0x` hexadecimal, `0o` octal and `0b` binary forms with
/// `_` separators between digits. Returns `None` for anything else, including
/// values that overflow `i64`.
pub fn decode_integer(word: &str) -> Option<i64> {
    let bytes = word.as_bytes();
    if bytes.is_empty() || !bytes[0].is_ascii_digit() {
        return None;
    }

    let (radix, digits) = if bytes.len() > 2 && bytes[0] == b'0' {
        match bytes[1] {
            b'x' | b'X' => (16, &word[2..]),
            b'o' | b'O' => (8, &word[2..]),
            b'b' | b'B' => (2, &word[2..]),
            _ => (10, word),
        }
    } else {
        (10, word)
    };

    // Separators are only allowed between digits.
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return None;
    }

    let mut value: i64 = 0;
    for ch in digits.chars() {
        if ch == '_' {
            continue;
        }
        let digit = ch.to_digit(radix)?;
        value = value
            .checked_mul(i64::from(radix))?
            .checked_add(i64::from(digit))?;
    }
    Some(value)
}
