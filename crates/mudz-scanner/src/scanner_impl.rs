//! Scanner implementation - the tokenizer state machine.
//!
//! `ScannerState` turns source text into a lazy sequence of `Token`s. It never
//! reports errors: unknown input degrades to a one-character identifier so
//! that every call makes progress, and unterminated literals or comments run
//! to the end of input with `TokenFlags::UNTERMINATED` set.

use crate::char_codes::{is_whitespace, is_word_char};
use crate::numeric::decode_integer;
use crate::syntax_kind::{PUNCTUATION, SyntaxKind, text_to_keyword};
use bitflags::bitflags;
use mudz_common::TextRange;
use std::sync::Arc;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u8 {
        /// String, character, symbol or comment ran into end of input.
        const UNTERMINATED = 1 << 0;
        /// A `/*! ... !*/` block read as a string literal.
        const DOC_STRING = 1 << 1;
        /// A single raw character no recognizer accepted.
        const DEGENERATE = 1 << 2;
    }
}

/// Decoded token payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenValue {
    Text(String),
    Integer(i64),
    Char(char),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub pos: u32,
    pub end: u32,
    pub value: Option<TokenValue>,
    pub flags: TokenFlags,
}

impl Token {
    fn new(kind: SyntaxKind, pos: usize, end: usize) -> Self {
        Token {
            kind,
            pos: pos as u32,
            end: end as u32,
            value: None,
            flags: TokenFlags::empty(),
        }
    }

    fn with_value(mut self, value: TokenValue) -> Self {
        self.value = Some(value);
        self
    }

    fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        TextRange::new(self.pos, self.end)
    }

    #[inline]
    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind == kind
    }

    /// Text payload of identifiers, strings, symbols and comments.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            Some(TokenValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn integer(&self) -> Option<i64> {
        match self.value {
            Some(TokenValue::Integer(value)) => Some(value),
            _ => None,
        }
    }

    pub fn character(&self) -> Option<char> {
        match self.value {
            Some(TokenValue::Char(ch)) => Some(ch),
            _ => None,
        }
    }
}

/// Saved scanner position for speculative lookahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    pushed_back: Option<Token>,
    finished: bool,
}

pub struct ScannerState {
    source: Arc<str>,
    pos: usize,
    /// Return comments as tokens instead of skipping them (highlighting mode).
    emit_comments: bool,
    pushed_back: Option<Token>,
    /// Set once the iterator has yielded end-of-file.
    finished: bool,
}

impl ScannerState {
    pub fn new(source: impl Into<Arc<str>>, emit_comments: bool) -> Self {
        ScannerState {
            source: source.into(),
            pos: 0,
            emit_comments,
            pushed_back: None,
            finished: false,
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source
    }

    pub fn shared_source(&self) -> Arc<str> {
        Arc::clone(&self.source)
    }

    /// Source text covered by a token.
    pub fn token_text(&self, token: &Token) -> &str {
        token.range().text(&self.source)
    }

    /// Hand back the token most recently returned by `next_token`; the next
    /// call returns it again.
    pub fn push_back(&mut self, token: Token) {
        debug_assert!(
            self.pushed_back.is_none(),
            "only one token can be pushed back"
        );
        self.pushed_back = Some(token);
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            pushed_back: self.pushed_back.clone(),
            finished: self.finished,
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.pushed_back = snapshot.pushed_back;
        self.finished = snapshot.finished;
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Produce the next token. Repeats `EndOfFileToken` once input is exhausted.
    pub fn next_token(&mut self) -> Token {
        if let Some(token) = self.pushed_back.take() {
            return token;
        }

        loop {
            self.skip_whitespace();
            let start = self.pos;
            let source = Arc::clone(&self.source);
            let rest = &source[start..];

            if rest.is_empty() {
                return Token::new(SyntaxKind::EndOfFileToken, start, start);
            }

            if rest.starts_with("/*!") {
                return self.scan_doc_string(start);
            }
            if rest.starts_with("/*") {
                let token = self.scan_multi_line_comment(start);
                if self.emit_comments {
                    return token;
                }
                continue;
            }
            if rest.starts_with("//") {
                let token = self.scan_single_line_comment(start);
                if self.emit_comments {
                    return token;
                }
                continue;
            }
            if rest.starts_with('"') {
                let (text, terminated) = self.scan_quoted(start + 1, '"');
                return self.quoted_token(
                    SyntaxKind::StringLiteral,
                    start,
                    TokenValue::Text(text),
                    terminated,
                );
            }
            if rest.starts_with('\'') {
                let (text, terminated) = self.scan_quoted(start + 1, '\'');
                let ch = text.chars().next().unwrap_or('\0');
                return self.quoted_token(
                    SyntaxKind::CharacterLiteral,
                    start,
                    TokenValue::Char(ch),
                    terminated,
                );
            }
            if rest.starts_with("#'") {
                let (text, terminated) = self.scan_quoted(start + 2, '\'');
                return self.quoted_token(
                    SyntaxKind::SymbolLiteral,
                    start,
                    TokenValue::Text(text),
                    terminated,
                );
            }
            if rest.starts_with("#:") {
                self.pos = self.word_end(start + 2);
                let name = source[start + 2..self.pos].to_string();
                return Token::new(SyntaxKind::SymbolLiteral, start, self.pos)
                    .with_value(TokenValue::Text(name));
            }
            if let Some(&(spelling, kind)) = PUNCTUATION
                .iter()
                .find(|(spelling, _)| rest.starts_with(spelling))
            {
                self.pos = start + spelling.len();
                return Token::new(kind, start, self.pos);
            }

            let end = self.word_end(start);
            let word = &source[start..end];
            if !word.is_empty() {
                self.pos = end;
                let token = if let Some(keyword) = text_to_keyword(word) {
                    Token::new(keyword, start, self.pos)
                } else if let Some(value) = decode_integer(word) {
                    Token::new(SyntaxKind::IntegerLiteral, start, self.pos)
                        .with_value(TokenValue::Integer(value))
                } else {
                    let name = word.to_string();
                    Token::new(SyntaxKind::Identifier, start, self.pos)
                        .with_value(TokenValue::Text(name))
                };
                return token;
            }

            // Nothing matched: consume one raw character so the caller always
            // makes progress.
            let ch = rest.chars().next().unwrap_or('\0');
            self.pos = start + ch.len_utf8();
            return Token::new(SyntaxKind::Identifier, start, self.pos)
                .with_value(TokenValue::Text(ch.to_string()))
                .with_flags(TokenFlags::DEGENERATE);
        }
    }

    fn skip_whitespace(&mut self) {
        let skipped = self.source[self.pos..]
            .char_indices()
            .find(|&(_, ch)| !is_whitespace(ch))
            .map_or(self.source.len() - self.pos, |(offset, _)| offset);
        self.pos += skipped;
    }

    /// End of the run of word characters starting at `start`.
    fn word_end(&self, start: usize) -> usize {
        let len = self.source[start..]
            .char_indices()
            .find(|&(_, ch)| !is_word_char(ch))
            .map_or(self.source.len() - start, |(offset, _)| offset);
        start + len
    }

    fn scan_doc_string(&mut self, start: usize) -> Token {
        let content_start = start + 3;
        let rest = self.source[content_start..].as_bytes();
        match memchr::memmem::find(rest, b"!*/") {
            Some(offset) => {
                let text = self.source[content_start..content_start + offset].to_string();
                self.pos = content_start + offset + 3;
                Token::new(SyntaxKind::StringLiteral, start, self.pos)
                    .with_value(TokenValue::Text(text))
                    .with_flags(TokenFlags::DOC_STRING)
            }
            None => {
                let text = self.source[content_start..].to_string();
                self.pos = self.source.len();
                Token::new(SyntaxKind::StringLiteral, start, self.pos)
                    .with_value(TokenValue::Text(text))
                    .with_flags(TokenFlags::DOC_STRING | TokenFlags::UNTERMINATED)
            }
        }
    }

    fn scan_multi_line_comment(&mut self, start: usize) -> Token {
        let content_start = start + 2;
        let rest = self.source[content_start..].as_bytes();
        let (content_end, end, flags) = match memchr::memmem::find(rest, b"*/") {
            Some(offset) => (
                content_start + offset,
                content_start + offset + 2,
                TokenFlags::empty(),
            ),
            None => (
                self.source.len(),
                self.source.len(),
                TokenFlags::UNTERMINATED,
            ),
        };
        self.pos = end;
        let text = self.source[content_start..content_end].to_string();
        Token::new(SyntaxKind::MultiLineCommentTrivia, start, end)
            .with_value(TokenValue::Text(text))
            .with_flags(flags)
    }

    fn scan_single_line_comment(&mut self, start: usize) -> Token {
        let content_start = start + 2;
        let rest = self.source[content_start..].as_bytes();
        let mut end = memchr::memchr(b'\n', rest).map_or(self.source.len(), |i| content_start + i);
        if end > content_start && self.source.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        self.pos = end;
        let text = self.source[content_start..end].to_string();
        Token::new(SyntaxKind::SingleLineCommentTrivia, start, end)
            .with_value(TokenValue::Text(text))
    }

    /// Read escaped text up to an unescaped `quote`, starting at `content_start`.
    ///
    /// A backslash always consumes the following character, so a delimiter
    /// preceded by an odd run of backslashes does not terminate the literal.
    fn scan_quoted(&mut self, content_start: usize, quote: char) -> (String, bool) {
        let mut text = String::new();
        let mut chars = self.source[content_start..].char_indices();

        while let Some((offset, ch)) = chars.next() {
            if ch == quote {
                self.pos = content_start + offset + ch.len_utf8();
                return (text, true);
            }
            if ch != '\\' {
                text.push(ch);
                continue;
            }
            let Some((_, escaped)) = chars.next() else {
                break;
            };
            match escaped {
                'n' => text.push('\n'),
                't' => text.push('\t'),
                'r' => text.push('\r'),
                '0' => text.push('\0'),
                'e' => text.push('\u{1b}'),
                'a' => text.push('\u{07}'),
                'b' => text.push('\u{08}'),
                'f' => text.push('\u{0c}'),
                'v' => text.push('\u{0b}'),
                'x' => {
                    let mut value = 0u32;
                    let mut digits = 0;
                    let mut lookahead = chars.clone();
                    while digits < 2 {
                        match lookahead.next() {
                            Some((_, d)) if d.is_ascii_hexdigit() => {
                                value = value * 16 + d.to_digit(16).unwrap_or(0);
                                digits += 1;
                                chars.next();
                            }
                            _ => break,
                        }
                    }
                    if digits == 0 {
                        text.push('x');
                    } else {
                        text.push(char::from_u32(value).unwrap_or('\u{fffd}'));
                    }
                }
                other => text.push(other),
            }
        }

        self.pos = self.source.len();
        (text, false)
    }

    fn quoted_token(
        &self,
        kind: SyntaxKind,
        start: usize,
        value: TokenValue,
        terminated: bool,
    ) -> Token {
        let token = Token::new(kind, start, self.pos).with_value(value);
        if terminated {
            token
        } else {
            token.with_flags(TokenFlags::UNTERMINATED)
        }
    }
}

impl Iterator for ScannerState {
    type Item = Token;

    /// Yields every token including a single trailing `EndOfFileToken`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == SyntaxKind::EndOfFileToken {
            self.finished = true;
        }
        Some(token)
    }
}
