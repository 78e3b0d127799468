//! Parser state - token cursor, node construction and recovery helpers.
//!
//! `ParserState` pulls tokens from a `ScannerState` one at a time. Lookahead is
//! done either by peeking one token through the scanner's pushback slot or by
//! snapshotting the scanner and rewinding. Parse methods never fail; when a
//! construct is absent they build a `Missing` node, and when a token is
//! invalid in context they wrap it in a `Wrong` node and consume it.

use super::base::NodeIndex;
use super::node::{ExpectedKind, NodeArena, NodeData};
use super::node_access::data_children;
use mudz_common::diagnostics::format_message;
use mudz_common::limits::MAX_NESTING_DEPTH;
use mudz_scanner::{ScannerState, SyntaxKind, Token, TokenFlags, token_to_text};
use serde::Serialize;
use tracing::debug;

/// A syntax problem found while parsing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    /// Current token (already consumed from the scanner).
    pub(crate) current: Token,
    /// End offset of the last consumed token.
    pub(crate) prev_end: u32,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) depth: u32,
}

impl ParserState {
    pub fn new(file_name: String, source: String) -> ParserState {
        let arena = NodeArena::with_capacity(source.len());
        let mut scanner = ScannerState::new(source, false);
        let current = scanner.next_token();
        ParserState {
            scanner,
            arena,
            file_name,
            current,
            prev_end: 0,
            parse_diagnostics: Vec::new(),
            depth: 0,
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source_text(&self) -> &str {
        self.scanner.source_text()
    }

    /// Consume the parser, returning the arena and the diagnostics.
    pub fn into_parts(self) -> (NodeArena, Vec<ParseDiagnostic>) {
        (self.arena, self.parse_diagnostics)
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current.kind
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current.kind == kind
    }

    /// A raw character the scanner could not classify.
    #[inline]
    pub(crate) fn is_invalid_character(&self) -> bool {
        self.current.flags.contains(TokenFlags::DEGENERATE)
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.current.pos
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.current.end
    }

    /// Move to the next token and return the one just consumed.
    pub(crate) fn next_token(&mut self) -> Token {
        let next = self.scanner.next_token();
        let consumed = std::mem::replace(&mut self.current, next);
        if consumed.kind != SyntaxKind::EndOfFileToken {
            self.prev_end = consumed.end;
        }
        consumed
    }

    /// Kind of the token after the current one.
    pub(crate) fn peek(&mut self) -> SyntaxKind {
        let next = self.scanner.next_token();
        let kind = next.kind;
        self.scanner.push_back(next);
        kind
    }

    /// Run `f` speculatively and rewind the token cursor afterwards.
    /// `f` may only move the cursor; it must not build nodes.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let current = self.current.clone();
        let prev_end = self.prev_end;
        let result = f(self);
        self.scanner.restore_state(snapshot);
        self.current = current;
        self.prev_end = prev_end;
        result
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume a required punctuation token, or record that it is missing.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let spelling = token_to_text(kind).unwrap_or_default();
        let message = format_message("'{0}' expected.", &[spelling.as_ref()]);
        self.error_at_current(message);
        false
    }

    pub(crate) fn error_at_current(&mut self, message: String) {
        let start = self.token_pos();
        debug!(file = %self.file_name, start, %message, "parse error");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length: 0,
            message,
        });
    }

    // =========================================================================
    // Node construction
    // =========================================================================

    /// Finish a node that began at `start`.
    ///
    /// The range is widened to cover every child and ends at the last
    /// consumed token, so a parent always contains its children.
    pub(crate) fn finish_node(&mut self, start: u32, data: NodeData) -> NodeIndex {
        let mut pos = start;
        let mut end = self.prev_end.max(start);
        for child in data_children(&data) {
            if let Some(node) = self.arena.get(child) {
                pos = pos.min(node.pos);
                end = end.max(node.end);
            }
        }
        self.arena.add_node(pos, end, data)
    }

    /// Zero-width `Missing` node at the start of the current token.
    pub(crate) fn create_missing(
        &mut self,
        message: impl Into<String>,
        expected: Option<ExpectedKind>,
    ) -> NodeIndex {
        let message = message.into();
        let pos = self.token_pos();
        debug!(file = %self.file_name, pos, %message, "missing node");
        self.parse_diagnostics.push(ParseDiagnostic {
            start: pos,
            length: 0,
            message: message.clone(),
        });
        self.arena
            .add_node(pos, pos, NodeData::Missing { message, expected })
    }

    /// `Wrong` node spanning the current token, which is consumed.
    /// At end of input there is nothing to consume, so a `Missing` is built.
    pub(crate) fn create_wrong(
        &mut self,
        message: impl Into<String>,
        expected: Option<ExpectedKind>,
    ) -> NodeIndex {
        if self.is_token(SyntaxKind::EndOfFileToken) {
            return self.create_missing(message, expected);
        }
        let message = message.into();
        let token = self.next_token();
        debug!(file = %self.file_name, pos = token.pos, %message, "wrong node");
        self.parse_diagnostics.push(ParseDiagnostic {
            start: token.pos,
            length: token.end - token.pos,
            message: message.clone(),
        });
        self.arena
            .add_node(token.pos, token.end, NodeData::Wrong { message, expected })
    }

    /// Missing node if the current token can follow the absent construct,
    /// otherwise a Wrong node over the current token.
    pub(crate) fn missing_or_wrong(
        &mut self,
        message: &str,
        expected: Option<ExpectedKind>,
    ) -> NodeIndex {
        if is_closing_token(self.token()) {
            self.create_missing(message, expected)
        } else {
            self.create_wrong(message, expected)
        }
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    /// Run `f` one nesting level deeper, or report the construct as too deep.
    pub(crate) fn nested(&mut self, f: impl FnOnce(&mut Self) -> NodeIndex) -> NodeIndex {
        if self.depth >= MAX_NESTING_DEPTH {
            return self.create_wrong("Construct is nested too deeply.", None);
        }
        self.depth += 1;
        let node = f(self);
        self.depth -= 1;
        node
    }
}

/// Tokens that end an enclosing construct; a construct missing before one of
/// these is reported as `Missing` rather than consuming the token.
pub(crate) fn is_closing_token(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::EndOfFileToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::CommaToken
            | SyntaxKind::ColonToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::OpenBraceToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::DotDotDotToken
            | SyntaxKind::DotDotToken
            | SyntaxKind::EqualsToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::InKeyword
    )
}
