//! Source positions.
//!
//! The analysis core works purely on byte offsets into a named buffer.
//! Editors talk in line/column pairs, so `LineMap` converts between the two.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// An immutable offset into a named source buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub file: Arc<str>,
    pub offset: u32,
}

impl SourcePosition {
    pub fn new(file: Arc<str>, offset: u32) -> Self {
        SourcePosition { file, offset }
    }

    /// Same buffer, different offset.
    pub fn with_offset(&self, offset: u32) -> Self {
        SourcePosition {
            file: Arc::clone(&self.file),
            offset,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.file, self.offset)
    }
}

/// A position in a source file (0-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column, counted in characters
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// A line/column range in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }
}

/// Line map for offset <-> position conversion.
/// Stores the starting offset of each line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        let bytes = source.as_bytes();

        for (i, &b) in bytes.iter().enumerate() {
            if b == b'\n' {
                line_starts.push((i + 1) as u32);
            } else if b == b'\r' && bytes.get(i + 1) != Some(&b'\n') {
                // Lone \r ends a line; \r\n is handled by the \n.
                line_starts.push((i + 1) as u32);
            }
        }

        LineMap { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a Position. Offsets past the end clamp to it.
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };

        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let slice = source.get(start..clamped_end).unwrap_or("");

        Position {
            line: line as u32,
            character: slice.chars().count() as u32,
        }
    }

    /// Convert a Position to a byte offset. Columns past the end of the line
    /// clamp to the line end; unknown lines yield `None`.
    pub fn position_to_offset(&self, position: Position, source: &str) -> Option<u32> {
        let line_idx = position.line as usize;
        let line_start = *self.line_starts.get(line_idx)?;
        let line_limit = self
            .line_starts
            .get(line_idx + 1)
            .copied()
            .unwrap_or(source.len() as u32);
        let slice = source
            .get(line_start as usize..line_limit as usize)
            .unwrap_or("");

        let mut byte_count = 0u32;
        for (seen, ch) in slice.chars().enumerate() {
            if ch == '\n' || ch == '\r' || seen as u32 >= position.character {
                break;
            }
            byte_count += ch.len_utf8() as u32;
        }
        Some(line_start + byte_count)
    }

    /// Convert a byte range to a line/column range.
    pub fn range(&self, pos: u32, end: u32, source: &str) -> Range {
        Range::new(
            self.offset_to_position(pos, source),
            self.offset_to_position(end, source),
        )
    }
}
