//! Byte-offset ranges.
//!
//! Every token and AST node owns a `[pos, end)` range. Containment between
//! nodes is checked half-open, but completion queries treat ranges as closed
//! at both ends so a cursor sitting on either boundary still belongs to the
//! node.

use serde::{Deserialize, Serialize};

/// A `[pos, end)` range of byte offsets into one source buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub pos: u32,
    pub end: u32,
}

impl TextRange {
    #[inline]
    pub const fn new(pos: u32, end: u32) -> Self {
        TextRange { pos, end }
    }

    /// A zero-width range at `pos`.
    #[inline]
    pub const fn empty(pos: u32) -> Self {
        TextRange { pos, end: pos }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.pos)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.pos
    }

    /// `pos <= offset < end`.
    #[inline]
    pub const fn contains(&self, offset: u32) -> bool {
        self.pos <= offset && offset < self.end
    }

    /// `pos <= offset <= end`. Used by cursor classification.
    #[inline]
    pub const fn contains_inclusive(&self, offset: u32) -> bool {
        self.pos <= offset && offset <= self.end
    }

    /// Whether `other` lies entirely within this range.
    #[inline]
    pub const fn covers(&self, other: TextRange) -> bool {
        self.pos <= other.pos && other.end <= self.end
    }

    /// Half-open intersection test. Zero-width ranges never overlap anything.
    #[inline]
    pub const fn overlaps(&self, other: TextRange) -> bool {
        !self.is_empty() && !other.is_empty() && self.pos < other.end && other.pos < self.end
    }

    /// Smallest range covering both.
    #[inline]
    pub fn cover(self, other: TextRange) -> TextRange {
        TextRange {
            pos: self.pos.min(other.pos),
            end: self.end.max(other.end),
        }
    }

    /// Slice the covered text out of `source`, or `""` when out of bounds.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.pos as usize..self.end as usize).unwrap_or("")
    }
}
