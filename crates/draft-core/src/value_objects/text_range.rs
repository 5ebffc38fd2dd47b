//! Text range - a half-open `[start, start + len)` interval over draft text
//!
//! Offsets and lengths count Unicode scalar values (`char`), never bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open character range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub len: usize,
}

impl TextRange {
    /// Create a new range
    #[inline]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Create a range from `start` (inclusive) to `end` (exclusive)
    #[inline]
    pub const fn from_bounds(start: usize, end: usize) -> Self {
        Self {
            start,
            len: end.saturating_sub(start),
        }
    }

    /// Exclusive end offset
    #[inline]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check whether `offset` lies inside the range
    #[inline]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end()
    }

    /// Check whether two ranges share at least one character
    pub fn intersects(&self, other: &Self) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Number of characters shared with `other`
    pub fn overlap_len(&self, other: &Self) -> usize {
        let lo = self.start.max(other.start);
        let hi = self.end().min(other.end());
        hi.saturating_sub(lo)
    }

    /// Check whether `other` lies entirely inside this range
    pub fn covers(&self, other: &Self) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end())
    }
}
