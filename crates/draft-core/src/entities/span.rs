//! Span entity - a typed annotation anchored to a text range

use serde::{Deserialize, Serialize};

use crate::value_objects::{MentionTarget, TextRange};

/// Mention span over the draft text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub range: TextRange,
    pub target: MentionTarget,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, len: usize, target: MentionTarget) -> Self {
        Self {
            range: TextRange::new(start, len),
            target,
        }
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.range.start
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.range.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.range.end()
    }
}
