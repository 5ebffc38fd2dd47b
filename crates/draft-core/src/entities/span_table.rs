//! Span table - keeps mention spans valid across text edits
//!
//! Spans are stored sorted by start offset and never overlap, so the
//! index used by [`SpanTable::remove_at`] is the position in offset order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Span;
use crate::error::{DraftError, DraftResult};
use crate::value_objects::TextRange;

/// What happens when text is inserted strictly inside a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsideSpanPolicy {
    /// The span grows to include the inserted text
    #[default]
    Extend,
    /// The span is cut in two around the inserted text, both halves keep the target
    Split,
    /// The insertion is refused with an overlap error
    Reject,
}

impl fmt::Display for InsideSpanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extend => write!(f, "extend"),
            Self::Split => write!(f, "split"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for InsideSpanPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extend" => Ok(Self::Extend),
            "split" => Ok(Self::Split),
            "reject" => Ok(Self::Reject),
            _ => Err(format!("Invalid inside-span policy: {s}")),
        }
    }
}

/// Ordered, non-overlapping collection of spans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanTable {
    spans: Vec<Span>,
}

impl SpanTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// All spans ordered by start offset
    #[inline]
    pub fn all(&self) -> &[Span] {
        &self.spans
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Span> {
        self.spans.get(index)
    }

    /// Span containing the character at `offset`
    pub fn covering(&self, offset: usize) -> Option<&Span> {
        self.spans.iter().find(|span| span.range.contains(offset))
    }

    /// Check whether `range` intersects any span
    pub fn intersects(&self, range: &TextRange) -> bool {
        self.spans.iter().any(|span| span.range.intersects(range))
    }

    /// Add a span, keeping offset order
    pub fn add(&mut self, span: Span) -> DraftResult<()> {
        if span.is_empty() {
            return Err(DraftError::range(span.start(), 0, span.end()));
        }
        if self.intersects(&span.range) {
            return Err(DraftError::Overlap {
                start: span.start(),
                length: span.len(),
            });
        }
        let position = self.spans.partition_point(|s| s.start() < span.start());
        self.spans.insert(position, span);
        Ok(())
    }

    /// Remove the span at `index` (offset order). Other spans keep their offsets.
    pub fn remove_at(&mut self, index: usize) -> DraftResult<Span> {
        if index >= self.spans.len() {
            return Err(DraftError::Index {
                index,
                len: self.spans.len(),
            });
        }
        Ok(self.spans.remove(index))
    }

    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Shift spans after `inserted_len` characters were inserted at `offset`
    pub fn adjust_for_insert(
        &mut self,
        offset: usize,
        inserted_len: usize,
        policy: InsideSpanPolicy,
    ) -> DraftResult<()> {
        if inserted_len == 0 {
            return Ok(());
        }

        let inside = self
            .spans
            .iter()
            .position(|span| span.start() < offset && offset < span.end());

        if let (Some(index), InsideSpanPolicy::Reject) = (inside, policy) {
            let span = &self.spans[index];
            return Err(DraftError::Overlap {
                start: span.start(),
                length: span.len(),
            });
        }

        for span in &mut self.spans {
            if offset <= span.start() {
                span.range.start += inserted_len;
            }
        }

        if let Some(index) = inside {
            match policy {
                InsideSpanPolicy::Extend => self.spans[index].range.len += inserted_len,
                InsideSpanPolicy::Split => {
                    let span = &mut self.spans[index];
                    let tail = Span {
                        range: TextRange::from_bounds(offset + inserted_len, span.end() + inserted_len),
                        target: span.target.clone(),
                    };
                    span.range = TextRange::from_bounds(span.start(), offset);
                    self.spans.insert(index + 1, tail);
                }
                InsideSpanPolicy::Reject => {}
            }
        }

        Ok(())
    }

    /// Shift and clip spans after `[offset, offset + removed_len)` was removed.
    /// Spans clipped to nothing are dropped.
    pub fn adjust_for_remove(&mut self, offset: usize, removed_len: usize) {
        if removed_len == 0 {
            return;
        }
        let removed = TextRange::new(offset, removed_len);

        for span in &mut self.spans {
            let overlap = span.range.overlap_len(&removed);
            if span.start() >= removed.end() {
                span.range.start -= removed_len;
            } else if span.start() > offset {
                span.range.start = offset;
            }
            span.range.len -= overlap;
        }

        self.spans.retain(|span| !span.is_empty());
    }
}
