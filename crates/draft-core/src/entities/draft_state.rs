//! Draft state - text buffer and span table mutated together
//!
//! Every method either applies completely or returns an error with the
//! state untouched.

use super::{InsideSpanPolicy, Span, SpanTable, SuggestedMention, TextBuffer};
use crate::error::{DraftError, DraftResult};
use crate::render::{self, DraftElement};
use crate::value_objects::{MentionTarget, TextRange};

/// Limits applied to every mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftLimits {
    pub inside_span_policy: InsideSpanPolicy,
    /// Maximum text length in characters
    pub max_length: usize,
}

impl Default for DraftLimits {
    fn default() -> Self {
        Self {
            inside_span_policy: InsideSpanPolicy::default(),
            max_length: 4000,
        }
    }
}

/// Text plus mention spans of one draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftState {
    buffer: TextBuffer,
    spans: SpanTable,
    limits: DraftLimits,
    /// Count of committed mutations
    revision: u64,
}

impl DraftState {
    /// Create an empty draft state
    pub fn new(limits: DraftLimits) -> Self {
        Self {
            buffer: TextBuffer::new(),
            spans: SpanTable::new(),
            limits,
            revision: 0,
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    #[inline]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[inline]
    pub fn spans(&self) -> &SpanTable {
        &self.spans
    }

    #[inline]
    pub fn limits(&self) -> DraftLimits {
        self.limits
    }

    /// Bumped by every successful mutation
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Render the element list in offset order
    pub fn elements(&self) -> Vec<DraftElement> {
        render::elements(self.buffer.as_str(), self.spans.all())
    }

    /// Insert `text` at `offset`, shifting spans
    pub fn insert_text(&mut self, offset: usize, text: &str) -> DraftResult<()> {
        self.buffer.check_range(offset, 0)?;
        let inserted = text.chars().count();
        self.check_length(self.buffer.len() + inserted)?;

        self.spans
            .adjust_for_insert(offset, inserted, self.limits.inside_span_policy)?;
        self.buffer.insert(offset, text)?;
        self.revision += 1;
        Ok(())
    }

    /// Remove `length` characters at `offset`, clipping spans
    pub fn remove_text(&mut self, offset: usize, length: usize) -> DraftResult<String> {
        let removed = self.buffer.remove(offset, length)?;
        self.spans.adjust_for_remove(offset, length);
        self.revision += 1;
        Ok(removed)
    }

    /// Attach a mention to `[offset, offset + length)`
    pub fn add_mention(
        &mut self,
        offset: usize,
        length: usize,
        target: MentionTarget,
    ) -> DraftResult<()> {
        if length == 0 {
            return Err(DraftError::range(offset, length, self.buffer.len()));
        }
        self.buffer.check_range(offset, length)?;
        self.spans.add(Span::new(offset, length, target))?;
        self.revision += 1;
        Ok(())
    }

    /// Remove the mention at `index` in offset order. Text is untouched.
    pub fn remove_mention_at(&mut self, index: usize) -> DraftResult<Span> {
        let span = self.spans.remove_at(index)?;
        self.revision += 1;
        Ok(span)
    }

    /// Replace the whole text. All spans are dropped.
    pub fn replace_all(&mut self, text: impl Into<String>) -> DraftResult<()> {
        let text = text.into();
        self.check_length(text.chars().count())?;
        self.buffer.replace_all(text);
        self.spans.clear();
        self.revision += 1;
        Ok(())
    }

    /// Check that no mutation happened since `suggestion` was computed
    /// and that it still describes the current text
    pub fn validate_suggestion(&self, suggestion: &SuggestedMention) -> DraftResult<()> {
        let stale = DraftError::StaleSuggestion {
            start: suggestion.source.start,
            length: suggestion.source.len,
        };
        if suggestion.revision != self.revision {
            return Err(stale);
        }
        match self.buffer.slice(suggestion.source) {
            Ok(current) if current == suggestion.source_text => {}
            _ => return Err(stale),
        }
        if self.spans.intersects(&suggestion.source) {
            return Err(stale);
        }
        Ok(())
    }

    /// Replace the suggestion source with `replacement_text` and mention it.
    ///
    /// Returns the range of the new mention.
    pub fn apply_suggestion(
        &mut self,
        suggestion: &SuggestedMention,
        replacement_text: &str,
    ) -> DraftResult<TextRange> {
        self.validate_suggestion(suggestion)?;

        let mut next = self.clone();
        let start = suggestion.source.start;
        let len = replacement_text.chars().count();
        next.remove_text(start, suggestion.source.len)?;
        next.insert_text(start, replacement_text)?;
        next.add_mention(start, len, suggestion.target.clone())?;

        *self = next;
        Ok(TextRange::new(start, len))
    }

    fn check_length(&self, len: usize) -> DraftResult<()> {
        if len > self.limits.max_length {
            return Err(DraftError::ContentTooLong {
                max: self.limits.max_length,
            });
        }
        Ok(())
    }
}
