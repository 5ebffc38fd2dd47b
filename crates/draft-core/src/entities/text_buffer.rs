//! Text buffer - the canonical draft text
//!
//! Offsets are character offsets. The buffer keeps its character count
//! alongside the `String` so bounds checks never rescan the text.

use crate::error::{DraftError, DraftResult};
use crate::value_objects::TextRange;

/// Mutable character sequence owned by a draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    char_len: usize,
}

impl TextBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text`
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        Self { text, char_len }
    }

    /// Length in characters
    #[inline]
    pub fn len(&self) -> usize {
        self.char_len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Insert `text` at character `offset`
    pub fn insert(&mut self, offset: usize, text: &str) -> DraftResult<()> {
        if offset > self.char_len {
            return Err(DraftError::range(offset, 0, self.char_len));
        }
        let byte = self.byte_offset(offset);
        self.text.insert_str(byte, text);
        self.char_len += text.chars().count();
        Ok(())
    }

    /// Remove `length` characters starting at `offset`, returning them
    pub fn remove(&mut self, offset: usize, length: usize) -> DraftResult<String> {
        self.check_range(offset, length)?;
        let start = self.byte_offset(offset);
        let end = self.byte_offset(offset + length);
        let removed: String = self.text.drain(start..end).collect();
        self.char_len -= length;
        Ok(removed)
    }

    /// Replace the whole content
    pub fn replace_all(&mut self, text: impl Into<String>) {
        *self = Self::from_text(text);
    }

    /// Characters inside `range`
    pub fn slice(&self, range: TextRange) -> DraftResult<&str> {
        self.check_range(range.start, range.len)?;
        Ok(&self.text[self.byte_offset(range.start)..self.byte_offset(range.end())])
    }

    /// Character at `offset`
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.text.chars().nth(offset)
    }

    /// Fail with a range error unless `[offset, offset + length)` fits the buffer
    pub fn check_range(&self, offset: usize, length: usize) -> DraftResult<()> {
        match offset.checked_add(length) {
            Some(end) if end <= self.char_len => Ok(()),
            _ => Err(DraftError::range(offset, length, self.char_len)),
        }
    }

    /// Convert a character offset (≤ len) into a byte offset
    fn byte_offset(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map_or(self.text.len(), |(byte, _)| byte)
    }
}
