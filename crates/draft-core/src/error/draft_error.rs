//! Draft errors - error types for draft mutations
//!
//! Every variant is local and recoverable: a failed operation leaves the
//! draft exactly as it was before the call.

use thiserror::Error;

/// Result type for draft operations
pub type DraftResult<T> = Result<T, DraftError>;

/// Draft layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    // =========================================================================
    // Bounds Errors
    // =========================================================================
    #[error("Range out of bounds: offset {offset}, length {length}, text length {text_len}")]
    Range {
        offset: usize,
        length: usize,
        text_len: usize,
    },

    #[error("No span at index {index} (span count {len})")]
    Index { index: usize, len: usize },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Range [{start}..{}) overlaps an existing span", .start + .length)]
    Overlap { start: usize, length: usize },

    #[error("Suggestion source [{start}..{}) no longer matches the draft text", .start + .length)]
    StaleSuggestion { start: usize, length: usize },

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Draft has already been sent")]
    Consumed,
}

impl DraftError {
    /// Get a stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Range { .. } => "RANGE_ERROR",
            Self::Index { .. } => "INDEX_ERROR",
            Self::Overlap { .. } => "OVERLAP_ERROR",
            Self::StaleSuggestion { .. } => "STALE_SUGGESTION",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::Consumed => "DRAFT_CONSUMED",
        }
    }

    /// Check if this is an out-of-bounds error
    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range { .. } | Self::Index { .. })
    }

    /// Check if this is a conflict with existing draft state
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Overlap { .. } | Self::StaleSuggestion { .. })
    }

    /// Check if the caller may retry with corrected parameters
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Consumed)
    }

    pub(crate) fn range(offset: usize, length: usize, text_len: usize) -> Self {
        Self::Range {
            offset,
            length,
            text_len,
        }
    }
}
