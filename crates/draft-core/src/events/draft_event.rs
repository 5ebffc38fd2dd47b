//! Draft events - the consolidated notification emitted after each operation

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::SuggestedMention;
use crate::render::DraftElement;
use crate::value_objects::{DraftId, TextRange};

/// Operation that produced a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftChange {
    TextInserted { offset: usize, len: usize },
    TextRemoved { offset: usize, len: usize },
    MentionAdded { range: TextRange },
    MentionRemoved { index: usize },
    SuggestionApplied { range: TextRange },
    Replaced,
    SuggestionsResolved { count: usize },
}

impl DraftChange {
    /// Get the event name
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::TextInserted { .. } => "TEXT_INSERTED",
            Self::TextRemoved { .. } => "TEXT_REMOVED",
            Self::MentionAdded { .. } => "MENTION_ADDED",
            Self::MentionRemoved { .. } => "MENTION_REMOVED",
            Self::SuggestionApplied { .. } => "SUGGESTION_APPLIED",
            Self::Replaced => "REPLACED",
            Self::SuggestionsResolved { .. } => "SUGGESTIONS_RESOLVED",
        }
    }
}

/// Notification delivered to draft observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftUpdate {
    pub draft_id: DraftId,
    pub change: DraftChange,
    /// Text and mention runs in offset order
    pub elements: Vec<DraftElement>,
    /// Empty except right after a resolved search
    pub suggestions: Vec<SuggestedMention>,
}

impl DraftUpdate {
    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }
}

/// Lifecycle of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    #[default]
    Idle,
    /// An operation is being applied. Internal to the controller: it only
    /// exists while the draft lock is held, so readers never observe it.
    Editing,
    /// Edits are accepted; a suggestion search is in flight
    SearchPending,
    /// Handed to the transport; no further mutations
    Sent,
}

impl fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Editing => write!(f, "editing"),
            Self::SearchPending => write!(f, "search_pending"),
            Self::Sent => write!(f, "sent"),
        }
    }
}
