//! Suggestion entities - pending searches and the candidates they produce

use serde::{Deserialize, Serialize};

use crate::value_objects::{MentionKind, MentionTarget, TextRange, Trigger};

/// A detected mention query waiting for the search collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSearch {
    /// Range covering the trigger character and the query
    pub source: TextRange,
    pub trigger: Trigger,
    /// Text typed after the trigger
    pub query: String,
    /// Draft revision the query was read from
    pub revision: u64,
}

impl PendingSearch {
    #[inline]
    pub fn kind(&self) -> MentionKind {
        self.trigger.kind()
    }

    /// Trigger plus query, exactly as it appears in the draft
    pub fn source_text(&self) -> String {
        let mut text = String::with_capacity(self.query.len() + 1);
        text.push(self.trigger.as_char());
        text.push_str(&self.query);
        text
    }
}

/// Candidate mention proposed from partial input.
///
/// A snapshot by value: it holds no reference into the draft and goes stale
/// as soon as the draft is mutated again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedMention {
    pub source: TextRange,
    /// Text under `source` when the search was issued
    pub source_text: String,
    pub target: MentionTarget,
    pub replacement_text: String,
    /// Draft revision the suggestion was computed for
    pub revision: u64,
}

impl SuggestedMention {
    /// Build a suggestion for `search` resolved to `target`
    pub fn for_search(
        search: &PendingSearch,
        target: MentionTarget,
        replacement_text: impl Into<String>,
    ) -> Self {
        Self {
            source: search.source,
            source_text: search.source_text(),
            target,
            replacement_text: replacement_text.into(),
            revision: search.revision,
        }
    }
}
