//! Mention resolver
//!
//! Detects `@name` / `#name` queries behind the edit point and turns
//! search collaborator results into suggestions.

use std::sync::Arc;

use draft_common::DraftConfig;
use draft_core::{DraftState, MentionSearch, PendingSearch, SuggestedMention, TextRange, Trigger};
use futures::StreamExt;
use tracing::{debug, instrument, warn};

use crate::dto::suggestion_from_hit;

/// Trigger scanner and suggestion search driver
#[derive(Clone)]
pub struct MentionResolver {
    search: Arc<dyn MentionSearch>,
    max_suggestions: usize,
    min_query_len: usize,
    escape_char: char,
}

impl MentionResolver {
    /// Create a new MentionResolver
    pub fn new(search: Arc<dyn MentionSearch>, config: &DraftConfig) -> Self {
        Self {
            search,
            max_suggestions: config.max_suggestions,
            min_query_len: config.min_query_len,
            escape_char: config.escape_char,
        }
    }

    /// Look backward from `edit_offset` for an open mention query.
    ///
    /// Whitespace, a committed span or an escaped trigger ends the scan.
    pub fn scan(&self, draft: &DraftState, edit_offset: usize) -> Option<PendingSearch> {
        let chars: Vec<char> = draft.text().chars().collect();
        if edit_offset > chars.len() {
            return None;
        }

        let spans = draft.spans();
        let mut pos = edit_offset;
        while pos > 0 {
            pos -= 1;
            let c = chars[pos];
            if c.is_whitespace() || spans.covering(pos).is_some() {
                return None;
            }
            let Some(trigger) = Trigger::from_char(c) else {
                continue;
            };
            if pos > 0 && chars[pos - 1] == self.escape_char {
                return None;
            }

            let query: String = chars[pos + 1..edit_offset].iter().collect();
            if edit_offset - pos - 1 < self.min_query_len {
                return None;
            }
            debug!(trigger = %c, query = %query, offset = pos, "Mention query detected");
            return Some(PendingSearch {
                source: TextRange::from_bounds(pos, edit_offset),
                trigger,
                query,
                revision: draft.revision(),
            });
        }

        None
    }

    /// Ask the search collaborator for candidates.
    ///
    /// Failures are logged and produce no suggestions.
    #[instrument(skip(self, pending), fields(query = %pending.query, kind = %pending.kind()))]
    pub async fn resolve(&self, pending: &PendingSearch) -> Vec<SuggestedMention> {
        let stream = match self.search.search(&pending.query, pending.kind()).await {
            Ok(stream) => stream,
            Err(err) => {
                warn!(error = %err, "Mention search failed");
                return Vec::new();
            }
        };

        let suggestions: Vec<SuggestedMention> = stream
            .take(self.max_suggestions)
            .map(|hit| suggestion_from_hit(pending, hit))
            .collect()
            .await;

        debug!(count = suggestions.len(), "Mention search resolved");
        suggestions
    }
}

impl std::fmt::Debug for MentionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MentionResolver")
            .field("max_suggestions", &self.max_suggestions)
            .field("min_query_len", &self.min_query_len)
            .field("escape_char", &self.escape_char)
            .finish_non_exhaustive()
    }
}
