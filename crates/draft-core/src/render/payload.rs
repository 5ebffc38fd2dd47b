//! Final message payload handed to the transport collaborator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{DraftState, Span};
use crate::value_objects::{DraftId, MentionTarget};

/// Composed message ready for transmission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub draft_id: DraftId,
    pub text: String,
    /// Spans in offset order
    pub spans: Vec<Span>,
    pub composed_at: DateTime<Utc>,
}

impl MessagePayload {
    /// Compose a payload from the current draft state
    pub fn compose(draft_id: DraftId, state: &DraftState) -> Self {
        Self {
            draft_id,
            text: state.text().to_string(),
            spans: state.spans().all().to_vec(),
            composed_at: Utc::now(),
        }
    }

    /// Distinct user ids mentioned in the message, in offset order
    pub fn mentioned_users(&self) -> Vec<&str> {
        let mut users: Vec<&str> = Vec::new();
        for span in &self.spans {
            if let MentionTarget::User(id) = &span.target {
                if !users.contains(&id.as_str()) {
                    users.push(id.as_str());
                }
            }
        }
        users
    }

    /// Check if the message has no visible content
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
