//! Response types returned by draft operations

use serde::{Deserialize, Serialize};

/// Result of handing a draft to the transport collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SendOutcome {
    /// The transport accepted the message; the draft is consumed
    Sent,
    /// The transport refused or failed; the draft stays editable
    Failed { reason: String },
}

impl SendOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Failure reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Sent => None,
            Self::Failed { reason } => Some(reason),
        }
    }
}
