//! Collaborator traits (ports) - the narrow interfaces the draft engine consumes
//!
//! The draft layer defines what it needs from search and transport; the
//! embedding application provides the implementations.

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

use crate::render::MessagePayload;
use crate::value_objects::{MentionKind, MentionTarget};

/// Lazy sequence of search results
pub type SearchStream = BoxStream<'static, SearchHit>;

/// One raw result from the search collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub target: MentionTarget,
    pub display_text: String,
}

impl SearchHit {
    pub fn new(target: MentionTarget, display_text: impl Into<String>) -> Self {
        Self {
            target,
            display_text: display_text.into(),
        }
    }
}

/// Failure reported by an external collaborator
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("Rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ============================================================================
// Search
// ============================================================================

#[async_trait]
pub trait MentionSearch: Send + Sync {
    /// Look up candidates of `kind` matching `query`
    async fn search(&self, query: &str, kind: MentionKind) -> Result<SearchStream, CollaboratorError>;
}

// ============================================================================
// Transport
// ============================================================================

#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Accept a composed message for delivery
    async fn send(&self, payload: &MessagePayload) -> Result<(), CollaboratorError>;
}
