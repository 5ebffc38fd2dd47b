//! Test fixtures and mock collaborators
//!
//! Search and transport doubles with controllable behavior.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use draft_core::{
    CollaboratorError, MentionKind, MentionSearch, MentionTarget, MessagePayload,
    MessageTransport, SearchHit, SearchStream,
};
use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use tokio::sync::Notify;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A user target with an id unique to this test run
pub fn unique_user() -> MentionTarget {
    MentionTarget::user(format!("user{}", unique_suffix()))
}

/// The canonical mock hit
pub fn mock_user_hit() -> SearchHit {
    SearchHit::new(MentionTarget::user("mock_user"), "Mock Usernamiski")
}

/// Search double that answers every query with a fixed hit list
#[derive(Debug, Default)]
pub struct MockSearch {
    hits: Vec<SearchHit>,
    queries: Mutex<Vec<(String, MentionKind)>>,
}

impl MockSearch {
    pub fn new(hits: Vec<SearchHit>) -> Arc<Self> {
        Arc::new(Self {
            hits,
            queries: Mutex::new(Vec::new()),
        })
    }

    /// Answers with the single "Mock Usernamiski" hit
    pub fn mock_user() -> Arc<Self> {
        Self::new(vec![mock_user_hit()])
    }

    /// Queries received so far, in order
    pub fn queries(&self) -> Vec<(String, MentionKind)> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl MentionSearch for MockSearch {
    async fn search(
        &self,
        query: &str,
        kind: MentionKind,
    ) -> Result<SearchStream, CollaboratorError> {
        self.queries.lock().push((query.to_string(), kind));
        Ok(stream::iter(self.hits.clone()).boxed())
    }
}

/// Search double that always fails
#[derive(Debug, Default)]
pub struct FailingSearch;

#[async_trait]
impl MentionSearch for FailingSearch {
    async fn search(
        &self,
        _query: &str,
        _kind: MentionKind,
    ) -> Result<SearchStream, CollaboratorError> {
        Err(CollaboratorError::Unavailable("search index offline".into()))
    }
}

/// Search double that holds every answer until `release` is called
#[derive(Debug, Default)]
pub struct GatedSearch {
    gate: Notify,
    hits: Vec<SearchHit>,
}

impl GatedSearch {
    pub fn new(hits: Vec<SearchHit>) -> Arc<Self> {
        Arc::new(Self {
            gate: Notify::new(),
            hits,
        })
    }

    /// Let one waiting (or the next) search complete
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl MentionSearch for GatedSearch {
    async fn search(
        &self,
        _query: &str,
        _kind: MentionKind,
    ) -> Result<SearchStream, CollaboratorError> {
        self.gate.notified().await;
        Ok(stream::iter(self.hits.clone()).boxed())
    }
}

/// Transport double that records payloads and accepts or rejects them
#[derive(Debug, Default)]
pub struct RecordingTransport {
    reject_with: Option<String>,
    sent: Mutex<Vec<MessagePayload>>,
}

impl RecordingTransport {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn rejecting(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            reject_with: Some(reason.to_string()),
            sent: Mutex::new(Vec::new()),
        })
    }

    /// Payloads handed to the transport, including rejected ones
    pub fn sent(&self) -> Vec<MessagePayload> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl MessageTransport for RecordingTransport {
    async fn send(&self, payload: &MessagePayload) -> Result<(), CollaboratorError> {
        self.sent.lock().push(payload.clone());
        match &self.reject_with {
            Some(reason) => Err(CollaboratorError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}
