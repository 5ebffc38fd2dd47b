//! Draft controller
//!
//! Public edit operations over one draft. Every operation commits its text
//! and span changes under the state lock, then releases the lock and emits
//! exactly one notification. Inserts may additionally start a suggestion
//! search, whose result arrives later as a second notification.

use std::sync::{Arc, Weak};

use draft_core::{
    DraftChange, DraftElement, DraftError, DraftId, DraftResult, DraftState, DraftStatus,
    DraftUpdate, MentionTarget, MessagePayload, MessageTransport, Span, SuggestedMention, TextRange,
};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::context::DraftContext;
use super::observers::{DraftObserver, ObserverId, ObserverList};
use super::resolver::MentionResolver;
use crate::dto::{send_outcome_from, SendOutcome};

/// Mutable part of a draft, guarded by one lock
struct DraftInner {
    state: DraftState,
    status: DraftStatus,
    /// Bumped by every committed mutation; a search result is only
    /// delivered if the generation it started from is still current
    generation: u64,
    search_task: Option<JoinHandle<()>>,
}

impl DraftInner {
    fn supersede_search(&mut self) {
        self.generation += 1;
        if let Some(task) = self.search_task.take() {
            task.abort();
        }
    }
}

struct DraftShared {
    id: DraftId,
    inner: Mutex<DraftInner>,
    observers: ObserverList,
    resolver: MentionResolver,
    transport: Arc<dyn MessageTransport>,
}

/// Handle to an in-progress message draft.
///
/// Cloning is cheap and yields another handle to the same draft, so
/// observers can capture one and re-enter through the public operations.
/// Callers serialize mutations; only the suggestion search runs concurrently.
#[derive(Clone)]
pub struct Draft {
    shared: Arc<DraftShared>,
}

impl Draft {
    /// Open an empty draft
    pub fn new(ctx: &DraftContext) -> Self {
        Self::from_state(ctx, DraftState::new(ctx.config().limits()))
    }

    /// Open a draft holding `text`
    ///
    /// # Errors
    /// Returns `DraftError::ContentTooLong` if `text` exceeds the configured maximum
    pub fn with_text(ctx: &DraftContext, text: &str) -> DraftResult<Self> {
        let mut state = DraftState::new(ctx.config().limits());
        state.insert_text(0, text)?;
        Ok(Self::from_state(ctx, state))
    }

    fn from_state(ctx: &DraftContext, state: DraftState) -> Self {
        let id = DraftId::new();
        debug!(draft_id = %id, "Draft opened");
        Self {
            shared: Arc::new(DraftShared {
                id,
                inner: Mutex::new(DraftInner {
                    state,
                    status: DraftStatus::Idle,
                    generation: 0,
                    search_task: None,
                }),
                observers: ObserverList::new(),
                resolver: ctx.resolver(),
                transport: ctx.transport(),
            }),
        }
    }

    // === Accessors ===

    pub fn id(&self) -> DraftId {
        self.shared.id
    }

    pub fn text(&self) -> String {
        self.shared.inner.lock().state.text().to_string()
    }

    /// Committed spans in offset order
    pub fn spans(&self) -> Vec<Span> {
        self.shared.inner.lock().state.spans().all().to_vec()
    }

    /// Rendered text and mention runs in offset order
    pub fn elements(&self) -> Vec<DraftElement> {
        self.shared.inner.lock().state.elements()
    }

    /// Current lifecycle state; `Editing` is internal and never returned
    pub fn status(&self) -> DraftStatus {
        self.shared.inner.lock().status
    }

    /// Copy of the current text and spans
    pub fn snapshot(&self) -> DraftState {
        self.shared.inner.lock().state.clone()
    }

    // === Observers ===

    /// Register a change handler; handlers run in registration order
    pub fn subscribe(&self, observer: impl DraftObserver + 'static) -> ObserverId {
        self.shared.observers.subscribe(observer)
    }

    /// Remove a change handler by the id returned from `subscribe`
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.shared.observers.unsubscribe(id)
    }

    // === Operations ===

    /// Insert `text` at `offset`, then look for a mention query ending at the insertion
    pub fn insert_text(&self, offset: usize, text: &str) -> DraftResult<()> {
        let len = text.chars().count();
        let generation = self.mutate(|state| {
            state.insert_text(offset, text)?;
            Ok(DraftChange::TextInserted { offset, len })
        })?;

        self.start_search(offset + len, generation);
        Ok(())
    }

    /// Remove `length` characters at `offset`
    pub fn remove_text(&self, offset: usize, length: usize) -> DraftResult<()> {
        self.mutate(|state| {
            state.remove_text(offset, length)?;
            Ok(DraftChange::TextRemoved { offset, len: length })
        })?;
        Ok(())
    }

    /// Attach a mention to existing text
    pub fn add_mention(
        &self,
        offset: usize,
        length: usize,
        target: MentionTarget,
    ) -> DraftResult<()> {
        self.mutate(|state| {
            state.add_mention(offset, length, target)?;
            let range = TextRange::new(offset, length);
            Ok(DraftChange::MentionAdded { range })
        })?;
        Ok(())
    }

    /// Remove the mention at `index` (offset order), keeping its text
    pub fn remove_mention_at(&self, index: usize) -> DraftResult<()> {
        self.mutate(|state| {
            state.remove_mention_at(index)?;
            Ok(DraftChange::MentionRemoved { index })
        })?;
        Ok(())
    }

    /// Replace the suggestion's source text with `replacement_text` and mention it
    pub fn insert_suggested_mention(
        &self,
        suggestion: &SuggestedMention,
        replacement_text: &str,
    ) -> DraftResult<()> {
        self.mutate(|state| {
            let range = state.apply_suggestion(suggestion, replacement_text)?;
            Ok(DraftChange::SuggestionApplied { range })
        })?;
        Ok(())
    }

    /// Insert a suggestion using its own replacement text
    pub fn accept_suggestion(&self, suggestion: &SuggestedMention) -> DraftResult<()> {
        self.insert_suggested_mention(suggestion, &suggestion.replacement_text)
    }

    /// Replace the whole text; every span is dropped
    pub fn update(&self, full_text: &str) -> DraftResult<()> {
        self.mutate(|state| {
            state.replace_all(full_text)?;
            Ok(DraftChange::Replaced)
        })?;
        Ok(())
    }

    /// Hand the composed message to the transport collaborator.
    ///
    /// On success the draft is consumed and rejects further mutations.
    /// On failure it stays editable so the caller can retry.
    #[instrument(skip(self), fields(draft_id = %self.shared.id))]
    pub async fn send(&self) -> DraftResult<SendOutcome> {
        let payload = {
            let inner = self.shared.inner.lock();
            if inner.status == DraftStatus::Sent {
                return Err(DraftError::Consumed);
            }
            MessagePayload::compose(self.shared.id, &inner.state)
        };

        if payload.is_empty() {
            return Ok(SendOutcome::failed("message is empty"));
        }

        let outcome = send_outcome_from(self.shared.transport.send(&payload).await);
        match &outcome {
            SendOutcome::Sent => {
                let mut inner = self.shared.inner.lock();
                inner.supersede_search();
                inner.status = DraftStatus::Sent;
                info!(spans = payload.spans.len(), "Draft sent");
            }
            SendOutcome::Failed { reason } => {
                warn!(reason = %reason, "Draft send failed");
            }
        }
        Ok(outcome)
    }

    // === Internals ===

    /// Apply `op` atomically, supersede any pending search and notify.
    /// Returns the new generation.
    fn mutate(
        &self,
        op: impl FnOnce(&mut DraftState) -> DraftResult<DraftChange>,
    ) -> DraftResult<u64> {
        let (update, generation) = {
            let mut inner = self.shared.inner.lock();
            let previous = inner.status;
            if previous == DraftStatus::Sent {
                return Err(DraftError::Consumed);
            }

            // Transient: cleared before the lock is released
            inner.status = DraftStatus::Editing;
            let change = match op(&mut inner.state) {
                Ok(change) => change,
                Err(err) => {
                    inner.status = previous;
                    debug!(draft_id = %self.shared.id, error = %err, "Draft operation rejected");
                    return Err(err);
                }
            };

            inner.supersede_search();
            inner.status = DraftStatus::Idle;
            debug!(
                draft_id = %self.shared.id,
                change = change.event_name(),
                len = inner.state.buffer().len(),
                spans = inner.state.spans().len(),
                "Draft updated"
            );

            let update = DraftUpdate {
                draft_id: self.shared.id,
                change,
                elements: inner.state.elements(),
                suggestions: Vec::new(),
            };
            (update, inner.generation)
        };

        self.shared.observers.notify(&update);
        Ok(generation)
    }

    /// Scan for a mention query at `edit_offset` and resolve it in the background
    fn start_search(&self, edit_offset: usize, generation: u64) {
        let mut inner = self.shared.inner.lock();
        // An observer may already have re-entered and edited again
        if inner.generation != generation {
            return;
        }
        let Some(pending) = self.shared.resolver.scan(&inner.state, edit_offset) else {
            return;
        };
        let Ok(runtime) = Handle::try_current() else {
            warn!(draft_id = %self.shared.id, "No async runtime; skipping mention search");
            return;
        };

        let resolver = self.shared.resolver.clone();
        let weak: Weak<DraftShared> = Arc::downgrade(&self.shared);
        inner.status = DraftStatus::SearchPending;
        inner.search_task = Some(runtime.spawn(async move {
            let suggestions = resolver.resolve(&pending).await;
            if let Some(shared) = weak.upgrade() {
                Draft { shared }.finish_search(generation, suggestions);
            }
        }));
    }

    /// Deliver search results if no mutation happened since the search started
    fn finish_search(&self, generation: u64, suggestions: Vec<SuggestedMention>) {
        let update = {
            let mut inner = self.shared.inner.lock();
            if inner.generation != generation {
                debug!(draft_id = %self.shared.id, "Discarding stale search result");
                return;
            }
            inner.search_task = None;
            inner.status = DraftStatus::Idle;
            if suggestions.is_empty() {
                return;
            }

            DraftUpdate {
                draft_id: self.shared.id,
                change: DraftChange::SuggestionsResolved {
                    count: suggestions.len(),
                },
                elements: inner.state.elements(),
                suggestions,
            }
        };

        self.shared.observers.notify(&update);
    }
}

impl std::fmt::Debug for Draft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.shared.inner.lock();
        f.debug_struct("Draft")
            .field("id", &self.shared.id)
            .field("status", &inner.status)
            .field("text", &inner.state.text())
            .field("spans", &inner.state.spans().len())
            .finish()
    }
}
