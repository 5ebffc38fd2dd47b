//! Change notification observers
//!
//! An explicit, ordered list of handlers. Handlers run synchronously in
//! registration order and are removed by the id returned at subscription.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use draft_core::DraftUpdate;
use parking_lot::RwLock;

/// Receives a notification after every committed draft operation
pub trait DraftObserver: Send + Sync {
    fn on_draft_updated(&self, update: &DraftUpdate);
}

impl<F> DraftObserver for F
where
    F: Fn(&DraftUpdate) + Send + Sync,
{
    fn on_draft_updated(&self, update: &DraftUpdate) {
        self(update);
    }
}

/// Handle identifying one registered observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Ordered list of draft observers
#[derive(Default)]
pub struct ObserverList {
    next_id: AtomicU64,
    observers: RwLock<Vec<(ObserverId, Arc<dyn DraftObserver>)>>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer at the end of the list
    pub fn subscribe(&self, observer: impl DraftObserver + 'static) -> ObserverId {
        self.subscribe_arc(Arc::new(observer))
    }

    /// Register a shared observer at the end of the list
    pub fn subscribe_arc(&self, observer: Arc<dyn DraftObserver>) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers.write().push((id, observer));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.read().is_empty()
    }

    /// Deliver `update` to every observer in registration order.
    ///
    /// Works on a snapshot, so observers may subscribe or unsubscribe
    /// from inside the callback.
    pub fn notify(&self, update: &DraftUpdate) {
        let snapshot: Vec<Arc<dyn DraftObserver>> = self
            .observers
            .read()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in snapshot {
            observer.on_draft_updated(update);
        }
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("observers", &self.len())
            .finish()
    }
}
