//! Observable wrapper around session history.
//!
//! Mutations go straight to the [`Browser`]; subscribers are told about
//! them on the next [`HistoryStore::flush`], once per batch.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::browser::{Browser, HistoryState};
use super::url::Location;

type Listener = Arc<dyn Fn() + Send + Sync>;
type Listeners = Mutex<Vec<(u64, Listener)>>;

/// Current location and entry state.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot {
    pub location: Location,
    pub state: Option<HistoryState>,
}

/// Handle returned by [`HistoryStore::subscribe`].
#[must_use = "dropping a subscription keeps the listener registered"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.lock().retain(|(id, _)| *id != self.id);
        }
    }
}

pub struct HistoryStore<B> {
    browser: Arc<B>,
    listeners: Arc<Listeners>,
    next_id: AtomicU64,
    pending: AtomicBool,
}

impl<B: Browser> HistoryStore<B> {
    pub fn new(browser: Arc<B>) -> Self {
        Self {
            browser,
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(0),
            pending: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn browser(&self) -> &B {
        &self.browser
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            location: self.browser.location(),
            state: self.browser.history_state(),
        }
    }

    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, Arc::new(listener)));
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Push a new entry. Subscribers are notified on the next flush.
    pub fn push(&self, location: &Location, state: HistoryState) {
        self.browser.push_state(state, location);
        self.pending.store(true, Ordering::Release);
    }

    /// Rewrite the current entry without notifying anyone.
    pub fn replace(&self, location: &Location, state: HistoryState) {
        self.browser.replace_state(state, location);
    }

    /// The browser moved through history on its own (back/forward).
    pub fn pop(&self) {
        self.pending.store(true, Ordering::Release);
    }

    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Notify subscribers of pending changes. Returns whether anyone was due
    /// a notification.
    pub fn flush(&self) -> bool {
        if !self.pending.swap(false, Ordering::AcqRel) {
            return false;
        }
        // Listeners may subscribe or unsubscribe while being called.
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
        true
    }
}
