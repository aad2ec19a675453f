//! Shared orchestration context
//!
//! The active locale, the history store, and the notification channel are
//! shared by all three orchestrators. They are passed into each
//! orchestrator's constructor explicitly so the orchestrators stay
//! independently testable; there are no ambient globals.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;

use pharma_assist_core::Language;

use crate::events::Notification;
use crate::history::HistoryStore;

/// Active display/spoken locale, shared by reference
#[derive(Clone, Default)]
pub struct LocaleState {
    inner: Arc<RwLock<Language>>,
}

impl LocaleState {
    /// Create with an initial locale
    pub fn new(language: Language) -> Self {
        Self {
            inner: Arc::new(RwLock::new(language)),
        }
    }

    /// Current locale
    pub fn get(&self) -> Language {
        *self.inner.read()
    }

    /// Switch the active locale
    pub fn set(&self, language: Language) {
        *self.inner.write() = language;
    }
}

/// Context handed to every orchestrator constructor
#[derive(Clone)]
pub struct AssistContext {
    /// Active locale
    pub locale: LocaleState,
    /// Bounded query history
    pub history: Arc<HistoryStore>,
    /// Transient notification channel
    events: broadcast::Sender<Notification>,
}

impl AssistContext {
    /// Create a context around a history store
    pub fn new(locale: Language, history: Arc<HistoryStore>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            locale: LocaleState::new(locale),
            history,
            events,
        }
    }

    /// Subscribe to transient notifications
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.events.subscribe()
    }

    /// Broadcast a notification; dropped silently when nobody listens
    pub fn notify(&self, notification: Notification) {
        let _ = self.events.send(notification);
    }
}
