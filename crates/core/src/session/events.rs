//! Session notifications for observers, backed by a `tokio::sync::broadcast` channel.

use tokio::sync::broadcast;

use crate::types::{Project, SessionStatus};

/// Something observers should refresh for.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A (re)load produced a new project tree.
    ProjectLoaded(Project),
    ProjectUnloaded,
    StatusChanged(SessionStatus),
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Fan-out of [`SessionEvent`]s to any number of subscribers.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped silently when nobody listens.
    pub fn publish(&self, event: SessionEvent) {
        tracing::trace!("Session event: {:?}", event);
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
