//! Process-wide state shared by the refresh loop and its readers.

use std::sync::Arc;

use agentwatch_types::{Credential, Snapshot};
use parking_lot::RwLock;
use tokio::sync::{watch, Notify};

use crate::registry::ThresholdRegistry;

/// Credential, thresholds and the published snapshot.
///
/// The refresh loop is the only writer of the snapshot. Publishing swaps
/// one `Arc<Snapshot>` inside a watch channel, so a reader holds either the
/// previous snapshot or the new one, never a mix.
#[derive(Debug)]
pub(crate) struct SharedState {
    credential: RwLock<Option<Credential>>,
    pub(crate) thresholds: ThresholdRegistry,
    published: watch::Sender<Arc<Snapshot>>,
    /// Signalled when a credential is accepted, to start a cycle right away.
    pub(crate) activated: Notify,
}

impl SharedState {
    pub(crate) fn new(thresholds: ThresholdRegistry) -> Self {
        let (published, _) = watch::channel(Arc::new(Snapshot::new()));
        Self {
            credential: RwLock::new(None),
            thresholds,
            published,
            activated: Notify::new(),
        }
    }

    pub(crate) fn credential(&self) -> Option<Credential> {
        self.credential.read().clone()
    }

    pub(crate) fn set_credential(&self, credential: Credential) {
        *self.credential.write() = Some(credential);
        self.activated.notify_waiters();
    }

    pub(crate) fn clear_credential(&self) -> bool {
        self.credential.write().take().is_some()
    }

    /// The latest published snapshot.
    pub(crate) fn snapshot(&self) -> Arc<Snapshot> {
        self.published.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.published.subscribe()
    }

    pub(crate) fn publish(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        self.published.send_replace(snapshot.clone());
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle_with_empty_snapshot() {
        let state = SharedState::new(ThresholdRegistry::default());
        assert!(state.credential().is_none());
        assert_eq!(state.snapshot().cycle, 0);
    }

    #[test]
    fn test_credential_last_write_wins() {
        let state = SharedState::new(ThresholdRegistry::default());
        state.set_credential(Credential::new("first").unwrap());
        state.set_credential(Credential::new("second").unwrap());
        assert_eq!(state.credential().unwrap().expose(), "second");

        assert!(state.clear_credential());
        assert!(!state.clear_credential());
        assert!(state.credential().is_none());
    }

    #[test]
    fn test_publish_swaps_whole_snapshot() {
        let state = SharedState::new(ThresholdRegistry::default());
        let before = state.snapshot();

        let mut next = Snapshot::initial(42);
        next.cycle = 1;
        state.publish(next);

        // The old reference is untouched.
        assert_eq!(before.cycle, 0);
        assert_eq!(state.snapshot().cycle, 1);
        assert_eq!(state.snapshot().timestamp_ms, 42);
    }

    #[tokio::test]
    async fn test_subscribers_see_publish() {
        let state = SharedState::new(ThresholdRegistry::default());
        let mut rx = state.subscribe();

        let mut next = Snapshot::initial(0);
        next.cycle = 7;
        state.publish(next);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().cycle, 7);
    }
}
