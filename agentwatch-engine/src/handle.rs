//! Handle used by the presentation layer.

use std::sync::Arc;

use agentwatch_adapters::ReportingSource;
use agentwatch_types::{Credential, Snapshot, ThresholdSet};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::{CredentialError, ThresholdError};
use crate::state::SharedState;

/// A cheap, cloneable handle onto the running engine.
///
/// Obtain one from [`Refresher::handle`](crate::Refresher::handle). Every
/// method is safe to call from any task while the refresh loop runs; none of
/// them waits for an in-flight cycle.
///
/// # Example
///
/// ```rust,no_run
/// # async fn demo(handle: agentwatch_engine::DashboardHandle) {
/// handle.submit_credential("access-token").await.unwrap();
///
/// handle.set_thresholds([("Over Break", "20")]).unwrap();
///
/// let snapshot = handle.snapshot();
/// println!("{} agents available", snapshot.available_agents.len());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DashboardHandle {
    pub(crate) state: Arc<SharedState>,
    pub(crate) source: Arc<dyn ReportingSource>,
}

impl DashboardHandle {
    /// Verify a credential against the backend and make it active.
    ///
    /// On rejection the previously active credential, if any, stays in place.
    pub async fn submit_credential(&self, candidate: &str) -> Result<(), CredentialError> {
        let credential = Credential::new(candidate).ok_or(CredentialError::Empty)?;

        if let Err(e) = self.source.verify(&credential).await {
            warn!(error = %e, "credential rejected");
            return Err(CredentialError::Rejected(e));
        }

        self.state.set_credential(credential);
        info!("credential accepted; refresh active");
        Ok(())
    }

    /// Forget the active credential. Cycles already running are not interrupted.
    pub fn clear_credential(&self) {
        if self.state.clear_credential() {
            info!("credential cleared; refresh idle");
        }
    }

    /// True while a credential is set.
    pub fn is_active(&self) -> bool {
        self.state.credential().is_some()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.state.snapshot()
    }

    /// Watch for newly published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.state.subscribe()
    }

    /// A copy of the current thresholds.
    pub fn thresholds(&self) -> ThresholdSet {
        self.state.thresholds.snapshot()
    }

    /// Update some or all thresholds from `label -> minutes` text pairs.
    ///
    /// All-or-nothing: on error nothing changes.
    pub fn set_thresholds<I, K, V>(&self, updates: I) -> Result<ThresholdSet, ThresholdError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.state.thresholds.apply(updates)
    }

    /// Restore the default thresholds.
    pub fn restore_default_thresholds(&self) {
        self.state.thresholds.restore_defaults();
    }
}
