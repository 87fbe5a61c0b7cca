//! The refresh loop: fetch, classify, project, publish.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use agentwatch_adapters::payload::{
    decode, AgentCounterPayload, KpiPayload, QueueCounterPayload, RosterPayload,
};
use agentwatch_adapters::{FetchError, ReportingSource};
use agentwatch_types::{
    current_timestamp_ms, Snapshot, Source, SourceStatus, ThresholdSet, SCHEMA_VERSION,
};
use serde_json::Value;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::classify::{classify, Classification};
use crate::handle::DashboardHandle;
use crate::kpi::project_kpis;
use crate::project::{project_counters, project_queue};
use crate::registry::ThresholdRegistry;
use crate::state::SharedState;

/// Default time between cycles.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Drives refresh cycles and owns the published snapshot.
///
/// The loop has two states. While no credential is set it is idle and
/// fetches nothing. Once a credential is accepted it runs a cycle
/// immediately, then waits one interval after each cycle finishes before
/// starting the next, until the credential is cleared.
/// A failing source degrades only its own part of the snapshot:
///
/// - roster: every agent list and the alert list are empty
/// - queue / agent counters: the previous summary is kept as is
/// - KPI metrics: the KPI set is emptied
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use agentwatch_adapters::ReportingClient;
/// use agentwatch_engine::Refresher;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ReportingClient::builder().build()?;
///     let refresher = Refresher::builder(Arc::new(client))
///         .interval(Duration::from_secs(10))
///         .build();
///
///     let handle = refresher.handle();
///     let task = refresher.start();
///
///     handle.submit_credential("access-token").await?;
///     let mut updates = handle.subscribe();
///     updates.changed().await?;
///     println!("{} alerts", updates.borrow().alerts.len());
///
///     task.shutdown().await;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Refresher {
    inner: Arc<Inner>,
    interval: Duration,
}

#[derive(Debug)]
struct Inner {
    state: Arc<SharedState>,
    source: Arc<dyn ReportingSource>,
    /// Serializes cycles so the loop and `refresh_now` never publish concurrently.
    cycle_lock: Mutex<()>,
}

impl Refresher {
    /// Create a builder around a reporting source.
    pub fn builder(source: Arc<dyn ReportingSource>) -> RefresherBuilder {
        RefresherBuilder::new(source)
    }

    /// A handle for credentials, thresholds and snapshot reads.
    pub fn handle(&self) -> DashboardHandle {
        DashboardHandle {
            state: self.inner.state.clone(),
            source: self.inner.source.clone(),
        }
    }

    /// The configured interval between cycles.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one cycle now.
    ///
    /// Returns the published snapshot, or `None` when idle.
    pub async fn refresh_now(&self) -> Option<Arc<Snapshot>> {
        self.inner.run_cycle().await
    }

    /// Start the refresh loop on the current tokio runtime.
    ///
    /// Returns a handle that can be used to stop the loop.
    pub fn start(&self) -> RefreshTask {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let inner = self.inner.clone();
        let interval = self.interval;

        let join = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        inner.run_cycle().await;
                        // A full interval of rest after every cycle, however long it took.
                        timer.reset();
                    }
                    _ = inner.state.activated.notified() => {
                        timer.reset_immediately();
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!("refresh loop stopped");
        });

        RefreshTask { stop_tx, join }
    }
}

impl Inner {
    async fn run_cycle(&self) -> Option<Arc<Snapshot>> {
        let _cycle = self.cycle_lock.lock().await;

        let credential = self.state.credential()?;
        let thresholds = self.state.thresholds.snapshot();

        let source = &self.source;
        let (roster, queue, counters, kpi_config, kpis) = tokio::join!(
            source.fetch(Source::Roster, &credential),
            source.fetch(Source::QueueCounter, &credential),
            source.fetch(Source::AgentCounter, &credential),
            source.fetch(Source::KpiConfig, &credential),
            source.fetch(Source::KpiData, &credential),
        );

        let fetched = Fetched {
            roster,
            queue,
            counters,
            kpi_config,
            kpis,
        };
        let previous = self.state.snapshot();
        let snapshot = build_snapshot(&previous, fetched, &thresholds, current_timestamp_ms());

        debug!(
            cycle = snapshot.cycle,
            alerts = snapshot.alerts.len(),
            aux = snapshot.aux_agents.len(),
            chat = snapshot.chat_agents.len(),
            available = snapshot.available_agents.len(),
            on_call = snapshot.on_call_agents.len(),
            kpis = snapshot.kpis.len(),
            "publishing snapshot"
        );
        Some(self.state.publish(snapshot))
    }
}

/// Raw results of one round of fetches.
struct Fetched {
    roster: Result<Value, FetchError>,
    queue: Result<Value, FetchError>,
    counters: Result<Value, FetchError>,
    kpi_config: Result<Value, FetchError>,
    kpis: Result<Value, FetchError>,
}

// Assemble the next snapshot from one round of fetches. Only the queue and
// counter summaries carry over from `previous` when their fetch fails.
fn build_snapshot(
    previous: &Snapshot,
    fetched: Fetched,
    thresholds: &ThresholdSet,
    now_ms: u64,
) -> Snapshot {
    let mut sources = BTreeMap::new();

    let roster = settle::<RosterPayload>(&mut sources, Source::Roster, fetched.roster);
    let queue = settle::<QueueCounterPayload>(&mut sources, Source::QueueCounter, fetched.queue);
    let counters =
        settle::<AgentCounterPayload>(&mut sources, Source::AgentCounter, fetched.counters);
    let _ = settle::<Value>(&mut sources, Source::KpiConfig, fetched.kpi_config);
    let kpis = settle::<KpiPayload>(&mut sources, Source::KpiData, fetched.kpis);

    let Classification {
        alerts,
        aux_agents,
        chat_agents,
        available_agents,
        on_call_agents,
    } = roster
        .map(|roster| classify(&roster.rows, thresholds))
        .unwrap_or_default();

    let queue = queue
        .map(|raw| project_queue(&raw, now_ms))
        .unwrap_or_else(|| previous.queue.clone());
    let counters = counters
        .map(|raw| project_counters(&raw, now_ms))
        .unwrap_or_else(|| previous.counters.clone());
    let kpis = kpis.map(|raw| project_kpis(&raw)).unwrap_or_default();

    Snapshot {
        schema_version: SCHEMA_VERSION,
        cycle: previous.cycle + 1,
        timestamp_ms: now_ms,
        alerts,
        aux_agents,
        chat_agents,
        available_agents,
        on_call_agents,
        has_queue_calls: queue.has_calls(),
        queue,
        counters,
        kpis,
        sources,
    }
}

// Decode a fetch result, record the source's status, and log failures.
fn settle<T: serde::de::DeserializeOwned>(
    sources: &mut BTreeMap<Source, SourceStatus>,
    source: Source,
    result: Result<Value, FetchError>,
) -> Option<T> {
    match result.and_then(decode::<T>) {
        Ok(payload) => {
            sources.insert(source, SourceStatus::Ok);
            Some(payload)
        }
        Err(e) => {
            warn!(source = %source, kind = ?e.kind(), error = %e, "fetch failed");
            sources.insert(
                source,
                SourceStatus::Failed {
                    cause: e.to_string(),
                },
            );
            None
        }
    }
}

/// Builder for configuring a Refresher.
#[derive(Debug)]
pub struct RefresherBuilder {
    source: Arc<dyn ReportingSource>,
    interval: Option<Duration>,
    thresholds: Option<ThresholdSet>,
}

impl RefresherBuilder {
    /// Create a new builder.
    pub fn new(source: Arc<dyn ReportingSource>) -> Self {
        Self {
            source,
            interval: None,
            thresholds: None,
        }
    }

    /// Set the time between cycles.
    ///
    /// Defaults to 10 seconds if not specified.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Start with these thresholds instead of the defaults.
    pub fn thresholds(mut self, thresholds: ThresholdSet) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    /// Build the refresher.
    pub fn build(self) -> Refresher {
        let registry = ThresholdRegistry::new(self.thresholds.unwrap_or_default());
        Refresher {
            inner: Arc::new(Inner {
                state: Arc::new(SharedState::new(registry)),
                source: self.source,
                cycle_lock: Mutex::new(()),
            }),
            interval: self.interval.unwrap_or(DEFAULT_INTERVAL),
        }
    }
}

/// Handle for controlling the background refresh loop.
///
/// Drop this handle to stop the loop, or call `stop()` explicitly.
#[derive(Debug)]
pub struct RefreshTask {
    stop_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl RefreshTask {
    /// Signal the loop to stop after any cycle in progress.
    pub fn stop(self) {
        let _ = self.stop_tx.send(true);
    }

    /// Signal the loop to stop and wait for it to finish.
    pub async fn shutdown(self) {
        let _ = self.stop_tx.send(true);
        let _ = self.join.await;
    }
}
