//! Snapshot - the published, display-ready view of one refresh cycle.

use std::collections::BTreeMap;
use std::fmt;

use crate::{
    AgentCounterSummary, AgentRecord, AlertKind, AlertRecord, KpiEntry, QueueSummary,
    SCHEMA_VERSION,
};

/// The five backend data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Source {
    /// Current state of every agent.
    Roster,
    /// Contacts and callbacks waiting.
    QueueCounter,
    /// Agent counts by activity.
    AgentCounter,
    /// Dashboard layout for the KPI view.
    KpiConfig,
    /// Today's KPI metric values.
    KpiData,
}

impl Source {
    /// All sources in fetch order.
    pub const ALL: [Source; 5] = [
        Source::Roster,
        Source::QueueCounter,
        Source::AgentCounter,
        Source::KpiConfig,
        Source::KpiData,
    ];

    /// Short name for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Source::Roster => "roster",
            Source::QueueCounter => "queue_counter",
            Source::AgentCounter => "agent_counter",
            Source::KpiConfig => "kpi_config",
            Source::KpiData => "kpi_data",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of the most recent fetch of one source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum SourceStatus {
    /// Not fetched yet.
    #[default]
    Pending,
    Ok,
    Failed {
        cause: String,
    },
}

impl SourceStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, SourceStatus::Ok)
    }
}

/// The display-ready aggregate of one refresh cycle.
///
/// Snapshots are immutable once published. Every list is in roster order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// [`SCHEMA_VERSION`] of the code that produced this snapshot.
    pub schema_version: u32,

    /// Number of the refresh cycle that produced this snapshot; 0 before the first.
    pub cycle: u64,

    /// Unix timestamp in milliseconds when this snapshot was published.
    pub timestamp_ms: u64,

    pub alerts: Vec<AlertRecord>,
    pub aux_agents: Vec<AgentRecord>,
    pub chat_agents: Vec<AgentRecord>,
    pub available_agents: Vec<AgentRecord>,
    pub on_call_agents: Vec<AgentRecord>,

    pub queue: QueueSummary,
    pub counters: AgentCounterSummary,

    /// Known KPI metrics, keyed by metric id.
    pub kpis: BTreeMap<u64, KpiEntry>,

    pub has_queue_calls: bool,

    /// Fetch outcome per source for this cycle.
    pub sources: BTreeMap<Source, SourceStatus>,
}

impl Snapshot {
    /// The snapshot visible before any cycle has run.
    pub fn new() -> Self {
        Self::initial(current_timestamp_ms())
    }

    /// An empty snapshot with summaries stamped at `timestamp_ms`.
    pub fn initial(timestamp_ms: u64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            cycle: 0,
            timestamp_ms,
            alerts: Vec::new(),
            aux_agents: Vec::new(),
            chat_agents: Vec::new(),
            available_agents: Vec::new(),
            on_call_agents: Vec::new(),
            queue: QueueSummary::empty(timestamp_ms),
            counters: AgentCounterSummary::empty(timestamp_ms),
            kpis: BTreeMap::new(),
            has_queue_calls: false,
            sources: Source::ALL
                .into_iter()
                .map(|source| (source, SourceStatus::Pending))
                .collect(),
        }
    }

    /// Alerts grouped by kind, kinds in first-seen order.
    pub fn alerts_by_kind(&self) -> Vec<(AlertKind, Vec<&AlertRecord>)> {
        let mut groups: Vec<(AlertKind, Vec<&AlertRecord>)> = Vec::new();
        for alert in &self.alerts {
            match groups.iter_mut().find(|(kind, _)| *kind == alert.kind) {
                Some((_, members)) => members.push(alert),
                None => groups.push((alert.kind, vec![alert])),
            }
        }
        groups
    }

    /// Auxiliary agents grouped by state, states in first-seen order.
    pub fn aux_by_state(&self) -> Vec<(&str, Vec<&AgentRecord>)> {
        let mut groups: Vec<(&str, Vec<&AgentRecord>)> = Vec::new();
        for agent in &self.aux_agents {
            match groups
                .iter_mut()
                .find(|(state, _)| *state == agent.state.as_str())
            {
                Some((_, members)) => members.push(agent),
                None => groups.push((agent.state.as_str(), vec![agent])),
            }
        }
        groups
    }

    /// Compact status for polling clients.
    pub fn summary(&self) -> StatusSummary {
        StatusSummary {
            queue: self.queue.clone(),
            counters: self.counters.clone(),
            has_queue_calls: self.has_queue_calls,
            alert_count: self.alerts.len(),
            timestamp_ms: self.timestamp_ms,
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Compact status derived from a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSummary {
    pub queue: QueueSummary,
    pub counters: AgentCounterSummary,
    pub has_queue_calls: bool,
    pub alert_count: usize,
    pub timestamp_ms: u64,
}

/// Get current timestamp in milliseconds since Unix epoch.
pub fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
