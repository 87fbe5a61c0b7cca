//! Queue, agent-counter and KPI projections.

/// Queue counters for display.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueSummary {
    pub contacts_in_queue: u64,
    /// Longest current wait, `HH:MM:SS`.
    pub longest_wait: String,
    pub callbacks_in_queue: u64,
    pub total_agents: u64,
    /// Unix timestamp in milliseconds when this summary was projected.
    pub last_update_ms: u64,
}

impl QueueSummary {
    /// An all-zero summary stamped with the given time.
    pub fn empty(last_update_ms: u64) -> Self {
        Self {
            contacts_in_queue: 0,
            longest_wait: "00:00:00".to_string(),
            callbacks_in_queue: 0,
            total_agents: 0,
            last_update_ms,
        }
    }

    /// True when at least one contact is waiting.
    pub fn has_calls(&self) -> bool {
        self.contacts_in_queue > 0
    }
}

/// Agent counts by activity, for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentCounterSummary {
    pub total: u64,
    pub available: u64,
    pub unavailable: u64,
    pub inbound: u64,
    pub outbound: u64,
    pub acw: u64,
    pub waiting: u64,
    pub preview: u64,
    pub dialer: u64,
    /// Unix timestamp in milliseconds when this summary was projected.
    pub last_update_ms: u64,
}

impl AgentCounterSummary {
    /// An all-zero summary stamped with the given time.
    pub fn empty(last_update_ms: u64) -> Self {
        Self {
            last_update_ms,
            ..Self::default()
        }
    }
}

/// One known KPI metric.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KpiEntry {
    pub metric_id: u64,
    /// Name from the fixed metric table.
    pub name: String,
    /// Numeric value for today, if the backend sent one.
    pub value: Option<f64>,
    /// Backend-formatted value for today, e.g. "87.5%".
    pub display: Option<String>,
}
