//! Per-agent records rebuilt from the roster every cycle.

use crate::AlertKind;

/// One roster row, normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentRecord {
    /// Agent display name.
    pub name: String,
    /// Raw display state, e.g. "Available", "Meal", "On Call".
    pub state: String,
    /// Elapsed time in state as reported (`HH:MM:SS`).
    pub duration: String,
    /// `duration` converted to seconds; zero if it could not be parsed.
    pub duration_secs: u64,
    /// When the agent entered the state, as reported.
    pub start_time: String,
}

/// An agent that has been in a state longer than its threshold allows.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlertRecord {
    pub kind: AlertKind,
    pub agent_name: String,
    /// Elapsed time as reported (`HH:MM:SS`).
    pub duration: String,
    /// Raw display state that triggered the alert.
    pub state: String,
}

impl AlertRecord {
    /// Build an alert for an agent.
    pub fn for_agent(kind: AlertKind, agent: &AgentRecord) -> Self {
        Self {
            kind,
            agent_name: agent.name.clone(),
            duration: agent.duration.clone(),
            state: agent.state.clone(),
        }
    }
}
