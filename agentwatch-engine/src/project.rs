//! Queue and agent-counter projections.
//!
//! Straight renames with zero (or `"00:00:00"`) for missing fields, stamped
//! with the projection time.

use agentwatch_adapters::payload::{AgentCounterPayload, QueueCounterPayload};
use agentwatch_types::{AgentCounterSummary, QueueSummary};

/// Project raw queue counters into a display summary.
pub fn project_queue(raw: &QueueCounterPayload, now_ms: u64) -> QueueSummary {
    QueueSummary {
        contacts_in_queue: raw.both_in_queue.unwrap_or(0),
        longest_wait: raw
            .longest_queue_time_both
            .clone()
            .unwrap_or_else(|| "00:00:00".to_string()),
        callbacks_in_queue: raw.callbacks_in_queue.unwrap_or(0),
        total_agents: raw.total_agents.unwrap_or(0),
        last_update_ms: now_ms,
    }
}

/// Project raw agent counters into a display summary.
pub fn project_counters(raw: &AgentCounterPayload, now_ms: u64) -> AgentCounterSummary {
    AgentCounterSummary {
        total: raw.total.unwrap_or(0),
        available: raw.available.unwrap_or(0),
        unavailable: raw.unavailable.unwrap_or(0),
        inbound: raw.inbound.unwrap_or(0),
        outbound: raw.outbound.unwrap_or(0),
        acw: raw.acw.unwrap_or(0),
        waiting: raw.waiting.unwrap_or(0),
        preview: raw.preview.unwrap_or(0),
        dialer: raw.dialer.unwrap_or(0),
        last_update_ms: now_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentwatch_adapters::payload::decode;
    use serde_json::json;

    #[test]
    fn test_project_queue() {
        let raw: QueueCounterPayload = decode(json!({
            "BothInQueue": 3,
            "LongestQueueTimeBoth": "00:04:10",
            "CallbacksInQueue": 1,
            "TotalAgents": 25
        }))
        .unwrap();

        let summary = project_queue(&raw, 1_000);
        assert_eq!(summary.contacts_in_queue, 3);
        assert_eq!(summary.longest_wait, "00:04:10");
        assert_eq!(summary.callbacks_in_queue, 1);
        assert_eq!(summary.total_agents, 25);
        assert_eq!(summary.last_update_ms, 1_000);
        assert!(summary.has_calls());
    }

    #[test]
    fn test_project_queue_defaults() {
        let summary = project_queue(&QueueCounterPayload::default(), 7);
        assert_eq!(summary, QueueSummary::empty(7));
        assert!(!summary.has_calls());
    }

    #[test]
    fn test_project_counters() {
        let raw: AgentCounterPayload = decode(json!({
            "Total": 30, "Available": 8, "Unavailable": 4, "Inbound": 10,
            "Outbound": 2, "Acw": 3, "Waiting": 1, "Preview": 0
        }))
        .unwrap();

        let summary = project_counters(&raw, 9);
        assert_eq!(summary.total, 30);
        assert_eq!(summary.available, 8);
        assert_eq!(summary.unavailable, 4);
        assert_eq!(summary.inbound, 10);
        assert_eq!(summary.outbound, 2);
        assert_eq!(summary.acw, 3);
        assert_eq!(summary.waiting, 1);
        assert_eq!(summary.preview, 0);
        assert_eq!(summary.dialer, 0);
        assert_eq!(summary.last_update_ms, 9);
    }
}
