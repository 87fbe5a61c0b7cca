//! Plain-text rendering of published snapshots for the log.

use agentwatch_types::{Snapshot, Source, SourceStatus};

/// One-line status for a snapshot.
///
/// `cycle 3 | queue 2 (longest 00:01:10, callbacks 1) | available 4 | on call 6 | chat 1 | aux 3 | alerts 2`
pub fn summary_line(snapshot: &Snapshot) -> String {
    let queue = &snapshot.queue;
    format!(
        "cycle {} | queue {} (longest {}, callbacks {}) | available {} | on call {} | chat {} | aux {} | alerts {}",
        snapshot.cycle,
        queue.contacts_in_queue,
        queue.longest_wait,
        queue.callbacks_in_queue,
        snapshot.available_agents.len(),
        snapshot.on_call_agents.len(),
        snapshot.chat_agents.len(),
        snapshot.aux_agents.len(),
        snapshot.alerts.len(),
    )
}

/// One line per alert kind: `Over Break: ann (00:20:00), bob (00:16:10)`.
pub fn alert_lines(snapshot: &Snapshot) -> Vec<String> {
    snapshot
        .alerts_by_kind()
        .into_iter()
        .map(|(kind, alerts)| {
            let agents: Vec<String> = alerts
                .iter()
                .map(|alert| format!("{} ({})", alert.agent_name, alert.duration))
                .collect();
            format!("{}: {}", kind, agents.join(", "))
        })
        .collect()
}

/// Sources whose latest fetch failed, with the cause.
pub fn failed_sources(snapshot: &Snapshot) -> Vec<(Source, &str)> {
    snapshot
        .sources
        .iter()
        .filter_map(|(source, status)| match status {
            SourceStatus::Failed { cause } => Some((*source, cause.as_str())),
            _ => None,
        })
        .collect()
}
