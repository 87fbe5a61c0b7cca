//! KPI projection through the fixed metric table.

use std::collections::BTreeMap;

use agentwatch_adapters::payload::KpiPayload;
use agentwatch_types::KpiEntry;

/// Metric ids shown on the dashboard and their display names.
pub const KPI_METRICS: [(u64, &str); 9] = [
    (7398, "SLA % - Call"),
    (7412, "AHT - Call"),
    (11587, "ASA - Call"),
    (7416, "Volume - Call"),
    (7396, "In SLA - Call"),
    (7402, "Abandoned - Call"),
    (11235, "Unavailable Time"),
    (11245, "Unresponsive Time"),
    (134099, "Missed Calls"),
];

/// Display name for a known metric id.
pub fn metric_name(metric_id: u64) -> Option<&'static str> {
    KPI_METRICS
        .iter()
        .find(|(id, _)| *id == metric_id)
        .map(|(_, name)| *name)
}

/// Keep the known metrics, keyed by id. Unknown ids are dropped.
pub fn project_kpis(raw: &KpiPayload) -> BTreeMap<u64, KpiEntry> {
    raw.metrics
        .iter()
        .filter_map(|metric| {
            let metric_id = metric.metric_id()?;
            let name = metric_name(metric_id)?;
            Some((
                metric_id,
                KpiEntry {
                    metric_id,
                    name: name.to_string(),
                    value: metric.value(),
                    display: metric.display(),
                },
            ))
        })
        .collect()
}
