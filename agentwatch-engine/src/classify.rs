//! Agent classification: alert rules and display buckets.
//!
//! Both rule sets match on the raw display state. Alert rules are tested in
//! table order and the first keyword hit decides the alert kind, whether or
//! not its threshold is exceeded. Bucket membership is decided separately
//! and never looks at the alert outcome.

use agentwatch_adapters::payload::RosterRow;
use agentwatch_types::{parse_hms, AgentRecord, AlertKind, AlertRecord, ThresholdSet};

/// How a duration is compared against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    /// `duration > limit`
    Exceeds,
    /// `duration >= limit`
    Reaches,
}

impl Comparison {
    fn fires(self, duration_secs: u64, limit_secs: u64) -> bool {
        match self {
            Comparison::Exceeds => duration_secs > limit_secs,
            Comparison::Reaches => duration_secs >= limit_secs,
        }
    }
}

/// One alert rule: any keyword contained in the state selects `kind`.
#[derive(Debug, Clone, Copy)]
struct AlertRule {
    keywords: &'static [&'static str],
    kind: AlertKind,
    comparison: Comparison,
}

/// Alert rules in priority order.
const ALERT_RULES: [AlertRule; 8] = [
    AlertRule {
        keywords: &["Meal"],
        kind: AlertKind::OverLunch,
        comparison: Comparison::Exceeds,
    },
    AlertRule {
        keywords: &["Break"],
        kind: AlertKind::OverBreak,
        comparison: Comparison::Exceeds,
    },
    AlertRule {
        keywords: &["Personal"],
        kind: AlertKind::Personal,
        comparison: Comparison::Reaches,
    },
    AlertRule {
        keywords: &["IT"],
        kind: AlertKind::ItIssues,
        comparison: Comparison::Reaches,
    },
    AlertRule {
        keywords: &["In-call", "On Call"],
        kind: AlertKind::LongCall,
        comparison: Comparison::Exceeds,
    },
    AlertRule {
        keywords: &["ACW"],
        kind: AlertKind::Acw,
        comparison: Comparison::Exceeds,
    },
    AlertRule {
        keywords: &["Unresponsive"],
        kind: AlertKind::Unresponsible,
        comparison: Comparison::Exceeds,
    },
    AlertRule {
        keywords: &["Unavailable"],
        kind: AlertKind::Unavailable,
        comparison: Comparison::Exceeds,
    },
];

/// States that are never listed in the auxiliary bucket.
const WORKING_STATES: [&str; 4] = ["Available", "On Call", "Chat", "In-call"];

const ON_CALL_STATES: [&str; 2] = ["On Call", "In-call"];

/// Result of classifying one roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub alerts: Vec<AlertRecord>,
    pub aux_agents: Vec<AgentRecord>,
    pub chat_agents: Vec<AgentRecord>,
    pub available_agents: Vec<AgentRecord>,
    pub on_call_agents: Vec<AgentRecord>,
}

/// Normalize one roster row.
pub fn agent_record(row: &RosterRow) -> AgentRecord {
    AgentRecord {
        name: row.name().to_string(),
        state: row.state().to_string(),
        duration: row.duration().to_string(),
        duration_secs: parse_hms(row.duration()),
        start_time: row.start_time().to_string(),
    }
}

/// The alert an agent triggers, if any.
///
/// The first rule whose keyword appears in the state is the only rule
/// evaluated; a state matching "Meal" can never yield "Over Break".
pub fn evaluate_alert(agent: &AgentRecord, thresholds: &ThresholdSet) -> Option<AlertKind> {
    let rule = ALERT_RULES.iter().find(|rule| {
        rule.keywords
            .iter()
            .any(|keyword| agent.state.contains(keyword))
    })?;

    rule.comparison
        .fires(agent.duration_secs, thresholds.limit_secs(rule.kind))
        .then_some(rule.kind)
}

/// Classify a roster against a threshold set.
///
/// Pure: the same rows and thresholds always give the same lists, in roster
/// order.
pub fn classify(rows: &[RosterRow], thresholds: &ThresholdSet) -> Classification {
    let mut out = Classification::default();

    for row in rows {
        let agent = agent_record(row);

        if let Some(kind) = evaluate_alert(&agent, thresholds) {
            out.alerts.push(AlertRecord::for_agent(kind, &agent));
        }

        if !WORKING_STATES.contains(&agent.state.as_str()) {
            out.aux_agents.push(agent.clone());
        }

        if agent.state.contains("Chat") {
            out.chat_agents.push(agent);
        } else if agent.state == "Available" {
            out.available_agents.push(agent);
        } else if ON_CALL_STATES.contains(&agent.state.as_str()) {
            out.on_call_agents.push(agent);
        }
    }

    out
}
