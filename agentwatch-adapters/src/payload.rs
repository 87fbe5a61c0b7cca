//! Raw payload shapes returned inside the backend's `data` object.
//!
//! Every field is optional on the wire; accessors apply the defaults the
//! dashboard has always shown for missing values.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::FetchError;

/// Decode a source-specific payload from an envelope's `data` value.
pub fn decode<T: DeserializeOwned>(data: Value) -> Result<T, FetchError> {
    serde_json::from_value(data).map_err(|e| FetchError::Shape(e.to_string()))
}

/// The agent roster.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterPayload {
    #[serde(rename = "RowValues")]
    pub rows: Vec<RosterRow>,
}

/// One agent row in the roster.
///
/// Kept as raw JSON so one oddly typed row never fails the whole roster;
/// accessors fall back to their defaults for anything that is not a string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Value")]
pub struct RosterRow {
    raw: Value,
}

impl From<Value> for RosterRow {
    fn from(raw: Value) -> Self {
        Self { raw }
    }
}

impl RosterRow {
    fn text(&self, path: &[&str]) -> Option<&str> {
        path.iter()
            .try_fold(&self.raw, |value, key| value.get(key))
            .and_then(Value::as_str)
    }

    pub fn name(&self) -> &str {
        self.text(&["Group", "groupName"]).unwrap_or("Unknown")
    }

    pub fn duration(&self) -> &str {
        self.text(&["Duration"]).unwrap_or("00:00:00")
    }

    pub fn state(&self) -> &str {
        self.text(&["State", "DisplayState"]).unwrap_or("Unknown")
    }

    pub fn start_time(&self) -> &str {
        self.text(&["StartTime"]).unwrap_or("Unknown")
    }
}

/// Queue counters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueueCounterPayload {
    #[serde(rename = "BothInQueue", default, deserialize_with = "lenient_count")]
    pub both_in_queue: Option<u64>,
    #[serde(rename = "LongestQueueTimeBoth", default, deserialize_with = "lenient_text")]
    pub longest_queue_time_both: Option<String>,
    #[serde(rename = "CallbacksInQueue", default, deserialize_with = "lenient_count")]
    pub callbacks_in_queue: Option<u64>,
    #[serde(rename = "TotalAgents", default, deserialize_with = "lenient_count")]
    pub total_agents: Option<u64>,
}

/// Agent counts by activity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AgentCounterPayload {
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub available: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub unavailable: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub inbound: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub outbound: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub acw: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub waiting: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub preview: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub dialer: Option<u64>,
}

/// KPI metric review.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KpiPayload {
    #[serde(rename = "Metrics", default)]
    pub metrics: Vec<KpiMetric>,
}

/// One metric in the KPI review, kept as raw JSON like [`RosterRow`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Value")]
pub struct KpiMetric {
    raw: Value,
}

impl From<Value> for KpiMetric {
    fn from(raw: Value) -> Self {
        Self { raw }
    }
}

impl KpiMetric {
    fn today(&self, key: &str) -> Option<&Value> {
        self.raw.get("Today")?.get(key)
    }

    /// Metric id; numeric strings are accepted.
    pub fn metric_id(&self) -> Option<u64> {
        self.raw.get("Metric")?.get("MetricID").and_then(count)
    }

    /// Today's value. Numeric strings are accepted.
    pub fn value(&self) -> Option<f64> {
        match self.today("MetricValue")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Today's backend-formatted value.
    pub fn display(&self) -> Option<String> {
        match self.today("MetricDisplayValue")? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

// A count from a JSON value: non-negative integers, non-negative floats
// (truncated) and numeric strings. Anything else is treated as missing.
fn count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}
