//! Scripted reporting source for engine tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use agentwatch_adapters::{FetchError, ReportingSource};
use agentwatch_types::{Credential, Source};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::time::Instant;

/// Returns whatever was last scripted for each source.
#[derive(Debug, Default)]
pub(crate) struct ScriptedSource {
    responses: Mutex<BTreeMap<Source, Result<Value, FetchError>>>,
    calls: Mutex<BTreeMap<Source, usize>>,
    started: Mutex<Vec<(Source, Instant)>>,
    delay: Mutex<Duration>,
    total: AtomicUsize,
}

impl ScriptedSource {
    /// A backend where every source answers with an empty payload.
    pub(crate) fn healthy() -> Self {
        let source = Self::default();
        source.set(Source::Roster, Ok(roster(&[])));
        source.set(Source::QueueCounter, Ok(json!({})));
        source.set(Source::AgentCounter, Ok(json!({})));
        source.set(Source::KpiConfig, Ok(json!({})));
        source.set(Source::KpiData, Ok(json!({ "Metrics": [] })));
        source
    }

    pub(crate) fn set(&self, source: Source, response: Result<Value, FetchError>) {
        self.responses.lock().insert(source, response);
    }

    pub(crate) fn calls(&self, source: Source) -> usize {
        self.calls.lock().get(&source).copied().unwrap_or(0)
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    /// Make every later fetch take `delay` before answering.
    pub(crate) fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = delay;
    }

    /// When each fetch of `source` started.
    pub(crate) fn started(&self, source: Source) -> Vec<Instant> {
        self.started
            .lock()
            .iter()
            .filter(|(s, _)| *s == source)
            .map(|(_, at)| *at)
            .collect()
    }
}

#[async_trait]
impl ReportingSource for ScriptedSource {
    async fn fetch(&self, source: Source, _credential: &Credential) -> Result<Value, FetchError> {
        *self.calls.lock().entry(source).or_insert(0) += 1;
        self.started.lock().push((source, Instant::now()));
        self.total.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .lock()
            .get(&source)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Connection("not scripted".to_string())))
    }
}

/// Build a roster `data` value from `(name, state, duration)` rows.
pub(crate) fn roster(rows: &[(&str, &str, &str)]) -> Value {
    let rows: Vec<Value> = rows
        .iter()
        .map(|(name, state, duration)| {
            json!({
                "Group": { "groupName": name },
                "State": { "DisplayState": state },
                "Duration": duration,
                "StartTime": "08:00 AM"
            })
        })
        .collect();
    json!({ "RowValues": rows })
}
