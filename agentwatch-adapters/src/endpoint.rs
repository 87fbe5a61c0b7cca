//! Fixed endpoint paths and query parameters of the reporting backend.

use std::collections::BTreeMap;

use agentwatch_types::Source;

/// Default backend host.
pub const DEFAULT_BASE_URL: &str = "https://gnc.adv-reporting.ujet.co";

/// Page the backend expects requests to be referred from.
pub const REFERER_PATH: &str = "/Dashboard/DashboardNew.aspx";

/// Default module path for a source.
pub const fn default_path(source: Source) -> &'static str {
    match source {
        Source::Roster => {
            "/api/v2/dashboards/modules/currentagentstates/4aae9576-e1ab-4b9f-8c6d-ef299e489010"
        }
        Source::QueueCounter => {
            "/api/v2/dashboards/modules/queueCounter/2ed891eb-e620-41f2-bda5-926f5eea3cf5"
        }
        Source::AgentCounter => {
            "/api/v2/dashboards/modules/agentCounterData/51aef3a7-0b9b-4632-8f05-e0056239b40c"
        }
        Source::KpiConfig => "/api/v2/dashboard/689cbd04-9389-4ad7-84fb-6a3ebf0d674f",
        Source::KpiData => {
            "/api/v2/dashboards/modules/metricreview/92ff9406-8be1-4889-9ac5-32201a39b7ae"
        }
    }
}

/// Query parameters the backend expects for a source.
pub const fn query(source: Source) -> &'static [(&'static str, &'static str)] {
    match source {
        Source::Roster => &[
            ("isAutoRefresh", "false"),
            ("isFirstLoad", "true"),
            ("isCxOne", "false"),
            ("useMetrics", "false"),
        ],
        Source::QueueCounter => &[("isAutoRefresh", "true"), ("isFirstLoad", "true")],
        Source::AgentCounter => &[("isAutoRefresh", "false"), ("isFirstLoad", "true")],
        Source::KpiConfig => &[],
        Source::KpiData => &[("isAutoRefresh", "true"), ("isFirstLoad", "false")],
    }
}

/// Module paths for the five sources, with per-source overrides.
#[derive(Debug, Clone, Default)]
pub struct Endpoints {
    overrides: BTreeMap<Source, String>,
}

impl Endpoints {
    /// Override the module path for one source.
    pub fn set(&mut self, source: Source, path: impl Into<String>) {
        self.overrides.insert(source, path.into());
    }

    /// Module path for a source.
    pub fn path(&self, source: Source) -> &str {
        self.overrides
            .get(&source)
            .map(String::as_str)
            .unwrap_or_else(|| default_path(source))
    }

    /// Full URL for a source under `base_url`.
    pub fn url(&self, base_url: &str, source: Source) -> String {
        join(base_url, self.path(source))
    }
}

/// Join a base URL and a path with exactly one slash between them.
pub(crate) fn join(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
