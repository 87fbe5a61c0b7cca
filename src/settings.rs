//! Runtime settings for the monitor.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `AGENTWATCH_*` environment variables (`__` separates nested keys, so
//! `AGENTWATCH_ENDPOINTS__ROSTER` overrides the roster path and
//! `AGENTWATCH_THRESHOLDS__OVER_BREAK=20` sets the break limit).
//!
//! ```toml
//! base_url = "https://reporting.example.com"
//! refresh_interval_secs = 10
//! request_timeout_secs = 15
//!
//! [endpoints]
//! roster = "/api/v2/dashboards/modules/currentagentstates/abc"
//!
//! [thresholds]
//! "Over Break" = 20
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use agentwatch_adapters::endpoint::DEFAULT_BASE_URL;
use agentwatch_adapters::ReportingClient;
use agentwatch_types::{AlertKind, Source};

/// Prefix of the environment variables read by [`Settings::load`].
pub const ENV_PREFIX: &str = "AGENTWATCH";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub endpoints: EndpointPaths,
    /// Startup threshold overrides in minutes, keyed by alert label.
    pub thresholds: BTreeMap<String, u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval_secs: 10,
            request_timeout_secs: 15,
            endpoints: EndpointPaths::default(),
            thresholds: BTreeMap::new(),
        }
    }
}

/// Per-source module path overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EndpointPaths {
    pub roster: Option<String>,
    pub queue_counter: Option<String>,
    pub agent_counter: Option<String>,
    pub kpi_config: Option<String>,
    pub kpi_data: Option<String>,
}

impl EndpointPaths {
    fn get(&self, source: Source) -> Option<&str> {
        match source {
            Source::Roster => self.roster.as_deref(),
            Source::QueueCounter => self.queue_counter.as_deref(),
            Source::AgentCounter => self.agent_counter.as_deref(),
            Source::KpiConfig => self.kpi_config.as_deref(),
            Source::KpiData => self.kpi_data.as_deref(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder
            .build()
            .context("failed to read settings")?
            .try_deserialize()
            .context("invalid settings")?;

        if settings.refresh_interval_secs == 0 {
            bail!("refresh_interval_secs must be at least 1");
        }
        Ok(settings)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Threshold overrides as `label -> minutes` text pairs.
    ///
    /// Keys are matched case-insensitively with `_` standing for a space,
    /// since keys arrive lowercased and environment variables cannot hold
    /// spaces (`AGENTWATCH_THRESHOLDS__OVER_BREAK`). Unknown labels are
    /// passed through unchanged so the registry rejects them.
    pub fn threshold_updates(&self) -> Vec<(String, String)> {
        self.thresholds
            .iter()
            .map(|(key, minutes)| {
                let wanted = key.replace('_', " ");
                let label = AlertKind::ALL
                    .iter()
                    .find(|kind| kind.label().eq_ignore_ascii_case(&wanted))
                    .map(|kind| kind.label().to_string())
                    .unwrap_or_else(|| key.clone());
                (label, minutes.to_string())
            })
            .collect()
    }

    /// Build the reporting client these settings describe.
    pub fn client(&self) -> Result<ReportingClient> {
        let mut builder = ReportingClient::builder()
            .base_url(self.base_url.as_str())
            .timeout(self.request_timeout());

        for source in Source::ALL {
            if let Some(path) = self.endpoints.get(source) {
                builder = builder.endpoint(source, path);
            }
        }

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn settings_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.refresh_interval(), Duration::from_secs(10));
        assert_eq!(settings.request_timeout(), Duration::from_secs(15));
        assert!(settings.threshold_updates().is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let file = settings_file(
            r#"
base_url = "http://localhost:9000"
refresh_interval_secs = 5

[endpoints]
roster = "/roster"

[thresholds]
"Over Break" = 20
"#,
        );

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.base_url, "http://localhost:9000");
        assert_eq!(settings.refresh_interval_secs, 5);
        assert_eq!(settings.request_timeout_secs, 15);
        assert_eq!(settings.endpoints.roster.as_deref(), Some("/roster"));
        assert_eq!(settings.endpoints.kpi_data, None);
        assert_eq!(
            settings.threshold_updates(),
            vec![("Over Break".to_string(), "20".to_string())]
        );
    }

    #[test]
    fn test_zero_interval_rejected() {
        let file = settings_file("refresh_interval_secs = 0\n");
        assert!(Settings::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/agentwatch.toml"))).is_err());
    }

    #[test]
    fn test_threshold_labels_case_insensitive() {
        let mut settings = Settings::default();
        settings.thresholds.insert("over lunch".to_string(), 45);
        settings.thresholds.insert("acw".to_string(), 3);
        settings.thresholds.insert("coffee".to_string(), 1);

        let updates = settings.threshold_updates();
        assert!(updates.contains(&("Over Lunch".to_string(), "45".to_string())));
        assert!(updates.contains(&("ACW".to_string(), "3".to_string())));
        assert!(updates.contains(&("coffee".to_string(), "1".to_string())));
    }

    #[test]
    fn test_threshold_keys_from_environment_style() {
        let mut settings = Settings::default();
        settings.thresholds.insert("over_break".to_string(), 20);
        settings.thresholds.insert("it_issues".to_string(), 5);

        let updates = settings.threshold_updates();
        assert!(updates.contains(&("Over Break".to_string(), "20".to_string())));
        assert!(updates.contains(&("IT Issues".to_string(), "5".to_string())));
    }

    #[test]
    fn test_client_uses_overrides() {
        let mut settings = Settings::default();
        settings.base_url = "http://localhost:9000".to_string();
        let client = settings.client().unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
    }
}
