use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use agentwatch::{report, Settings};
use agentwatch_engine::Refresher;
use agentwatch_types::Snapshot;

#[derive(Parser, Debug)]
#[command(name = "agentwatch")]
#[command(about = "Live agent, queue and alert monitor for a contact-center reporting backend")]
struct Args {
    /// Access token for the reporting backend
    #[arg(short, long, env = "AGENTWATCH_TOKEN", hide_env_values = true)]
    token: String,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refresh interval in seconds (overrides the settings file)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Run a single refresh, write the snapshot as JSON to this file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(secs) = args.interval {
        if secs == 0 {
            bail!("--interval must be at least 1 second");
        }
        settings.refresh_interval_secs = secs;
    }

    let client = settings.client()?;
    info!(base_url = %client.base_url(), "using reporting backend");

    let refresher = Refresher::builder(Arc::new(client))
        .interval(settings.refresh_interval())
        .build();
    let handle = refresher.handle();

    let overrides = settings.threshold_updates();
    if !overrides.is_empty() {
        handle
            .set_thresholds(overrides)
            .context("invalid thresholds in settings")?;
    }

    handle
        .submit_credential(&args.token)
        .await
        .context("access token rejected")?;

    match args.export {
        Some(path) => export_once(&refresher, &path).await,
        None => monitor(&refresher).await,
    }
}

/// Refresh on the interval and log every published snapshot until Ctrl-C.
async fn monitor(refresher: &Refresher) -> Result<()> {
    let handle = refresher.handle();
    let mut updates = handle.subscribe();
    let task = refresher.start();

    info!(
        interval_secs = refresher.interval().as_secs(),
        "monitoring, press Ctrl-C to stop"
    );

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                log_snapshot(&snapshot);
            }
            _ = &mut shutdown => {
                info!("shutting down");
                break;
            }
        }
    }

    handle.clear_credential();
    task.shutdown().await;
    Ok(())
}

fn log_snapshot(snapshot: &Snapshot) {
    info!("{}", report::summary_line(snapshot));
    for line in report::alert_lines(snapshot) {
        warn!("alert: {}", line);
    }
    for (source, cause) in report::failed_sources(snapshot) {
        warn!(source = %source, "source unavailable: {}", cause);
    }
}

/// Run one refresh cycle and write the resulting snapshot as pretty JSON.
async fn export_once(refresher: &Refresher, path: &Path) -> Result<()> {
    let snapshot = refresher
        .refresh_now()
        .await
        .ok_or_else(|| anyhow!("no active credential"))?;
    log_snapshot(&snapshot);

    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), snapshot.as_ref())?;

    info!(path = %path.display(), "exported snapshot");
    Ok(())
}
