//! sheetdash main entry point

use anyhow::Context;
use clap::Parser;
use sheetdash_api::{start_server, AppState};
use sheetdash_config::Config;
use sheetdash_core::{CycleOutcome, Dashboard, LogSink, Poller, SheetsSource};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "sheetdash")]
#[command(version = "0.1.0")]
#[command(about = "A live income and expense dashboard backed by a Google Sheets range", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration file and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = Config::load(args.config.clone())
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!(
        "Config loaded: range={}, refresh every {}s",
        config.source.range,
        config.polling.interval_secs
    );

    let rt = Runtime::new()?;
    rt.block_on(run(config))
}

async fn run(config: Config) -> anyhow::Result<()> {
    let source = Arc::new(SheetsSource::new(&config.source).context("Failed to create data source")?);

    let dashboard = Arc::new(RwLock::new(Dashboard::new()));
    dashboard.write().await.subscribe(Arc::new(LogSink::new()));

    let poller = Arc::new(Poller::new(source, dashboard.clone(), &config.polling));

    // Auto-refresh only starts once the first load succeeds
    log::info!("Loading initial data...");
    match poller.refresh_now().await {
        CycleOutcome::Updated { records } => {
            log::info!("Initial load complete: {} transactions", records);
            poller.start();
        }
        CycleOutcome::Failed { message } => {
            log::error!("Initial load failed: {}", message);
            log::warn!("Auto-refresh stays off until the dashboard page reports it is visible");
        }
        CycleOutcome::Skipped => {}
    }

    let state = AppState::new(dashboard, poller, config).await;
    start_server(state).await
}
