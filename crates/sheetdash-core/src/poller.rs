//! Polling controller
//!
//! Drives fetch → parse cycles on a fixed interval and pauses while the
//! dashboard is hidden.
//!
//! Each timer tick spawns its cycle as a separate task, so `stop()` never
//! cancels a fetch already in flight. A fetch that completes after `stop()`
//! still lands in the dashboard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sheetdash_config::PollingConfig;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::dashboard::Dashboard;
use crate::error::{CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::source::SourceRef;

/// Timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollerState {
    Idle,
    Polling,
}

/// Result of a single refresh cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum CycleOutcome {
    /// Record set replaced
    Updated { records: usize },
    /// Fetch failed, previous state kept
    Failed { message: String },
    /// Another cycle was already running
    Skipped,
}

/// Runs one cycle at a time against the shared dashboard
pub struct CycleRunner {
    source: SourceRef,
    dashboard: Arc<RwLock<Dashboard>>,
    in_flight: AtomicBool,
    logger: DefaultErrorLogger,
}

/// Clears the in-flight flag when the cycle ends, even if it is cancelled
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CycleRunner {
    pub fn new(source: SourceRef, dashboard: Arc<RwLock<Dashboard>>) -> Self {
        Self {
            source,
            dashboard,
            in_flight: AtomicBool::new(false),
            logger: DefaultErrorLogger,
        }
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Fetch, parse and apply. Fetching happens outside the dashboard lock.
    pub async fn run_cycle(&self) -> CycleOutcome {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            log::debug!(target: "sheetdash::poller", "Cycle already in flight, skipping");
            return CycleOutcome::Skipped;
        }
        let _guard = InFlightGuard(&self.in_flight);

        self.dashboard.write().await.begin_sync();

        let result = self.source.fetch_rows().await;

        let mut dashboard = self.dashboard.write().await;
        match result {
            Ok(rows) => {
                let records = dashboard.apply_rows(&rows);
                log::debug!(target: "sheetdash::poller", "Cycle loaded {} records", records);
                CycleOutcome::Updated { records }
            }
            Err(error) => self.report_failure(&mut dashboard, error),
        }
    }

    /// Log the error and move the dashboard to `Failed`, keeping its records
    fn report_failure(&self, dashboard: &mut Dashboard, error: CoreError) -> CycleOutcome {
        let context = ErrorContext::new("refresh_cycle")
            .with_data("source", serde_json::json!(self.source.describe()));
        self.logger.log_error(&error, &context);
        dashboard.record_failure(&error);
        CycleOutcome::Failed {
            message: error.to_string(),
        }
    }
}

/// Interval timer plus visibility handling
pub struct Poller {
    runner: Arc<CycleRunner>,
    interval: Duration,
    pause_when_hidden: bool,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Poller {
    pub fn new(source: SourceRef, dashboard: Arc<RwLock<Dashboard>>, config: &PollingConfig) -> Self {
        Self {
            runner: Arc::new(CycleRunner::new(source, dashboard)),
            interval: config.interval(),
            pause_when_hidden: config.pause_when_hidden,
            timer: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> PollerState {
        let timer = self.timer.lock().unwrap_or_else(|e| e.into_inner());
        if timer.is_some() {
            PollerState::Polling
        } else {
            PollerState::Idle
        }
    }

    pub fn is_polling(&self) -> bool {
        self.state() == PollerState::Polling
    }

    /// Start the recurring timer, replacing any existing one.
    ///
    /// The first cycle runs one full interval after this call.
    pub fn start(&self) {
        let mut timer = self.timer.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = timer.take() {
            handle.abort();
        }

        let runner = self.runner.clone();
        let period = self.interval;

        *timer = Some(tokio::spawn(async move {
            let mut ticker = interval(period);

            // First tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let runner = runner.clone();
                tokio::spawn(async move {
                    runner.run_cycle().await;
                });
            }
        }));

        log::info!(
            target: "sheetdash::poller",
            "Auto-refresh started: every {}s",
            period.as_secs()
        );
    }

    /// Cancel the timer. No-op when idle.
    pub fn stop(&self) {
        let mut timer = self.timer.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = timer.take() {
            handle.abort();
            log::info!(target: "sheetdash::poller", "Auto-refresh stopped");
        }
    }

    /// One immediate cycle outside the timer.
    ///
    /// The cycle runs as its own task, so dropping the caller (a client
    /// hanging up on `/api/refresh`) does not leave the dashboard in
    /// `Syncing`.
    pub async fn refresh_now(&self) -> CycleOutcome {
        let runner = self.runner.clone();
        match tokio::spawn(async move { runner.run_cycle().await }).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let error = CoreError::InternalError {
                    message: format!("Refresh task failed: {}", e),
                };
                let mut dashboard = self.runner.dashboard.write().await;
                self.runner.report_failure(&mut dashboard, error)
            }
        }
    }

    /// Page visibility changed.
    ///
    /// Hidden stops the timer. Visible restarts it and runs one immediate
    /// cycle, whose outcome is returned. Ignored when `pause_when_hidden` is
    /// off.
    pub async fn set_visible(&self, visible: bool) -> Option<CycleOutcome> {
        if !self.pause_when_hidden {
            log::debug!(target: "sheetdash::poller", "Visibility change ignored (visible={})", visible);
            return None;
        }

        if visible {
            self.start();
            Some(self.refresh_now().await)
        } else {
            self.stop();
            None
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        let timer = self.timer.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = timer.take() {
            handle.abort();
        }
    }
}
