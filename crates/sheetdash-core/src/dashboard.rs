//! Dashboard coordinator
//!
//! Owns the record set, the filter state and the sync status, and pushes a
//! fresh [`DashboardView`] to every registered sink after each change.

use std::sync::{Arc, Mutex};

use chrono::Local;
use sheetdash_parser::{parse_rows, TransactionRecord};

use crate::analytics::calculate_analytics;
use crate::category::category_breakdown;
use crate::error::{CoreError, ErrorDetails};
use crate::filter::{visible_records, FilterState, TypeFilter};
use crate::models::{AnalyticsSummary, CategorySummary, DashboardView, SyncStatus};

/// Receives a snapshot after every state change
pub trait RenderSink: Send + Sync {
    fn render(&self, view: &DashboardView);
}

/// Render sink reference type
pub type SinkRef = Arc<dyn RenderSink>;

/// Shared dashboard state
pub struct Dashboard {
    records: Vec<TransactionRecord>,
    filter: FilterState,
    status: SyncStatus,
    last_updated: Option<chrono::DateTime<Local>>,
    last_error: Option<ErrorDetails>,
    has_data: bool,
    sinks: Vec<SinkRef>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            filter: FilterState::default(),
            status: SyncStatus::Idle,
            last_updated: None,
            last_error: None,
            has_data: false,
            sinks: Vec::new(),
        }
    }

    /// Register a sink. It is rendered immediately with the current view.
    pub fn subscribe(&mut self, sink: SinkRef) {
        sink.render(&self.view());
        self.sinks.push(sink);
    }

    // ==================== Accessors ====================

    /// Records in parse order (oldest first)
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    pub fn last_updated(&self) -> Option<chrono::DateTime<Local>> {
        self.last_updated
    }

    pub fn last_error(&self) -> Option<&ErrorDetails> {
        self.last_error.as_ref()
    }

    pub fn has_data(&self) -> bool {
        self.has_data
    }

    pub fn analytics(&self) -> AnalyticsSummary {
        calculate_analytics(&self.records)
    }

    pub fn categories(&self) -> Vec<CategorySummary> {
        category_breakdown(&self.records)
    }

    pub fn visible_records(&self) -> Vec<TransactionRecord> {
        visible_records(&self.records, &self.filter)
    }

    /// Record at `index` in the current visible list
    pub fn record_detail(&self, index: usize) -> Option<TransactionRecord> {
        self.records
            .iter()
            .rev()
            .filter(|r| self.filter.matches(r))
            .nth(index)
            .cloned()
    }

    pub fn view(&self) -> DashboardView {
        DashboardView {
            analytics: self.analytics(),
            categories: self.categories(),
            visible: self.visible_records(),
            filter: self.filter.clone(),
            status: self.status.clone(),
            last_updated: self.last_updated,
            has_data: self.has_data,
        }
    }

    // ==================== Sync lifecycle ====================

    /// Mark a refresh cycle as started
    pub fn begin_sync(&mut self) {
        self.status = SyncStatus::Syncing;
        self.notify();
    }

    /// Replace the record set with freshly fetched rows.
    ///
    /// Returns the number of records loaded. The filter state is kept.
    pub fn apply_rows(&mut self, rows: &[Vec<String>]) -> usize {
        self.records = parse_rows(rows);
        self.status = SyncStatus::Synced;
        self.last_updated = Some(Local::now());
        self.last_error = None;
        self.has_data = true;
        self.notify();
        self.records.len()
    }

    /// Record a failed cycle. Records and filter state stay as they were.
    pub fn record_failure(&mut self, error: &CoreError) {
        self.status = SyncStatus::Failed {
            message: error.to_string(),
        };
        self.last_error = Some(error.to_details());
        self.notify();
    }

    // ==================== Filter operations ====================

    pub fn set_type_filter(&mut self, kind: TypeFilter) {
        self.filter.set_type_filter(kind);
        self.notify();
    }

    pub fn toggle_type_filter(&mut self, kind: TypeFilter) {
        self.filter.toggle_type_filter(kind);
        self.notify();
    }

    pub fn set_category_filter(&mut self, name: Option<&str>) {
        self.filter.set_category_filter(name);
        self.notify();
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.notify();
    }

    fn notify(&self) {
        if self.sinks.is_empty() {
            return;
        }
        let view = self.view();
        for sink in &self.sinks {
            sink.render(&view);
        }
    }
}

/// Logs sync status transitions
#[derive(Default)]
pub struct LogSink {
    last_status: Mutex<Option<SyncStatus>>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSink for LogSink {
    fn render(&self, view: &DashboardView) {
        let mut last = self.last_status.lock().unwrap_or_else(|e| e.into_inner());
        if last.as_ref() == Some(&view.status) {
            return;
        }

        match &view.status {
            SyncStatus::Failed { message } => {
                log::warn!(target: "sheetdash::dashboard", "Sync failed: {}", message)
            }
            SyncStatus::Synced => log::info!(
                target: "sheetdash::dashboard",
                "Synced {} transactions ({} shown)",
                view.analytics.total_transactions,
                view.visible.len()
            ),
            other => log::debug!(target: "sheetdash::dashboard", "Status: {}", other),
        }

        *last = Some(view.status.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collects every rendered view
    #[derive(Default)]
    struct RecordingSink {
        views: Mutex<Vec<DashboardView>>,
    }

    impl RecordingSink {
        fn count(&self) -> usize {
            self.views.lock().unwrap().len()
        }

        fn last(&self) -> DashboardView {
            self.views.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl RenderSink for RecordingSink {
        fn render(&self, view: &DashboardView) {
            self.views.lock().unwrap().push(view.clone());
        }
    }

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["2024-06-01", "", "Card", "Food", "50", "Lunch"],
            vec!["2024-06-02", "Salary", "", "", "1000", "June"],
        ]
        .into_iter()
        .map(|r| r.into_iter().map(String::from).collect())
        .collect()
    }

    #[test]
    fn test_new_dashboard_is_idle_and_empty() {
        let dashboard = Dashboard::new();
        let view = dashboard.view();

        assert_eq!(view.status, SyncStatus::Idle);
        assert!(!view.has_data);
        assert!(view.visible.is_empty());
        assert_eq!(view.analytics, AnalyticsSummary::default());
        assert!(view.last_updated_label().is_none());
    }

    #[test]
    fn test_apply_rows_updates_view() {
        let mut dashboard = Dashboard::new();
        let loaded = dashboard.apply_rows(&rows());

        assert_eq!(loaded, 2);
        let view = dashboard.view();
        assert_eq!(view.status, SyncStatus::Synced);
        assert!(view.has_data);
        assert!(view.last_updated.is_some());
        assert_eq!(view.analytics.balance, 950.0);
        assert_eq!(view.categories.len(), 1);
        assert_eq!(view.visible[0].date_time, "2024-06-02");
    }

    #[test]
    fn test_failure_keeps_records_and_filter() {
        let mut dashboard = Dashboard::new();
        dashboard.apply_rows(&rows());
        dashboard.set_category_filter(Some("Food"));

        dashboard.record_failure(&CoreError::Fetch {
            message: "HTTP error! status: 500".to_string(),
        });

        assert_eq!(dashboard.records().len(), 2);
        assert_eq!(dashboard.filter_state().category_filter.as_deref(), Some("Food"));
        assert!(dashboard.status().is_failed());
        assert!(dashboard.has_data());
        assert!(dashboard.last_error().is_some());
        assert_eq!(dashboard.visible_records().len(), 1);
    }

    #[test]
    fn test_success_clears_last_error() {
        let mut dashboard = Dashboard::new();
        dashboard.record_failure(&CoreError::EmptyData);
        dashboard.apply_rows(&rows());

        assert!(dashboard.last_error().is_none());
        assert_eq!(dashboard.status(), &SyncStatus::Synced);
    }

    #[test]
    fn test_filter_survives_reload() {
        let mut dashboard = Dashboard::new();
        dashboard.apply_rows(&rows());
        dashboard.set_type_filter(TypeFilter::Income);
        dashboard.apply_rows(&rows());

        assert_eq!(dashboard.filter_state().type_filter, TypeFilter::Income);
        assert_eq!(dashboard.visible_records().len(), 1);
    }

    #[test]
    fn test_sinks_notified_on_every_change() {
        let sink = Arc::new(RecordingSink::default());
        let mut dashboard = Dashboard::new();
        dashboard.subscribe(sink.clone());
        assert_eq!(sink.count(), 1);

        dashboard.begin_sync();
        assert_eq!(sink.last().status, SyncStatus::Syncing);

        dashboard.apply_rows(&rows());
        dashboard.toggle_type_filter(TypeFilter::Expense);
        assert_eq!(sink.last().visible.len(), 1);

        dashboard.set_category_filter(Some("Food"));
        dashboard.clear_filters();
        dashboard.record_failure(&CoreError::EmptyData);

        assert_eq!(sink.count(), 7);
        assert!(sink.last().status.is_failed());
    }

    #[test]
    fn test_record_detail_indexes_visible_list() {
        let mut dashboard = Dashboard::new();
        dashboard.apply_rows(&rows());

        assert_eq!(dashboard.record_detail(0).unwrap().purpose, "June");
        assert_eq!(dashboard.record_detail(1).unwrap().purpose, "Lunch");
        assert!(dashboard.record_detail(2).is_none());

        dashboard.set_type_filter(TypeFilter::Expense);
        assert_eq!(dashboard.record_detail(0).unwrap().purpose, "Lunch");
        assert!(dashboard.record_detail(1).is_none());
    }

    #[test]
    fn test_log_sink_tolerates_repeated_status() {
        let sink = LogSink::new();
        let mut dashboard = Dashboard::new();
        dashboard.apply_rows(&rows());
        let view = dashboard.view();

        sink.render(&view);
        sink.render(&view);
        assert_eq!(*sink.last_status.lock().unwrap(), Some(SyncStatus::Synced));
    }
}
