//! Derived dashboard models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::filter::FilterState;
use sheetdash_parser::TransactionRecord;

/// Aggregate totals over the record set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub income: f64,
    pub expenses: f64,
    /// `income - expenses`, may be negative
    pub balance: f64,
    pub total_transactions: usize,
}

impl AnalyticsSummary {
    pub fn is_negative_balance(&self) -> bool {
        self.balance < 0.0
    }
}

/// Per-category expense bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub total: f64,
    pub count: usize,
    /// Share of total expenses, 0 when there are none
    pub percentage: f64,
}

/// Outcome of the most recent refresh cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SyncStatus {
    /// No cycle has run yet
    Idle,
    Syncing,
    Synced,
    Failed { message: String },
}

impl Default for SyncStatus {
    fn default() -> Self {
        SyncStatus::Idle
    }
}

impl SyncStatus {
    /// Status line text
    pub fn label(&self) -> &'static str {
        match self {
            SyncStatus::Idle => "Waiting",
            SyncStatus::Syncing => "Syncing...",
            SyncStatus::Synced => "Synced",
            SyncStatus::Failed { .. } => "Sync failed",
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SyncStatus::Failed { .. })
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncStatus::Failed { message } => write!(f, "{}: {}", self.label(), message),
            _ => write!(f, "{}", self.label()),
        }
    }
}

/// Snapshot handed to render sinks after every state change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub analytics: AnalyticsSummary,
    pub categories: Vec<CategorySummary>,
    /// Filtered records, newest first
    pub visible: Vec<TransactionRecord>,
    pub filter: FilterState,
    pub status: SyncStatus,
    pub last_updated: Option<DateTime<Local>>,
    /// At least one cycle has succeeded
    pub has_data: bool,
}

impl DashboardView {
    /// "Last updated: 09:41 AM", or `None` before the first successful sync
    pub fn last_updated_label(&self) -> Option<String> {
        self.last_updated
            .map(|t| format!("Last updated: {}", t.format("%I:%M %p")))
    }
}
