//! Core analytics, filtering and polling for sheetdash
//!
//! The record set lives in a [`Dashboard`] shared as
//! `Arc<tokio::sync::RwLock<Dashboard>>`. A [`Poller`] refreshes it from a
//! [`DataSource`] and every state change is pushed to registered
//! [`RenderSink`]s.

pub mod analytics;
pub mod category;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod models;
pub mod poller;
pub mod source;

pub use analytics::calculate_analytics;
pub use category::category_breakdown;
pub use dashboard::{Dashboard, LogSink, RenderSink, SinkRef};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use filter::{visible_records, FilterState, TypeFilter};
pub use models::{AnalyticsSummary, CategorySummary, DashboardView, SyncStatus};
pub use poller::{CycleOutcome, CycleRunner, Poller, PollerState};
pub use source::{DataSource, SheetsSource, SourceRef};

pub use sheetdash_parser::TransactionRecord;
