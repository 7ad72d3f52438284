//! Dashboard routes - Summary cards, categories and transactions

pub mod api;
pub mod page;

pub use api::{api_analytics, api_categories, api_transaction, api_transactions, htmx_dashboard_content, htmx_transaction_detail};
pub use page::page_dashboard;
