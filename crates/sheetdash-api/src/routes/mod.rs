//! Route modules for the API server
//!
//! - dashboard: Dashboard page, content partial, analytics JSON
//! - filter: Filter actions (HTMX and JSON)
//! - sync: Sync status, refresh and visibility
//! - settings: Settings page
//!
//! Each module with pages follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints and HTMX partials
//! - page.rs: HTMX page rendering

pub mod dashboard;
pub mod filter;
pub mod settings;
pub mod sync;
