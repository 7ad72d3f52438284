//! HTTP dashboard server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::dashboard: Dashboard page, content partial, transaction detail
//! - routes::filter: Type and category filter actions
//! - routes::sync: Sync status, manual refresh, page visibility
//! - routes::settings: Configuration display

pub mod cache;
pub mod error;
pub mod routes;

#[cfg(test)]
mod tests;

use axum::{
    routing::{get, post},
    Router,
};
use sheetdash_config::Config;
use sheetdash_core::{Dashboard, Poller};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

pub use cache::ViewCache;
pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<RwLock<Dashboard>>,
    pub poller: Arc<Poller>,
    pub config: Config,
    pub cache: Arc<ViewCache>,
}

impl AppState {
    /// Build the state and register the view cache with the dashboard
    pub async fn new(dashboard: Arc<RwLock<Dashboard>>, poller: Arc<Poller>, config: Config) -> Self {
        let cache = Arc::new(ViewCache::new());
        dashboard.write().await.subscribe(cache.clone());

        Self {
            dashboard,
            poller,
            config,
            cache,
        }
    }

    /// Latest view, computed from the dashboard when nothing is cached yet
    pub async fn current_view(&self) -> sheetdash_core::DashboardView {
        match self.cache.latest() {
            Some(view) => view,
            None => self.dashboard.read().await.view(),
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dashboard::{
        api_analytics, api_categories, api_transaction, api_transactions, htmx_dashboard_content,
        htmx_transaction_detail, page_dashboard,
    };
    use routes::filter::{
        api_filter, api_set_category_filter, api_set_type_filter, htmx_filter_category,
        htmx_filter_clear, htmx_filter_type,
    };
    use routes::settings::{api_settings, page_settings};
    use routes::sync::{api_refresh, api_status, api_visibility};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/analytics", get(api_analytics))
        .route("/api/categories", get(api_categories))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions/:index", get(api_transaction))
        .route("/api/status", get(api_status))
        .route("/api/filter", get(api_filter))
        .route("/api/filter/type", post(api_set_type_filter))
        .route("/api/filter/category", post(api_set_category_filter))
        .route("/api/refresh", post(api_refresh))
        .route("/api/visibility", post(api_visibility))
        .route("/api/settings", get(api_settings))
        // HTMX page routes
        .route("/", get(page_dashboard))
        .route("/settings", get(page_settings))
        // HTMX partial routes
        .route("/dashboard/content", get(htmx_dashboard_content))
        .route("/transactions/:index/detail", get(htmx_transaction_detail))
        .route("/filter/type", post(htmx_filter_type))
        .route("/filter/category", post(htmx_filter_category))
        .route("/filter/clear", post(htmx_filter_clear))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
    <script>
    // Pause auto-refresh while the tab is hidden
    document.addEventListener('visibilitychange', () => {{
        const visible = !document.hidden;
        fetch('/api/visibility?visible=' + visible, {{method: 'POST'}})
            .then(() => {{ if (visible) htmx.trigger(document.body, 'dashboard-refresh'); }})
            .catch(e => console.error('Visibility update failed:', e));
    }});
    document.addEventListener('keydown', (e) => {{
        if (e.key === 'Escape') closeTransactionModal();
    }});
    function closeTransactionModal() {{
        const modal = document.getElementById('transaction-modal');
        if (modal) modal.remove();
        document.body.style.overflow = '';
    }}
    function refreshNow() {{
        fetch('/api/refresh', {{method: 'POST'}})
            .finally(() => htmx.trigger(document.body, 'dashboard-refresh'));
    }}
    </script>
</body>
</html>"#,
        sheetdash_utils::escape_html(title),
        content
    )
}

/// Top navigation bar
pub fn nav_bar(title: &str, current_path: &str) -> String {
    let links = [("/", "Dashboard"), ("/settings", "Settings")];

    let mut nav = format!(
        "<nav class='bg-white border-b'><div class='max-w-6xl mx-auto px-4 py-3 flex items-center gap-6'><h1 class='text-xl font-bold text-indigo-600'>{}</h1><ul class='flex gap-2'>",
        sheetdash_utils::escape_html(title)
    );

    for (path, label) in &links {
        let active_class = if *path == current_path {
            "bg-indigo-50 text-indigo-600"
        } else {
            "text-gray-600 hover:bg-gray-50"
        };
        nav.push_str(&format!(
            "<li><a href='{}' class='px-3 py-2 rounded-lg {}'>{}</a></li>",
            path, active_class, label
        ));
    }
    nav.push_str("</ul></div></nav>");
    nav
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
///
/// `app_title` names the dashboard in the nav bar; `page_title` is appended
/// to the document title when it differs.
pub fn page_response(
    headers: &axum::http::HeaderMap,
    app_title: &str,
    page_title: &str,
    current_path: &str,
    inner_content: &str,
) -> String {
    if is_htmx_request(headers) {
        return format!("<main class='max-w-6xl mx-auto p-6'>{}</main>", inner_content);
    }

    let document_title = if page_title == app_title {
        app_title.to_string()
    } else {
        format!("{} - {}", page_title, app_title)
    };

    base_html(
        &document_title,
        &format!(
            "{}<main class='max-w-6xl mx-auto p-6'>{}</main>",
            nav_bar(app_title, current_path),
            inner_content
        ),
    )
}

/// Start the HTTP server
///
/// Serves until Ctrl-C. The poller's timer is stopped on shutdown.
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.bind_address();
    let poller = state.poller.clone();
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting sheetdash server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Dashboard)");
    log::info!("  - /settings (Configuration)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.stop();
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
