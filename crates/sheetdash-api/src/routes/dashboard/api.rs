//! Dashboard API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_analytics: Income, expense and balance totals (JSON)
//! - api_categories: Expense breakdown by category (JSON)
//! - api_transactions: Filtered transactions, newest first (JSON)
//! - api_transaction: One visible transaction by index (JSON)
//! - htmx_dashboard_content: Dashboard content (HTML fragment)
//! - htmx_transaction_detail: Transaction detail modal (HTML fragment)

use crate::{ApiError, ApiResult, AppState};
use axum::Json;
use sheetdash_core::{AnalyticsSummary, CategorySummary, FilterState, TransactionRecord};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionRecord>,
    pub total_count: usize,
    pub filter: FilterState,
}

pub async fn api_analytics(state: axum::extract::State<AppState>) -> Json<AnalyticsSummary> {
    Json(state.current_view().await.analytics)
}

pub async fn api_categories(state: axum::extract::State<AppState>) -> Json<Vec<CategorySummary>> {
    Json(state.current_view().await.categories)
}

/// Visible transactions under the current filter
pub async fn api_transactions(state: axum::extract::State<AppState>) -> Json<TransactionsResponse> {
    let view = state.current_view().await;
    Json(TransactionsResponse {
        total_count: view.visible.len(),
        transactions: view.visible,
        filter: view.filter,
    })
}

pub async fn api_transaction(
    state: axum::extract::State<AppState>,
    path: axum::extract::Path<usize>,
) -> ApiResult<Json<TransactionRecord>> {
    let dashboard = state.dashboard.read().await;
    dashboard
        .record_detail(path.0)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound {
            resource: format!("transaction {}", path.0),
        })
}

/// HTMX: Dashboard content - polled by the page and swapped after filter actions
pub async fn htmx_dashboard_content(state: axum::extract::State<AppState>) -> axum::response::Html<String> {
    let view = state.current_view().await;
    axum::response::Html(super::page::render_content(&view, &state.config))
}

/// HTMX: Transaction detail modal, indexed into the visible list
pub async fn htmx_transaction_detail(
    state: axum::extract::State<AppState>,
    path: axum::extract::Path<usize>,
) -> axum::response::Html<String> {
    let dashboard = state.dashboard.read().await;

    match dashboard.record_detail(path.0) {
        Some(record) => axum::response::Html(super::page::render_transaction_detail(&record, &state.config)),
        None => axum::response::Html(
            r#"<div id='transaction-modal' class='fixed inset-0 bg-black bg-opacity-50 z-50 flex items-center justify-center' onclick='closeTransactionModal()'>
    <div class='bg-red-50 border border-red-200 rounded-lg p-6 text-center'>
        <h3 class='text-lg font-medium text-red-800 mb-2'>Transaction not found</h3>
        <button onclick='closeTransactionModal()' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Close</button>
    </div>
</div>"#
                .to_string(),
        ),
    }
}
