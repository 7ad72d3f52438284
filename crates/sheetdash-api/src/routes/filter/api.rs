//! Filter endpoints
//!
//! HTMX actions answer with refreshed dashboard content; JSON endpoints
//! answer with the resulting filter state.

use crate::{ApiError, ApiResult, AppState};
use axum::extract::Query;
use axum::response::Html;
use axum::Json;
use sheetdash_core::{FilterState, TypeFilter};
use std::collections::HashMap;

fn type_param(params: &HashMap<String, String>) -> ApiResult<TypeFilter> {
    let kind = params
        .get("kind")
        .ok_or_else(|| ApiError::bad_request("Missing 'kind' parameter"))?;
    kind.parse::<TypeFilter>().map_err(ApiError::bad_request)
}

/// Missing or blank `name` means "no category"
fn category_param(params: &HashMap<String, String>) -> Option<&str> {
    params
        .get("name")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

async fn render_content(state: &AppState) -> Html<String> {
    let view = state.current_view().await;
    Html(crate::routes::dashboard::page::render_content(&view, &state.config))
}

/// HTMX: Stat card click - toggles the type filter
pub async fn htmx_filter_type(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> ApiResult<Html<String>> {
    let kind = type_param(&params)?;
    state.dashboard.write().await.toggle_type_filter(kind);
    Ok(render_content(&state).await)
}

/// HTMX: Category card click - toggles the category filter
pub async fn htmx_filter_category(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Html<String> {
    state
        .dashboard
        .write()
        .await
        .set_category_filter(category_param(&params));
    render_content(&state).await
}

/// HTMX: "Show All"
pub async fn htmx_filter_clear(state: axum::extract::State<AppState>) -> Html<String> {
    state.dashboard.write().await.clear_filters();
    render_content(&state).await
}

/// Current filter state (JSON API)
pub async fn api_filter(state: axum::extract::State<AppState>) -> Json<FilterState> {
    Json(state.dashboard.read().await.filter_state().clone())
}

/// Set the type filter (JSON API). Clears any category filter.
pub async fn api_set_type_filter(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> ApiResult<Json<FilterState>> {
    let kind = type_param(&params)?;
    let mut dashboard = state.dashboard.write().await;
    dashboard.set_type_filter(kind);
    Ok(Json(dashboard.filter_state().clone()))
}

/// Toggle the category filter (JSON API). Resets the type filter.
pub async fn api_set_category_filter(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Json<FilterState> {
    let mut dashboard = state.dashboard.write().await;
    dashboard.set_category_filter(category_param(&params));
    Json(dashboard.filter_state().clone())
}
