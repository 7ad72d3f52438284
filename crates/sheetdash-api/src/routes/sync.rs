//! Sync routes
//!
//! Provides API endpoints for refresh status, manual refresh and the page
//! visibility signal that pauses polling.

use crate::{ApiError, ApiResult, AppState};
use axum::extract::Query;
use axum::Json;
use sheetdash_core::CycleOutcome;
use std::collections::HashMap;

/// Sync status, last update time and poller state (JSON API)
pub async fn api_status(state: axum::extract::State<AppState>) -> Json<serde_json::Value> {
    let dashboard = state.dashboard.read().await;
    let status = dashboard.status();

    Json(serde_json::json!({
        "status": status,
        "label": status.label(),
        "last_updated": dashboard.last_updated(),
        "last_error": dashboard.last_error(),
        "has_data": dashboard.has_data(),
        "records": dashboard.records().len(),
        "polling": state.poller.state(),
        "interval_secs": state.poller.interval().as_secs(),
        "view_version": state.cache.version(),
    }))
}

/// Run one refresh cycle now (JSON API)
pub async fn api_refresh(state: axum::extract::State<AppState>) -> ApiResult<Json<CycleOutcome>> {
    match state.poller.refresh_now().await {
        CycleOutcome::Failed { message } => Err(ApiError::Upstream { message }),
        outcome => Ok(Json(outcome)),
    }
}

/// Page visibility changed (POST, `visible=true|false`)
pub async fn api_visibility(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> ApiResult<Json<serde_json::Value>> {
    let visible: bool = params
        .get("visible")
        .ok_or_else(|| ApiError::bad_request("Missing 'visible' parameter"))?
        .parse()
        .map_err(|_| ApiError::bad_request("'visible' must be true or false"))?;

    let outcome = state.poller.set_visible(visible).await;

    Ok(Json(serde_json::json!({
        "visible": visible,
        "polling": state.poller.state(),
        "outcome": outcome,
    })))
}
