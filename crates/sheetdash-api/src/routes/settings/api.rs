//! Settings API endpoints - JSON API

use crate::AppState;
use axum::Json;
use sheetdash_config::Config;

/// Effective configuration with the API key masked
pub async fn api_settings(state: axum::extract::State<AppState>) -> Json<Config> {
    Json(state.config.redacted())
}
