//! Server API tests

use super::*;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sheetdash_core::{CoreError, CoreResult, DataSource, PollerState, TypeFilter};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tower::ServiceExt;

fn rows() -> Vec<Vec<String>> {
    vec![
        vec!["2024-06-01 09:00", "", "Card", "Food", "50", "Lunch"],
        vec!["2024-06-02 10:00", "Salary", "", "", "1000", "June"],
        vec!["2024-06-03 18:30", "", "Cash", "Travel", "20", "Bus"],
    ]
    .into_iter()
    .map(|r| r.into_iter().map(String::from).collect())
    .collect()
}

/// Replays queued results, then the sample rows
#[derive(Default)]
struct MockSource {
    results: Mutex<VecDeque<CoreResult<Vec<Vec<String>>>>>,
    fetches: AtomicUsize,
}

impl MockSource {
    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn push(&self, result: CoreResult<Vec<Vec<String>>>) {
        self.results.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl DataSource for MockSource {
    async fn fetch_rows(&self) -> CoreResult<Vec<Vec<String>>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(rows()))
    }
}

async fn setup_test_app(load: bool) -> (AppState, Arc<MockSource>) {
    let source = Arc::new(MockSource::default());
    let config = Config::default();
    let dashboard = Arc::new(RwLock::new(Dashboard::new()));
    let poller = Arc::new(Poller::new(source.clone(), dashboard.clone(), &config.polling));
    let state = AppState::new(dashboard, poller, config).await;

    if load {
        state.poller.refresh_now().await;
    }
    (state, source)
}

async fn send(state: &AppState, method: &str, uri: &str) -> axum::response::Response {
    create_router(state.clone())
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ========== JSON API Tests ==========

#[tokio::test]
async fn test_health() {
    let (state, _) = setup_test_app(false).await;
    let response = send(&state, "GET", "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_text(response).await, "OK");
}

#[tokio::test]
async fn test_analytics_and_categories() {
    let (state, _) = setup_test_app(true).await;

    let json = get_body_json(send(&state, "GET", "/api/analytics").await).await;
    assert_eq!(json["income"], 1000.0);
    assert_eq!(json["expenses"], 70.0);
    assert_eq!(json["balance"], 930.0);
    assert_eq!(json["total_transactions"], 3);

    let json = get_body_json(send(&state, "GET", "/api/categories").await).await;
    let categories = json.as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["name"], "Food");
    assert_eq!(categories[1]["name"], "Travel");
}

#[tokio::test]
async fn test_transactions_newest_first() {
    let (state, _) = setup_test_app(true).await;

    let json = get_body_json(send(&state, "GET", "/api/transactions").await).await;
    assert_eq!(json["total_count"], 3);
    assert_eq!(json["transactions"][0]["purpose"], "Bus");
    assert_eq!(json["transactions"][2]["purpose"], "Lunch");
}

#[tokio::test]
async fn test_single_transaction_lookup() {
    let (state, _) = setup_test_app(true).await;

    let json = get_body_json(send(&state, "GET", "/api/transactions/1").await).await;
    assert_eq!(json["purpose"], "June");

    let response = send(&state, "GET", "/api/transactions/7").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("transaction 7"));
}

#[tokio::test]
async fn test_type_filter_endpoint_mutates_state() {
    let (state, _) = setup_test_app(true).await;

    let response = send(&state, "POST", "/api/filter/type?kind=expense").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["type_filter"], "expense");

    let json = get_body_json(send(&state, "GET", "/api/transactions").await).await;
    assert_eq!(json["total_count"], 2);
    assert_eq!(
        state.dashboard.read().await.filter_state().type_filter,
        TypeFilter::Expense
    );
}

#[tokio::test]
async fn test_type_filter_rejects_unknown_kind() {
    let (state, _) = setup_test_app(true).await;

    let response = send(&state, "POST", "/api/filter/type?kind=transfers").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("transfers"));

    let response = send(&state, "POST", "/api/filter/type").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_category_filter_toggles() {
    let (state, _) = setup_test_app(true).await;
    send(&state, "POST", "/api/filter/type?kind=income").await;

    let json = get_body_json(send(&state, "POST", "/api/filter/category?name=Food").await).await;
    assert_eq!(json["category_filter"], "Food");
    assert_eq!(json["type_filter"], "all");

    let json = get_body_json(send(&state, "GET", "/api/transactions").await).await;
    assert_eq!(json["total_count"], 1);

    let json = get_body_json(send(&state, "POST", "/api/filter/category?name=Food").await).await;
    assert!(json["category_filter"].is_null());

    let json = get_body_json(send(&state, "GET", "/api/filter").await).await;
    assert!(json["category_filter"].is_null());
}

#[tokio::test]
async fn test_status_reports_sync_state() {
    let (state, _) = setup_test_app(true).await;

    let json = get_body_json(send(&state, "GET", "/api/status").await).await;
    assert_eq!(json["status"]["state"], "synced");
    assert_eq!(json["label"], "Synced");
    assert_eq!(json["has_data"], true);
    assert_eq!(json["records"], 3);
    assert_eq!(json["polling"], "idle");
    assert!(json["last_updated"].is_string());
}

#[tokio::test]
async fn test_refresh_success_and_failure() {
    let (state, source) = setup_test_app(true).await;

    let response = send(&state, "POST", "/api/refresh").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["outcome"], "updated");
    assert_eq!(json["records"], 3);

    source.push(Err(CoreError::Fetch {
        message: "HTTP error! status: 429".to_string(),
    }));
    let response = send(&state, "POST", "/api/refresh").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "HTTP error! status: 429");

    // Previous records stay visible
    let json = get_body_json(send(&state, "GET", "/api/analytics").await).await;
    assert_eq!(json["total_transactions"], 3);

    let json = get_body_json(send(&state, "GET", "/api/status").await).await;
    assert_eq!(json["status"]["state"], "failed");
    assert_eq!(json["last_error"]["code"], "FETCH_ERROR");
    assert_eq!(source.fetches(), 3);
}

#[tokio::test]
async fn test_visibility_drives_poller() {
    let (state, source) = setup_test_app(true).await;
    state.poller.start();

    let json = get_body_json(send(&state, "POST", "/api/visibility?visible=false").await).await;
    assert_eq!(json["polling"], "idle");
    assert!(json["outcome"].is_null());
    assert_eq!(state.poller.state(), PollerState::Idle);
    assert_eq!(source.fetches(), 1);

    let json = get_body_json(send(&state, "POST", "/api/visibility?visible=true").await).await;
    assert_eq!(json["polling"], "polling");
    assert_eq!(json["outcome"]["outcome"], "updated");
    assert_eq!(source.fetches(), 2);

    state.poller.stop();
}

#[tokio::test]
async fn test_visibility_rejects_bad_value() {
    let (state, _) = setup_test_app(false).await;

    let response = send(&state, "POST", "/api/visibility?visible=maybe").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_settings_redacts_api_key() {
    let (mut state, _) = setup_test_app(false).await;
    state.config.source.api_key = "super-secret".to_string();

    let response = send(&state, "GET", "/api/settings").await;
    let text = get_body_text(response).await;
    assert!(!text.contains("super-secret"));

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["source"]["api_key"], "********");

    let html = get_body_text(send(&state, "GET", "/settings").await).await;
    assert!(!html.contains("super-secret"));
}

// ========== HTMX Tests ==========

#[tokio::test]
async fn test_dashboard_page_renders() {
    let (state, _) = setup_test_app(true).await;

    let response = send(&state, "GET", "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = get_body_text(response).await;

    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Expense Dashboard"));
    assert!(html.contains("₹1,000.00"));
    assert!(html.contains("/api/visibility"));
}

#[tokio::test]
async fn test_dashboard_page_before_first_load() {
    let (state, _) = setup_test_app(false).await;

    let html = get_body_text(send(&state, "GET", "/dashboard/content").await).await;
    assert!(html.contains("Loading transactions"));
}

#[tokio::test]
async fn test_htmx_filter_type_toggles() {
    let (state, _) = setup_test_app(true).await;

    let html = get_body_text(send(&state, "POST", "/filter/type?kind=income").await).await;
    assert!(html.contains("(Income Only)"));
    assert!(!html.contains("Bus"));

    let html = get_body_text(send(&state, "POST", "/filter/type?kind=income").await).await;
    assert!(!html.contains("(Income Only)"));
    assert!(html.contains("Bus"));
}

#[tokio::test]
async fn test_htmx_filter_category_and_clear() {
    let (state, _) = setup_test_app(true).await;

    let html = get_body_text(send(&state, "POST", "/filter/category?name=Travel").await).await;
    assert!(html.contains("(Travel)"));
    assert!(!html.contains("Lunch"));

    let html = get_body_text(send(&state, "POST", "/filter/clear").await).await;
    assert!(html.contains("Lunch"));
    assert!(html.contains("Bus"));
    assert!(!state.dashboard.read().await.filter_state().is_active());
}

#[tokio::test]
async fn test_transaction_detail() {
    let (state, _) = setup_test_app(true).await;

    let html = get_body_text(send(&state, "GET", "/transactions/0/detail").await).await;
    assert!(html.contains("Transaction Details"));
    assert!(html.contains("Bus"));

    let html = get_body_text(send(&state, "GET", "/transactions/99/detail").await).await;
    assert!(html.contains("Transaction not found"));
}
