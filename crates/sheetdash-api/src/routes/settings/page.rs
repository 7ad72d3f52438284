//! Settings page rendering - Full page endpoints

use crate::AppState;
use sheetdash_utils::escape_html;

pub async fn page_settings(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let config = state.config.redacted();

    let api_key = if config.source.api_key.is_empty() {
        "Not set"
    } else {
        config.source.api_key.as_str()
    };

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Settings</h2></div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Server</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>Host</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Port</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Data Source</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>Base URL</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Spreadsheet ID</p><p class='font-medium break-all'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Range</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>API Key</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Timeout</p><p class='font-medium'>{}s</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Auto-Refresh</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>Interval</p><p class='font-medium'>{}s</p></div>
                <div><p class='text-sm text-gray-500'>Pause When Hidden</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Status</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <h3 class='text-lg font-semibold mb-4'>Display</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Currency</p><p class='font-medium'>{} ({} decimals)</p></div>
                <div><p class='text-sm text-gray-500'>Max Rows</p><p class='font-medium'>{}</p></div>
            </div>
        </div>"#,
        escape_html(&config.server.host),
        config.server.port,
        escape_html(&config.source.base_url),
        escape_html(&config.source.spreadsheet_id),
        escape_html(&config.source.range),
        escape_html(api_key),
        config.source.timeout_secs,
        config.polling.interval_secs,
        if config.polling.pause_when_hidden { "Enabled" } else { "Disabled" },
        if state.poller.is_polling() { "Polling" } else { "Paused" },
        escape_html(&config.currency.symbol),
        config.currency.decimal_places,
        if config.display.max_rows == 0 { "All".to_string() } else { config.display.max_rows.to_string() }
    );

    axum::response::Html(crate::page_response(
        &headers,
        &state.config.display.title,
        "Settings",
        "/settings",
        &inner_content,
    ))
}
