//! Dashboard page rendering
//!
//! Endpoints:
//! - page_dashboard: Main dashboard page
//!
//! Helper functions:
//! - render_content: Everything inside `#dashboard-content`
//! - render_summary_cards / render_category_breakdown / render_transactions_table
//! - render_transaction_detail: Transaction detail modal

use crate::AppState;
use sheetdash_config::Config;
use sheetdash_core::{DashboardView, SyncStatus, TransactionRecord, TypeFilter};
use sheetdash_utils::{escape_html, format_currency, format_currency_compact, pluralize};

/// Dashboard page - content is loaded and refreshed through HTMX
pub async fn page_dashboard(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let view = state.current_view().await;
    let refresh_secs = state.config.polling.interval_secs;

    let inner_content = format!(
        r#"<div id='dashboard-content'
            hx-get='/dashboard/content'
            hx-trigger='every {}s, dashboard-refresh from:body'
            hx-swap='innerHTML'>
            {}
        </div>"#,
        refresh_secs,
        render_content(&view, &state.config)
    );

    axum::response::Html(crate::page_response(
        &headers,
        &state.config.display.title,
        &state.config.display.title,
        "/",
        &inner_content,
    ))
}

/// Inner HTML of `#dashboard-content`
pub fn render_content(view: &DashboardView, config: &Config) -> String {
    let status = render_status_bar(view);

    if !view.has_data {
        let body = match &view.status {
            SyncStatus::Failed { message } => render_error_state(message),
            _ => render_loading_state(),
        };
        return format!("{}{}", status, body);
    }

    let stale_banner = match &view.status {
        SyncStatus::Failed { message } => format!(
            "<div class='mb-4 p-3 rounded-lg border border-yellow-200 bg-yellow-50 text-sm text-yellow-800'>Showing the last loaded data. {}</div>",
            escape_html(message)
        ),
        _ => String::new(),
    };

    format!(
        "{}{}{}{}{}{}",
        status,
        stale_banner,
        render_summary_cards(view, config),
        render_mobile_summary(view, config),
        render_category_breakdown(view, config),
        render_transactions_table(view, config)
    )
}

fn render_status_bar(view: &DashboardView) -> String {
    let dot = match &view.status {
        SyncStatus::Syncing => "bg-blue-500",
        SyncStatus::Synced => "bg-green-500",
        SyncStatus::Idle => "bg-gray-400",
        SyncStatus::Failed { .. } => "bg-red-500",
    };

    format!(
        r#"<div class='flex items-center justify-between mb-4 text-sm text-gray-600'>
            <div class='flex items-center gap-2' id='sync-status'>
                <span class='inline-block w-2 h-2 rounded-full {}'></span>
                <span>{}</span>
            </div>
            <div class='flex items-center gap-3'>
                <span id='last-updated'>{}</span>
                <button onclick='refreshNow()' class='px-3 py-1.5 border rounded-lg hover:bg-gray-100'>Refresh</button>
            </div>
        </div>"#,
        dot,
        view.status.label(),
        view.last_updated_label().unwrap_or_default()
    )
}

fn render_loading_state() -> String {
    r#"<div class='flex flex-col items-center justify-center py-24 text-gray-500'>
        <div class='animate-spin rounded-full h-8 w-8 border-b-2 border-indigo-600 mb-4'></div>
        <p>Loading transactions...</p>
    </div>"#
        .to_string()
}

fn render_error_state(message: &str) -> String {
    let message = if message.is_empty() {
        "An unexpected error occurred"
    } else {
        message
    };

    format!(
        r#"<div class='bg-red-50 border border-red-200 rounded-xl p-8 text-center'>
            <h3 class='text-lg font-medium text-red-800 mb-2'>Unable to load data</h3>
            <p class='text-red-600 mb-4'>{}</p>
            <button onclick='refreshNow()' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Retry</button>
        </div>"#,
        escape_html(message)
    )
}

/// Income, expense, balance and count cards. Income and expense cards
/// toggle the type filter.
pub fn render_summary_cards(view: &DashboardView, config: &Config) -> String {
    let currency = &config.currency;
    let analytics = &view.analytics;
    let active = |kind: TypeFilter| {
        if view.filter.type_filter == kind {
            "ring-2 ring-offset-2 ring-indigo-500"
        } else {
            ""
        }
    };
    let balance_class = if analytics.is_negative_balance() {
        "text-red-700"
    } else {
        "text-blue-700"
    };

    format!(
        r#"<div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4 mb-6'>
            <div class='bg-green-50 p-4 rounded-lg border border-green-200 cursor-pointer {}'
                hx-post='/filter/type?kind=income' hx-target='#dashboard-content' hx-swap='innerHTML'>
                <p class='text-sm text-green-600'>Total Income</p><p class='text-2xl font-bold text-green-700' id='total-income'>{}</p>
            </div>
            <div class='bg-red-50 p-4 rounded-lg border border-red-200 cursor-pointer {}'
                hx-post='/filter/type?kind=expense' hx-target='#dashboard-content' hx-swap='innerHTML'>
                <p class='text-sm text-red-600'>Total Expenses</p><p class='text-2xl font-bold text-red-700' id='total-expenses'>{}</p>
            </div>
            <div class='bg-blue-50 p-4 rounded-lg border border-blue-200'>
                <p class='text-sm text-blue-600'>Balance</p><p class='text-2xl font-bold {}' id='current-balance'>{}</p>
            </div>
            <div class='bg-gray-50 p-4 rounded-lg border border-gray-200'>
                <p class='text-sm text-gray-600'>Transactions</p><p class='text-2xl font-bold' id='total-transactions'>{}</p>
            </div>
        </div>"#,
        active(TypeFilter::Income),
        format_currency(analytics.income, &currency.symbol, currency.decimal_places),
        active(TypeFilter::Expense),
        format_currency(analytics.expenses, &currency.symbol, currency.decimal_places),
        balance_class,
        format_currency(analytics.balance, &currency.symbol, currency.decimal_places),
        analytics.total_transactions
    )
}

fn render_mobile_summary(view: &DashboardView, config: &Config) -> String {
    let symbol = &config.currency.symbol;
    let analytics = &view.analytics;

    format!(
        r#"<div class='md:hidden sticky top-0 z-10 grid grid-cols-3 gap-2 mb-4 p-2 bg-white border rounded-lg text-center text-sm'>
            <span class='text-green-700' id='mobile-income'>{}</span>
            <span class='text-red-700' id='mobile-expenses'>{}</span>
            <span class='{}' id='mobile-balance'>{}</span>
        </div>"#,
        format_currency_compact(analytics.income, symbol),
        format_currency_compact(analytics.expenses, symbol),
        if analytics.is_negative_balance() { "text-red-700" } else { "text-blue-700" },
        format_currency_compact(analytics.balance, symbol)
    )
}

/// Category cards; clicking one toggles the category filter
pub fn render_category_breakdown(view: &DashboardView, config: &Config) -> String {
    let currency = &config.currency;

    let items = if view.categories.is_empty() {
        "<p class='text-gray-500 text-center col-span-full'>No category data available</p>".to_string()
    } else {
        view.categories
            .iter()
            .map(|category| {
                let active = view.filter.category_filter.as_deref() == Some(category.name.as_str());
                format!(
                    r#"<div class='p-4 rounded-lg border cursor-pointer {}'
                        hx-post='/filter/category?name={}' hx-target='#dashboard-content' hx-swap='innerHTML'>
                        <div class='flex justify-between mb-1'><span class='font-medium'>{}</span><span class='text-xs text-gray-500'>{}</span></div>
                        <div class='flex justify-between mb-2'><span class='font-bold'>{}</span><span class='text-sm text-gray-500'>({:.1}%)</span></div>
                        <div class='h-2 bg-gray-100 rounded'><div class='h-2 bg-red-400 rounded' style='width: {:.2}%'></div></div>
                    </div>"#,
                    if active { "border-indigo-500 bg-indigo-50" } else { "bg-white hover:bg-gray-50" },
                    escape_html(&urlencoding::encode(&category.name)),
                    escape_html(&category.name),
                    pluralize(category.count, "transaction"),
                    format_currency(category.total, &currency.symbol, currency.decimal_places),
                    category.percentage,
                    category.percentage
                )
            })
            .collect::<Vec<_>>()
            .join("")
    };

    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Expenses by Category</h3>
            <div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4' id='category-breakdown'>{}</div>
        </div>"#,
        items
    )
}

fn render_section_title(view: &DashboardView) -> String {
    let filter = &view.filter;
    let Some(suffix) = filter.title_suffix() else {
        return "Transaction History".to_string();
    };

    let (color, clear_url) = match (&filter.category_filter, filter.type_filter) {
        (Some(_), _) => ("text-gray-500", "/filter/category"),
        (None, TypeFilter::Income) => ("text-green-600", "/filter/clear"),
        _ => ("text-red-600", "/filter/clear"),
    };

    format!(
        "Transaction History <span class='text-sm {}'>({})</span> <button class='ml-2 px-2 py-1 text-xs border rounded hover:bg-gray-100' hx-post='{}' hx-target='#dashboard-content' hx-swap='innerHTML'>Show All</button>",
        color,
        escape_html(&suffix),
        clear_url
    )
}

/// Transaction table, newest first, honouring the filter and `display.max_rows`
pub fn render_transactions_table(view: &DashboardView, config: &Config) -> String {
    let currency = &config.currency;

    let rows = if view.analytics.total_transactions == 0 {
        empty_row("No transactions found".to_string())
    } else if view.visible.is_empty() {
        let description = view.filter.describe();
        let message = if description.is_empty() {
            "No transactions found".to_string()
        } else {
            format!("No {} transactions found", description)
        };
        empty_row(message)
    } else {
        let limit = match config.display.max_rows {
            0 => view.visible.len(),
            n => n,
        };
        view.visible
            .iter()
            .take(limit)
            .enumerate()
            .map(|(index, record)| {
                let amount_class = if record.is_income() { "text-green-600" } else { "text-red-600" };
                let category = match record.category_name() {
                    Some(name) => format!(
                        "<span class='px-2 py-0.5 text-xs rounded-full bg-indigo-50 text-indigo-700'>{}</span>",
                        escape_html(name)
                    ),
                    None => String::new(),
                };
                format!(
                    r#"<tr class='border-b hover:bg-gray-50 cursor-pointer' hx-get='/transactions/{}/detail' hx-target='body' hx-swap='beforeend'>
                        <td class='px-3 py-2'>{}</td><td class='px-3 py-2'>{}</td><td class='px-3 py-2'>{}</td>
                        <td class='px-3 py-2'>{}</td><td class='px-3 py-2 text-right font-medium {}'>{}</td><td class='px-3 py-2'>{}</td>
                    </tr>"#,
                    index,
                    escape_html(&record.date_time),
                    escape_html(&record.credit_label),
                    escape_html(&record.debit_label),
                    category,
                    amount_class,
                    format_currency(record.amount, &currency.symbol, currency.decimal_places),
                    escape_html(&record.purpose)
                )
            })
            .collect::<Vec<_>>()
            .join("")
    };

    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6'>
            <h3 class='text-lg font-semibold mb-4' id='transactions-title'>{}</h3>
            <div class='overflow-x-auto'>
                <table class='w-full text-sm'>
                    <thead><tr class='text-left text-gray-500 border-b'>
                        <th class='px-3 py-2'>Date/Time</th><th class='px-3 py-2'>Credit</th><th class='px-3 py-2'>Debit</th>
                        <th class='px-3 py-2'>Category</th><th class='px-3 py-2 text-right'>Amount</th><th class='px-3 py-2'>Purpose</th>
                    </tr></thead>
                    <tbody id='transactions-body'>{}</tbody>
                </table>
            </div>
        </div>"#,
        render_section_title(view),
        rows
    )
}

fn empty_row(message: String) -> String {
    format!(
        "<tr><td colspan='6' class='text-center py-8 text-gray-500'>{}</td></tr>",
        escape_html(&message)
    )
}

/// Transaction detail modal
pub fn render_transaction_detail(record: &TransactionRecord, config: &Config) -> String {
    let currency = &config.currency;
    let or_dash = |value: &str| {
        if value.is_empty() {
            "-".to_string()
        } else {
            escape_html(value)
        }
    };
    let category = match record.category_name() {
        Some(name) => format!(
            "<span class='px-2 py-0.5 text-xs rounded-full bg-indigo-50 text-indigo-700'>{}</span>",
            escape_html(name)
        ),
        None => "-".to_string(),
    };
    let amount_class = if record.is_income() { "text-green-600" } else { "text-red-600" };

    format!(
        r#"<div id='transaction-modal' class='fixed inset-0 bg-black bg-opacity-50 z-50 flex items-center justify-center' onclick='if(event.target.id === "transaction-modal") closeTransactionModal()'>
    <div class='bg-white rounded-xl shadow-2xl w-full max-w-lg' onclick='event.stopPropagation()'>
        <div class='flex items-center justify-between px-6 py-4 border-b'>
            <h2 class='text-xl font-bold'>Transaction Details</h2>
            <button onclick='closeTransactionModal()' class='text-gray-500 hover:text-gray-700 p-2'>&times;</button>
        </div>
        <dl class='p-6 grid grid-cols-3 gap-3 text-sm'>
            <dt class='text-gray-500'>Date/Time</dt><dd class='col-span-2' id='modal-datetime'>{}</dd>
            <dt class='text-gray-500'>Credit</dt><dd class='col-span-2' id='modal-credit'>{}</dd>
            <dt class='text-gray-500'>Debit</dt><dd class='col-span-2' id='modal-debit'>{}</dd>
            <dt class='text-gray-500'>Category</dt><dd class='col-span-2' id='modal-category'>{}</dd>
            <dt class='text-gray-500'>Amount</dt><dd class='col-span-2 font-medium {}' id='modal-amount'>{}</dd>
            <dt class='text-gray-500'>Purpose</dt><dd class='col-span-2' id='modal-purpose'>{}</dd>
        </dl>
    </div>
</div>
<script>document.body.style.overflow = 'hidden';</script>"#,
        or_dash(&record.date_time),
        or_dash(&record.credit_label),
        or_dash(&record.debit_label),
        category,
        amount_class,
        format_currency(record.amount, &currency.symbol, currency.decimal_places),
        or_dash(&record.purpose)
    )
}
