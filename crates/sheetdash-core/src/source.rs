//! Spreadsheet data sources

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url};
use sheetdash_config::SourceConfig;

use crate::error::{CoreError, CoreResult};

/// Anything that can produce the raw cell grid of the transaction sheet
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch all data rows, header excluded. An empty grid is an error.
    async fn fetch_rows(&self) -> CoreResult<Vec<Vec<String>>>;

    /// Short human-readable name for logs
    fn describe(&self) -> String {
        "data source".to_string()
    }
}

/// Data source reference type
pub type SourceRef = Arc<dyn DataSource>;

/// Google Sheets `values` endpoint client
pub struct SheetsSource {
    http_client: Client,
    url: Url,
    range: String,
}

impl SheetsSource {
    pub fn new(config: &SourceConfig) -> CoreResult<Self> {
        let http_client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http_client,
            url: build_url(config)?,
            range: config.range.clone(),
        })
    }
}

/// `{base_url}/v4/spreadsheets/{id}/values/{range}?key={api_key}`
///
/// The key parameter is left out when no key is configured.
pub fn build_url(config: &SourceConfig) -> CoreResult<Url> {
    let invalid = |reason: String| CoreError::ConfigError {
        message: format!("Invalid source.base_url '{}': {}", config.base_url, reason),
    };

    let mut url = Url::parse(&config.base_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("cannot be a base URL".to_string()))?
        .pop_if_empty()
        .extend([
            "v4",
            "spreadsheets",
            config.spreadsheet_id.as_str(),
            "values",
            config.range.as_str(),
        ]);

    if !config.api_key.is_empty() {
        url.query_pairs_mut().append_pair("key", &config.api_key);
    }

    Ok(url)
}

/// Turn an HTTP status and body into data rows
pub fn rows_from_response(status: u16, body: &str) -> CoreResult<Vec<Vec<String>>> {
    if !(200..300).contains(&status) {
        return Err(CoreError::Fetch {
            message: format!("HTTP error! status: {}", status),
        });
    }

    let rows = sheetdash_parser::parse_value_range(body)?.into_rows();
    if rows.is_empty() {
        return Err(CoreError::EmptyData);
    }

    Ok(rows)
}

#[async_trait]
impl DataSource for SheetsSource {
    async fn fetch_rows(&self) -> CoreResult<Vec<Vec<String>>> {
        // The URL carries the key; log the range only.
        log::debug!(target: "sheetdash::source", "Fetching range {}", self.range);

        let response = self.http_client.get(self.url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let rows = rows_from_response(status, &body)?;
        log::debug!(target: "sheetdash::source", "Fetched {} rows", rows.len());
        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("Google Sheets range {}", self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn config(api_key: &str) -> SourceConfig {
        SourceConfig {
            spreadsheet_id: "sheet-123".to_string(),
            api_key: api_key.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_url_with_key() {
        let url = build_url(&config("secret")).unwrap();

        assert_eq!(url.host_str(), Some("sheets.googleapis.com"));
        assert_eq!(url.path(), "/v4/spreadsheets/sheet-123/values/Sheet1!A2:F");
        assert_eq!(url.query(), Some("key=secret"));
    }

    #[test]
    fn test_build_url_without_key() {
        let url = build_url(&config("")).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_build_url_with_trailing_slash_base() {
        let mut source = config("");
        source.base_url = "http://localhost:9000/".to_string();
        let url = build_url(&source).unwrap();

        assert_eq!(url.path(), "/v4/spreadsheets/sheet-123/values/Sheet1!A2:F");
    }

    #[test]
    fn test_build_url_rejects_bad_base() {
        let mut source = config("");
        source.base_url = "not a url".to_string();
        let err = build_url(&source).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigError);
    }

    #[test]
    fn test_http_error_status() {
        let err = rows_from_response(403, "{}").unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 403");
        assert_eq!(err.code(), ErrorCode::FetchError);

        let err = rows_from_response(500, "").unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn test_missing_values_is_empty_data() {
        let err = rows_from_response(200, r#"{"range": "Sheet1!A2:F"}"#).unwrap_err();
        assert!(matches!(err, CoreError::EmptyData));
    }

    #[test]
    fn test_empty_values_is_empty_data() {
        let err = rows_from_response(200, r#"{"range": "Sheet1!A2:F", "values": []}"#).unwrap_err();
        assert_eq!(err.to_string(), "No data found in the spreadsheet");
    }

    #[test]
    fn test_malformed_body_is_invalid_response() {
        let err = rows_from_response(200, "<html></html>").unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidResponse);
    }

    #[test]
    fn test_rows_returned() {
        let body = r#"{"values": [["2024-06-01", "", "Card", "Food", "50", "Lunch"], ["2024-06-02"]]}"#;
        let rows = rows_from_response(200, body).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][3], "Food");
        assert_eq!(rows[1].len(), 1);
    }

    #[test]
    fn test_sheets_source_describe_omits_key() {
        let source = SheetsSource::new(&config("secret")).unwrap();
        let text = source.describe();
        assert!(text.contains("Sheet1!A2:F"));
        assert!(!text.contains("secret"));
    }
}
