//! HTTP API Client
//!
//! Chart data fetching over the browser's `fetch`.

use async_trait::async_trait;
use gloo_net::http::Request;
use loadwatch::chart::{chart_data_url, ChartData, ChartDataSource, ChartError, ChartResult, ServerId};

/// Local storage key that overrides the configured API base
pub const API_BASE_STORAGE_KEY: &str = "loadwatch_api_url";

/// Get the API base URL from local storage or fall back to `configured`
pub fn get_api_base(configured: &str) -> String {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(API_BASE_STORAGE_KEY).ok().flatten());

    // Normalize: remove trailing slash
    stored
        .as_deref()
        .unwrap_or(configured)
        .trim_end_matches('/')
        .to_string()
}

/// Chart source using `gloo-net`
pub struct GlooChartSource {
    api_base: String,
}

impl GlooChartSource {
    pub fn new(api_base: String) -> Self {
        Self { api_base }
    }
}

#[async_trait(?Send)]
impl ChartDataSource for GlooChartSource {
    async fn fetch(&self, server_id: ServerId) -> ChartResult<ChartData> {
        let url = chart_data_url(&self.api_base, server_id);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ChartError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ChartError::Status(response.status()));
        }

        let body = response
            .binary()
            .await
            .map_err(|e| ChartError::Network(e.to_string()))?;

        ChartData::from_json(&body)
    }
}
