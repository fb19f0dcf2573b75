//! Chart data sources
//!
//! Anything that can produce the `{labels, data}` series for a server id.
//! The trait is `?Send` so browser fetch futures can implement it.

use async_trait::async_trait;

use super::data::{ChartData, ServerId};
use super::error::ChartResult;

/// Path of the chart data endpoint, relative to the API base
pub const CHART_DATA_PATH: &str = "/get_chart_data";

#[async_trait(?Send)]
pub trait ChartDataSource {
    /// One request for the server's current series
    async fn fetch(&self, server_id: ServerId) -> ChartResult<ChartData>;
}

/// `{base}/get_chart_data/{id}`; an empty base gives a same-origin path
pub fn chart_data_url(base: &str, server_id: ServerId) -> String {
    format!(
        "{}{}/{}",
        base.trim_end_matches('/'),
        CHART_DATA_PATH,
        server_id
    )
}

#[cfg(feature = "cli")]
pub use http::HttpChartSource;

#[cfg(feature = "cli")]
mod http {
    use super::*;
    use crate::chart::error::ChartError;
    use crate::config::ChartConfig;
    use reqwest::Client;
    use std::time::Duration;

    /// Chart source backed by `reqwest`
    pub struct HttpChartSource {
        client: Client,
        base_url: String,
    }

    impl HttpChartSource {
        pub fn new(base_url: impl Into<String>, timeout: Duration) -> ChartResult<Self> {
            let client = Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| ChartError::Network(e.to_string()))?;

            Ok(Self {
                client,
                base_url: base_url.into(),
            })
        }

        /// Use a preconfigured client
        pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
            Self {
                client,
                base_url: base_url.into(),
            }
        }

        pub fn from_config(config: &ChartConfig) -> ChartResult<Self> {
            Self::new(
                config.api_base.clone(),
                Duration::from_secs(config.request_timeout_secs),
            )
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }
    }

    #[async_trait(?Send)]
    impl ChartDataSource for HttpChartSource {
        async fn fetch(&self, server_id: ServerId) -> ChartResult<ChartData> {
            let url = chart_data_url(&self.base_url, server_id);
            tracing::debug!(%url, "fetching chart data");

            let response = self.client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ChartError::Status(status.as_u16()));
            }

            let body = response.bytes().await?;
            ChartData::from_json(&body)
        }
    }
}
