//! Chart updater
//!
//! Fetches a server's load history and feeds it to a line chart:
//!
//! - **data**: the `{labels, data}` contract and server ids
//! - **source**: where chart data comes from (HTTP, browser fetch)
//! - **session**: the owned chart handle, create-then-update semantics
//! - **style**: line chart appearance and the Chart.js configuration
//! - **text**: a plain-text backend for terminals
//! - **error**: error types
//!
//! # Flow
//!
//! ```text
//! selection value → ServerId → ChartDataSource::fetch → ChartData
//!   → ChartSession::apply → backend.create (first time) | backend.update
//! ```

pub mod data;
pub mod error;
pub mod session;
pub mod source;
pub mod style;
pub mod text;

pub use data::{ChartData, ServerId};
pub use error::{ChartError, ChartResult};
pub use session::{update_chart, ChartBackend, ChartOutcome, ChartSession};
pub use source::{chart_data_url, ChartDataSource, CHART_DATA_PATH};
pub use style::LineChartStyle;
pub use text::{TextBackend, TextChart};

#[cfg(feature = "cli")]
pub use source::HttpChartSource;
