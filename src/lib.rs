//! # Loadwatch
//!
//! Front-end glue for a server load dashboard, written so it runs the same
//! in the browser (via `loadwatch-ui`) and in native hosts.
//!
//! ## Modules
//!
//! - [`chart`]: fetch a server's load series and create or update a line chart
//! - [`starfield`]: decorative star particle animation with an FPS estimate
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use loadwatch::chart::{ChartData, ChartOutcome, ChartSession, LineChartStyle, TextBackend};
//!
//! let mut session = ChartSession::new(TextBackend::default(), LineChartStyle::default());
//!
//! let first = ChartData::new(vec!["a".into(), "b".into()], vec![1.0, 2.0]);
//! assert_eq!(session.apply(&first).unwrap(), ChartOutcome::Created);
//!
//! let second = ChartData::new(vec!["b".into(), "c".into()], vec![2.0, 3.0]);
//! assert_eq!(session.apply(&second).unwrap(), ChartOutcome::Updated);
//!
//! println!("{}", session.chart().unwrap().render());
//! ```

pub mod chart;
pub mod config;
pub mod starfield;

// Re-export top-level types for convenience
pub use chart::{
    update_chart, ChartBackend, ChartData, ChartDataSource, ChartError, ChartOutcome,
    ChartResult, ChartSession, LineChartStyle, ServerId,
};

pub use starfield::{FpsCounter, RecordingSurface, StarField, Surface};

pub use config::{
    ChartConfig, Config, ConfigError, LoadedConfig, LoggingConfig, StarfieldConfig,
};
