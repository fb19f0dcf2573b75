//! Configuration System
//!
//! Handles loading configuration from TOML files and environment variables.
//! Every field has a default, so an empty document is a valid config.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub starfield: StarfieldConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Star-field animation parameters
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StarfieldConfig {
    #[serde(default = "default_star_count")]
    pub star_count: usize,

    #[serde(default = "default_max_trail_length")]
    pub max_trail_length: usize,

    /// Radius range `[min, max)` in canvas pixels
    #[serde(default = "default_size_range")]
    pub size_range: (f64, f64),

    /// Horizontal speed range in pixels per frame
    #[serde(default = "default_speed_x_range")]
    pub speed_x_range: (f64, f64),

    /// Vertical speed range in pixels per frame
    #[serde(default = "default_speed_y_range")]
    pub speed_y_range: (f64, f64),

    #[serde(default = "default_alpha_range")]
    pub alpha_range: (f64, f64),

    /// Probability per frame that an idle star starts a flash
    #[serde(default = "default_flash_chance")]
    pub flash_chance: f64,

    /// Flash progress change per frame
    #[serde(default = "default_flash_step")]
    pub flash_step: f64,

    /// Flash radius multiplier range, rolled when a flash starts
    #[serde(default = "default_flash_scale_range")]
    pub flash_scale_range: (f64, f64),

    #[serde(default = "default_trail_alpha")]
    pub trail_alpha: f64,

    #[serde(default = "default_flash_alpha")]
    pub flash_alpha: f64,

    #[serde(default = "default_background")]
    pub background: String,

    #[serde(default = "default_flash_color")]
    pub flash_color: String,

    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

fn default_star_count() -> usize {
    80
}

fn default_max_trail_length() -> usize {
    30
}

fn default_size_range() -> (f64, f64) {
    (0.5, 1.7)
}

fn default_speed_x_range() -> (f64, f64) {
    (-0.25, 0.25)
}

fn default_speed_y_range() -> (f64, f64) {
    (0.1, 0.4)
}

fn default_alpha_range() -> (f64, f64) {
    (0.3, 1.0)
}

fn default_flash_chance() -> f64 {
    0.003
}

fn default_flash_step() -> f64 {
    0.05
}

fn default_flash_scale_range() -> (f64, f64) {
    (1.0, 3.0)
}

fn default_trail_alpha() -> f64 {
    0.6
}

fn default_flash_alpha() -> f64 {
    0.7
}

fn default_background() -> String {
    "#03121f".to_string()
}

fn default_flash_color() -> String {
    "#ffffff".to_string()
}

fn default_palette() -> Vec<String> {
    [
        "#4cc9f0", "#4895ef", "#4361ee", "#3f37c9", "#3a0ca3", "#480ca8", "#560bad", "#7209b7",
        "#4361ee", "#3a0ca3",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            star_count: default_star_count(),
            max_trail_length: default_max_trail_length(),
            size_range: default_size_range(),
            speed_x_range: default_speed_x_range(),
            speed_y_range: default_speed_y_range(),
            alpha_range: default_alpha_range(),
            flash_chance: default_flash_chance(),
            flash_step: default_flash_step(),
            flash_scale_range: default_flash_scale_range(),
            trail_alpha: default_trail_alpha(),
            flash_alpha: default_flash_alpha(),
            background: default_background(),
            flash_color: default_flash_color(),
            palette: default_palette(),
        }
    }
}

impl StarfieldConfig {
    /// Check the values the animation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("starfield.palette must not be empty".into()));
        }
        if self.max_trail_length == 0 {
            return Err(ConfigError::Invalid(
                "starfield.max_trail_length must be at least 1".into(),
            ));
        }
        if !(self.flash_step > 0.0 && self.flash_step <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "starfield.flash_step must be in (0, 1], got {}",
                self.flash_step
            )));
        }
        if !(0.0..=1.0).contains(&self.flash_chance) {
            return Err(ConfigError::Invalid(format!(
                "starfield.flash_chance must be in [0, 1], got {}",
                self.flash_chance
            )));
        }
        for (name, (lo, hi)) in [
            ("size_range", self.size_range),
            ("speed_x_range", self.speed_x_range),
            ("speed_y_range", self.speed_y_range),
            ("alpha_range", self.alpha_range),
            ("flash_scale_range", self.flash_scale_range),
        ] {
            if lo > hi {
                return Err(ConfigError::Invalid(format!(
                    "starfield.{name} is inverted: {lo} > {hi}"
                )));
            }
        }
        Ok(())
    }
}

/// Chart updater configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartConfig {
    /// Base URL prepended to `/get_chart_data/{id}`; empty means same origin
    #[serde(default)]
    pub api_base: String,

    /// Polling interval; 0 fetches only on load and on selection change
    #[serde(default)]
    pub refresh_interval_ms: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_dataset_label")]
    pub dataset_label: String,

    #[serde(default = "default_y_max")]
    pub y_max: f64,
}

fn default_request_timeout() -> u64 {
    30
}

fn default_dataset_label() -> String {
    "Server load (%)".to_string()
}

fn default_y_max() -> f64 {
    100.0
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            refresh_interval_ms: 0,
            request_timeout_secs: default_request_timeout(),
            dataset_label: default_dataset_label(),
            y_max: default_y_max(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from an in-memory TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    #[cfg(feature = "cli")]
    pub fn load_default() -> LoadedConfig {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("loadwatch").join("config.toml")),
            Some(PathBuf::from("/etc/loadwatch/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first candidate that exists and parses, falling back to
    /// defaults with environment overrides. Files that exist but fail to
    /// load are kept in [`LoadedConfig::failures`].
    pub fn load_first(paths: &[PathBuf]) -> LoadedConfig {
        let mut failures = Vec::new();

        for path in paths {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        return LoadedConfig {
                            config,
                            source: Some(path.clone()),
                            failures,
                        };
                    }
                    Err(e) => failures.push((path.clone(), e)),
                }
            }
        }

        LoadedConfig {
            config: Self::from_env(),
            source: None,
            failures,
        }
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.starfield.validate()
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(base) = std::env::var("LOADWATCH_API_BASE") {
            self.chart.api_base = base;
        }
        if let Ok(refresh) = std::env::var("LOADWATCH_REFRESH_MS") {
            if let Ok(ms) = refresh.parse() {
                self.chart.refresh_interval_ms = ms;
            }
        }
        if let Ok(count) = std::env::var("LOADWATCH_STAR_COUNT") {
            if let Ok(n) = count.parse() {
                self.starfield.star_count = n;
            }
        }
        if let Ok(level) = std::env::var("LOADWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("LOADWATCH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Result of searching several config locations
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config came from; `None` means defaults
    pub source: Option<PathBuf>,
    /// Files that existed but could not be loaded
    pub failures: Vec<(PathBuf, ConfigError)>,
}

impl LoadedConfig {
    /// Report where the config came from. Call once logging is installed.
    pub fn log(&self) {
        for (path, e) in &self.failures {
            tracing::warn!("Failed to load config from {:?}: {}", path, e);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r##"# Loadwatch Configuration
#
# Environment variables override these settings:
# - LOADWATCH_API_BASE
# - LOADWATCH_REFRESH_MS
# - LOADWATCH_STAR_COUNT
# - LOADWATCH_LOG_LEVEL
# - LOADWATCH_LOG_FORMAT

[starfield]
# Number of stars seeded when the animation starts
star_count = 80

# Positions remembered per star for the trail
max_trail_length = 30

# Per-frame chance that an idle star flashes, and flash progress per frame
flash_chance = 0.003
flash_step = 0.05

# Canvas background and star colours
background = "#03121f"
palette = ["#4cc9f0", "#4895ef", "#4361ee", "#3f37c9", "#3a0ca3",
           "#480ca8", "#560bad", "#7209b7", "#4361ee", "#3a0ca3"]

[chart]
# Prefix for /get_chart_data/{id}; empty means same origin
api_base = ""

# Re-fetch interval in milliseconds (0 = only on load and selection change)
refresh_interval_ms = 0

# Request timeout in seconds (CLI only)
request_timeout_secs = 30

dataset_label = "Server load (%)"
y_max = 100.0

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"##
    .to_string()
}
