//! Loadwatch CLI
//!
//! Headless host for the dashboard glue:
//! - Fetch and display a server's load chart
//! - Run the star field without a browser
//! - Generate a config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use loadwatch::chart::{ChartOutcome, HttpChartSource, TextBackend};
use loadwatch::starfield::{RecordingSurface, StarField};
use loadwatch::config::generate_default_config;
use loadwatch::{update_chart, ChartSession, Config, LineChartStyle, ServerId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Poll spacing when the config leaves `refresh_interval_ms` at zero
const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;

#[derive(Parser)]
#[command(name = "loadwatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Server load chart and star-field animation, outside the browser")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a server's load history and draw it
    Chart {
        /// Server id, as offered by the dashboard's server selector
        server_id: String,
        /// API base URL (overrides chart.api_base)
        #[arg(long)]
        api_url: Option<String>,
        /// Number of fetches; every fetch after the first updates the same chart
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        polls: u32,
    },

    /// Run the star-field animation headlessly
    Stars {
        /// Frames to simulate
        #[arg(long, default_value = "600")]
        frames: u64,
        /// Random seed for reproducible runs
        #[arg(long, default_value = "0")]
        seed: u64,
        /// Canvas width in pixels
        #[arg(long, default_value = "1280")]
        width: f64,
        /// Canvas height in pixels
        #[arg(long, default_value = "160")]
        height: f64,
        /// Frames per second of the synthetic clock
        #[arg(long, default_value = "60")]
        frame_rate: f64,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let config = Config::load_with_env(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            init_logging(&config.logging);
            config
        }
        None => {
            let loaded = Config::load_default();
            init_logging(&loaded.config.logging);
            loaded.log();
            loaded.config
        }
    };

    match cli.command {
        Commands::Chart {
            server_id,
            api_url,
            polls,
        } => {
            let server_id = ServerId::parse_selection(&server_id)?;
            let mut chart_config = config.chart.clone();
            if let Some(url) = api_url {
                chart_config.api_base = url;
            }
            if chart_config.api_base.is_empty() {
                chart_config.api_base = "http://127.0.0.1:5000".to_string();
            }

            let source = HttpChartSource::from_config(&chart_config)?;
            let mut session = ChartSession::new(
                TextBackend::default(),
                LineChartStyle::from_config(&chart_config),
            );
            let interval = match chart_config.refresh_interval_ms {
                0 => DEFAULT_POLL_INTERVAL_MS,
                ms => ms,
            };

            for poll in 0..polls {
                if poll > 0 {
                    tokio::time::sleep(Duration::from_millis(interval)).await;
                }

                let outcome = update_chart(&mut session, &source, server_id)
                    .await
                    .with_context(|| format!("fetching chart data for server {}", server_id))?;
                let Some(chart) = session.chart() else {
                    continue;
                };

                match cli.format.as_str() {
                    "json" => {
                        println!("{}", serde_json::to_string(chart.data())?);
                    }
                    _ => {
                        let verb = match outcome {
                            ChartOutcome::Created => "created",
                            ChartOutcome::Updated => "updated",
                        };
                        println!(
                            "Server {} chart {} at {}",
                            server_id,
                            verb,
                            chrono::Local::now().format("%H:%M:%S")
                        );
                        print!("{}", chart.render());
                    }
                }
            }
        }

        Commands::Stars {
            frames,
            seed,
            width,
            height,
            frame_rate,
        } => {
            let frame_ms = frame_interval_ms(frame_rate)?;
            let mut field = StarField::new(
                config.starfield.clone(),
                width,
                height,
                StdRng::seed_from_u64(seed),
            )?;
            let mut surface = RecordingSurface::new();
            let mut published = Vec::new();

            for frame in 1..=frames {
                let now_ms = frame as f64 * frame_ms;
                if let Some(fps) = field.tick(now_ms) {
                    tracing::debug!(fps, frame, "fps");
                    published.push(fps);
                }
                field.draw(&mut surface);
            }

            let stats = field.stats();
            match cli.format.as_str() {
                "json" => {
                    let report = serde_json::json!({
                        "seed": seed,
                        "frames": stats.frames,
                        "fps": published,
                        "stars": stats.stars,
                        "active_flashes": stats.active_flashes,
                        "mean_trail_length": stats.mean_trail_length,
                        "max_trail_length": stats.max_trail_length,
                        "circles_last_frame": surface.circles().count(),
                    });
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                _ => {
                    println!("Star field {}x{} (seed {})", width, height, seed);
                    println!("  {}", stats);
                    println!("  FPS published: {:?}", published);
                    println!("  Circles in last frame: {}", surface.circles().count());
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Synthetic clock step for the headless star field
fn frame_interval_ms(frame_rate: f64) -> anyhow::Result<f64> {
    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        anyhow::bail!("frame rate must be a positive number, got {}", frame_rate);
    }
    Ok(1000.0 / frame_rate)
}

fn init_logging(logging: &loadwatch::LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("loadwatch={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
