//! Replay recorded face observations through the tracker.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use faceframe_cli::{logging, replay, ConfigOverrides, ReplayOptions};
use faceframe_models::TrackingConfig;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "faceframe-replay", version, about = "Replay face observations through the tracker")]
struct Args {
    /// JSON lines file of observation ticks (stdin when omitted)
    input: Option<PathBuf>,

    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Write JSON lines
    #[arg(long)]
    json: bool,

    /// Print Prometheus metrics after the replay
    #[arg(long)]
    metrics: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    // Logs go to stderr; stdout carries replay output
    let env_filter = logging::env_filter()?;
    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let args = Args::parse();

    let metrics_handle = if args.metrics {
        Some(PrometheusBuilder::new().install_recorder()?)
    } else {
        None
    };

    let options = ReplayOptions {
        config: args.overrides.apply(TrackingConfig::from_env()),
        json: args.json,
    };
    info!(
        viewport = %format!("{}x{}", options.config.viewport.width, options.config.viewport.height),
        policy = %options.config.scale_policy,
        rc = options.config.rc,
        "Starting replay"
    );

    let stdout = io::stdout().lock();
    match &args.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            replay::run(BufReader::new(file), stdout, &options)?;
        }
        None => {
            replay::run(io::stdin().lock(), stdout, &options)?;
        }
    }

    if let Some(handle) = metrics_handle {
        print!("{}", handle.render());
    }

    Ok(())
}
