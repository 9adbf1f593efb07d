use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::{debug, info};

use reno_cli::config::{Settings, load_settings};
use reno_cli::{EstimatorApp, SharedOutput, load_pricing_table, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Renovation cost estimator.
///
/// Walks through five questions about the property and the job, then
/// reveals an estimated price range.
#[derive(Debug, Parser)]
#[command(name = "reno-estimator", version, about)]
struct Cli {
    /// TOML settings file. Defaults to `reno-estimator.toml` when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV pricing table to use instead of the built-in rates.
    #[arg(long)]
    pricing_table: Option<PathBuf>,

    /// Reveal animation length in milliseconds.
    #[arg(long)]
    reveal_ms: Option<u64>,

    /// Show the estimate immediately, without the count-up.
    #[arg(long, default_value_t = false)]
    no_animation: bool,

    /// Log filter, e.g. `debug` or `reno_core=trace`.
    #[arg(long)]
    log_level: Option<String>,

    /// Append logs to this file as well as stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply(
        &self,
        settings: &mut Settings,
    ) {
        if let Some(path) = &self.pricing_table {
            settings.pricing_table = Some(path.clone());
        }
        if let Some(ms) = self.reveal_ms {
            settings.reveal_ms = ms;
        }
        if self.no_animation {
            settings.animate = false;
        }
        if let Some(level) = &self.log_level {
            settings.log_level = level.clone();
        }
        if let Some(path) = &self.log_file {
            settings.log_file = Some(path.clone());
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref()).context("Failed to load settings")?;
    cli.apply(&mut settings);

    logging::set_log_level(&settings.log_level)?;
    if let Some(path) = &settings.log_file {
        logging::enable_file_logging(path)?;
    }
    debug!(?settings, "effective settings");

    let table = Arc::new(load_pricing_table(&settings)?);
    let out: SharedOutput = Arc::new(Mutex::new(io::stdout()));
    let mut app = EstimatorApp::new(table, settings.reveal_duration(), out);

    let estimate = app.run(BufReader::new(tokio::io::stdin())).await?;
    if let Some(estimate) = estimate {
        info!(min = %estimate.min, max = %estimate.max, "session ended with estimate");
    }

    Ok(())
}
