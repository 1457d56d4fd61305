// =============================================================================
// tickerscope — Main Entry Point
// =============================================================================
//
// One linear pass per invocation: fetch the configured instrument's daily
// history, append the indicator columns, print the tail of the rows where
// every indicator is defined, and report wall-clock time for the whole run.
// The elapsed line is printed on every path, including failures.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod analysis;
mod config;
mod indicators;
mod report;
mod types;
mod yahoo;

use std::time::Instant;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AnalysisConfig;
use crate::yahoo::YahooClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::var("TICKERSCOPE_CONFIG")
        .unwrap_or_else(|_| "analysis_config.json".to_string());
    let mut config = AnalysisConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AnalysisConfig::default()
    });

    // Override run parameters from env if available.
    if let Ok(sym) = std::env::var("TICKERSCOPE_SYMBOL") {
        let sym = sym.trim().to_uppercase();
        if !sym.is_empty() {
            config.symbol = sym;
        }
    }
    if let Ok(raw) = std::env::var("TICKERSCOPE_START") {
        config.start_date = raw
            .trim()
            .parse()
            .with_context(|| format!("invalid TICKERSCOPE_START date: {raw}"))?;
    }
    if let Ok(raw) = std::env::var("TICKERSCOPE_END") {
        config.end_date = raw
            .trim()
            .parse()
            .with_context(|| format!("invalid TICKERSCOPE_END date: {raw}"))?;
    }
    if let Ok(raw) = std::env::var("TICKERSCOPE_TAIL_ROWS") {
        config.tail_rows = raw
            .trim()
            .parse()
            .with_context(|| format!("invalid TICKERSCOPE_TAIL_ROWS value: {raw}"))?;
    }

    config.validate()?;

    info!(
        symbol = %config.symbol,
        start = %config.start_date,
        end = %config.end_date,
        sma_window = config.sma_window,
        ema_com = config.ema_com,
        vol_window = config.vol_window,
        "Analysis parameters"
    );

    // ── 2. Timed pipeline ────────────────────────────────────────────────
    // The timer wraps fetch + enrich + report, not process startup, and the
    // elapsed line prints before any failure propagates to the exit code.
    let started = Instant::now();
    let outcome = run(&config).await;
    let elapsed = started.elapsed();

    if let Err(e) = &outcome {
        error!(error = %e, "Data acquisition failed");
    }

    println!("\nTotal execution time: {:.2} seconds.", elapsed.as_secs_f64());

    outcome
}

/// Fetch, enrich, report. Failures bubble up so the caller can stamp the
/// elapsed line before exiting non-zero.
async fn run(config: &AnalysisConfig) -> anyhow::Result<()> {
    info!(
        symbol = %config.symbol,
        start = %config.start_date,
        end = %config.end_date,
        "Fetching daily history"
    );
    let client = YahooClient::new();
    let bars = client
        .fetch_daily(&config.symbol, config.start_date, config.end_date)
        .await?;

    if bars.is_empty() {
        warn!(symbol = %config.symbol, "no observations for the requested range");
        report::print_no_data(config);
        return Ok(());
    }
    info!(rows = bars.len(), "Data fetched successfully");

    info!("Calculating financial indicators");
    let rows = analysis::enrich(&bars, config);
    let complete = analysis::complete_rows(&rows);
    info!(
        total = rows.len(),
        complete = complete.len(),
        "Indicators calculated"
    );

    report::print_report(&complete, config);
    Ok(())
}
