// =============================================================================
// Analysis Configuration — run parameters loaded from JSON with env overrides
// =============================================================================
//
// Every knob of an analysis run lives here: the instrument, the date range
// and the indicator window sizes.  All fields carry `#[serde(default)]` so a
// partial config file (or none at all) still yields a usable run.
//
// =============================================================================

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_symbol() -> String {
    "NVDA".to_string()
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid calendar date")
}

fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid calendar date")
}

fn default_sma_window() -> usize {
    50
}

fn default_ema_com() -> f64 {
    21.0
}

fn default_vol_window() -> usize {
    50
}

fn default_tail_rows() -> usize {
    5
}

// =============================================================================
// AnalysisConfig
// =============================================================================

/// Parameters for one analysis run.
///
/// Every field has a serde default so that older JSON files missing new fields
/// will still deserialise correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Instrument ticker to fetch, e.g. "NVDA" or "BTC-USD".
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// First date of the requested range (inclusive).
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// End of the requested range (exclusive, the provider convention: the
    /// last session returned is the one before this date).
    #[serde(default = "default_end_date")]
    pub end_date: NaiveDate,

    /// Window width for the simple moving average column.
    #[serde(default = "default_sma_window")]
    pub sma_window: usize,

    /// Center-of-mass for the exponential moving average column
    /// (decay factor alpha = 1 / (1 + com)).
    #[serde(default = "default_ema_com")]
    pub ema_com: f64,

    /// Window width for the rolling return-volatility column.
    #[serde(default = "default_vol_window")]
    pub vol_window: usize,

    /// How many of the most recent fully-populated rows to print.
    #[serde(default = "default_tail_rows")]
    pub tail_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            start_date: default_start_date(),
            end_date: default_end_date(),
            sma_window: default_sma_window(),
            ema_com: default_ema_com(),
            vol_window: default_vol_window(),
            tail_rows: default_tail_rows(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read analysis config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse analysis config from {}", path.display()))?;

        info!(
            path = %path.display(),
            symbol = %config.symbol,
            start = %config.start_date,
            end = %config.end_date,
            "analysis config loaded"
        );

        Ok(config)
    }

    /// Reject parameter combinations no run can satisfy, before any network
    /// traffic happens.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            bail!("symbol must not be empty");
        }
        if self.start_date >= self.end_date {
            bail!(
                "start date {} must fall before end date {}",
                self.start_date,
                self.end_date
            );
        }
        if self.sma_window == 0 {
            bail!("sma_window must be at least 1");
        }
        if !self.ema_com.is_finite() || self.ema_com < 0.0 {
            bail!("ema_com must be a finite value >= 0, got {}", self.ema_com);
        }
        if self.vol_window < 2 {
            bail!(
                "vol_window must be at least 2 for a sample deviation, got {}",
                self.vol_window
            );
        }
        if self.tail_rows == 0 {
            bail!("tail_rows must be at least 1");
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.symbol, "NVDA");
        assert_eq!(cfg.start_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(cfg.end_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(cfg.sma_window, 50);
        assert!((cfg.ema_com - 21.0).abs() < f64::EPSILON);
        assert_eq!(cfg.vol_window, 50);
        assert_eq!(cfg.tail_rows, 5);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: AnalysisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.symbol, "NVDA");
        assert_eq!(cfg.sma_window, 50);
        assert_eq!(cfg.tail_rows, 5);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "symbol": "AAPL", "start_date": "2023-06-15" }"#;
        let cfg: AnalysisConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.symbol, "AAPL");
        assert_eq!(cfg.start_date, NaiveDate::from_ymd_opt(2023, 6, 15).unwrap());
        assert_eq!(cfg.end_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(cfg.vol_window, 50);
    }

    #[test]
    fn roundtrip_serialisation() {
        let cfg = AnalysisConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.symbol, cfg2.symbol);
        assert_eq!(cfg.start_date, cfg2.start_date);
        assert_eq!(cfg.end_date, cfg2.end_date);
        assert_eq!(cfg.sma_window, cfg2.sma_window);
    }

    #[test]
    fn default_config_validates() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_symbol() {
        let mut cfg = AnalysisConfig::default();
        cfg.symbol = "   ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_date_range() {
        let mut cfg = AnalysisConfig::default();
        cfg.start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        cfg.end_date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(cfg.validate().is_err());

        // Equal dates describe an empty range and are rejected too.
        cfg.end_date = cfg.start_date;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_degenerate_windows() {
        let mut cfg = AnalysisConfig::default();
        cfg.sma_window = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = AnalysisConfig::default();
        cfg.vol_window = 1;
        assert!(cfg.validate().is_err());

        let mut cfg = AnalysisConfig::default();
        cfg.ema_com = -3.0;
        assert!(cfg.validate().is_err());

        let mut cfg = AnalysisConfig::default();
        cfg.ema_com = f64::NAN;
        assert!(cfg.validate().is_err());

        let mut cfg = AnalysisConfig::default();
        cfg.tail_rows = 0;
        assert!(cfg.validate().is_err());
    }
}
