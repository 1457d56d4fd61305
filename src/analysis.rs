// =============================================================================
// Indicator Enrichment — derive the SMA / EMA / volatility columns
// =============================================================================
//
// The acquisition layer hands over plain daily bars; this stage extracts the
// close column once, computes the three indicator series independently, and
// zips everything back into per-date rows. Enrichment only appends columns:
// input order is preserved and no row is dropped here. Reducing to the rows
// where every indicator is defined is a separate step (`complete_rows`), so
// reporting only ever sees fully-populated rows.
//
// Warm-up lengths differ by column. With window w over n bars:
//   SMA  — defined from index w - 1        (n - w + 1 values)
//   EMA  — defined from index 0            (n values, bias-adjusted form)
//   vol  — defined from index w            (n - w values; returns start at 1)
// so with equal SMA and volatility windows the volatility warm-up decides
// how many rows survive: max(0, n - w).
// =============================================================================

use chrono::NaiveDate;

use crate::config::AnalysisConfig;
use crate::indicators::ema::calculate_ema;
use crate::indicators::sma::calculate_sma;
use crate::indicators::volatility::calculate_volatility;
use crate::types::DailyBar;

/// One date with its close and every indicator column, defined or not.
#[derive(Debug, Clone)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub close: f64,
    pub sma: Option<f64>,
    /// Always defined for valid parameters; NaN only if the center-of-mass
    /// was invalid, which `AnalysisConfig::validate` rules out.
    pub ema: f64,
    pub vol: Option<f64>,
}

/// A row whose every column is defined, ready for rendering.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub close: f64,
    pub sma: f64,
    pub ema: f64,
    pub vol: f64,
}

/// Append the indicator columns to a daily series.
///
/// The result is aligned 1:1 with `bars` and keeps their order.
pub fn enrich(bars: &[DailyBar], config: &AnalysisConfig) -> Vec<IndicatorRow> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let sma = calculate_sma(&closes, config.sma_window);
    let ema = calculate_ema(&closes, config.ema_com);
    let vol = calculate_volatility(&closes, config.vol_window);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| IndicatorRow {
            date: bar.date,
            close: bar.close,
            sma: sma[i],
            ema: ema[i],
            vol: vol[i],
        })
        .collect()
}

/// Keep only the rows where every indicator is defined, preserving order.
///
/// With SMA and volatility windows both w this keeps exactly max(0, n - w)
/// rows: everything after the longest warm-up.
pub fn complete_rows(rows: &[IndicatorRow]) -> Vec<ReportRow> {
    rows.iter()
        .filter_map(|row| match (row.sma, row.vol) {
            (Some(sma), Some(vol)) if row.ema.is_finite() => Some(ReportRow {
                date: row.date,
                close: row.close,
                sma,
                ema: row.ema,
                vol,
            }),
            _ => None,
        })
        .collect()
}
