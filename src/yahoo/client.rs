// =============================================================================
// Yahoo Finance Chart API Client — unauthenticated daily history
// =============================================================================
//
// GET /v8/finance/chart/{symbol}?period1={start}&period2={end}&interval=1d
//
// Timestamps arrive as Unix seconds at each session's open; prices arrive as
// parallel column vectors with `null` slots for sessions the exchange
// reported no trade data. The envelope carries either `chart.result` or
// `chart.error` — an unknown symbol is an error envelope (often under a 404
// status), not a transport failure, and maps to an empty series here so the
// caller can tell "nothing to analyse" apart from "could not ask".
// =============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::types::DailyBar;

/// Browser-style agent; the chart endpoint rejects the default library agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

// -------------------------------------------------------------------------
// Response envelope
// -------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    // Absent entirely when the range contains no sessions.
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
    #[serde(default)]
    adjclose: Option<Vec<AdjCloseColumn>>,
}

/// Parallel per-session columns; a `null` slot means the session carried no
/// usable data for that field.
#[derive(Debug, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseColumn {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

// -------------------------------------------------------------------------
// Client
// -------------------------------------------------------------------------

/// Yahoo Finance chart API client (no credentials required).
#[derive(Clone)]
pub struct YahooClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooClient {
    pub fn new() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(USER_AGENT),
        );

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build reqwest client");

        debug!("YahooClient initialised (base_url=https://query1.finance.yahoo.com)");

        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            client,
        }
    }

    // -------------------------------------------------------------------------
    // Daily history
    // -------------------------------------------------------------------------

    /// GET /v8/finance/chart/{symbol} — fetch daily bars for `[start, end)`.
    ///
    /// Returns the series in the provider's order (ascending by date, unique
    /// sessions). An unknown symbol or a range with no sessions yields an
    /// empty vector; transport and decode failures yield an error.
    #[instrument(skip(self), name = "yahoo::fetch_daily")]
    pub async fn fetch_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>> {
        let (period1, period2) = Self::period_bounds(start, end);
        let url = format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d",
            self.base_url, symbol, period1, period2
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("GET /v8/finance/chart request failed")?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .context("failed to read chart response body")?;

        // Parse before checking the status: the endpoint reports unknown
        // symbols as an error envelope under a non-success status, and that
        // case is an empty series, not a failure.
        match serde_json::from_str::<ChartEnvelope>(&body) {
            Ok(envelope) => Self::bars_from_envelope(symbol, envelope),
            Err(_) if !status.is_success() => {
                anyhow::bail!(
                    "Yahoo GET /v8/finance/chart returned {}: {}",
                    status,
                    body.trim()
                )
            }
            Err(err) => Err(err).context("failed to parse chart response"),
        }
    }

    /// Unix-second bounds for a `[start, end)` date range, both at UTC
    /// midnight so the provider excludes the end date's session.
    fn period_bounds(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
        let p1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let p2 = end.and_time(NaiveTime::MIN).and_utc().timestamp();
        (p1, p2)
    }

    /// Session-open Unix seconds to the session's calendar date (UTC).
    fn bar_date(ts: i64) -> Option<NaiveDate> {
        DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
    }

    /// Flatten the column-oriented envelope into per-session bars.
    ///
    /// Sessions missing any OHLCV field are skipped; a missing adjusted close
    /// alone falls back to the raw close.
    fn bars_from_envelope(symbol: &str, envelope: ChartEnvelope) -> Result<Vec<DailyBar>> {
        if let Some(error) = envelope.chart.error {
            warn!(
                symbol,
                code = %error.code,
                description = %error.description,
                "provider reported no data"
            );
            return Ok(Vec::new());
        }

        let result = match envelope.chart.result.and_then(|r| r.into_iter().next()) {
            Some(result) => result,
            None => {
                warn!(symbol, "chart response carried no result set");
                return Ok(Vec::new());
            }
        };

        let quote = match result.indicators.quote.into_iter().next() {
            Some(quote) => quote,
            // No quote column set at all reads as no data, not malformation.
            None => return Ok(Vec::new()),
        };
        let adjclose = result
            .indicators
            .adjclose
            .and_then(|a| a.into_iter().next())
            .map(|a| a.adjclose)
            .unwrap_or_default();

        let mut bars = Vec::with_capacity(result.timestamp.len());
        let mut skipped = 0usize;

        for (i, &ts) in result.timestamp.iter().enumerate() {
            let fields = (
                Self::bar_date(ts),
                column(&quote.open, i),
                column(&quote.high, i),
                column(&quote.low, i),
                column(&quote.close, i),
            );
            let (Some(date), Some(open), Some(high), Some(low), Some(close)) = fields else {
                skipped += 1;
                continue;
            };

            bars.push(DailyBar {
                date,
                open,
                high,
                low,
                close,
                adj_close: column(&adjclose, i).unwrap_or(close),
                volume: column(&quote.volume, i).unwrap_or(0),
            });
        }

        if skipped > 0 {
            warn!(symbol, skipped, "skipped sessions with null price fields");
        }
        debug!(symbol, count = bars.len(), "daily bars fetched");
        Ok(bars)
    }
}

/// Value at `i` in a nullable provider column, `None` when the column is
/// short or the slot is `null`.
fn column<T: Copy>(col: &[Option<T>], i: usize) -> Option<T> {
    col.get(i).copied().flatten()
}
