// =============================================================================
// Rolling Volatility Indicator — sample std deviation of daily returns
// =============================================================================
//
// Built on simple one-period percentage returns:
//
//   r_t = C_t / C_{t-1} - 1            (undefined at t = 0)
//
// Volatility at t is the trailing sample standard deviation (divisor n - 1)
// of the most recent `window` returns:
//
//   vol_t = sqrt( sum (r_i - rbar)^2 / (window - 1) )
//
// Because r_0 does not exist, the first index with a full window of returns
// is `window` itself, one later than an SMA of the same width. A series of
// n closes therefore carries max(0, n - window) defined volatility values.
// =============================================================================

/// One-period percentage returns, aligned 1:1 with the input.
///
/// Entry 0 is `None` (no previous close). A zero previous close also yields
/// `None` rather than an infinite return, and any window containing such an
/// entry stays undefined downstream.
pub fn pct_change(closes: &[f64]) -> Vec<Option<f64>> {
    if closes.is_empty() {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(closes.len());
    result.push(None);
    for i in 1..closes.len() {
        let prev = closes[i - 1];
        if prev == 0.0 {
            result.push(None);
        } else {
            result.push(Some(closes[i] / prev - 1.0));
        }
    }
    result
}

/// Calculate the rolling return volatility for a slice of closes.
///
/// The result is aligned 1:1 with the input: entry `i` is `Some(std)` once
/// the trailing window of returns ending at `i` is fully populated
/// (`i >= window`) and `None` before that.
///
/// A window below 2 cannot support a sample deviation (divisor `window - 1`),
/// so it yields an all-`None` vector of the input's length.
pub fn calculate_volatility(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let returns = pct_change(closes);
    rolling_sample_std(&returns, window)
}

/// Trailing sample standard deviation over an `Option` series. A window with
/// any missing entry is itself undefined.
fn rolling_sample_std(series: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let n = series.len();
    if window < 2 || n < window {
        return vec![None; n];
    }

    let mut result = vec![None; n];
    for i in (window - 1)..n {
        let values: Vec<f64> = series[i + 1 - window..=i]
            .iter()
            .copied()
            .flatten()
            .collect();
        if values.len() < window {
            continue;
        }
        let mean = values.iter().sum::<f64>() / window as f64;
        let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        result[i] = Some((sum_sq / (window - 1) as f64).sqrt());
    }
    result
}
