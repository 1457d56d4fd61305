// =============================================================================
// SMA (Simple Moving Average) Indicator
// =============================================================================
//
// Formula:
//   SMA_t = (C_{t-w+1} + C_{t-w+2} + ... + C_t) / w
//
// Trailing window: the value at index t depends only on closes at or before
// t, never on later ones. The window is maintained as a running sum so the
// whole series costs O(n) regardless of window size.
// =============================================================================

/// Calculate the trailing SMA series for a slice of closes.
///
/// The result is aligned 1:1 with the input: entry `i` is `Some(mean)` once a
/// full window exists (`i >= window - 1`) and `None` during warm-up, so a
/// series of `n` closes carries exactly `n - window + 1` defined values.
///
/// A zero window, or an input shorter than the window, yields an all-`None`
/// vector of the input's length.
pub fn calculate_sma(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 || closes.len() < window {
        return vec![None; closes.len()];
    }

    let mut result: Vec<Option<f64>> = Vec::with_capacity(closes.len());
    result.resize(window - 1, None);

    let mut sum: f64 = closes[..window].iter().sum();
    result.push(Some(sum / window as f64));

    for i in window..closes.len() {
        sum += closes[i] - closes[i - window];
        result.push(Some(sum / window as f64));
    }

    result
}
