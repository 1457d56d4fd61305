// =============================================================================
// EMA (Exponential Moving Average) Indicator — center-of-mass, bias-adjusted
// =============================================================================
//
// Parameterized by center-of-mass `com`, which fixes the decay factor:
//
//   alpha = 1 / (1 + com)
//
// Each value is the exact weighted average of every close seen so far, with
// weights decaying by (1 - alpha) per step into the past and renormalized by
// the finite weight sum:
//
//   EMA_t = sum_{j=0..t} (1-alpha)^(t-j) * C_j  /  sum_{j=0..t} (1-alpha)^(t-j)
//
// Computed incrementally:
//
//   num_t = C_t + (1-alpha) * num_{t-1}        num_0 = C_0
//   den_t = 1   + (1-alpha) * den_{t-1}        den_0 = 1
//   EMA_t = num_t / den_t
//
// This is NOT the SMA-seeded recursive EMA used for fixed-period averages;
// the renormalization removes the startup bias of that form, so the series
// is defined from the very first close (EMA_0 = C_0) and early values simply
// carry less history. The two forms only agree in the infinite limit.
// =============================================================================

/// Calculate the bias-adjusted EMA series for a slice of closes.
///
/// The result is aligned 1:1 with the input and has no warm-up: every entry
/// is defined, starting with `ema[0] == closes[0]`. A `com` of zero degrades
/// to echoing the input (`alpha == 1` keeps no history).
///
/// A negative or non-finite `com` has no meaningful decay factor; the result
/// is a NaN-filled vector of the input's length so misuse stays visible
/// instead of masquerading as a price.
pub fn calculate_ema(closes: &[f64], com: f64) -> Vec<f64> {
    if !com.is_finite() || com < 0.0 {
        return vec![f64::NAN; closes.len()];
    }

    let decay = com / (1.0 + com); // 1 - alpha

    let mut result = Vec::with_capacity(closes.len());
    let mut num = 0.0;
    let mut den = 0.0;
    for &close in closes {
        num = close + decay * num;
        den = 1.0 + decay * den;
        result.push(num / den);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Direct weighted-average form, quadratic but obviously correct.
    fn reference_ema(closes: &[f64], com: f64) -> Vec<f64> {
        let decay = com / (1.0 + com);
        (0..closes.len())
            .map(|t| {
                let mut num = 0.0;
                let mut den = 0.0;
                for j in 0..=t {
                    let w = decay.powi((t - j) as i32);
                    num += w * closes[j];
                    den += w;
                }
                num / den
            })
            .collect()
    }

    #[test]
    fn test_ema_defined_from_first_close() {
        let closes = [101.5, 99.0, 100.25];
        let ema = calculate_ema(&closes, 21.0);
        assert_eq!(ema.len(), 3);
        assert!(
            (ema[0] - 101.5).abs() < 1e-10,
            "first value must equal the first close, got {}",
            ema[0]
        );
    }

    #[test]
    fn test_ema_matches_weighted_average_form() {
        let closes: Vec<f64> = (0..80)
            .map(|i| 200.0 + (i as f64 * 0.31).cos() * 15.0)
            .collect();
        let ema = calculate_ema(&closes, 21.0);
        let expected = reference_ema(&closes, 21.0);
        for (i, (got, want)) in ema.iter().zip(&expected).enumerate() {
            assert!(
                (got - want).abs() < 1e-9,
                "index {i}: got {got}, expected {want}"
            );
        }
    }

    #[test]
    fn test_ema_constant_series_is_constant() {
        let closes = [100.0; 60];
        let ema = calculate_ema(&closes, 21.0);
        for (i, v) in ema.iter().enumerate() {
            assert!((v - 100.0).abs() < 1e-10, "index {i} drifted to {v}");
        }
    }

    #[test]
    fn test_ema_stays_within_observed_range() {
        let closes = [90.0, 110.0, 95.0, 120.0, 80.0, 105.0];
        let ema = calculate_ema(&closes, 5.0);
        for v in &ema {
            assert!(*v >= 80.0 && *v <= 120.0, "value {v} escaped price range");
        }
    }

    #[test]
    fn test_ema_zero_com_echoes_input() {
        let closes = [3.0, 9.0, 27.0];
        let ema = calculate_ema(&closes, 0.0);
        assert_eq!(ema, vec![3.0, 9.0, 27.0]);
    }

    #[test]
    fn test_ema_tracks_recent_prices_more_with_small_com() {
        // Step series: small com should pull far closer to the new level.
        let mut closes = vec![100.0; 30];
        closes.extend(std::iter::repeat(200.0).take(5));
        let fast = calculate_ema(&closes, 2.0);
        let slow = calculate_ema(&closes, 21.0);
        let last = closes.len() - 1;
        assert!(
            fast[last] > slow[last],
            "fast {} should exceed slow {} after an upward step",
            fast[last],
            slow[last]
        );
    }

    #[test]
    fn test_ema_invalid_com_yields_nan() {
        let closes = [1.0, 2.0];
        let ema = calculate_ema(&closes, -1.0);
        assert_eq!(ema.len(), 2);
        assert!(ema.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_ema_empty_input() {
        assert!(calculate_ema(&[], 21.0).is_empty());
    }
}
