// =============================================================================
// Stochastic Oscillator (Fast %K / %D)
// =============================================================================
//
// %K = 100 * (close - lowestLow(n)) / (highestHigh(n) - lowestLow(n))
// %D = SMA(%K, smoothing)
//
// Degenerate policy: when the high-low range over the window is exactly zero
// the ratio has no meaning, so %K is undefined at that index (never divided).
// %D inherits the gap: it is only defined when every %K entry in its
// smoothing window is defined.

use super::sma::calculate_sma_over;

/// The two aligned oscillator series, each input-length long.
#[derive(Debug, Clone)]
pub struct StochasticSeries {
    pub percent_k: Vec<Option<f64>>,
    pub percent_d: Vec<Option<f64>>,
}

/// Compute fast %K over `k_period` and %D as its `d_period` SMA.
///
/// The three input slices must be equal-length (one entry per bar).
pub fn calculate_stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    k_period: usize,
    d_period: usize,
) -> StochasticSeries {
    let len = closes.len();
    let mut percent_k = vec![None; len];

    if k_period > 0 && len >= k_period {
        for i in (k_period - 1)..len {
            let window = i + 1 - k_period..=i;
            let highest = highs[window.clone()]
                .iter()
                .fold(f64::NEG_INFINITY, |a, &b| a.max(b));
            let lowest = lows[window].iter().fold(f64::INFINITY, |a, &b| a.min(b));

            let range = highest - lowest;
            if range > 0.0 {
                percent_k[i] = Some(100.0 * (closes[i] - lowest) / range);
            }
        }
    }

    let percent_d = calculate_sma_over(&percent_k, d_period);

    StochasticSeries {
        percent_k,
        percent_d,
    }
}
