// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Arithmetic mean of the trailing `period` values ending at the current
// index.  Uses a rolling sum so the whole series is a single O(n) pass.
//
// Also used for volume (the volume-MA feature) and for %D smoothing over an
// already-partial %K series — hence the `calculate_sma_over` variant that
// accepts an Option-valued input.

/// Compute the SMA series for `values` with the given look-back `period`.
///
/// The result always has `values.len()` entries; indices `< period - 1` are
/// `None` (warm-up).  A zero period yields an all-`None` series.
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let mut window_sum: f64 = values[..period].iter().sum();
    out[period - 1] = Some(window_sum / period as f64);

    for i in period..values.len() {
        window_sum += values[i] - values[i - period];
        out[i] = Some(window_sum / period as f64);
    }

    out
}

/// SMA over an Option-valued series: an output entry is defined only when
/// every input entry in its trailing window is defined.
pub fn calculate_sma_over(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    for i in (period - 1)..values.len() {
        let window = &values[i + 1 - period..=i];
        if window.iter().all(|v| v.is_some()) {
            let sum: f64 = window.iter().map(|v| v.unwrap()).sum();
            out[i] = Some(sum / period as f64);
        }
    }

    out
}
