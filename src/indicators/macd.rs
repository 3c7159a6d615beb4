// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// MACD_line = EMA(fast) - EMA(slow)
// Signal    = EMA(signal) applied to the MACD line
// Histogram = MACD_line - Signal
//
// With the 12/26/9 defaults the line is first defined at index 25 and the
// signal/histogram at index 33 (the signal EMA seeds on the first nine
// defined line values).

use super::ema::{calculate_ema, calculate_ema_over};

/// The three aligned MACD series, each `closes.len()` long.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// Compute MACD line, signal line and histogram for `closes`.
pub fn calculate_macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let ema_fast = calculate_ema(closes, fast);
    let ema_slow = calculate_ema(closes, slow);

    let line: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let signal = calculate_ema_over(&line, signal);

    let histogram: Vec<Option<f64>> = line
        .iter()
        .zip(signal.iter())
        .map(|(l, s)| match (l, s) {
            (Some(l), Some(s)) => Some(l - s),
            _ => None,
        })
        .collect();

    MacdSeries {
        line,
        signal,
        histogram,
    }
}
