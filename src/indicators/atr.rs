// =============================================================================
// Average True Range (ATR) — Wilder's Smoothing Method
// =============================================================================
//
// ATR measures volatility by decomposing the entire range of a bar.
//
// True Range for each bar (needs the previous close, so TR starts at index 1):
//   TR = max(H - L, |H - prevClose|, |L - prevClose|)
//
// ATR is the Wilder-smoothed average of TR:
//   ATR at index `period` = SMA of the first `period` TR values
//   ATR_t                 = (ATR_{t-1} * (period - 1) + TR_t) / period
//
// Default period: 14, so the first defined entry is index 14.

/// Compute the aligned ATR series from parallel high/low/close slices.
///
/// Indices `< period + 1 - 1 = period` are `None` (one TR per bar after the
/// first, `period` TRs to seed).
pub fn calculate_atr(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let len = closes.len();
    let mut out = vec![None; len];
    if period == 0 || len < period + 1 {
        return out;
    }

    let true_range = |i: usize| -> f64 {
        let hl = highs[i] - lows[i];
        let hc = (highs[i] - closes[i - 1]).abs();
        let lc = (lows[i] - closes[i - 1]).abs();
        hl.max(hc).max(lc)
    };

    // Seed: SMA of the first `period` true ranges (bars 1..=period).
    let period_f = period as f64;
    let mut atr = (1..=period).map(true_range).sum::<f64>() / period_f;
    out[period] = Some(atr);

    for i in (period + 1)..len {
        atr = (atr * (period_f - 1.0) + true_range(i)) / period_f;
        out[i] = Some(atr);
    }

    out
}
