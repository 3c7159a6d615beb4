// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = EMA_{t-1} + multiplier * (close_t - EMA_{t-1})
//
// The seed at index `period - 1` is the SMA of the first `period` values;
// everything before the seed is undefined.

/// Compute the EMA series for `values` with the given look-back `period`.
///
/// The result always has `values.len()` entries; indices `< period - 1` are
/// `None`.  A zero period or a too-short input yields an all-`None` series.
pub fn calculate_ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let multiplier = 2.0 / (period + 1) as f64;

    // Seed: SMA of the first `period` values.
    let mut ema: f64 = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(ema);

    for i in period..values.len() {
        ema += multiplier * (values[i] - ema);
        out[i] = Some(ema);
    }

    out
}

/// EMA over an Option-valued series, used for the MACD signal line.
///
/// The fold starts at the first defined input entry: the seed is the SMA of
/// the first `period` defined values (which are contiguous for every series
/// this engine produces), and the recurrence runs from there.  Entries before
/// the seed are `None`.
pub fn calculate_ema_over(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }

    let Some(start) = values.iter().position(|v| v.is_some()) else {
        return out;
    };
    let seed_end = start + period; // exclusive
    if seed_end > values.len() || values[start..seed_end].iter().any(|v| v.is_none()) {
        return out;
    }

    let multiplier = 2.0 / (period + 1) as f64;
    let mut ema: f64 = values[start..seed_end]
        .iter()
        .map(|v| v.unwrap())
        .sum::<f64>()
        / period as f64;
    out[seed_end - 1] = Some(ema);

    for i in seed_end..values.len() {
        match values[i] {
            Some(v) => {
                ema += multiplier * (v - ema);
                out[i] = Some(ema);
            }
            None => break,
        }
    }

    out
}
