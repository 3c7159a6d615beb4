// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Middle band = SMA(period) of close.
// Upper/lower = middle ± num_std * σ, where σ is the population standard
// deviation of the same trailing window.
//
// All three bands share the SMA warm-up: undefined for indices < period - 1.
// The width ratio ((upper - lower) / middle) belongs to the event stage; it
// is not computed here.

use super::sma::calculate_sma;

/// The three aligned band series, each `closes.len()` long.
#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Compute Bollinger Bands for `closes` with the given window and band width.
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> BollingerSeries {
    let middle = calculate_sma(closes, period);
    let mut upper = vec![None; closes.len()];
    let mut lower = vec![None; closes.len()];

    for i in 0..closes.len() {
        let Some(mean) = middle[i] else { continue };
        let window = &closes[i + 1 - period..=i];
        let variance =
            window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period as f64;
        let std_dev = variance.sqrt();

        upper[i] = Some(mean + num_std * std_dev);
        lower[i] = Some(mean - num_std * std_dev);
    }

    BollingerSeries {
        upper,
        middle,
        lower,
    }
}
