// =============================================================================
// IndicatorComputer — Bar sequence + config → aligned indicator series
// =============================================================================
//
// First pipeline stage.  Pure: no I/O, no shared state.  Every output series
// has exactly `bars.len()` entries, aligned by index with the input, with
// `None` marking the warm-up span (and the zero-range stochastic case).
//
// The SMA/EMA families are keyed by period so the period lists stay
// configurable; iteration order is stable (BTreeMap) so the snapshot key
// order is deterministic.

use std::collections::BTreeMap;

use crate::bar::Bar;
use crate::config::EnrichmentConfig;
use crate::indicators::atr::calculate_atr;
use crate::indicators::bollinger::calculate_bollinger;
use crate::indicators::ema::calculate_ema;
use crate::indicators::macd::calculate_macd;
use crate::indicators::obv::calculate_obv;
use crate::indicators::rsi::calculate_rsi;
use crate::indicators::sma::calculate_sma;
use crate::indicators::stochastic::calculate_stochastic;

/// Every indicator series for one bar sequence, index-aligned with it.
#[derive(Debug, Clone)]
pub struct IndicatorTable {
    pub len: usize,

    /// SMA of close, keyed by period.
    pub sma: BTreeMap<usize, Vec<Option<f64>>>,
    /// EMA of close, keyed by period.
    pub ema: BTreeMap<usize, Vec<Option<f64>>>,

    pub macd_line: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub macd_histogram: Vec<Option<f64>>,

    pub rsi: Vec<Option<f64>>,

    pub upper_band: Vec<Option<f64>>,
    pub middle_band: Vec<Option<f64>>,
    pub lower_band: Vec<Option<f64>>,

    pub percent_k: Vec<Option<f64>>,
    pub percent_d: Vec<Option<f64>>,

    pub atr: Vec<Option<f64>>,

    /// OBV has no warm-up; defined at every index.
    pub obv: Vec<f64>,

    pub volume_ma: Vec<Option<f64>>,
}

/// Compute every indicator series for `bars`.
///
/// A series shorter than an indicator's warm-up simply leaves that indicator
/// fully undefined; this stage never fails on a validated input.
pub fn compute_indicators(bars: &[Bar], config: &EnrichmentConfig) -> IndicatorTable {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

    let mut sma = BTreeMap::new();
    for &period in &config.ma_periods {
        sma.insert(period, calculate_sma(&closes, period));
    }

    let mut ema = BTreeMap::new();
    for &period in &config.ema_periods {
        ema.insert(period, calculate_ema(&closes, period));
    }

    let macd = calculate_macd(&closes, config.macd_fast, config.macd_slow, config.macd_signal);
    let bands = calculate_bollinger(&closes, config.bollinger_period, config.bollinger_num_std);
    let stoch = calculate_stochastic(
        &highs,
        &lows,
        &closes,
        config.stoch_k_period,
        config.stoch_d_period,
    );

    IndicatorTable {
        len: bars.len(),
        sma,
        ema,
        macd_line: macd.line,
        macd_signal: macd.signal,
        macd_histogram: macd.histogram,
        rsi: calculate_rsi(&closes, config.rsi_period),
        upper_band: bands.upper,
        middle_band: bands.middle,
        lower_band: bands.lower,
        percent_k: stoch.percent_k,
        percent_d: stoch.percent_d,
        atr: calculate_atr(&highs, &lows, &closes, config.atr_period),
        obv: calculate_obv(&closes, &volumes),
        volume_ma: calculate_sma(&volumes, config.volume_ma_period),
    }
}
