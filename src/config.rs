// =============================================================================
// EnrichmentConfig — every period and threshold in one place
// =============================================================================
//
// Central configuration for both pipeline stages.  Every tunable window
// length and threshold lives here so that indicator and event rules share a
// single source of truth, and so tests can override one knob at a time.
//
// All fields carry `#[serde(default = "...")]` so that a caller supplying a
// partial JSON override gets the documented defaults for everything omitted.
// The value is immutable for the lifetime of one `enrich` invocation.
// =============================================================================

use serde::{Deserialize, Serialize};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_ma_periods() -> Vec<usize> {
    vec![20, 50, 100, 200]
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_rsi_period() -> usize {
    14
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_bollinger_period() -> usize {
    20
}

fn default_bollinger_num_std() -> f64 {
    2.0
}

fn default_bollinger_squeeze_threshold_pct() -> f64 {
    0.05
}

fn default_stoch_k_period() -> usize {
    5
}

fn default_stoch_d_period() -> usize {
    3
}

fn default_stoch_oversold() -> f64 {
    20.0
}

fn default_stoch_overbought() -> f64 {
    80.0
}

fn default_stoch_cross_oversold_zone() -> f64 {
    30.0
}

fn default_stoch_cross_overbought_zone() -> f64 {
    70.0
}

fn default_atr_period() -> usize {
    14
}

fn default_volume_ma_period() -> usize {
    20
}

fn default_volume_spike_multiplier() -> f64 {
    2.0
}

fn default_slope_lookback() -> usize {
    5
}

// =============================================================================
// EnrichmentConfig
// =============================================================================

/// All windows and thresholds consumed by the indicator and event stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    // --- Moving averages ----------------------------------------------------
    /// SMA periods; also the periods used for price-vs-MA, percent-diff and
    /// slope features.  Crossover pairs (50/200, 20/50) are emitted only when
    /// both members are present.
    #[serde(default = "default_ma_periods")]
    pub ma_periods: Vec<usize>,

    /// EMA periods.
    #[serde(default = "default_ma_periods")]
    pub ema_periods: Vec<usize>,

    // --- MACD ---------------------------------------------------------------
    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,

    // --- RSI ----------------------------------------------------------------
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    /// RSI strictly below this is Oversold; the boundary itself is Neutral.
    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold_threshold: f64,

    /// RSI strictly above this is Overbought; the boundary itself is Neutral.
    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought_threshold: f64,

    // --- Bollinger Bands ----------------------------------------------------
    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,

    /// Band distance in standard deviations.
    #[serde(default = "default_bollinger_num_std")]
    pub bollinger_num_std: f64,

    /// Squeeze fires when (upper - lower) / middle is strictly below this
    /// ratio (0.05 = 5 %).
    #[serde(default = "default_bollinger_squeeze_threshold_pct")]
    pub bollinger_squeeze_threshold_pct: f64,

    // --- Stochastic oscillator ----------------------------------------------
    #[serde(default = "default_stoch_k_period")]
    pub stoch_k_period: usize,

    #[serde(default = "default_stoch_d_period")]
    pub stoch_d_period: usize,

    #[serde(default = "default_stoch_oversold")]
    pub stoch_oversold_threshold: f64,

    #[serde(default = "default_stoch_overbought")]
    pub stoch_overbought_threshold: f64,

    /// Previous %K must be below this for a bullish %K/%D cross to count.
    #[serde(default = "default_stoch_cross_oversold_zone")]
    pub stoch_cross_oversold_zone: f64,

    /// Previous %K must be above this for a bearish %K/%D cross to count.
    #[serde(default = "default_stoch_cross_overbought_zone")]
    pub stoch_cross_overbought_zone: f64,

    // --- ATR / volume -------------------------------------------------------
    #[serde(default = "default_atr_period")]
    pub atr_period: usize,

    #[serde(default = "default_volume_ma_period")]
    pub volume_ma_period: usize,

    /// A spike requires volume strictly greater than volume-MA times this.
    #[serde(default = "default_volume_spike_multiplier")]
    pub volume_spike_multiplier: f64,

    // --- Slopes / trends ----------------------------------------------------
    /// Lookback (in bars) for MA-slope and RSI-trend first differences.
    #[serde(default = "default_slope_lookback")]
    pub slope_lookback: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            ma_periods: default_ma_periods(),
            ema_periods: default_ma_periods(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            rsi_period: default_rsi_period(),
            rsi_oversold_threshold: default_rsi_oversold(),
            rsi_overbought_threshold: default_rsi_overbought(),
            bollinger_period: default_bollinger_period(),
            bollinger_num_std: default_bollinger_num_std(),
            bollinger_squeeze_threshold_pct: default_bollinger_squeeze_threshold_pct(),
            stoch_k_period: default_stoch_k_period(),
            stoch_d_period: default_stoch_d_period(),
            stoch_oversold_threshold: default_stoch_oversold(),
            stoch_overbought_threshold: default_stoch_overbought(),
            stoch_cross_oversold_zone: default_stoch_cross_oversold_zone(),
            stoch_cross_overbought_zone: default_stoch_cross_overbought_zone(),
            atr_period: default_atr_period(),
            volume_ma_period: default_volume_ma_period(),
            volume_spike_multiplier: default_volume_spike_multiplier(),
            slope_lookback: default_slope_lookback(),
        }
    }
}
