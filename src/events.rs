// =============================================================================
// EventDeriver — indicator series + config → event/state series
// =============================================================================
//
// Second pipeline stage.  Row-wise rules over the indicator table, several of
// which also consult the immediately preceding row (the one-step lookback for
// crossovers and spikes).  Rules never re-derive indicator math: the previous
// row is read from the already-computed series.
//
// Undefined propagation: any boolean that needs an undefined operand is
// `false`; categorical states become `None`.  A crossover needs all four of
// (fast, slow) x (previous, current) defined or it is `false`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bar::Bar;
use crate::compute::IndicatorTable;
use crate::config::EnrichmentConfig;

/// MA pair for the golden/death cross.
const LONG_CROSS_PAIR: (usize, usize) = (50, 200);
/// MA pair for the short-term bullish/bearish cross.
const SHORT_CROSS_PAIR: (usize, usize) = (20, 50);

// =============================================================================
// Categorical states
// =============================================================================

/// Three-way RSI classification.  Threshold boundaries belong to Neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiState {
    Oversold,
    Overbought,
    Neutral,
}

impl RsiState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Oversold => "Oversold",
            Self::Overbought => "Overbought",
            Self::Neutral => "Neutral",
        }
    }
}

/// Four-way MACD histogram state: sign of the histogram combined with the
/// sign of its first difference.  Zero histogram or zero difference has no
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistogramState {
    PositiveIncreasing,
    PositiveDecreasing,
    NegativeIncreasing,
    NegativeDecreasing,
}

impl HistogramState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PositiveIncreasing => "Positive_Increasing",
            Self::PositiveDecreasing => "Positive_Decreasing",
            Self::NegativeIncreasing => "Negative_Increasing",
            Self::NegativeDecreasing => "Negative_Decreasing",
        }
    }
}

/// Sign of an MA's lookback first-difference.  Flat when neither strict
/// inequality holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slope {
    Positive,
    Negative,
    Flat,
}

impl Slope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Flat => "Flat",
        }
    }
}

// =============================================================================
// EventTable
// =============================================================================

/// Every event/state series, index-aligned with the bar sequence.
///
/// The crossover series are `None` (absent, not all-false) when the
/// configured SMA set lacks one of the pair's periods.
#[derive(Debug, Clone)]
pub struct EventTable {
    // --- MA crossovers ------------------------------------------------------
    pub golden_cross: Option<Vec<bool>>,
    pub death_cross: Option<Vec<bool>>,
    pub short_term_bullish_cross: Option<Vec<bool>>,
    pub short_term_bearish_cross: Option<Vec<bool>>,

    // --- Price vs MA, keyed by period ---------------------------------------
    pub price_above_ma: BTreeMap<usize, Vec<bool>>,
    pub price_below_ma: BTreeMap<usize, Vec<bool>>,

    // --- RSI ----------------------------------------------------------------
    pub rsi_oversold: Vec<bool>,
    pub rsi_overbought: Vec<bool>,
    pub rsi_state: Vec<Option<RsiState>>,
    pub rsi_trending_up: Vec<bool>,
    pub rsi_trending_down: Vec<bool>,

    // --- MACD ---------------------------------------------------------------
    pub macd_bullish_cross: Vec<bool>,
    pub macd_bearish_cross: Vec<bool>,
    pub macd_histogram_state: Vec<Option<HistogramState>>,

    // --- Bollinger ----------------------------------------------------------
    pub price_above_upper_band: Vec<bool>,
    pub price_below_lower_band: Vec<bool>,
    pub bollinger_squeeze: Vec<bool>,
    pub band_width_pct: Vec<Option<f64>>,

    // --- Stochastic ---------------------------------------------------------
    pub stoch_oversold: Vec<bool>,
    pub stoch_overbought: Vec<bool>,
    pub stoch_bullish_cross: Vec<bool>,
    pub stoch_bearish_cross: Vec<bool>,

    // --- Volume -------------------------------------------------------------
    pub volume_spike: Vec<bool>,

    // --- Relative features --------------------------------------------------
    pub pct_diff_vs_ma: BTreeMap<usize, Vec<Option<f64>>>,
    pub atr_pct: Vec<Option<f64>>,

    // --- MA slopes, keyed by period -----------------------------------------
    pub ma_slope: BTreeMap<usize, Vec<Option<Slope>>>,
}

// =============================================================================
// Row-rule helpers
// =============================================================================

/// Strict upward flip of `fast` over `slow` between consecutive indices.
/// Requires all four operands defined; index 0 is always false.
fn cross_above(fast: &[Option<f64>], slow: &[Option<f64>]) -> Vec<bool> {
    let mut out = vec![false; fast.len()];
    for i in 1..fast.len() {
        if let (Some(f), Some(s), Some(pf), Some(ps)) = (fast[i], slow[i], fast[i - 1], slow[i - 1])
        {
            out[i] = f > s && pf <= ps;
        }
    }
    out
}

/// Mirror of `cross_above`.
fn cross_below(fast: &[Option<f64>], slow: &[Option<f64>]) -> Vec<bool> {
    let mut out = vec![false; fast.len()];
    for i in 1..fast.len() {
        if let (Some(f), Some(s), Some(pf), Some(ps)) = (fast[i], slow[i], fast[i - 1], slow[i - 1])
        {
            out[i] = f < s && pf >= ps;
        }
    }
    out
}

/// Upward and downward cross series for an SMA pair, or `(None, None)` when
/// the configured SMA set cannot form the pair.
fn sma_cross_pair(
    table: &IndicatorTable,
    (fast, slow): (usize, usize),
) -> (Option<Vec<bool>>, Option<Vec<bool>>) {
    match (table.sma.get(&fast), table.sma.get(&slow)) {
        (Some(fast), Some(slow)) => (Some(cross_above(fast, slow)), Some(cross_below(fast, slow))),
        _ => (None, None),
    }
}

/// Sign of `series[i] - series[i - lookback]`, `true` only for a strict
/// comparison on two defined operands.
fn lookback_diff_sign(series: &[Option<f64>], lookback: usize, positive: bool) -> Vec<bool> {
    let mut out = vec![false; series.len()];
    for i in lookback..series.len() {
        if let (Some(curr), Some(prev)) = (series[i], series[i - lookback]) {
            let diff = curr - prev;
            out[i] = if positive { diff > 0.0 } else { diff < 0.0 };
        }
    }
    out
}

// =============================================================================
// EventDeriver
// =============================================================================

/// Derive every event/state series from the indicator table.
///
/// Pure and deterministic; consumes the whole table produced by the previous
/// stage plus the raw bars (for close/volume comparisons).
pub fn derive_events(bars: &[Bar], table: &IndicatorTable, config: &EnrichmentConfig) -> EventTable {
    let len = table.len;

    // --- 1. MA crossovers ---------------------------------------------------
    let (golden_cross, death_cross) = sma_cross_pair(table, LONG_CROSS_PAIR);
    let (short_term_bullish_cross, short_term_bearish_cross) =
        sma_cross_pair(table, SHORT_CROSS_PAIR);

    // --- 2. Price vs MA + relative features + slopes ------------------------
    let mut price_above_ma = BTreeMap::new();
    let mut price_below_ma = BTreeMap::new();
    let mut pct_diff_vs_ma = BTreeMap::new();
    let mut ma_slope = BTreeMap::new();

    for (&period, series) in &table.sma {
        let mut above = vec![false; len];
        let mut below = vec![false; len];
        let mut pct_diff = vec![None; len];
        let mut slope = vec![None; len];

        for i in 0..len {
            let close = bars[i].close;
            if let Some(ma) = series[i] {
                above[i] = close > ma;
                below[i] = close < ma;
                if ma != 0.0 {
                    pct_diff[i] = Some((close - ma) / ma * 100.0);
                }
            }
            if i >= config.slope_lookback {
                if let (Some(curr), Some(prev)) = (series[i], series[i - config.slope_lookback]) {
                    slope[i] = Some(if curr > prev {
                        Slope::Positive
                    } else if curr < prev {
                        Slope::Negative
                    } else {
                        Slope::Flat
                    });
                }
            }
        }

        price_above_ma.insert(period, above);
        price_below_ma.insert(period, below);
        pct_diff_vs_ma.insert(period, pct_diff);
        ma_slope.insert(period, slope);
    }

    // --- 3. RSI states ------------------------------------------------------
    let rsi_state: Vec<Option<RsiState>> = table
        .rsi
        .iter()
        .map(|v| {
            v.map(|rsi| {
                if rsi < config.rsi_oversold_threshold {
                    RsiState::Oversold
                } else if rsi > config.rsi_overbought_threshold {
                    RsiState::Overbought
                } else {
                    RsiState::Neutral
                }
            })
        })
        .collect();
    let rsi_oversold: Vec<bool> = rsi_state
        .iter()
        .map(|s| *s == Some(RsiState::Oversold))
        .collect();
    let rsi_overbought: Vec<bool> = rsi_state
        .iter()
        .map(|s| *s == Some(RsiState::Overbought))
        .collect();

    // --- 4. MACD events -----------------------------------------------------
    let macd_histogram_state: Vec<Option<HistogramState>> = (0..len)
        .map(|i| {
            let curr = table.macd_histogram[i]?;
            let prev = table.macd_histogram[i.checked_sub(1)?]?;
            let diff = curr - prev;
            match (curr > 0.0, curr < 0.0, diff > 0.0, diff < 0.0) {
                (true, _, true, _) => Some(HistogramState::PositiveIncreasing),
                (true, _, _, true) => Some(HistogramState::PositiveDecreasing),
                (_, true, true, _) => Some(HistogramState::NegativeIncreasing),
                (_, true, _, true) => Some(HistogramState::NegativeDecreasing),
                _ => None, // zero histogram or zero first-difference
            }
        })
        .collect();

    // --- 5. Bollinger events ------------------------------------------------
    let mut price_above_upper_band = vec![false; len];
    let mut price_below_lower_band = vec![false; len];
    let mut bollinger_squeeze = vec![false; len];
    let mut band_width_pct = vec![None; len];

    for i in 0..len {
        if let Some(upper) = table.upper_band[i] {
            price_above_upper_band[i] = bars[i].close > upper;
        }
        if let Some(lower) = table.lower_band[i] {
            price_below_lower_band[i] = bars[i].close < lower;
        }
        if let (Some(upper), Some(middle), Some(lower)) =
            (table.upper_band[i], table.middle_band[i], table.lower_band[i])
        {
            if middle != 0.0 {
                let width = (upper - lower) / middle;
                bollinger_squeeze[i] = width < config.bollinger_squeeze_threshold_pct;
                band_width_pct[i] = Some(width * 100.0);
            }
        }
    }

    // --- 6. Stochastic events -----------------------------------------------
    let stoch_oversold: Vec<bool> = table
        .percent_k
        .iter()
        .map(|k| k.is_some_and(|k| k < config.stoch_oversold_threshold))
        .collect();
    let stoch_overbought: Vec<bool> = table
        .percent_k
        .iter()
        .map(|k| k.is_some_and(|k| k > config.stoch_overbought_threshold))
        .collect();

    // %K/%D crosses are zone-gated: the previous %K must sit in the
    // confirmation zone, which suppresses crosses in the middle of the range.
    // A raw cross already implies the previous row is defined and never
    // fires at index 0, so only the zone check remains.
    let raw_bull = cross_above(&table.percent_k, &table.percent_d);
    let raw_bear = cross_below(&table.percent_k, &table.percent_d);
    let stoch_bullish_cross: Vec<bool> = raw_bull
        .iter()
        .enumerate()
        .map(|(i, &crossed)| {
            crossed
                && table.percent_k[i - 1].is_some_and(|k| k < config.stoch_cross_oversold_zone)
        })
        .collect();
    let stoch_bearish_cross: Vec<bool> = raw_bear
        .iter()
        .enumerate()
        .map(|(i, &crossed)| {
            crossed
                && table.percent_k[i - 1].is_some_and(|k| k > config.stoch_cross_overbought_zone)
        })
        .collect();

    // --- 7. Volume spikes ---------------------------------------------------
    let volume_spike: Vec<bool> = (0..len)
        .map(|i| {
            table.volume_ma[i]
                .is_some_and(|ma| bars[i].volume > ma * config.volume_spike_multiplier)
        })
        .collect();

    // --- 8. ATR as percent of close -----------------------------------------
    let atr_pct: Vec<Option<f64>> = (0..len)
        .map(|i| {
            let atr = table.atr[i]?;
            let close = bars[i].close;
            if close == 0.0 {
                None
            } else {
                Some(atr / close * 100.0)
            }
        })
        .collect();

    EventTable {
        golden_cross,
        death_cross,
        short_term_bullish_cross,
        short_term_bearish_cross,
        price_above_ma,
        price_below_ma,
        rsi_oversold,
        rsi_overbought,
        rsi_state,
        rsi_trending_up: lookback_diff_sign(&table.rsi, config.slope_lookback, true),
        rsi_trending_down: lookback_diff_sign(&table.rsi, config.slope_lookback, false),
        macd_bullish_cross: cross_above(&table.macd_line, &table.macd_signal),
        macd_bearish_cross: cross_below(&table.macd_line, &table.macd_signal),
        macd_histogram_state,
        price_above_upper_band,
        price_below_lower_band,
        bollinger_squeeze,
        band_width_pct,
        stoch_oversold,
        stoch_overbought,
        stoch_bullish_cross,
        stoch_bearish_cross,
        volume_spike,
        pct_diff_vs_ma,
        atr_pct,
        ma_slope,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::compute_indicators;
    use chrono::{TimeZone, Utc};

    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar {
                timestamp: Utc
                    .timestamp_opt(1_700_000_000 + i as i64 * 86_400, 0)
                    .unwrap(),
                open: c,
                high: c + 1.0,
                low: c - 1.0,
                close: c,
                volume: 1000.0,
            })
            .collect()
    }

    fn small_config() -> EnrichmentConfig {
        EnrichmentConfig {
            ma_periods: vec![3, 5],
            ema_periods: vec![3, 5],
            ..EnrichmentConfig::default()
        }
    }

    #[test]
    fn cross_above_requires_strict_flip() {
        let fast = vec![Some(1.0), Some(2.0), Some(3.0), Some(3.0)];
        let slow = vec![Some(2.0), Some(2.0), Some(2.5), Some(2.5)];
        let crosses = cross_above(&fast, &slow);
        // i=1: fast 2.0 not > slow 2.0 => false.
        // i=2: fast 3.0 > 2.5 and prev fast 2.0 <= prev slow 2.0 => true.
        // i=3: still above, no flip => false.
        assert_eq!(crosses, vec![false, false, true, false]);
    }

    #[test]
    fn cross_with_undefined_operand_is_false() {
        let fast = vec![None, Some(3.0)];
        let slow = vec![Some(2.0), Some(2.5)];
        assert_eq!(cross_above(&fast, &slow), vec![false, false]);
        let fast = vec![Some(3.0), None];
        assert_eq!(cross_below(&fast, &slow), vec![false, false]);
    }

    #[test]
    fn crossover_exclusivity() {
        // Oscillating closes force repeated 20/50 SMA flips; the bullish and
        // bearish cross must never fire together.
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.9).sin() * 10.0).collect();
        let bars = bars_from_closes(&closes);
        let cfg = EnrichmentConfig {
            ma_periods: vec![20, 50],
            ..small_config()
        };
        let table = compute_indicators(&bars, &cfg);
        let events = derive_events(&bars, &table, &cfg);

        let bull = events.short_term_bullish_cross.unwrap();
        let bear = events.short_term_bearish_cross.unwrap();
        for i in 0..60 {
            assert!(!(bull[i] && bear[i]), "both crosses fired at {i}");
        }
        // 50/200 pair is absent from this config.
        assert!(events.golden_cross.is_none());
        assert!(events.death_cross.is_none());
    }

    #[test]
    fn rsi_boundary_is_neutral() {
        // Drive classification directly via the threshold: the rule is
        // strict-inequality, so the boundary value itself is Neutral.
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 1.3).sin() * 5.0).collect();
        let bars = bars_from_closes(&closes);
        let cfg = small_config();
        let table = compute_indicators(&bars, &cfg);

        // Pick a defined RSI value and set the oversold threshold exactly to
        // it: the state at that index must be Neutral, not Oversold.
        let (idx, rsi_val) = table
            .rsi
            .iter()
            .enumerate()
            .find_map(|(i, v)| v.map(|v| (i, v)))
            .unwrap();
        let cfg_exact = EnrichmentConfig {
            rsi_oversold_threshold: rsi_val,
            rsi_overbought_threshold: 200.0, // keep Overbought out of reach
            ..cfg.clone()
        };
        let events = derive_events(&bars, &table, &cfg_exact);
        assert_eq!(events.rsi_state[idx], Some(RsiState::Neutral));
        assert!(!events.rsi_oversold[idx]);

        // Nudge the threshold above the value: now it is Oversold.
        let cfg_above = EnrichmentConfig {
            rsi_oversold_threshold: rsi_val + 0.001,
            rsi_overbought_threshold: 200.0,
            ..cfg
        };
        let events = derive_events(&bars, &table, &cfg_above);
        assert_eq!(events.rsi_state[idx], Some(RsiState::Oversold));
    }

    #[test]
    fn rsi_state_undefined_during_warmup() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let bars = bars_from_closes(&closes);
        let cfg = small_config();
        let table = compute_indicators(&bars, &cfg);
        let events = derive_events(&bars, &table, &cfg);
        for i in 0..cfg.rsi_period {
            assert_eq!(events.rsi_state[i], None);
        }
    }

    #[test]
    fn volume_spike_fires_on_genuine_spike() {
        let closes = vec![100.0; 25];
        let mut bars = bars_from_closes(&closes);
        let cfg = small_config();

        // Constant volume 1000, one bar at 5000: its own window's MA is
        // (19 * 1000 + 5000) / 20 = 1200, and 5000 > 2400.
        bars[24].volume = 5000.0;
        let table = compute_indicators(&bars, &cfg);
        let events = derive_events(&bars, &table, &cfg);
        assert!(events.volume_spike[24]);
        assert!(!events.volume_spike[23]);
    }

    #[test]
    fn volume_spike_exact_boundary_not_a_spike() {
        // MA(2) keeps the arithmetic exact: window (1000, 3000) gives MA
        // 2000, and 3000 == 2000 * 1.5 must NOT count (strict inequality).
        let closes = vec![100.0; 10];
        let mut bars = bars_from_closes(&closes);
        let cfg = EnrichmentConfig {
            volume_ma_period: 2,
            volume_spike_multiplier: 1.5,
            ..small_config()
        };
        bars[9].volume = 3000.0;
        let table = compute_indicators(&bars, &cfg);
        assert_eq!(table.volume_ma[9], Some(2000.0));
        let events = derive_events(&bars, &table, &cfg);
        assert!(!events.volume_spike[9]);

        // Just above the boundary it is a spike: MA = 2002, threshold 3003.
        bars[9].volume = 3004.0;
        let table = compute_indicators(&bars, &cfg);
        let events = derive_events(&bars, &table, &cfg);
        assert!(events.volume_spike[9]);
    }

    #[test]
    fn macd_histogram_state_combines_sign_and_diff() {
        let hist = vec![None, Some(1.0), Some(2.0), Some(1.5), Some(-0.5), Some(-1.0), Some(-0.2)];
        let closes = vec![100.0; 7];
        let bars = bars_from_closes(&closes);
        let cfg = small_config();
        let mut table = compute_indicators(&bars, &cfg);
        table.macd_histogram = hist;
        let events = derive_events(&bars, &table, &cfg);

        assert_eq!(events.macd_histogram_state[0], None);
        assert_eq!(events.macd_histogram_state[1], None); // prev undefined
        assert_eq!(
            events.macd_histogram_state[2],
            Some(HistogramState::PositiveIncreasing)
        );
        assert_eq!(
            events.macd_histogram_state[3],
            Some(HistogramState::PositiveDecreasing)
        );
        assert_eq!(
            events.macd_histogram_state[4],
            Some(HistogramState::NegativeDecreasing)
        );
        assert_eq!(
            events.macd_histogram_state[5],
            Some(HistogramState::NegativeDecreasing)
        );
        assert_eq!(
            events.macd_histogram_state[6],
            Some(HistogramState::NegativeIncreasing)
        );
    }

    #[test]
    fn bollinger_squeeze_on_flat_series() {
        let closes = vec![100.0; 30];
        let bars = bars_from_closes(&closes);
        let cfg = small_config();
        let table = compute_indicators(&bars, &cfg);
        let events = derive_events(&bars, &table, &cfg);

        let i = 29; // past the 20-bar band warm-up
        assert_eq!(events.band_width_pct[i], Some(0.0));
        assert!(events.bollinger_squeeze[i]);
    }

    #[test]
    fn stoch_cross_is_zone_gated() {
        let closes = vec![100.0; 12];
        let bars = bars_from_closes(&closes);
        let cfg = small_config();
        let mut table = compute_indicators(&bars, &cfg);

        // Hand-built %K/%D: a bullish flip at i=6 from %K=25 (inside the
        // oversold confirmation zone) and another at i=10 from %K=50
        // (mid-range, must be suppressed).
        table.percent_k = vec![
            None,
            None,
            None,
            None,
            None,
            Some(25.0),
            Some(45.0),
            Some(48.0),
            Some(49.0),
            Some(50.0),
            Some(60.0),
            Some(55.0),
        ];
        table.percent_d = vec![
            None,
            None,
            None,
            None,
            None,
            Some(30.0),
            Some(40.0),
            Some(49.0),
            Some(50.0),
            Some(52.0),
            Some(55.0),
            Some(58.0),
        ];
        let events = derive_events(&bars, &table, &cfg);

        assert!(events.stoch_bullish_cross[6], "zone-confirmed cross must fire");
        assert!(
            !events.stoch_bullish_cross[10],
            "mid-range cross must be suppressed"
        );
    }

    #[test]
    fn stoch_bearish_cross_requires_overbought_zone() {
        let closes = vec![100.0; 12];
        let bars = bars_from_closes(&closes);
        let cfg = small_config();
        let mut table = compute_indicators(&bars, &cfg);

        // Downward %K/%D flip at i=6 from %K=80 (above the overbought
        // confirmation zone) and another at i=10 from %K=50 (mid-range,
        // must be suppressed).
        table.percent_k = vec![
            None,
            None,
            None,
            None,
            None,
            Some(80.0),
            Some(60.0),
            Some(55.0),
            Some(52.0),
            Some(50.0),
            Some(40.0),
            Some(45.0),
        ];
        table.percent_d = vec![
            None,
            None,
            None,
            None,
            None,
            Some(75.0),
            Some(65.0),
            Some(60.0),
            Some(55.0),
            Some(48.0),
            Some(45.0),
            Some(44.0),
        ];
        let events = derive_events(&bars, &table, &cfg);

        assert!(events.stoch_bearish_cross[6], "zone-confirmed cross must fire");
        assert!(
            !events.stoch_bearish_cross[10],
            "mid-range cross must be suppressed"
        );
        assert!(
            !events.stoch_bullish_cross.iter().any(|&b| b),
            "upward flips here all start mid-range, so none may fire"
        );
    }

    #[test]
    fn slope_flat_and_signs() {
        let closes = vec![100.0; 20];
        let bars = bars_from_closes(&closes);
        let cfg = small_config();
        let table = compute_indicators(&bars, &cfg);
        let events = derive_events(&bars, &table, &cfg);

        // Constant series: every defined slope is Flat, warm-up span is None.
        let slope = &events.ma_slope[&3];
        assert_eq!(slope[2], None); // lookback row still undefined
        for i in (2 + cfg.slope_lookback)..20 {
            assert_eq!(slope[i], Some(Slope::Flat));
        }

        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let bars = bars_from_closes(&closes);
        let table = compute_indicators(&bars, &cfg);
        let events = derive_events(&bars, &table, &cfg);
        assert_eq!(events.ma_slope[&3][19], Some(Slope::Positive));
    }

    #[test]
    fn pct_diff_and_atr_pct_guard_zero_denominators() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let bars = bars_from_closes(&closes);
        let cfg = small_config();
        let table = compute_indicators(&bars, &cfg);
        let events = derive_events(&bars, &table, &cfg);

        // Normal case: defined and consistent.
        let i = 29;
        let ma = table.sma[&5][i].unwrap();
        let expected = (bars[i].close - ma) / ma * 100.0;
        assert!((events.pct_diff_vs_ma[&5][i].unwrap() - expected).abs() < 1e-10);

        let atr = table.atr[i].unwrap();
        let expected = atr / bars[i].close * 100.0;
        assert!((events.atr_pct[i].unwrap() - expected).abs() < 1e-10);
    }
}
