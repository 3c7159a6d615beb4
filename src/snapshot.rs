// =============================================================================
// SnapshotExtractor — enriched table → flat last-row result
// =============================================================================
//
// Third pipeline stage: a pure projection of the final index of every series
// into one flat string-keyed mapping, plus the ticker and the ISO date of the
// last bar.  It never re-derives or re-validates indicator math.
//
// Undefined last-row entries appear as `Null` — a short history gives a
// partial snapshot, never an error.  Downstream consumers see only this
// mapping, never the intermediate series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::bar::Bar;
use crate::compute::IndicatorTable;
use crate::config::EnrichmentConfig;
use crate::error::EnrichError;
use crate::events::EventTable;

/// One scalar cell of the snapshot mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl SnapshotValue {
    fn from_opt(value: Option<f64>) -> Self {
        match value {
            Some(v) => Self::Number(v),
            None => Self::Null,
        }
    }

    fn from_state(value: Option<&'static str>) -> Self {
        match value {
            Some(s) => Self::Text(s.to_string()),
            None => Self::Null,
        }
    }
}

/// Flat result for the most recent timestamp of one enrichment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ticker: String,
    /// ISO-8601 date of the last bar, no time component.
    pub last_update_date: NaiveDate,
    #[serde(flatten)]
    pub values: BTreeMap<String, SnapshotValue>,
}

impl Snapshot {
    /// Pretty-printed JSON rendition, the shape downstream report builders
    /// consume.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Project the last row of the enriched table into a `Snapshot`.
///
/// Fails only when the series is empty (nothing to project); the pipeline's
/// validation makes that unreachable in normal use.
pub fn extract_snapshot(
    ticker: &str,
    bars: &[Bar],
    table: &IndicatorTable,
    events: &EventTable,
    config: &EnrichmentConfig,
) -> Result<Snapshot, EnrichError> {
    let Some(last_bar) = bars.last() else {
        return Err(EnrichError::EmptySeries);
    };
    let i = bars.len() - 1;
    let mut values = BTreeMap::new();

    // --- Raw OHLCV of the last bar ------------------------------------------
    values.insert("Open".into(), SnapshotValue::Number(last_bar.open));
    values.insert("High".into(), SnapshotValue::Number(last_bar.high));
    values.insert("Low".into(), SnapshotValue::Number(last_bar.low));
    values.insert("Close".into(), SnapshotValue::Number(last_bar.close));
    values.insert("Volume".into(), SnapshotValue::Number(last_bar.volume));

    // --- Indicators ---------------------------------------------------------
    for (&period, series) in &table.sma {
        values.insert(format!("{period}_MA"), SnapshotValue::from_opt(series[i]));
    }
    for (&period, series) in &table.ema {
        values.insert(format!("{period}_EMA"), SnapshotValue::from_opt(series[i]));
    }
    values.insert("MACD".into(), SnapshotValue::from_opt(table.macd_line[i]));
    values.insert(
        "Signal_Line".into(),
        SnapshotValue::from_opt(table.macd_signal[i]),
    );
    values.insert(
        "MACD_Histogram".into(),
        SnapshotValue::from_opt(table.macd_histogram[i]),
    );
    values.insert("RSI".into(), SnapshotValue::from_opt(table.rsi[i]));
    values.insert(
        "Upper_Band".into(),
        SnapshotValue::from_opt(table.upper_band[i]),
    );
    values.insert(
        "Middle_Band".into(),
        SnapshotValue::from_opt(table.middle_band[i]),
    );
    values.insert(
        "Lower_Band".into(),
        SnapshotValue::from_opt(table.lower_band[i]),
    );
    values.insert("%K".into(), SnapshotValue::from_opt(table.percent_k[i]));
    values.insert("%D".into(), SnapshotValue::from_opt(table.percent_d[i]));
    values.insert("ATR".into(), SnapshotValue::from_opt(table.atr[i]));
    values.insert("OBV".into(), SnapshotValue::Number(table.obv[i]));
    values.insert(
        "Volume_MA".into(),
        SnapshotValue::from_opt(table.volume_ma[i]),
    );

    // --- MA crossovers (only for pairs the config can form) -----------------
    if let Some(series) = &events.golden_cross {
        values.insert("Golden_Cross_50_200".into(), SnapshotValue::Bool(series[i]));
    }
    if let Some(series) = &events.death_cross {
        values.insert("Death_Cross_50_200".into(), SnapshotValue::Bool(series[i]));
    }
    if let Some(series) = &events.short_term_bullish_cross {
        values.insert(
            "Short_Term_Bullish_Cross_20_50".into(),
            SnapshotValue::Bool(series[i]),
        );
    }
    if let Some(series) = &events.short_term_bearish_cross {
        values.insert(
            "Short_Term_Bearish_Cross_20_50".into(),
            SnapshotValue::Bool(series[i]),
        );
    }

    // --- Per-MA features ----------------------------------------------------
    for (&period, series) in &events.price_above_ma {
        values.insert(
            format!("Price_Above_{period}_MA"),
            SnapshotValue::Bool(series[i]),
        );
    }
    for (&period, series) in &events.price_below_ma {
        values.insert(
            format!("Price_Below_{period}_MA"),
            SnapshotValue::Bool(series[i]),
        );
    }
    for (&period, series) in &events.pct_diff_vs_ma {
        values.insert(
            format!("Pct_Diff_Price_vs_{period}_MA"),
            SnapshotValue::from_opt(series[i]),
        );
    }
    let lookback = config.slope_lookback;
    for (&period, series) in &events.ma_slope {
        values.insert(
            format!("Slope_{period}_MA_{lookback}d"),
            SnapshotValue::from_state(series[i].map(|s| s.as_str())),
        );
    }

    // --- RSI ----------------------------------------------------------------
    values.insert(
        "RSI_Oversold".into(),
        SnapshotValue::Bool(events.rsi_oversold[i]),
    );
    values.insert(
        "RSI_Overbought".into(),
        SnapshotValue::Bool(events.rsi_overbought[i]),
    );
    values.insert(
        "RSI_State".into(),
        SnapshotValue::from_state(events.rsi_state[i].map(|s| s.as_str())),
    );
    values.insert(
        format!("RSI_Trending_Up_{lookback}d"),
        SnapshotValue::Bool(events.rsi_trending_up[i]),
    );
    values.insert(
        format!("RSI_Trending_Down_{lookback}d"),
        SnapshotValue::Bool(events.rsi_trending_down[i]),
    );

    // --- MACD events --------------------------------------------------------
    values.insert(
        "MACD_Bullish_Cross".into(),
        SnapshotValue::Bool(events.macd_bullish_cross[i]),
    );
    values.insert(
        "MACD_Bearish_Cross".into(),
        SnapshotValue::Bool(events.macd_bearish_cross[i]),
    );
    values.insert(
        "MACD_Histogram_State".into(),
        SnapshotValue::from_state(events.macd_histogram_state[i].map(|s| s.as_str())),
    );

    // --- Bollinger events ---------------------------------------------------
    values.insert(
        "Price_Above_Upper_Band".into(),
        SnapshotValue::Bool(events.price_above_upper_band[i]),
    );
    values.insert(
        "Price_Below_Lower_Band".into(),
        SnapshotValue::Bool(events.price_below_lower_band[i]),
    );
    values.insert(
        "Bollinger_Squeeze".into(),
        SnapshotValue::Bool(events.bollinger_squeeze[i]),
    );
    values.insert(
        "Bollinger_Band_Width_Pct".into(),
        SnapshotValue::from_opt(events.band_width_pct[i]),
    );

    // --- Stochastic events --------------------------------------------------
    values.insert(
        "Stoch_Oversold".into(),
        SnapshotValue::Bool(events.stoch_oversold[i]),
    );
    values.insert(
        "Stoch_Overbought".into(),
        SnapshotValue::Bool(events.stoch_overbought[i]),
    );
    values.insert(
        "Stoch_Bullish_Cross".into(),
        SnapshotValue::Bool(events.stoch_bullish_cross[i]),
    );
    values.insert(
        "Stoch_Bearish_Cross".into(),
        SnapshotValue::Bool(events.stoch_bearish_cross[i]),
    );

    // --- Volume / ATR -------------------------------------------------------
    values.insert(
        "Volume_Spike".into(),
        SnapshotValue::Bool(events.volume_spike[i]),
    );
    values.insert("ATR_Pct".into(), SnapshotValue::from_opt(events.atr_pct[i]));

    Ok(Snapshot {
        ticker: ticker.to_string(),
        last_update_date: last_bar.timestamp.date_naive(),
        values,
    })
}
