// =============================================================================
// Bar — one OHLCV sample, plus input-contract validation
// =============================================================================
//
// The enrichment pipeline operates on a finite, ordered batch of bars for a
// single instrument.  The input contract (checked by `validate_bars`):
//
//   - at least one bar
//   - strictly increasing, unique timestamps
//   - every OHLCV field finite
//
// A series that is merely *short* is fine — windowed indicators simply stay
// undefined for their warm-up span.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EnrichError;

/// One OHLCV sample at a point in time (oldest-first ordering in a series).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ]
    }
}

/// Check the input contract for a bar sequence.
///
/// Returns the first violation found, scanning oldest-first.  A sequence that
/// passes here is safe for every downstream stage: the indicator and event
/// stages never re-validate.
pub fn validate_bars(bars: &[Bar]) -> Result<(), EnrichError> {
    if bars.is_empty() {
        return Err(EnrichError::EmptySeries);
    }

    for (i, bar) in bars.iter().enumerate() {
        for (field, value) in bar.fields() {
            if !value.is_finite() {
                return Err(EnrichError::NonFiniteField { index: i, field });
            }
        }
        if i > 0 && bar.timestamp <= bars[i - 1].timestamp {
            return Err(EnrichError::UnorderedTimestamps { index: i });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(validate_bars(&[]), Err(EnrichError::EmptySeries));
    }

    #[test]
    fn well_formed_passes() {
        let bars = vec![bar(1, 100.0), bar(2, 101.0), bar(3, 99.5)];
        assert!(validate_bars(&bars).is_ok());
    }

    #[test]
    fn duplicate_timestamp_rejected() {
        let bars = vec![bar(1, 100.0), bar(1, 101.0)];
        assert_eq!(
            validate_bars(&bars),
            Err(EnrichError::UnorderedTimestamps { index: 1 })
        );
    }

    #[test]
    fn out_of_order_timestamp_rejected() {
        let bars = vec![bar(2, 100.0), bar(1, 101.0)];
        assert_eq!(
            validate_bars(&bars),
            Err(EnrichError::UnorderedTimestamps { index: 1 })
        );
    }

    #[test]
    fn nan_field_rejected() {
        let mut bars = vec![bar(1, 100.0), bar(2, 101.0)];
        bars[1].volume = f64::NAN;
        assert_eq!(
            validate_bars(&bars),
            Err(EnrichError::NonFiniteField {
                index: 1,
                field: "volume"
            })
        );
    }

    #[test]
    fn infinite_field_rejected() {
        let mut bars = vec![bar(1, 100.0)];
        bars[0].high = f64::INFINITY;
        assert_eq!(
            validate_bars(&bars),
            Err(EnrichError::NonFiniteField {
                index: 0,
                field: "high"
            })
        );
    }
}
