// =============================================================================
// Enrichment pipeline — validate → compute → derive → extract
// =============================================================================
//
// One-shot, synchronous, side-effect-free run over one instrument's bar
// batch.  Each stage consumes the entirety of the previous stage's output;
// every intermediate series is dropped once the snapshot exists.  Independent
// invocations share nothing, so callers may run them concurrently without
// coordination.

use tracing::debug;

use crate::bar::{validate_bars, Bar};
use crate::compute::compute_indicators;
use crate::config::EnrichmentConfig;
use crate::error::EnrichError;
use crate::events::derive_events;
use crate::snapshot::{extract_snapshot, Snapshot};

/// Enrich one bar batch and return the last-row snapshot.
///
/// Fails only on a malformed input sequence (empty, unordered or duplicate
/// timestamps, non-finite fields).  A merely short history produces a partial
/// snapshot with `Null` cells instead.
pub fn enrich(
    ticker: &str,
    bars: &[Bar],
    config: &EnrichmentConfig,
) -> Result<Snapshot, EnrichError> {
    validate_bars(bars)?;
    debug!(ticker, bars = bars.len(), "enriching bar batch");

    let table = compute_indicators(bars, config);
    let events = derive_events(bars, &table, config);
    let snapshot = extract_snapshot(ticker, bars, &table, &events, config)?;

    debug!(
        ticker,
        last_update_date = %snapshot.last_update_date,
        keys = snapshot.values.len(),
        "snapshot ready"
    );
    Ok(snapshot)
}
