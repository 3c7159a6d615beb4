// =============================================================================
// ta-enrich — batch technical-indicator enrichment engine
// =============================================================================
//
// Transforms one instrument's ordered OHLCV bar batch into classical
// technical indicators plus threshold-driven event signals, then projects the
// most recent row into a flat snapshot for downstream consumers (report
// builders, dashboards).
//
// Three stages, strictly sequential, all pure:
//
//   bars → compute_indicators → derive_events → extract_snapshot → Snapshot
//
// Fetching bars, news, fundamentals, rendering and persistence all live
// outside this crate; it only computes indicators and labels, once, over the
// given history.

pub mod bar;
pub mod compute;
pub mod config;
pub mod error;
pub mod events;
pub mod indicators;
pub mod pipeline;
pub mod snapshot;

pub use bar::{validate_bars, Bar};
pub use compute::{compute_indicators, IndicatorTable};
pub use config::EnrichmentConfig;
pub use error::EnrichError;
pub use events::{derive_events, EventTable, HistogramState, RsiState, Slope};
pub use pipeline::enrich;
pub use snapshot::{extract_snapshot, Snapshot, SnapshotValue};
