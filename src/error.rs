// =============================================================================
// Error taxonomy for the enrichment pipeline
// =============================================================================
//
// Only malformed input is fatal.  Insufficient history and degenerate
// arithmetic (zero-range stochastic window, zero average loss, zero middle
// band) are represented in-band as undefined series entries, so the pipeline
// stays total over any well-formed bar sequence.

use thiserror::Error;

/// Fatal input-validation failures surfaced to the caller.
///
/// Retries never belong here: the pipeline is pure, so a failure is always a
/// precondition violation on the caller's side.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnrichError {
    /// The bar sequence is empty — there is no last row to snapshot.
    #[error("bar sequence is empty")]
    EmptySeries,

    /// Timestamps must be strictly increasing; a duplicate or out-of-order
    /// timestamp indicates a broken upstream fetch.
    #[error("timestamp at index {index} is not strictly greater than its predecessor")]
    UnorderedTimestamps { index: usize },

    /// An OHLCV field is NaN or infinite.
    #[error("non-finite value in field '{field}' at index {index}")]
    NonFiniteField { index: usize, field: &'static str },
}
