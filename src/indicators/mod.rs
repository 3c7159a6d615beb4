// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators produced by the
// enrichment engine.  Every function returns a series *aligned* with its
// input: one entry per input bar, `None` during the warm-up span and for
// documented degenerate cases.  Callers never see sentinel numerics.
//
// Recursive indicators (EMA, Wilder RSI/ATR, OBV) are single left-to-right
// folds carrying an accumulator; a value at index i depends only on inputs
// [0..i].

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod stochastic;
