// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure functions over slices of closing prices. Every function returns a
// vector aligned 1:1 with its input, with warm-up entries represented as
// `None` so callers must handle undefined values explicitly instead of
// reading a placeholder price.

pub mod ema;
pub mod sma;
pub mod volatility;
