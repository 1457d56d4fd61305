// =============================================================================
// Yahoo Finance Module — daily price history acquisition
// =============================================================================

pub mod client;

pub use client::YahooClient;
