//! Alpaca market data REST API (`/v2/stocks/bars`).
//!
//! Alpaca does not return an adjusted close column, so bars from this
//! provider always fall back to the raw close for indicator input. Use
//! [`params::Adjustment`] to have Alpaca adjust the OHLC values themselves.

pub mod params;
pub mod provider;
pub mod response;

pub use params::AlpacaBarsParams;
pub use provider::AlpacaProvider;
