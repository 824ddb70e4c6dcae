use chrono::NaiveDate;
use shared_utils::config::ConfigError;
use thiserror::Error;

use crate::{
    io::sink::SinkError,
    presentation::RenderError,
    providers::{ProviderError, ProviderInitError},
};

/// Input rejected before any indicator is computed.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The provider returned nothing to compute on.
    #[error("bar series for {symbol} is empty")]
    EmptySeries { symbol: String },

    /// Dates must be strictly ascending; the engine never reorders.
    #[error("bar {index} dated {current} does not follow {previous}")]
    NonMonotonicDates {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    /// A bar with values no indicator can use.
    #[error("malformed bar on {date}: {message}")]
    MalformedBar { date: NaiveDate, message: String },

    /// The (ticker, start, end) request itself is unusable.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// Indicator periods that cannot produce a series.
    #[error("invalid indicator parameters: {message}")]
    InvalidParams { message: String },
}

/// The unified error type for the `ta_dashboard` crate.
///
/// One variant per pipeline stage so callers (and tests) can tell a failed
/// fetch from bad input or a failed export.
#[derive(Debug, Error)]
pub enum Error {
    /// The provider could not be reached or rejected the request.
    #[error("Failed to fetch data for {symbol}: {source}")]
    Fetch {
        symbol: String,
        source: ProviderError,
    },

    /// The provider answered, but had no bars for the ticker/range.
    #[error("No data found for {symbol}. Please check the ticker symbol.")]
    DataUnavailable { symbol: String },

    /// Request or bar validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An error originating from a data sink (e.g., file I/O).
    #[error("Export error: {0}")]
    Export(#[from] SinkError),

    /// Writing the summary or chart panels failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The provider could not be constructed (credentials, HTTP client).
    #[error("Provider initialization error: {0}")]
    ProviderInit(#[from] ProviderInitError),
}
