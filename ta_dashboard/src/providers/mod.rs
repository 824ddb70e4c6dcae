//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, the single interface the
//! pipeline uses to obtain daily bars for one ticker and an inclusive date
//! range. Each vendor (Yahoo chart API, Alpaca REST) implements it and handles
//! its own request format and validation.
//!
//! The trait is async and object safe, so the CLI can pick a provider at
//! runtime through [`build_provider`].
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use ta_dashboard::models::{bar_series::BarSeries, request_params::BarsRequestParams};
//! use ta_dashboard::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     async fn fetch_bars(&self, params: &BarsRequestParams) -> Result<BarSeries, ProviderError> {
//!         Ok(BarSeries::new(params.symbol.clone(), vec![]))
//!     }
//! }
//! ```

pub mod alpaca_rest;
pub mod yahoo;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::{bar_series::BarSeries, request_params::BarsRequestParams};

/// Trait for fetching daily bars from a market data provider.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches the daily bars for `params.symbol` between `params.start` and
    /// `params.end`, both inclusive, in ascending date order.
    ///
    /// An unknown symbol or an empty range may be reported either as an empty
    /// series or as [`ProviderError::NotFound`]; the pipeline treats both as
    /// "no data".
    async fn fetch_bars(&self, params: &BarsRequestParams) -> Result<BarSeries, ProviderError>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str {
        "unknown"
    }
}

/// Which upstream to use (serde snake_case).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// Yahoo Finance chart API (no credentials, supplies adjusted close).
    #[default]
    Yahoo,
    /// Alpaca market data API.
    Alpaca,
}

/// Build and return a boxed data provider corresponding to the supplied ProviderId.
pub fn build_provider(id: ProviderId) -> Result<Box<dyn DataProvider>, ProviderInitError> {
    match id {
        ProviderId::Yahoo => Ok(Box::new(yahoo::YahooProvider::new()?)),
        ProviderId::Alpaca => Ok(Box::new(alpaca_rest::provider::AlpacaProvider::new()?)),
    }
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// API key contains invalid characters.
    #[snafu(display("Invalid API key format: {source}"))]
    InvalidApiKey {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout, bad JSON).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider's API returned a specific error message (e.g., invalid API key).
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The provider does not know the symbol.
    #[snafu(display("Symbol not found: {symbol}"))]
    NotFound {
        symbol: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// An internal error occurred while processing data within the provider.
    #[snafu(display("Internal provider error: {message}"))]
    Internal {
        message: String,
        backtrace: Backtrace,
    },

    /// An error during provider configuration or initialization.
    #[snafu(display("Provider initialization error: {source}"), context(false))]
    Init {
        #[snafu(backtrace)]
        source: ProviderInitError,
    },
}

impl ProviderError {
    /// Whether this error means "the provider has nothing for this symbol".
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound { .. })
    }
}
