use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, providers::alpaca_rest::params::AlpacaBarsParams};

/// Vendor-agnostic parameters for requesting daily bars for one instrument.
///
/// This is the standard input for every
/// [`DataProvider`](crate::providers::DataProvider) implementation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BarsRequestParams {
    /// Ticker symbol (e.g., `"AAPL"`).
    pub symbol: String,

    /// First calendar day of the requested range (inclusive).
    pub start: NaiveDate,

    /// Last calendar day of the requested range (inclusive).
    ///
    /// Providers whose APIs take an exclusive upper bound must add a day.
    pub end: NaiveDate,

    /// Optional, provider-specific parameters.
    #[serde(default)]
    pub provider_specific: ProviderParams,
}

impl BarsRequestParams {
    pub fn new(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
            provider_specific: ProviderParams::None,
        }
    }

    /// Reject requests no provider could answer.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.symbol.trim().is_empty() {
            return Err(ValidationError::InvalidRequest {
                message: "ticker symbol must not be empty".into(),
            });
        }
        if self.start > self.end {
            return Err(ValidationError::InvalidRequest {
                message: format!(
                    "start date {} is after end date {}",
                    self.start, self.end
                ),
            });
        }
        Ok(())
    }
}

/// An enum to hold provider-specific request parameters.
///
/// This allows callers to specify detailed, per-request options for a
/// particular provider without cluttering the universal `BarsRequestParams`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum ProviderParams {
    #[default]
    None,
    Alpaca(AlpacaBarsParams),
}
