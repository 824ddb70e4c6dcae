//! Fetch → validate → compute, with a typed failure per stage.
//!
//! Everything a run needs arrives in an [`AnalysisRequest`]; nothing is read
//! from ambient state. The result is request-scoped and discarded by the
//! caller once rendered or exported.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{
    errors::Error,
    indicators::{IndicatorParams, IndicatorSet, compute_indicators},
    models::{bar::PriceSource, bar_series::BarSeries, request_params::BarsRequestParams},
    providers::DataProvider,
};

/// One (ticker, date range) query plus how to compute on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub bars: BarsRequestParams,
    pub price_source: PriceSource,
    pub indicators: IndicatorParams,
}

/// Bars plus their derived series.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub series: BarSeries,
    pub indicators: IndicatorSet,
    pub params: IndicatorParams,
    /// The price column actually used, after any adjusted-close fallback.
    pub price_source: PriceSource,
}

impl Analysis {
    pub fn symbol(&self) -> &str {
        &self.series.symbol
    }

    /// The price column the indicators were computed on.
    pub fn prices(&self) -> Vec<f64> {
        self.series.prices(self.price_source)
    }
}

/// Run the whole pipeline for one request.
///
/// Errors:
/// - [`Error::Validation`] for a bad request or malformed bars
/// - [`Error::Fetch`] when the provider fails
/// - [`Error::DataUnavailable`] when the provider has no bars for the range
#[instrument(skip_all, fields(symbol = %request.bars.symbol, provider = provider.name()))]
pub async fn run_analysis(
    provider: &dyn DataProvider,
    request: &AnalysisRequest,
) -> Result<Analysis, Error> {
    request.bars.validate()?;
    request.indicators.validate()?;

    let symbol = request.bars.symbol.trim().to_uppercase();
    info!(start = %request.bars.start, end = %request.bars.end, "fetching bars");

    let series = match provider.fetch_bars(&request.bars).await {
        Ok(series) => series,
        Err(e) if e.is_not_found() => {
            warn!("provider does not know the symbol");
            return Err(Error::DataUnavailable { symbol });
        }
        Err(source) => return Err(Error::Fetch { symbol, source }),
    };

    if series.is_empty() {
        warn!("provider returned no bars");
        return Err(Error::DataUnavailable { symbol });
    }

    analyze_series(series, &request.indicators, request.price_source)
}

/// Compute on bars that are already in hand (e.g. loaded from an export).
pub fn analyze_series(
    series: BarSeries,
    params: &IndicatorParams,
    requested: PriceSource,
) -> Result<Analysis, Error> {
    series.validate()?;
    let price_source = series.resolve_price_source(requested);
    let indicators = compute_indicators(&series, params, price_source)?;
    info!(
        bars = series.len(),
        price_source = price_source.label(),
        "indicators computed"
    );

    Ok(Analysis {
        series,
        indicators,
        params: params.clone(),
        price_source,
    })
}
