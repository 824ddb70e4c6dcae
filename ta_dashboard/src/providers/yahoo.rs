//! Yahoo Finance chart API (`/v8/finance/chart/{symbol}`).
//!
//! Needs no credentials and, unlike Alpaca, returns an adjusted close column,
//! which makes it the default provider.

pub mod response;

use async_trait::async_trait;
use chrono::{Days, NaiveDate, NaiveTime};
use reqwest::{Client, StatusCode, header};
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::{bar_series::BarSeries, request_params::BarsRequestParams},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, ProviderError, ProviderInitError, ReqwestSnafu,
        ValidationSnafu,
    },
};

use response::ChartEnvelope;

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

// The chart endpoint answers 429 to clients without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)";

pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_base_url(BASE_URL)
    }

    /// Point the provider at another host (a proxy or a local fixture server).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

/// Epoch seconds of midnight UTC on `date`.
fn epoch_seconds(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// `period1`/`period2` for an inclusive date range; `period2` is exclusive
/// on Yahoo's side, hence the extra day.
pub fn period_bounds(params: &BarsRequestParams) -> Result<(i64, i64), ProviderError> {
    let after_end = params
        .end
        .checked_add_days(Days::new(1))
        .ok_or_else(|| {
            ValidationSnafu {
                message: format!("end date {} out of range", params.end),
            }
            .build()
        })?;
    Ok((epoch_seconds(params.start), epoch_seconds(after_end)))
}

#[async_trait]
impl DataProvider for YahooProvider {
    async fn fetch_bars(&self, params: &BarsRequestParams) -> Result<BarSeries, ProviderError> {
        let symbol = params.symbol.trim().to_uppercase();
        let (period1, period2) = period_bounds(params)?;
        let url = format!("{}/{}", self.base_url, symbol);

        let query = [
            ("period1", period1.to_string()),
            ("period2", period2.to_string()),
            ("interval", "1d".to_string()),
            ("events", "div,split".to_string()),
            ("includeAdjustedClose", "true".to_string()),
        ];

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .context(ReqwestSnafu)?;
        let status = response.status();
        let body = response.text().await.context(ReqwestSnafu)?;
        debug!(symbol = %symbol, %status, bytes = body.len(), "yahoo chart response");

        // Error payloads (404 for unknown symbols) share the success envelope.
        let envelope: ChartEnvelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return ApiSnafu {
                    message: format!("malformed chart response: {e}"),
                }
                .fail();
            }
            Err(_) => {
                return ApiSnafu {
                    message: format!("{status}: {body}"),
                }
                .fail();
            }
        };

        if status == StatusCode::TOO_MANY_REQUESTS {
            return ApiSnafu {
                message: "rate limited by Yahoo (429)".to_string(),
            }
            .fail();
        }

        let mut series = envelope.into_series(&symbol)?;
        series
            .bars
            .retain(|bar| bar.date >= params.start && bar.date <= params.end);
        Ok(series)
    }

    fn name(&self) -> &'static str {
        "yahoo"
    }
}
