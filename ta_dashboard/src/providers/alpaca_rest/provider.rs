use async_trait::async_trait;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_env_var;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::{bar::Bar, bar_series::BarSeries, request_params::BarsRequestParams},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, InvalidApiKeySnafu, MissingEnvVarSnafu,
        ProviderError, ProviderInitError, ReqwestSnafu,
        alpaca_rest::{params::construct_params, response::AlpacaResponse},
    },
};

const BASE_URL: &str = "https://data.alpaca.markets/v2/stocks/bars";

pub struct AlpacaProvider {
    client: Client,
    base_url: String,
    _api_key: SecretString,
    _secret_key: SecretString,
}

impl AlpacaProvider {
    /// Creates a new Alpaca provider.
    ///
    /// Reads API keys from the `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY`
    /// environment variables.
    pub fn new() -> Result<Self, ProviderInitError> {
        let api_key = SecretString::new(
            get_env_var("APCA_API_KEY_ID")
                .context(MissingEnvVarSnafu)?
                .into(),
        );
        let secret_key = SecretString::new(
            get_env_var("APCA_API_SECRET_KEY")
                .context(MissingEnvVarSnafu)?
                .into(),
        );
        Self::with_credentials(api_key, secret_key, BASE_URL)
    }

    /// Creates a provider with explicit keys against `base_url`, the full
    /// bars endpoint (a proxy or a local fixture server).
    pub fn with_credentials(
        api_key: SecretString,
        secret_key: SecretString,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "APCA-API-KEY-ID",
            header::HeaderValue::from_str(api_key.expose_secret()).context(InvalidApiKeySnafu)?,
        );
        headers.insert(
            "APCA-API-SECRET-KEY",
            header::HeaderValue::from_str(secret_key.expose_secret())
                .context(InvalidApiKeySnafu)?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            _api_key: api_key,
            _secret_key: secret_key,
        })
    }
}

#[async_trait]
impl DataProvider for AlpacaProvider {
    async fn fetch_bars(&self, params: &BarsRequestParams) -> Result<BarSeries, ProviderError> {
        let symbol = params.symbol.trim().to_uppercase();
        let mut bars: Vec<Bar> = Vec::new();
        let mut next_page_token: Option<String> = None;

        loop {
            let mut query_params = construct_params(params);
            if let Some(token) = &next_page_token {
                query_params.push(("page_token".to_string(), token.clone()));
            }

            let response = self
                .client
                .get(&self.base_url)
                .query(&query_params)
                .send()
                .await
                .context(ReqwestSnafu)?;

            if !response.status().is_success() {
                let status = response.status();
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                return ApiSnafu {
                    message: format!("{status}: {error_msg}"),
                }
                .fail();
            }

            let alpaca_response = response
                .json::<AlpacaResponse>()
                .await
                .context(ReqwestSnafu)?;

            // Merge the bars from the current page into our collection.
            if let Some(mut by_symbol) = alpaca_response.bars {
                if let Some(page) = by_symbol.swap_remove(&symbol) {
                    debug!(symbol = %symbol, count = page.len(), "received alpaca page");
                    bars.extend(page.into_iter().map(Bar::from));
                }
            }

            // If there's a next page token, use it for the next iteration. Otherwise, we're done.
            match alpaca_response.next_page_token {
                Some(token) => next_page_token = Some(token),
                None => break,
            }
        }

        Ok(BarSeries::new(symbol, bars))
    }

    fn name(&self) -> &'static str {
        "alpaca"
    }
}
