use serde::{Deserialize, Serialize};

use crate::models::request_params::{BarsRequestParams, ProviderParams};

/// Specifies the corporate action adjustment for stock data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    #[default]
    Raw,
    Split,
    Dividend,
    All,
}

/// Specifies the source feed for stock data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    #[default]
    Sip,
    Iex,
    Otc,
}

/// Alpaca-specific parameters for a bars request.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct AlpacaBarsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<Adjustment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed: Option<Feed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Adjustment {
    fn as_str(&self) -> &'static str {
        match self {
            Adjustment::Raw => "raw",
            Adjustment::Split => "split",
            Adjustment::Dividend => "dividend",
            Adjustment::All => "all",
        }
    }
}

impl Feed {
    fn as_str(&self) -> &'static str {
        match self {
            Feed::Sip => "sip",
            Feed::Iex => "iex",
            Feed::Otc => "otc",
        }
    }
}

/// Build the query string for one page of daily bars.
///
/// Alpaca treats `end` as inclusive, so the request range maps one to one.
pub fn construct_params(params: &BarsRequestParams) -> Vec<(String, String)> {
    let mut query = vec![
        ("symbols".to_string(), params.symbol.trim().to_uppercase()),
        ("timeframe".to_string(), "1Day".to_string()),
        ("start".to_string(), params.start.format("%Y-%m-%d").to_string()),
        ("end".to_string(), params.end.format("%Y-%m-%d").to_string()),
        ("sort".to_string(), "asc".to_string()),
    ];

    if let ProviderParams::Alpaca(alpaca) = &params.provider_specific {
        if let Some(adjustment) = alpaca.adjustment {
            query.push(("adjustment".to_string(), adjustment.as_str().to_string()));
        }
        if let Some(feed) = alpaca.feed {
            query.push(("feed".to_string(), feed.as_str().to_string()));
        }
        if let Some(limit) = alpaca.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
    }

    query
}
