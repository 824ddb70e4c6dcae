//! Live provider checks. They hit the network, so they are ignored by default:
//! `cargo test -- --ignored`.

use chrono::NaiveDate;
use serial_test::serial;
use ta_dashboard::{
    models::request_params::{BarsRequestParams, ProviderParams},
    providers::{
        DataProvider, ProviderInitError,
        alpaca_rest::{AlpacaBarsParams, AlpacaProvider},
        yahoo::YahooProvider,
    },
};

fn january_2024(symbol: &str) -> BarsRequestParams {
    BarsRequestParams::new(
        symbol,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    )
}

#[tokio::test]
#[ignore]
async fn yahoo_fetches_daily_bars() {
    let provider = YahooProvider::new().unwrap();
    let series = provider.fetch_bars(&january_2024("AAPL")).await.unwrap();

    // 21 trading days in January 2024.
    assert_eq!(series.len(), 21);
    assert!(series.validate().is_ok());
    assert!(series.has_adjusted_close());
    assert_eq!(series.bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
}

#[tokio::test]
#[ignore]
async fn yahoo_unknown_symbol_is_not_found() {
    let provider = YahooProvider::new().unwrap();
    let err = provider
        .fetch_bars(&january_2024("NOTAREALTICKER123"))
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "{err}");
}

#[tokio::test]
#[serial]
#[ignore]
async fn alpaca_fetches_daily_bars() {
    // Requires APCA_API_KEY_ID and APCA_API_SECRET_KEY.
    dotenvy::dotenv().ok();
    if std::env::var("APCA_API_KEY_ID").is_err() || std::env::var("APCA_API_SECRET_KEY").is_err() {
        println!("Skipping alpaca_fetches_daily_bars: API keys not set.");
        return;
    }

    let provider = AlpacaProvider::new().unwrap();
    let mut params = january_2024("AAPL");
    params.provider_specific = ProviderParams::Alpaca(AlpacaBarsParams {
        limit: Some(5),
        ..Default::default()
    });

    // Small pages force pagination.
    let series = provider.fetch_bars(&params).await.unwrap();
    assert_eq!(series.len(), 21);
    assert!(series.validate().is_ok());
    assert!(!series.has_adjusted_close());
}

#[test]
#[serial]
fn alpaca_without_credentials_fails_to_build() {
    let saved: Vec<_> = ["APCA_API_KEY_ID", "APCA_API_SECRET_KEY"]
        .iter()
        .map(|k| (*k, std::env::var(k).ok()))
        .collect();
    unsafe {
        std::env::remove_var("APCA_API_KEY_ID");
    }

    let result = AlpacaProvider::new();
    assert!(matches!(result, Err(ProviderInitError::MissingEnvVar { .. })));

    for (key, value) in saved {
        if let Some(value) = value {
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
}
