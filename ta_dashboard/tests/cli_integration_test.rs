#![cfg(feature = "cli")]

mod common;

use std::io::{self, Write};

use chrono::NaiveDate;
use clap::Parser;
use serial_test::serial;
use ta_dashboard::{
    Error, ValidationError,
    cli::{
        commands::Cli,
        run::{export_csv, render_dashboard, run},
    },
    indicators::IndicatorParams,
    io::sink::CsvFileSink,
    models::bar::PriceSource,
    pipeline::{Analysis, analyze_series},
    presentation::{OutputFormat, RenderError},
    providers::ProviderInitError,
};

use common::sample_series;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
}

fn sample_analysis() -> Analysis {
    analyze_series(
        sample_series("AAPL"),
        &IndicatorParams::default(),
        PriceSource::AdjustedClose,
    )
    .unwrap()
}

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn missing_config_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    let cli = Cli::parse_from([
        "ta-dashboard",
        "--config",
        missing.to_str().unwrap(),
        "analyze",
        "--ticker",
        "AAPL",
        "--start",
        "2024-01-01",
    ]);

    let err = run(cli, today(), &mut Vec::new()).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)), "{err}");
    assert!(err.to_string().starts_with("Configuration error"));
}

#[tokio::test]
async fn reversed_dates_are_validation_error() {
    let cli = Cli::parse_from([
        "ta-dashboard",
        "analyze",
        "--ticker",
        "AAPL",
        "--start",
        "2024-03-01",
        "--end",
        "2024-02-01",
        "--provider",
        "yahoo",
    ]);

    let err = run(cli, today(), &mut Vec::new()).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidRequest { .. })
    ));
}

#[tokio::test]
#[serial]
async fn alpaca_without_credentials_is_provider_init_error() {
    let saved: Vec<_> = ["APCA_API_KEY_ID", "APCA_API_SECRET_KEY"]
        .iter()
        .map(|k| (*k, std::env::var(k).ok()))
        .collect();
    unsafe {
        std::env::remove_var("APCA_API_KEY_ID");
    }

    let cli = Cli::parse_from([
        "ta-dashboard",
        "export",
        "--ticker",
        "AAPL",
        "--start",
        "2024-01-01",
        "--provider",
        "alpaca",
    ]);
    let result = run(cli, today(), &mut Vec::new()).await;

    for (key, value) in saved {
        if let Some(value) = value {
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }

    let err = result.unwrap_err();
    assert!(
        matches!(err, Error::ProviderInit(ProviderInitError::MissingEnvVar { .. })),
        "{err}"
    );
}

#[test]
fn failed_write_is_render_error() {
    let err = render_dashboard(&sample_analysis(), OutputFormat::Text, 5, &mut ClosedPipe)
        .unwrap_err();
    assert!(matches!(err, Error::Render(RenderError::Io(_))), "{err}");
}

#[test]
fn dashboard_renders_to_buffer() {
    let mut buf = Vec::new();
    render_dashboard(&sample_analysis(), OutputFormat::Json, 0, &mut buf).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(json["symbol"], "AAPL");
}

#[tokio::test]
async fn unwritable_export_dir_is_export_error() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the export directory should go.
    let blocker = dir.path().join("exports");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let err = export_csv(&sample_analysis(), CsvFileSink::new(&blocker))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Export(_)), "{err}");
}
