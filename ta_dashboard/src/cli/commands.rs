use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::{models::bar::PriceSource, presentation::OutputFormat, providers::ProviderId};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the config file (default: ta_dashboard.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which bars to fetch and how to read them.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Ticker symbol (e.g. "AAPL")
    #[arg(long)]
    pub ticker: String,

    /// First day, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Last day, inclusive (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    pub end: Option<NaiveDate>,

    /// Market-data provider; overrides the config file
    #[arg(long, value_enum)]
    pub provider: Option<ProviderId>,

    /// Price column the indicators use; overrides the config file
    #[arg(long, value_enum)]
    pub price_source: Option<PriceSource>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch bars, compute indicators and print the dashboard
    Analyze {
        #[command(flatten)]
        query: QueryArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Rows of each chart panel to print (text format only)
        #[arg(long)]
        tail: Option<usize>,

        /// Also write the CSV export into this directory
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Fetch bars, compute indicators and write the CSV export only
    Export {
        #[command(flatten)]
        query: QueryArgs,

        /// Output directory; falls back to `export_dir` from the config, then "."
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze() {
        let cli = Cli::try_parse_from([
            "ta-dashboard",
            "analyze",
            "--ticker",
            "AAPL",
            "--start",
            "2024-01-01",
            "--provider",
            "alpaca",
            "--price-source",
            "close",
            "--format",
            "json",
        ])
        .unwrap();

        let Commands::Analyze { query, format, tail, export } = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(query.ticker, "AAPL");
        assert_eq!(query.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(query.end, None);
        assert_eq!(query.provider, Some(ProviderId::Alpaca));
        assert_eq!(query.price_source, Some(PriceSource::Close));
        assert_eq!(format, OutputFormat::Json);
        assert_eq!(tail, None);
        assert_eq!(export, None);
    }

    #[test]
    fn parses_export_with_global_config() {
        let cli = Cli::try_parse_from([
            "ta-dashboard",
            "export",
            "--ticker",
            "MSFT",
            "--start",
            "2024-01-01",
            "--end",
            "2024-06-30",
            "--out",
            "exports",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        let Commands::Export { query, out } = cli.command else {
            panic!("expected export");
        };
        assert_eq!(query.end, NaiveDate::from_ymd_opt(2024, 6, 30));
        assert_eq!(out, Some(PathBuf::from("exports")));
    }

    #[test]
    fn rejects_malformed_date() {
        let result = Cli::try_parse_from([
            "ta-dashboard",
            "analyze",
            "--ticker",
            "AAPL",
            "--start",
            "01/02/2024",
        ]);
        assert!(result.is_err());
    }
}
