//! Merge command-line flags with [`Settings`] into pipeline inputs.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::{
    cli::commands::QueryArgs,
    config::Settings,
    models::request_params::BarsRequestParams,
    pipeline::AnalysisRequest,
    providers::ProviderId,
};

/// Flags win over the config file; a missing end date means `today`.
pub fn build_request(query: &QueryArgs, settings: &Settings, today: NaiveDate) -> AnalysisRequest {
    AnalysisRequest {
        bars: BarsRequestParams::new(query.ticker.clone(), query.start, query.end.unwrap_or(today)),
        price_source: query.price_source.unwrap_or(settings.price_source),
        indicators: settings.indicators.clone(),
    }
}

pub fn resolve_provider(query: &QueryArgs, settings: &Settings) -> ProviderId {
    query.provider.unwrap_or(settings.provider)
}

/// Export directory for the `export` subcommand.
pub fn resolve_export_dir(out: Option<&Path>, settings: &Settings) -> PathBuf {
    out.map(Path::to_path_buf)
        .or_else(|| settings.export_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}
