//! Subcommand dispatch. Every stage reports through the crate [`Error`], so
//! the binary only has to print it.

use std::{io::Write, path::PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::{
    cli::{
        commands::{Cli, Commands, QueryArgs},
        params::{build_request, resolve_export_dir, resolve_provider},
    },
    config::Settings,
    errors::Error,
    io::sink::{CsvFileSink, DataSink},
    pipeline::{Analysis, run_analysis},
    presentation::{Dashboard, OutputFormat, RenderError},
    providers::build_provider,
};

/// Run one parsed command line, writing user-facing output to `out`.
///
/// `today` fills in a missing `--end`.
pub async fn run<W: Write>(cli: Cli, today: NaiveDate, out: &mut W) -> Result<(), Error> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            query,
            format,
            tail,
            export,
        } => {
            let analysis = analyze(&query, &settings, today).await?;
            render_dashboard(&analysis, format, tail.unwrap_or(settings.tail), out)?;

            if let Some(dir) = export {
                export_csv(&analysis, CsvFileSink::new(dir)).await?;
            }
        }
        Commands::Export { query, out: dir } => {
            let analysis = analyze(&query, &settings, today).await?;
            let dir = resolve_export_dir(dir.as_deref(), &settings);
            let path = export_csv(&analysis, CsvFileSink::new(dir)).await?;
            writeln!(out, "{}", path.display()).map_err(RenderError::from)?;
        }
    }

    Ok(())
}

async fn analyze(
    query: &QueryArgs,
    settings: &Settings,
    today: NaiveDate,
) -> Result<Analysis, Error> {
    let request = build_request(query, settings, today);
    let provider = build_provider(resolve_provider(query, settings))?;
    run_analysis(provider.as_ref(), &request).await
}

/// Build the dashboard for `analysis` and write it to `out`.
pub fn render_dashboard<W: Write>(
    analysis: &Analysis,
    format: OutputFormat,
    tail: usize,
    out: &mut W,
) -> Result<(), Error> {
    let dashboard = Dashboard::build(analysis)?;
    dashboard.render(out, format, tail)?;
    out.flush().map_err(RenderError::from)?;
    Ok(())
}

pub async fn export_csv(analysis: &Analysis, sink: CsvFileSink) -> Result<PathBuf, Error> {
    let path = sink.write(analysis).await?;
    info!(symbol = analysis.symbol(), path = %path.display(), "exported");
    Ok(path)
}
