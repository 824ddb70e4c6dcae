use std::io;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ta_dashboard::cli::{commands::Cli, run::run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries the dashboard; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = io::stdout().lock();
    run(cli, Local::now().date_naive(), &mut out).await?;

    Ok(())
}
