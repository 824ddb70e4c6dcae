use std::path::{Path, PathBuf};

use async_trait::async_trait;
use snafu::{Backtrace, ResultExt, Snafu};
use tracing::info;

use crate::{
    io::dataframe::{ExportedTable, read_csv, to_dataframe, write_csv},
    pipeline::Analysis,
};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// An error occurred while converting an `Analysis` into the destination
    /// format, or an export back into a table.
    #[snafu(display("Data conversion error: {message}"))]
    ConversionError {
        message: String,
        backtrace: Backtrace,
    },

    #[snafu(display("DataFrame error: {source}"))]
    Polars {
        source: polars::error::PolarsError,
        backtrace: Backtrace,
    },

    /// A generic I/O error.
    #[snafu(display("I/O error at {}: {source}", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait DataSink {
    /// The type of output returned after a successful write operation.
    ///
    /// A file sink returns the path it wrote; a database sink might return
    /// the number of rows inserted.
    type Output;

    /// Writes one analysed series to the destination.
    async fn write(&self, data: &Analysis) -> Result<Self::Output, SinkError>;
}

/// Export file name for `symbol`: `{SYMBOL}_technical_analysis.csv`.
///
/// Path separators and other characters unsafe in a file name become `_`.
pub fn export_file_name(symbol: &str) -> String {
    let safe: String = symbol
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{safe}_technical_analysis.csv")
}

/// Writes one CSV per analysis into a directory, creating it when missing.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    dir: PathBuf,
}

impl CsvFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(export_file_name(symbol))
    }
}

#[async_trait]
impl DataSink for CsvFileSink {
    type Output = PathBuf;

    async fn write(&self, data: &Analysis) -> Result<PathBuf, SinkError> {
        let buf = {
            let mut df = to_dataframe(data).context(PolarsSnafu)?;
            let mut buf = Vec::new();
            write_csv(&mut df, &mut buf).context(PolarsSnafu)?;
            buf
        };

        tokio::fs::create_dir_all(&self.dir)
            .await
            .context(IoSnafu { path: &self.dir })?;
        let path = self.path_for(data.symbol());
        tokio::fs::write(&path, &buf)
            .await
            .context(IoSnafu { path: &path })?;

        info!(path = %path.display(), rows = data.series.len(), "export written");
        Ok(path)
    }
}

/// Load an export written by [`CsvFileSink`].
pub async fn read_export(path: impl AsRef<Path>) -> Result<ExportedTable, SinkError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.context(IoSnafu { path })?;
    let df = read_csv(bytes).context(PolarsSnafu)?;
    ExportedTable::try_from(&df)
}
