//! Conversion between an [`Analysis`] and a polars [`DataFrame`], and CSV
//! (de)serialization of that frame.
//!
//! Layout: one row per bar, a `Date` column (`YYYY-MM-DD`), the bar fields,
//! then one column per indicator. Undefined indicator values are nulls in the
//! frame, empty fields in the CSV, and `NaN` again once read back.

use std::io::{Cursor, Write};

use chrono::NaiveDate;
use indexmap::IndexMap;
use polars::prelude::*;
use snafu::ResultExt;

use crate::{
    io::sink::{ConversionSnafu, PolarsSnafu, SinkError},
    pipeline::Analysis,
};

pub const DATE_COLUMN: &str = "Date";

fn nullable(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().map(|v| v.is_finite().then_some(*v)).collect()
}

/// Bars plus every derived series as one frame.
pub fn to_dataframe(analysis: &Analysis) -> PolarsResult<DataFrame> {
    let bars = &analysis.series.bars;

    let dates: Vec<String> = bars
        .iter()
        .map(|b| b.date.format("%Y-%m-%d").to_string())
        .collect();
    let field = |f: fn(&crate::models::bar::Bar) -> f64| bars.iter().map(f).collect::<Vec<f64>>();

    let mut columns = vec![
        Column::new(DATE_COLUMN.into(), dates),
        Column::new("Open".into(), field(|b| b.open)),
        Column::new("High".into(), field(|b| b.high)),
        Column::new("Low".into(), field(|b| b.low)),
        Column::new("Close".into(), field(|b| b.close)),
    ];
    if bars.iter().any(|b| b.adj_close.is_some()) {
        let adj: Vec<Option<f64>> = bars.iter().map(|b| b.adj_close).collect();
        columns.push(Column::new("Adj Close".into(), adj));
    }
    columns.push(Column::new("Volume".into(), field(|b| b.volume)));

    for (name, values) in analysis.indicators.named_columns(&analysis.params) {
        columns.push(Column::new(name.into(), nullable(values)));
    }

    DataFrame::new(columns)
}

/// Write `df` as CSV with a header row.
pub fn write_csv<W: Write>(df: &mut DataFrame, writer: W) -> PolarsResult<()> {
    CsvWriter::new(writer).include_header(true).finish(df)
}

/// Parse CSV produced by [`write_csv`].
pub fn read_csv(bytes: Vec<u8>) -> PolarsResult<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
}

/// A parsed export: dates plus every numeric column, nulls as `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedTable {
    pub dates: Vec<NaiveDate>,
    pub columns: IndexMap<String, Vec<f64>>,
}

impl ExportedTable {
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }
}

impl TryFrom<&DataFrame> for ExportedTable {
    type Error = SinkError;

    fn try_from(df: &DataFrame) -> Result<Self, Self::Error> {
        let date_col = df.column(DATE_COLUMN).context(PolarsSnafu)?;
        let dates = date_col
            .str()
            .context(PolarsSnafu)?
            .into_iter()
            .map(|raw| {
                let raw = raw.ok_or_else(|| {
                    ConversionSnafu {
                        message: "missing date".to_string(),
                    }
                    .build()
                })?;
                NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                    ConversionSnafu {
                        message: format!("bad date {raw:?}: {e}"),
                    }
                    .build()
                })
            })
            .collect::<Result<Vec<_>, SinkError>>()?;

        let mut columns = IndexMap::new();
        for column in df.get_columns() {
            if column.name().as_str() == DATE_COLUMN {
                continue;
            }
            // An all-empty column is inferred as a string column.
            let as_float = column.cast(&DataType::Float64).context(PolarsSnafu)?;
            let values = as_float
                .f64()
                .context(PolarsSnafu)?
                .into_iter()
                .map(|v| v.unwrap_or(f64::NAN))
                .collect();
            columns.insert(column.name().to_string(), values);
        }

        Ok(Self { dates, columns })
    }
}
