//! Presentation layer.
//!
//! Turns an [`Analysis`] into what a user looks at: the headline metrics,
//! the chart panels and their text or JSON rendering. Display-only concerns
//! (currency formatting, OBV in millions, signal captions) live here so the
//! indicator engine stays purely numeric.

pub mod charts;
pub mod format;
pub mod summary;

use std::io::Write;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{indicators::IndicatorParams, pipeline::Analysis};
use charts::{ChartPanel, chart_panels};
use summary::{Summary, summarize};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("nothing to render for {symbol}: the series is empty")]
    Empty { symbol: String },

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything the dashboard shows for one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub summary: Summary,
    #[serde(skip)]
    pub params: IndicatorParams,
    #[serde(skip)]
    pub panels: Vec<ChartPanel>,
}

impl Dashboard {
    pub fn build(analysis: &Analysis) -> Result<Self, RenderError> {
        let summary = summarize(analysis).ok_or_else(|| RenderError::Empty {
            symbol: analysis.symbol().to_string(),
        })?;
        Ok(Self {
            summary,
            params: analysis.params.clone(),
            panels: chart_panels(analysis),
        })
    }

    pub fn render<W: Write>(
        &self,
        out: &mut W,
        format: OutputFormat,
        tail: usize,
    ) -> Result<(), RenderError> {
        match format {
            OutputFormat::Text => self.render_text(out, tail),
            OutputFormat::Json => self.render_json(out),
        }
    }

    pub fn render_json<W: Write>(&self, out: &mut W) -> Result<(), RenderError> {
        serde_json::to_writer_pretty(&mut *out, &self.summary)?;
        writeln!(out)?;
        Ok(())
    }

    pub fn render_text<W: Write>(&self, out: &mut W, tail: usize) -> Result<(), RenderError> {
        let s = &self.summary;
        let p = &self.params;
        writeln!(out, "Stock Technical Analysis: {}", s.symbol)?;
        writeln!(
            out,
            "{} bars, {} to {} (indicators on {})",
            s.bars,
            s.first_date,
            s.last_date,
            s.price_source.label()
        )?;
        writeln!(out)?;

        let delta = s
            .price
            .change_pct
            .map(format::percent)
            .unwrap_or_else(|| format::UNDEFINED.to_string());
        writeln!(
            out,
            "{} Current Price: {} ({})",
            s.symbol,
            format::currency(s.price.current),
            delta
        )?;
        writeln!(out)?;

        writeln!(out, "Latest Indicator Values")?;
        let caption = |c: Option<&'static str>| c.unwrap_or(format::UNDEFINED);
        let or_nan = |v: Option<f64>| v.unwrap_or(f64::NAN);
        writeln!(
            out,
            "  {:<10} {:>12}  {}",
            format!("RSI ({})", p.rsi_period),
            format::number(or_nan(s.rsi)),
            caption(s.rsi_zone.map(|z| z.caption()))
        )?;
        writeln!(
            out,
            "  {:<10} {:>12}  {}",
            "MACD",
            format::number(or_nan(s.macd)),
            caption(s.macd_trend.map(|t| t.caption()))
        )?;
        writeln!(
            out,
            "  {:<10} {:>12}  {}",
            format!("CCI ({})", p.cci_period),
            format::number(or_nan(s.cci)),
            caption(s.cci_zone.map(|z| z.caption()))
        )?;
        writeln!(
            out,
            "  {:<10} {:>12}",
            format!("SMA ({})", p.sma_period),
            format::currency(or_nan(s.sma))
        )?;
        writeln!(
            out,
            "  {:<10} {:>12}",
            format!("EMA ({})", p.ema_period),
            format::currency(or_nan(s.ema))
        )?;
        writeln!(
            out,
            "  {:<10} {:>12}",
            "OBV (M)",
            format::number(or_nan(s.obv_millions))
        )?;

        if tail == 0 {
            return Ok(());
        }
        for panel in &self.panels {
            writeln!(out)?;
            write_panel(out, panel, tail)?;
        }
        Ok(())
    }
}

fn write_panel<W: Write>(out: &mut W, panel: &ChartPanel, tail: usize) -> std::io::Result<()> {
    writeln!(out, "{}", panel.title)?;
    write!(out, "  {:<10}", "Date")?;
    for series in &panel.series {
        write!(out, " {:>12}", series.name)?;
    }
    writeln!(out)?;

    for (date, row) in panel.tail(tail) {
        write!(out, "  {:<10}", date.to_string())?;
        for value in row {
            write!(out, " {:>12}", format::number(value))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
