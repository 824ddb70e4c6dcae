//! Technical-analysis dashboard for one ticker over a date range.
//!
//! [`pipeline::run_analysis`] fetches daily bars from a
//! [`providers::DataProvider`], validates them and computes the indicator set;
//! [`presentation::Dashboard`] renders the result and [`io::sink::CsvFileSink`]
//! exports it.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod indicators;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod presentation;
pub mod providers;

pub use errors::{Error, ValidationError};
