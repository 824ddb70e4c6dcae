//! Settings read from `ta_dashboard.toml`.
//!
//! ```toml
//! provider = "yahoo"
//! price_source = "adjusted-close"
//! export_dir = "exports"
//! tail = 10
//!
//! [indicators]
//! rsi_period = 14
//! ```
//!
//! Every key is optional. Command-line flags override the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared_utils::config::{ConfigError, load_toml, load_toml_or_default};
use tracing::debug;

use crate::{indicators::IndicatorParams, models::bar::PriceSource, providers::ProviderId};

pub const DEFAULT_CONFIG_FILE: &str = "ta_dashboard.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub provider: ProviderId,
    pub price_source: PriceSource,
    pub indicators: IndicatorParams,
    /// Where `analyze --export` and `export` write when no directory is given.
    pub export_dir: Option<PathBuf>,
    /// Rows of each chart panel shown in text output.
    pub tail: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: ProviderId::default(),
            price_source: PriceSource::default(),
            indicators: IndicatorParams::default(),
            export_dir: None,
            tail: 10,
        }
    }
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit path must exist; without one the default file is used
    /// when present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match path {
            Some(path) => load_toml(path)?,
            None => load_toml_or_default(DEFAULT_CONFIG_FILE)?,
        };
        debug!(?settings, "settings loaded");
        Ok(settings)
    }
}
