//! Runtime configuration read from the environment.

use std::env;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::indicators::parser::parse_moving_average_list;
use crate::models::indicators::IndicatorConfig;

pub const DEFAULT_LOOKBACK: usize = 200;

/// `APP_ENV`, falling back to `ENVIRONMENT`, then `"sandbox"`.
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .or_else(|_| env::var("ENVIRONMENT"))
        .unwrap_or_else(|_| "sandbox".to_string())
        .to_lowercase()
}

pub fn is_production(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    /// Directory holding `<SYMBOL>.json` candle files.
    pub data_dir: PathBuf,
    pub symbols: Vec<String>,
    /// Trailing rows kept per symbol before computing.
    pub lookback: usize,
    /// JSON file with an [`IndicatorConfig`]; all defaults when unset.
    pub indicator_config: Option<PathBuf>,
    /// Comma-separated MA labels (`MA20,EMA12`) replacing the config's list.
    pub moving_averages: Option<String>,
    pub style_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            data_dir: PathBuf::from("data"),
            symbols: vec!["SPY".to_string()],
            lookback: DEFAULT_LOOKBACK,
            indicator_config: None,
            moving_averages: None,
            style_file: PathBuf::from("ma_styles.json"),
        }
    }
}

fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let symbols = env::var("SYMBOLS")
            .ok()
            .map(|s| parse_symbols(&s))
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.symbols);

        let lookback = match env::var("LOOKBACK") {
            Ok(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    warn!(value = %raw, "invalid LOOKBACK, using default");
                    defaults.lookback
                }
            },
            Err(_) => defaults.lookback,
        };

        Self {
            environment: get_environment(),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            symbols,
            lookback,
            indicator_config: env::var("INDICATOR_CONFIG").ok().map(PathBuf::from),
            moving_averages: env::var("MOVING_AVERAGES").ok(),
            style_file: env::var("STYLE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.style_file),
        }
    }

    /// Build the indicator configuration: the JSON file if one is set (else
    /// everything on), with `MOVING_AVERAGES` overriding the MA list.
    pub fn load_indicator_config(&self) -> Result<IndicatorConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.indicator_config {
            Some(path) => read_indicator_config(path)?,
            None => IndicatorConfig::all_defaults(),
        };
        if let Some(labels) = &self.moving_averages {
            config.moving_averages = parse_moving_average_list(labels)?;
        }
        Ok(config)
    }
}

pub fn read_indicator_config(path: &Path) -> Result<IndicatorConfig, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
