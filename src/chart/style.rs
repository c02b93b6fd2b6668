//! Moving-average line styles with a load / edit / persist lifecycle.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum StyleError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub linewidth: f64,
    pub linestyle: String,
}

impl LineStyle {
    pub fn solid(color: &str) -> Self {
        Self {
            color: color.to_string(),
            linewidth: 1.0,
            linestyle: "-".to_string(),
        }
    }
}

/// Saved entries may carry only some fields.
#[derive(Debug, Default, Deserialize)]
struct SavedLineStyle {
    color: Option<String>,
    linewidth: Option<f64>,
    linestyle: Option<String>,
}

const FALLBACK_COLOR: &str = "#808080";

/// Line styles keyed by MA label (`MA20`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartStyle {
    lines: BTreeMap<String, LineStyle>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let lines = [
            ("MA5", "#FFBF00"),
            ("MA20", "#00BFFF"),
            ("MA60", "#9400D3"),
            ("MA120", "#32CD32"),
            ("MA200", "#FF4500"),
        ]
        .iter()
        .map(|(name, color)| (name.to_string(), LineStyle::solid(color)))
        .collect();
        Self { lines }
    }
}

impl ChartStyle {
    /// Defaults overlaid with whatever `path` saved. Fields a saved entry
    /// omits keep their default; labels without a default start from the
    /// fallback line.
    ///
    /// A missing file gives the defaults. So does an unreadable or corrupt
    /// one, with a warning.
    pub fn load(path: &Path) -> Self {
        let mut style = Self::default();
        if !path.exists() {
            return style;
        }

        let saved: BTreeMap<String, SavedLineStyle> = match std::fs::read_to_string(path)
            .map_err(StyleError::from)
            .and_then(|raw| serde_json::from_str(&raw).map_err(StyleError::from))
        {
            Ok(saved) => saved,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read chart styles, using defaults");
                return style;
            }
        };

        for (name, values) in saved {
            let line = style
                .lines
                .entry(name)
                .or_insert_with(|| LineStyle::solid(FALLBACK_COLOR));
            if let Some(color) = values.color {
                line.color = color;
            }
            if let Some(linewidth) = values.linewidth {
                line.linewidth = linewidth;
            }
            if let Some(linestyle) = values.linestyle {
                line.linestyle = linestyle;
            }
        }
        debug!(path = %path.display(), "loaded chart styles");
        style
    }

    pub fn save(&self, path: &Path) -> Result<(), StyleError> {
        let raw = serde_json::to_string_pretty(&self.lines)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    pub fn get(&self, label: &str) -> Option<&LineStyle> {
        self.lines.get(label)
    }

    /// Style for `label`, or a thin grey line when none is configured.
    pub fn line_for(&self, label: &str) -> LineStyle {
        self.get(label)
            .cloned()
            .unwrap_or_else(|| LineStyle::solid(FALLBACK_COLOR))
    }

    /// Returns whether anything changed, so callers persist only on change.
    pub fn set(&mut self, label: &str, line: LineStyle) -> bool {
        if self.lines.get(label) == Some(&line) {
            return false;
        }
        self.lines.insert(label.to_string(), line);
        true
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.lines.keys().map(String::as_str)
    }
}
