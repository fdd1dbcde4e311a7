//! Dashboard settings, read from an optional TOML file.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! app_title = "Regional dashboard"
//! font = "DejaVu Sans"
//! plot_bgcolor = "#fafafa"
//! port = 9000
//! ```

use crate::chart::{ChartStyle, Rgb8};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Browser tab / window title.
    pub app_title: String,
    pub heading: String,
    pub description: String,
    pub footer: String,
    /// Font family used for chart text.
    pub font: String,
    /// Background of the whole chart image, `#rrggbb`.
    pub paper_bgcolor: String,
    /// Background of the plotting area, `#rrggbb`.
    pub plot_bgcolor: String,
    /// Number formatting locale tag (`en`, `de`, ...).
    pub locale: String,
    /// TTF used to draw chart text; system fonts are searched when unset.
    pub font_path: Option<PathBuf>,
    /// CSV with the sample's header to use instead of the bundled sample.
    pub data_path: Option<PathBuf>,
    pub host: String,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            app_title: "Regional dashboard".to_string(),
            heading: "My dashboard".to_string(),
            description: "This dashboard presents random numbers and says absolutely nothing about anything.".to_string(),
            footer: "Sample data only.".to_string(),
            font: "sans-serif".to_string(),
            paper_bgcolor: "#ffffff".to_string(),
            plot_bgcolor: "#ffffff".to_string(),
            locale: "en".to_string(),
            font_path: None,
            data_path: None,
            host: "127.0.0.1".to_string(),
            port: 8050,
        }
    }
}

impl DashboardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let cfg = Self::from_toml(&text).with_context(|| format!("parse config {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        cfg.chart_style()?;
        Ok(cfg)
    }

    /// Chart presentation settings; fails on a malformed color.
    pub fn chart_style(&self) -> Result<ChartStyle> {
        let color = |field: &str, value: &str| match Rgb8::from_hex(value) {
            Some(c) => Ok(c),
            None => bail!("{field}: expected a #rrggbb color, got '{value}'"),
        };
        Ok(ChartStyle {
            font: self.font.clone(),
            paper_bgcolor: color("paper_bgcolor", &self.paper_bgcolor)?,
            plot_bgcolor: color("plot_bgcolor", &self.plot_bgcolor)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
