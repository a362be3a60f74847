use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Optional settings file, looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Dashboard settings. Every field may be omitted from `dashboard.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Workbook, CSV or parquet file holding the dataset.
    pub dataset_path: PathBuf,
    /// Worksheet to read (workbooks only).
    pub sheet_name: String,
    /// Bins in the age histogram.
    pub histogram_bins: usize,
    /// Bars in the "most purchased" chart.
    pub top_items: usize,
    /// Inner radius of the donut as a fraction of the outer radius.
    pub donut_hole: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("shopping_trends.xlsx"),
            sheet_name: "shopping_trends".to_string(),
            histogram_bins: 10,
            top_items: 10,
            donut_hole: 0.4,
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No {} found, using default settings", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 {
            bail!("histogram_bins must be at least 1");
        }
        if self.top_items == 0 {
            bail!("top_items must be at least 1");
        }
        if !(0.0..1.0).contains(&self.donut_hole) {
            bail!("donut_hole must be in [0, 1), got {}", self.donut_hole);
        }
        Ok(())
    }
}
