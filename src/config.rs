use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::export::DEFAULT_EXPORT_FILE;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

pub const DEFAULT_SOURCE_URL: &str = "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/combined_output-qRzViZjkEMdHLYfOfzNSAxI4H30zIz.csv";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Runtime settings. Every key is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV fetched on startup and on reload.
    pub source_url: String,
    /// File name proposed by the export save dialog.
    pub export_file_name: String,
    /// Maximum number of rows rendered in the table.
    pub table_row_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            export_file_name: DEFAULT_EXPORT_FILE.to_string(),
            table_row_limit: 100,
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load `path` if it exists, falling back to defaults when it is absent
    /// or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }
}
