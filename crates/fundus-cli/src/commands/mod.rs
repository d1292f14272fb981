pub mod config;
pub mod heatmap;
pub mod history;
pub mod info;
pub mod inspect;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fundus_core::pipeline::config::HeatmapConfig;
use tracing::debug;

/// Load the config file if one was given, otherwise the defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<HeatmapConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading config");
            HeatmapConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => Ok(HeatmapConfig::default()),
    }
}

/// `<stem>_<suffix>.png` next to `input`.
pub(crate) fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".into());
    input.with_file_name(format!("{stem}_{suffix}.png"))
}
