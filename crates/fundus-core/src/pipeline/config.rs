use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_HEAT_ALPHA, DEFAULT_INTENSITY_SCALE,
    DEFAULT_OVERLAY_BLUR_SIGMA, DEFAULT_OVERLAY_OPACITY, DEFAULT_PREPROCESS_BRIGHTNESS,
    DEFAULT_PREPROCESS_CONTRAST, DEFAULT_PREPROCESS_MAX_DIMENSION, DEFAULT_PREPROCESS_SATURATION,
};
use crate::error::{FundusError, Result};
use crate::heatmap::overlay::BlendMode;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    #[serde(default)]
    pub preprocess: PreprocessConfig,
    #[serde(default)]
    pub saliency: SaliencyConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
}

impl HeatmapConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.saliency.validate()?;
        self.overlay.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    pub enabled: bool,
    /// Longest side after resizing, in pixels.
    pub max_dimension: usize,
    pub contrast: f32,
    pub brightness: f32,
    pub saturation: f32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_dimension: DEFAULT_PREPROCESS_MAX_DIMENSION,
            contrast: DEFAULT_PREPROCESS_CONTRAST,
            brightness: DEFAULT_PREPROCESS_BRIGHTNESS,
            saturation: DEFAULT_PREPROCESS_SATURATION,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaliencyConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    /// RGB distance from the mean color that maps to intensity 1.0.
    pub intensity_scale: f32,
    pub heat_alpha: u8,
}

impl Default for SaliencyConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            intensity_scale: DEFAULT_INTENSITY_SCALE,
            heat_alpha: DEFAULT_HEAT_ALPHA,
        }
    }
}

impl SaliencyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(FundusError::Config(format!(
                "saliency grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.intensity_scale.is_nan() || self.intensity_scale <= 0.0 {
            return Err(FundusError::Config(format!(
                "intensity_scale must be positive, got {}",
                self.intensity_scale
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Gaussian sigma in output pixels.
    pub blur_sigma: f32,
    pub opacity: f32,
    pub blend: BlendMode,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            blur_sigma: DEFAULT_OVERLAY_BLUR_SIGMA,
            opacity: DEFAULT_OVERLAY_OPACITY,
            blend: BlendMode::Screen,
        }
    }
}

impl OverlayConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(FundusError::Config(format!(
                "overlay opacity must be within [0, 1], got {}",
                self.opacity
            )));
        }
        if !self.blur_sigma.is_finite() || self.blur_sigma < 0.0 {
            return Err(FundusError::Config(format!(
                "blur_sigma must be a non-negative number, got {}",
                self.blur_sigma
            )));
        }
        Ok(())
    }
}
