use image::{Rgba, RgbaImage};
use ndarray::Array2;
use tracing::debug;

use crate::consts::HOTSPOT_THRESHOLD;
use crate::error::{FundusError, Result};
use crate::filters::resample::area_average;
use crate::frame::{to_u8, ColorFrame};
use crate::pipeline::config::SaliencyConfig;

use super::colormap::map_intensity;
use super::scale::GridCell;

/// Heuristic saliency of one image: per-cell deviation from the mean color.
///
/// Not a model attention map. The intensity of a cell is the RGB distance of
/// its sampled color from the image mean, normalized and clamped to [0, 1].
/// Grids are read-only once built.
#[derive(Clone, Debug, PartialEq)]
pub struct SaliencyField {
    /// Shape = (grid_height, grid_width), values in [0, 1].
    intensity: Array2<f32>,
    /// Original sampled color per cell, same shape as `intensity`.
    colors: Array2<[u8; 3]>,
    /// Jet-colorized intensity, one RGBA pixel per cell.
    heat: RgbaImage,
    /// Mean sampled color over all cells, 0..255 scale.
    mean_color: [f32; 3],
}

impl SaliencyField {
    /// Assemble a field from precomputed grids.
    ///
    /// Intensities are clamped to [0, 1]; the heat image is derived from them.
    pub fn from_grids(
        intensity: Array2<f32>,
        colors: Array2<[u8; 3]>,
        heat_alpha: u8,
    ) -> Result<Self> {
        if intensity.dim() != colors.dim() {
            return Err(FundusError::Config(format!(
                "intensity grid {:?} and color grid {:?} differ in shape",
                intensity.dim(),
                colors.dim()
            )));
        }
        let (h, w) = intensity.dim();
        if w == 0 || h == 0 {
            return Err(FundusError::InvalidDimensions {
                width: w,
                height: h,
            });
        }

        let intensity = intensity.mapv(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) });
        let mean_color = mean_of(&colors);
        let heat = colorize(&intensity, heat_alpha);

        Ok(Self {
            intensity,
            colors,
            heat,
            mean_color,
        })
    }

    /// Grid dimensions as `(width, height)`.
    pub fn grid_size(&self) -> (usize, usize) {
        let (h, w) = self.intensity.dim();
        (w, h)
    }

    pub fn intensity_at(&self, cell: GridCell) -> Option<f32> {
        self.intensity.get([cell.y, cell.x]).copied()
    }

    pub fn color_at(&self, cell: GridCell) -> Option<[u8; 3]> {
        self.colors.get([cell.y, cell.x]).copied()
    }

    pub fn intensity_grid(&self) -> &Array2<f32> {
        &self.intensity
    }

    pub fn color_grid(&self) -> &Array2<[u8; 3]> {
        &self.colors
    }

    pub fn heat_image(&self) -> &RgbaImage {
        &self.heat
    }

    pub fn mean_color(&self) -> [f32; 3] {
        self.mean_color
    }

    /// Number of cells whose intensity is above the hotspot threshold.
    pub fn hot_cell_count(&self) -> usize {
        self.intensity
            .iter()
            .filter(|&&v| v > HOTSPOT_THRESHOLD)
            .count()
    }

    /// Cell counts over `bins` equal-width intensity bins spanning [0, 1].
    pub fn histogram(&self, bins: usize) -> Vec<usize> {
        let mut counts = vec![0usize; bins];
        if bins == 0 {
            return counts;
        }
        for &v in self.intensity.iter() {
            let idx = ((v * bins as f32) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        counts
    }
}

/// Build the saliency field of `frame`.
///
/// The frame is box-resampled to the configured grid, then each cell's
/// sampled color is compared against the grid-wide mean color.
pub fn build_saliency(frame: &ColorFrame, config: &SaliencyConfig) -> Result<SaliencyField> {
    if frame.is_empty() {
        return Err(FundusError::ImageDecode(format!(
            "image has no pixels ({}x{})",
            frame.width(),
            frame.height()
        )));
    }
    config.validate()?;

    let (gw, gh) = (config.grid_width, config.grid_height);
    let sampled = area_average(frame, gw, gh);

    let colors = Array2::from_shape_fn((gh, gw), |(row, col)| {
        let [r, g, b] = sampled.pixel(row, col);
        [to_u8(r), to_u8(g), to_u8(b)]
    });

    let [avg_r, avg_g, avg_b] = mean_of(&colors);

    let intensity = colors.mapv(|[r, g, b]| {
        let dr = r as f32 - avg_r;
        let dg = g as f32 - avg_g;
        let db = b as f32 - avg_b;
        let dist = (dr * dr + dg * dg + db * db).sqrt();
        (dist / config.intensity_scale).clamp(0.0, 1.0)
    });

    let field = SaliencyField::from_grids(intensity, colors, config.heat_alpha)?;
    debug!(
        grid_width = gw,
        grid_height = gh,
        hot_cells = field.hot_cell_count(),
        "Saliency field built"
    );
    Ok(field)
}

fn mean_of(colors: &Array2<[u8; 3]>) -> [f32; 3] {
    let n = colors.len().max(1) as f64;
    let mut sum = [0.0f64; 3];
    for px in colors.iter() {
        for (s, &c) in sum.iter_mut().zip(px.iter()) {
            *s += c as f64;
        }
    }
    [
        (sum[0] / n) as f32,
        (sum[1] / n) as f32,
        (sum[2] / n) as f32,
    ]
}

fn colorize(intensity: &Array2<f32>, alpha: u8) -> RgbaImage {
    let (h, w) = intensity.dim();
    RgbaImage::from_fn(w as u32, h as u32, |x, y| {
        let rgb = map_intensity(intensity[[y as usize, x as usize]]);
        Rgba([rgb.0[0], rgb.0[1], rgb.0[2], alpha])
    })
}
