use image::{Rgba, RgbaImage};
use ndarray::{Array2, Zip};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_OVERLAY_BLUR_SIGMA, DEFAULT_OVERLAY_OPACITY};
use crate::error::{FundusError, Result};
use crate::filters::gaussian_blur::gaussian_blur_array;
use crate::filters::resample::bilinear_array;
use crate::frame::{to_u8, ColorFrame};

/// How overlay colors combine with the base image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendMode {
    /// `1 - (1 - base) * (1 - overlay)`: only ever brightens.
    #[default]
    Screen,
    /// Plain source-over.
    Normal,
}

impl std::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Screen => write!(f, "Screen"),
            Self::Normal => write!(f, "Normal"),
        }
    }
}

/// Heat image upscaled and blurred to the resolution of its source image.
///
/// Channels are straight (non-premultiplied) values in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayComposite {
    pub red: Array2<f32>,
    pub green: Array2<f32>,
    pub blue: Array2<f32>,
    pub alpha: Array2<f32>,
}

impl OverlayComposite {
    pub fn width(&self) -> usize {
        self.red.ncols()
    }

    pub fn height(&self) -> usize {
        self.red.nrows()
    }

    pub fn pixel(&self, row: usize, col: usize) -> [f32; 4] {
        [
            self.red[[row, col]],
            self.green[[row, col]],
            self.blue[[row, col]],
            self.alpha[[row, col]],
        ]
    }

    pub fn to_rgba8(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            let [r, g, b, a] = self.pixel(y as usize, x as usize);
            Rgba([to_u8(r), to_u8(g), to_u8(b), to_u8(a)])
        })
    }
}

/// Upscale `heat` to `(target_w, target_h)` and smooth it with a Gaussian of
/// `blur_sigma` target pixels, so grid cells read as gradients.
///
/// Interpolation and blur run on premultiplied color so transparent cells do
/// not bleed black into their neighbors.
pub fn composite(
    heat: &RgbaImage,
    target_w: usize,
    target_h: usize,
    blur_sigma: f32,
) -> Result<OverlayComposite> {
    let (hw, hh) = heat.dimensions();
    if hw == 0 || hh == 0 {
        return Err(FundusError::CompositionUnavailable(
            "heat image is empty".into(),
        ));
    }
    if target_w == 0 || target_h == 0 {
        return Err(FundusError::CompositionUnavailable(format!(
            "target size is {target_w}x{target_h}"
        )));
    }

    let (hw, hh) = (hw as usize, hh as usize);
    let mut planes = vec![Array2::<f32>::zeros((hh, hw)); 4];
    for (x, y, px) in heat.enumerate_pixels() {
        let (row, col) = (y as usize, x as usize);
        let a = px.0[3] as f32 / 255.0;
        for c in 0..3 {
            planes[c][[row, col]] = px.0[c] as f32 / 255.0 * a;
        }
        planes[3][[row, col]] = a;
    }

    let mut planes: Vec<Array2<f32>> = planes
        .into_par_iter()
        .map(|p| gaussian_blur_array(&bilinear_array(&p, target_w, target_h), blur_sigma))
        .collect();

    let alpha = planes.pop().unwrap_or_else(|| Array2::zeros((target_h, target_w)));
    let unpremultiply = |plane: Array2<f32>| {
        let mut plane = plane;
        Zip::from(&mut plane).and(&alpha).par_for_each(|c, &a| {
            *c = if a > f32::EPSILON { (*c / a).clamp(0.0, 1.0) } else { 0.0 };
        });
        plane
    };
    let mut channels = planes.into_iter().map(unpremultiply);
    let (Some(red), Some(green), Some(blue)) = (channels.next(), channels.next(), channels.next())
    else {
        return Err(FundusError::CompositionUnavailable(
            "overlay channels missing".into(),
        ));
    };

    debug!(target_w, target_h, blur_sigma, "Overlay composited");
    Ok(OverlayComposite {
        red,
        green,
        blue,
        alpha: alpha.mapv(|a| a.clamp(0.0, 1.0)),
    })
}

/// Blend one overlay pixel `[r, g, b, a]` over one base pixel.
pub fn blend_pixel(base: [f32; 3], over: [f32; 4], opacity: f32, blend: BlendMode) -> [f32; 3] {
    let weight = (opacity.clamp(0.0, 1.0) * over[3]).clamp(0.0, 1.0);
    let mut out = [0.0f32; 3];
    for c in 0..3 {
        let blended = match blend {
            BlendMode::Screen => 1.0 - (1.0 - base[c]) * (1.0 - over[c]),
            BlendMode::Normal => over[c],
        };
        out[c] = (base[c] + (blended - base[c]) * weight).clamp(0.0, 1.0);
    }
    out
}

/// Draw `overlay` over `base` into a single raster for export.
///
/// The live view renders through this same function, so exports match
/// what is on screen.
pub fn flatten(
    base: &ColorFrame,
    overlay: &OverlayComposite,
    opacity: f32,
    blend: BlendMode,
) -> Result<ColorFrame> {
    if base.width() != overlay.width() || base.height() != overlay.height() {
        return Err(FundusError::CompositionUnavailable(format!(
            "overlay is {}x{} but base image is {}x{}",
            overlay.width(),
            overlay.height(),
            base.width(),
            base.height()
        )));
    }

    let mut out = base.clone();
    Zip::indexed(&mut out.red)
        .and(&mut out.green)
        .and(&mut out.blue)
        .par_for_each(|(row, col), r, g, b| {
            let [nr, ng, nb] =
                blend_pixel([*r, *g, *b], overlay.pixel(row, col), opacity, blend);
            *r = nr;
            *g = ng;
            *b = nb;
        });
    Ok(out)
}

/// [`composite`] with the default blur.
pub fn render_overlay(heat: &RgbaImage, width: usize, height: usize) -> Result<OverlayComposite> {
    composite(heat, width, height, DEFAULT_OVERLAY_BLUR_SIGMA)
}

/// [`flatten`] with the default opacity and screen blending.
pub fn flatten_for_export(base: &ColorFrame, overlay: &OverlayComposite) -> Result<ColorFrame> {
    flatten(base, overlay, DEFAULT_OVERLAY_OPACITY, BlendMode::Screen)
}
