/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Default width of the saliency analysis grid, in cells.
pub const DEFAULT_GRID_WIDTH: usize = 64;

/// Default height of the saliency analysis grid, in cells.
pub const DEFAULT_GRID_HEIGHT: usize = 64;

/// Empirical RGB distance that maps to full saliency intensity.
pub const DEFAULT_INTENSITY_SCALE: f32 = 110.0;

/// Alpha of every heat image pixel (~70% opaque).
pub const DEFAULT_HEAT_ALPHA: u8 = 180;

/// Gaussian sigma, in target pixels, used when upscaling the heat image.
pub const DEFAULT_OVERLAY_BLUR_SIGMA: f32 = 15.0;

/// Opacity of the overlay when composited over the base image.
pub const DEFAULT_OVERLAY_OPACITY: f32 = 0.7;

/// A cell is a hotspot only when its intensity is strictly above this value.
pub const HOTSPOT_THRESHOLD: f32 = 0.6;

/// Mean RGB brightness above which a hotspot reads as a bright lesion.
pub const BRIGHT_LESION_MIN_BRIGHTNESS: f32 = 180.0;

/// Mean RGB brightness below which a red-dominant hotspot reads as a dark red lesion.
pub const DARK_LESION_MAX_BRIGHTNESS: f32 = 150.0;

/// Red must exceed green and blue by this factor for a dark red lesion.
pub const RED_DOMINANCE_RATIO: f32 = 1.2;

/// Lower zoom bound; also the zoom of the idle viewport.
pub const MIN_ZOOM: f32 = 1.0;

/// Upper zoom bound.
pub const MAX_ZOOM: f32 = 5.0;

/// Zoom change per zoom-in/zoom-out step.
pub const ZOOM_STEP: f32 = 0.5;

/// Longest side, in pixels, of a preprocessed image.
pub const DEFAULT_PREPROCESS_MAX_DIMENSION: usize = 1600;

/// Contrast factor of the enhancement stage.
pub const DEFAULT_PREPROCESS_CONTRAST: f32 = 1.25;

/// Brightness factor of the enhancement stage.
pub const DEFAULT_PREPROCESS_BRIGHTNESS: f32 = 1.05;

/// Saturation factor of the enhancement stage.
pub const DEFAULT_PREPROCESS_SATURATION: f32 = 1.1;

/// Rec. 709 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.2126;

/// Rec. 709 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.7152;

/// Rec. 709 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.0722;

/// Number of color channels in a color frame (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;
