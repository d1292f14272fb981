use tracing::debug;

use crate::filters::levels::{brightness, contrast, saturate};
use crate::filters::resample::area_average;
use crate::frame::ColorFrame;
use crate::pipeline::config::PreprocessConfig;

/// Size that fits `(width, height)` within `max_dimension` on its longest side,
/// preserving aspect ratio. Images already within bounds keep their size.
pub fn fitted_size(width: usize, height: usize, max_dimension: usize) -> (usize, usize) {
    let longest = width.max(height);
    if max_dimension == 0 || longest <= max_dimension {
        return (width, height);
    }
    let scale = max_dimension as f64 / longest as f64;
    let fit = |v: usize| ((v as f64 * scale).round() as usize).max(1);
    (fit(width), fit(height))
}

/// Photo enhancement applied before analysis: downscale, then contrast,
/// brightness and saturation, in that order.
pub fn enhance(frame: &ColorFrame, config: &PreprocessConfig) -> ColorFrame {
    if !config.enabled || frame.is_empty() {
        return frame.clone();
    }

    let (w, h) = fitted_size(frame.width(), frame.height(), config.max_dimension);
    let resized = if (w, h) != (frame.width(), frame.height()) {
        debug!(
            from_width = frame.width(),
            from_height = frame.height(),
            to_width = w,
            to_height = h,
            "Downscaling input image"
        );
        area_average(frame, w, h)
    } else {
        frame.clone()
    };

    let adjusted = contrast(&resized, config.contrast);
    let adjusted = brightness(&adjusted, config.brightness);
    saturate(&adjusted, config.saturation)
}
