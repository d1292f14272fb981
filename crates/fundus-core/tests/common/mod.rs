#![allow(dead_code)]

use ndarray::Array2;

use fundus_core::frame::ColorFrame;
use fundus_core::heatmap::SaliencyField;

/// Uniform frame of the given [0,1] color.
pub fn uniform_frame(w: usize, h: usize, rgb: [f32; 3]) -> ColorFrame {
    ColorFrame::filled(w, h, rgb)
}

/// Mid-gray frame with a square patch of `patch` color at the top-left corner.
pub fn frame_with_patch(w: usize, h: usize, patch_size: usize, patch: [f32; 3]) -> ColorFrame {
    let mut frame = ColorFrame::filled(w, h, [0.5, 0.5, 0.5]);
    for row in 0..patch_size.min(h) {
        for col in 0..patch_size.min(w) {
            frame.red[[row, col]] = patch[0];
            frame.green[[row, col]] = patch[1];
            frame.blue[[row, col]] = patch[2];
        }
    }
    frame
}

/// Smooth diagonal color ramp, useful where every pixel should differ.
pub fn ramp_frame(w: usize, h: usize) -> ColorFrame {
    let denom = (w + h).max(1) as f32;
    ColorFrame::new(
        Array2::from_shape_fn((h, w), |(r, c)| (r + c) as f32 / denom),
        Array2::from_shape_fn((h, w), |(r, _)| r as f32 / h.max(1) as f32),
        Array2::from_shape_fn((h, w), |(_, c)| 1.0 - c as f32 / w.max(1) as f32),
    )
}

/// Saliency field with one intensity and one color everywhere, except
/// `cell` which gets `hot_intensity` and `hot_color`.
pub fn field_with_cell(
    grid: usize,
    cell: (usize, usize),
    hot_intensity: f32,
    hot_color: [u8; 3],
) -> SaliencyField {
    let mut intensity = Array2::<f32>::zeros((grid, grid));
    let mut colors = Array2::from_elem((grid, grid), [100u8, 100, 100]);
    intensity[[cell.1, cell.0]] = hot_intensity;
    colors[[cell.1, cell.0]] = hot_color;
    SaliencyField::from_grids(intensity, colors, 180).expect("valid grids")
}

/// Saliency field where every cell has the same intensity and color.
pub fn uniform_field(grid: usize, intensity: f32, color: [u8; 3]) -> SaliencyField {
    SaliencyField::from_grids(
        Array2::from_elem((grid, grid), intensity),
        Array2::from_elem((grid, grid), color),
        180,
    )
    .expect("valid grids")
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
