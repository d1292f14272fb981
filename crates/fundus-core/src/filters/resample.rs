use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::frame::ColorFrame;
use crate::heatmap::scale::GridScale;

/// Box-filter resample of one plane to `(out_w, out_h)`.
///
/// Each output pixel averages the source pixels its footprint covers; when
/// upsampling the footprint degenerates to the nearest source pixel.
pub fn area_average_array(data: &Array2<f32>, out_w: usize, out_h: usize) -> Array2<f32> {
    let (h, w) = data.dim();
    if h == 0 || w == 0 || out_w == 0 || out_h == 0 {
        return Array2::zeros((out_h, out_w));
    }
    let scale = GridScale::between((out_w, out_h), (w, h));

    let cell = |row: usize, col: usize| -> f32 {
        let (x0, x1) = scale.span_x(col);
        let (y0, y1) = scale.span_y(row);
        let mut sum = 0.0f32;
        for sy in y0..y1 {
            for sx in x0..x1 {
                sum += data[[sy, sx]];
            }
        }
        sum / ((x1 - x0) * (y1 - y0)) as f32
    };

    fill(out_w, out_h, cell)
}

/// Resample every channel of a color frame with [`area_average_array`].
pub fn area_average(frame: &ColorFrame, out_w: usize, out_h: usize) -> ColorFrame {
    ColorFrame::new(
        area_average_array(&frame.red, out_w, out_h),
        area_average_array(&frame.green, out_w, out_h),
        area_average_array(&frame.blue, out_w, out_h),
    )
}

/// Bilinear resample of one plane to `(out_w, out_h)` using pixel-center alignment.
pub fn bilinear_array(data: &Array2<f32>, out_w: usize, out_h: usize) -> Array2<f32> {
    let (h, w) = data.dim();
    if h == 0 || w == 0 || out_w == 0 || out_h == 0 {
        return Array2::zeros((out_h, out_w));
    }
    let scale = GridScale::between((out_w, out_h), (w, h));
    let max_x = (w - 1) as f32;
    let max_y = (h - 1) as f32;

    let cell = |row: usize, col: usize| -> f32 {
        let (sx, sy) = scale.source_center(col, row);
        let sx = sx.clamp(0.0, max_x);
        let sy = sy.clamp(0.0, max_y);
        let x0 = sx.floor() as usize;
        let y0 = sy.floor() as usize;
        let x1 = (x0 + 1).min(w - 1);
        let y1 = (y0 + 1).min(h - 1);
        let fx = sx - x0 as f32;
        let fy = sy - y0 as f32;

        let top = data[[y0, x0]] * (1.0 - fx) + data[[y0, x1]] * fx;
        let bottom = data[[y1, x0]] * (1.0 - fx) + data[[y1, x1]] * fx;
        top * (1.0 - fy) + bottom * fy
    };

    fill(out_w, out_h, cell)
}

fn fill<F>(out_w: usize, out_h: usize, cell: F) -> Array2<f32>
where
    F: Fn(usize, usize) -> f32 + Sync,
{
    let mut result = Array2::<f32>::zeros((out_h, out_w));
    if out_w * out_h >= PARALLEL_PIXEL_THRESHOLD {
        result
            .axis_iter_mut(ndarray::Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, mut out)| {
                for col in 0..out_w {
                    out[col] = cell(row, col);
                }
            });
    } else {
        for row in 0..out_h {
            for col in 0..out_w {
                result[[row, col]] = cell(row, col);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_average_halves_checkerboard_to_mean() {
        let data = Array2::from_shape_fn((4, 4), |(r, c)| if (r + c) % 2 == 0 { 1.0 } else { 0.0 });
        let out = area_average_array(&data, 2, 2);
        for v in out.iter() {
            assert!((v - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn bilinear_identity_size_is_exact() {
        let data = Array2::from_shape_fn((3, 5), |(r, c)| (r * 5 + c) as f32);
        let out = bilinear_array(&data, 5, 3);
        for (a, b) in data.iter().zip(out.iter()) {
            assert!((a - b).abs() < 1e-5);
        }
    }
}
