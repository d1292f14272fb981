use image::Rgb;

/// Map a scalar intensity to a color with the piecewise-linear "jet" colormap.
///
/// The input is clamped to [0, 1] (NaN is treated as 0). Four bands of width
/// 0.25 run blue -> cyan -> green -> yellow -> red.
pub fn map_intensity(v: f32) -> Rgb<u8> {
    let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };

    let (r, g, b) = if v < 0.25 {
        (0.0, 4.0 * v * 255.0, 255.0)
    } else if v < 0.5 {
        (0.0, 255.0, 255.0 - 4.0 * (v - 0.25) * 255.0)
    } else if v < 0.75 {
        (4.0 * (v - 0.5) * 255.0, 255.0, 0.0)
    } else {
        (255.0, 255.0 - 4.0 * (v - 0.75) * 255.0, 0.0)
    };

    Rgb([channel(r), channel(g), channel(b)])
}

fn channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
