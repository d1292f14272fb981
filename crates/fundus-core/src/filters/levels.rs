use ndarray::Zip;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::frame::ColorFrame;

/// Adjust contrast around the 0.5 midpoint (1.0 = no change, >1.0 = more contrast).
pub fn contrast(frame: &ColorFrame, amount: f32) -> ColorFrame {
    per_channel(frame, |v| (v - 0.5) * amount + 0.5)
}

/// Scale brightness multiplicatively (1.0 = no change).
pub fn brightness(frame: &ColorFrame, amount: f32) -> ColorFrame {
    per_channel(frame, |v| v * amount)
}

/// Scale saturation around each pixel's Rec. 709 luminance (1.0 = no change, 0.0 = gray).
pub fn saturate(frame: &ColorFrame, amount: f32) -> ColorFrame {
    let mut out = frame.clone();
    Zip::from(&mut out.red)
        .and(&mut out.green)
        .and(&mut out.blue)
        .par_for_each(|r, g, b| {
            let lum = LUMINANCE_R * *r + LUMINANCE_G * *g + LUMINANCE_B * *b;
            *r = (lum + (*r - lum) * amount).clamp(0.0, 1.0);
            *g = (lum + (*g - lum) * amount).clamp(0.0, 1.0);
            *b = (lum + (*b - lum) * amount).clamp(0.0, 1.0);
        });
    out
}

fn per_channel<F>(frame: &ColorFrame, f: F) -> ColorFrame
where
    F: Fn(f32) -> f32,
{
    let apply = |v: &f32| f(*v).clamp(0.0, 1.0);
    ColorFrame::new(
        frame.red.map(apply),
        frame.green.map(apply),
        frame.blue.map(apply),
    )
}
