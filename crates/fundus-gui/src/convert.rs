use fundus_core::frame::{to_u8, ColorFrame};

/// Convert a ColorFrame (channels in [0.0, 1.0]) to an egui ColorImage.
pub fn color_frame_to_image(frame: &ColorFrame) -> egui::ColorImage {
    let h = frame.height();
    let w = frame.width();
    let mut pixels = Vec::with_capacity(h * w);

    for row in 0..h {
        for col in 0..w {
            let [r, g, b] = frame.pixel(row, col);
            pixels.push(egui::Color32::from_rgb(to_u8(r), to_u8(g), to_u8(b)));
        }
    }

    egui::ColorImage {
        size: [w, h],
        pixels,
        source_size: Default::default(),
    }
}
