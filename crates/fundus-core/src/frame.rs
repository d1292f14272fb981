use std::sync::atomic::{AtomicU64, Ordering};

use image::{Rgb, RgbImage};
use ndarray::Array2;

/// Color image composed of separate channel planes.
/// Pixel values are f32 in [0.0, 1.0].
#[derive(Clone, Debug, PartialEq)]
pub struct ColorFrame {
    /// Row-major planes, shape = (height, width)
    pub red: Array2<f32>,
    pub green: Array2<f32>,
    pub blue: Array2<f32>,
}

impl ColorFrame {
    pub fn new(red: Array2<f32>, green: Array2<f32>, blue: Array2<f32>) -> Self {
        debug_assert_eq!(red.dim(), green.dim());
        debug_assert_eq!(red.dim(), blue.dim());
        Self { red, green, blue }
    }

    /// Frame filled with a single color.
    pub fn filled(width: usize, height: usize, rgb: [f32; 3]) -> Self {
        Self {
            red: Array2::from_elem((height, width), rgb[0]),
            green: Array2::from_elem((height, width), rgb[1]),
            blue: Array2::from_elem((height, width), rgb[2]),
        }
    }

    pub fn width(&self) -> usize {
        self.red.ncols()
    }

    pub fn height(&self) -> usize {
        self.red.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn pixel(&self, row: usize, col: usize) -> [f32; 3] {
        [
            self.red[[row, col]],
            self.green[[row, col]],
            self.blue[[row, col]],
        ]
    }

    pub fn from_rgb8(img: &RgbImage) -> Self {
        let (w, h) = img.dimensions();
        let (w, h) = (w as usize, h as usize);
        let mut red = Array2::<f32>::zeros((h, w));
        let mut green = Array2::<f32>::zeros((h, w));
        let mut blue = Array2::<f32>::zeros((h, w));

        for (col, row, px) in img.enumerate_pixels() {
            let (row, col) = (row as usize, col as usize);
            red[[row, col]] = px.0[0] as f32 / 255.0;
            green[[row, col]] = px.0[1] as f32 / 255.0;
            blue[[row, col]] = px.0[2] as f32 / 255.0;
        }

        Self { red, green, blue }
    }

    /// Quantize to an 8-bit RGB buffer.
    pub fn to_rgb8(&self) -> RgbImage {
        let (h, w) = (self.height(), self.width());
        let mut img = RgbImage::new(w as u32, h as u32);
        for row in 0..h {
            for col in 0..w {
                let [r, g, b] = self.pixel(row, col);
                img.put_pixel(col as u32, row as u32, Rgb([to_u8(r), to_u8(g), to_u8(b)]));
            }
        }
        img
    }
}

/// Convert a [0,1] channel value to the nearest 8-bit level.
pub fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Identity of one displayed image. Grids are looked up by this key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

impl ImageId {
    /// Allocate a process-unique id.
    pub fn next() -> Self {
        Self(NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "img-{}", self.0)
    }
}

/// Metadata about a loaded source image.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    pub width: usize,
    pub height: usize,
    /// Mean color in [0,1].
    pub mean_color: [f32; 3],
}

impl SourceInfo {
    pub fn of(frame: &ColorFrame) -> Self {
        let n = (frame.width() * frame.height()).max(1) as f32;
        Self {
            width: frame.width(),
            height: frame.height(),
            mean_color: [
                frame.red.sum() / n,
                frame.green.sum() / n,
                frame.blue.sum() / n,
            ],
        }
    }
}
