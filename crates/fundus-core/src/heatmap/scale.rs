//! Scale factors between two raster sizes.
//!
//! The saliency grid and the displayed image live at different resolutions.
//! Resampling, overlay upscaling and pointer-to-cell lookup all go through
//! [`GridScale`] so the two directions of the mapping share one rounding rule.

/// Integer cell coordinates within a grid. `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: usize,
    pub y: usize,
}

impl GridCell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Linear mapping from a `from` raster of `(width, height)` into a `to` raster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridScale {
    from: (usize, usize),
    to: (usize, usize),
    sx: f32,
    sy: f32,
}

impl GridScale {
    /// Scale taking coordinates in a `from` raster into a `to` raster.
    /// Zero-sized `from` dimensions produce a zero scale on that axis.
    pub fn between(from: (usize, usize), to: (usize, usize)) -> Self {
        let ratio = |t: usize, f: usize| if f == 0 { 0.0 } else { t as f32 / f as f32 };
        Self {
            from,
            to,
            sx: ratio(to.0, from.0),
            sy: ratio(to.1, from.1),
        }
    }

    /// Same as [`GridScale::between`] with fractional `from` dimensions, as
    /// produced by an on-screen view rectangle.
    pub fn from_view(view_w: f32, view_h: f32, to: (usize, usize)) -> Self {
        let ratio = |t: usize, f: f32| if f > 0.0 { t as f32 / f } else { 0.0 };
        Self {
            from: (view_w.max(0.0) as usize, view_h.max(0.0) as usize),
            to,
            sx: ratio(to.0, view_w),
            sy: ratio(to.1, view_h),
        }
    }

    pub fn factors(&self) -> (f32, f32) {
        (self.sx, self.sy)
    }

    pub fn target_size(&self) -> (usize, usize) {
        self.to
    }

    pub fn source_size(&self) -> (usize, usize) {
        self.from
    }

    /// Map a continuous point into the target raster.
    pub fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.sx, y * self.sy)
    }

    /// The target cell containing the mapped point, or `None` when it falls
    /// outside `[0, W) x [0, H)`.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<GridCell> {
        let (gx, gy) = self.map(x, y);
        if !gx.is_finite() || !gy.is_finite() || gx < 0.0 || gy < 0.0 {
            return None;
        }
        let (cx, cy) = (gx.floor() as usize, gy.floor() as usize);
        if cx >= self.to.0 || cy >= self.to.1 {
            return None;
        }
        Some(GridCell::new(cx, cy))
    }

    /// Half-open column range of the target raster covered by source column `col`.
    pub fn span_x(&self, col: usize) -> (usize, usize) {
        span(col, self.sx, self.to.0)
    }

    /// Half-open row range of the target raster covered by source row `row`.
    pub fn span_y(&self, row: usize) -> (usize, usize) {
        span(row, self.sy, self.to.1)
    }

    /// Target-raster coordinate of the center of source pixel `(col, row)`,
    /// in the convention where integer coordinates are pixel centers.
    pub fn source_center(&self, col: usize, row: usize) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.sx - 0.5,
            (row as f32 + 0.5) * self.sy - 0.5,
        )
    }
}

fn span(index: usize, factor: f32, limit: usize) -> (usize, usize) {
    if limit == 0 {
        return (0, 0);
    }
    let start = ((index as f32 * factor).floor() as usize).min(limit - 1);
    let end = (((index + 1) as f32 * factor).floor() as usize)
        .max(start + 1)
        .min(limit);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_partition_integer_ratio() {
        let scale = GridScale::between((4, 4), (640, 480));
        assert_eq!(scale.span_x(0), (0, 160));
        assert_eq!(scale.span_x(3), (480, 640));
        assert_eq!(scale.span_y(1), (120, 240));
    }

    #[test]
    fn upsampling_span_is_never_empty() {
        let scale = GridScale::between((64, 64), (10, 10));
        for i in 0..64 {
            let (a, b) = scale.span_x(i);
            assert!(b > a && b <= 10);
        }
    }

    #[test]
    fn cell_at_rejects_outside_points() {
        let scale = GridScale::from_view(320.0, 320.0, (64, 64));
        assert_eq!(scale.cell_at(0.0, 0.0), Some(GridCell::new(0, 0)));
        assert_eq!(scale.cell_at(319.9, 12.0), Some(GridCell::new(63, 2)));
        assert_eq!(scale.cell_at(320.0, 12.0), None);
        assert_eq!(scale.cell_at(-0.1, 12.0), None);
        assert_eq!(scale.cell_at(f32::NAN, 0.0), None);
    }
}
