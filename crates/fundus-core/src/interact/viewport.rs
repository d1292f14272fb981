//! Zoom and pan state of the image viewer, and the screen/image coordinate mapping.

use crate::consts::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use crate::heatmap::scale::{GridCell, GridScale};

/// A 2D point or offset in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportMode {
    /// zoom = 1, pan = (0, 0)
    Idle,
    /// zoom in (1, 5]; panning allowed
    Zoomed,
}

/// Zoom level and pan offset of the displayed image/overlay pair.
///
/// Screen space is relative to the top-left of the unzoomed view rectangle;
/// the image is drawn scaled by `zoom` and then translated by `pan`.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    zoom: f32,
    pan: Point,
    /// Pointer minus pan at the start of the active drag.
    pan_anchor: Option<Point>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            pan: Point::ZERO,
            pan_anchor: None,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan_offset(&self) -> Point {
        self.pan
    }

    pub fn mode(&self) -> ViewportMode {
        if self.zoom > MIN_ZOOM {
            ViewportMode::Zoomed
        } else {
            ViewportMode::Idle
        }
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
        if self.zoom <= MIN_ZOOM {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Begin a drag. Ignored unless zoomed in. Returns whether a pan started.
    pub fn pan_start(&mut self, pointer: Point) -> bool {
        if self.mode() == ViewportMode::Idle {
            return false;
        }
        self.pan_anchor = Some(pointer - self.pan);
        true
    }

    /// Follow the pointer during an active drag. Returns whether the pan moved.
    pub fn pan_move(&mut self, pointer: Point) -> bool {
        match self.pan_anchor {
            Some(anchor) => {
                self.pan = pointer - anchor;
                true
            }
            None => false,
        }
    }

    /// End the drag, keeping the current offset.
    pub fn pan_end(&mut self) {
        self.pan_anchor = None;
    }

    /// Screen point to unscaled, unpanned image-intrinsic coordinates.
    pub fn screen_to_image(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    /// Image-intrinsic point to screen coordinates.
    pub fn image_to_screen(&self, image: Point) -> Point {
        Point::new(
            image.x * self.zoom + self.pan.x,
            image.y * self.zoom + self.pan.y,
        )
    }

    /// Grid cell under a screen point, for a view rectangle of
    /// `(view_w, view_h)` showing a `grid` of `(width, height)` cells.
    /// `None` when the point maps outside the grid.
    pub fn grid_cell(
        &self,
        screen: Point,
        view_w: f32,
        view_h: f32,
        grid: (usize, usize),
    ) -> Option<GridCell> {
        let image = self.screen_to_image(screen);
        GridScale::from_view(view_w, view_h, grid).cell_at(image.x, image.y)
    }
}
