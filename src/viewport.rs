use crate::core::{Point, Rect};

/// Canvas units of slack kept around the visible area before culling.
pub const CULL_SLACK: f64 = 5.0;

/// Placement of the square virtual canvas inside a pixel container.
///
/// The canvas is scaled to the container's larger side and centered, so it
/// covers the container and the overflow on the shorter axis is cropped.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportFit {
    pub width: f64,
    pub height: f64,
    pub canvas_size: f64,
    /// Side of the scaled canvas in pixels.
    pub size_px: f64,
    /// Horizontal offset of the canvas origin; `<= 0` when cropped.
    pub margin_x: f64,
    /// Vertical offset of the canvas origin; `<= 0` when cropped.
    pub margin_y: f64,
}

impl ViewportFit {
    pub fn cover(width: f64, height: f64, canvas_size: f64) -> Self {
        let width = sanitize(width);
        let height = sanitize(height);
        let size_px = width.max(height);
        Self {
            width,
            height,
            canvas_size,
            size_px,
            margin_x: (width - size_px) / 2.0,
            margin_y: (height - size_px) / 2.0,
        }
    }

    pub fn px_per_unit(&self) -> f64 {
        if self.canvas_size > 0.0 {
            self.size_px / self.canvas_size
        } else {
            0.0
        }
    }

    /// Canvas coordinates to container pixels.
    pub fn to_px(&self, p: Point) -> Point {
        let s = self.px_per_unit();
        Point::new(p.x * s + self.margin_x, p.y * s + self.margin_y)
    }

    /// Container pixels to canvas coordinates.
    pub fn to_canvas(&self, px: Point) -> Point {
        let s = self.px_per_unit();
        if s == 0.0 {
            return Point::ZERO;
        }
        Point::new((px.x - self.margin_x) / s, (px.y - self.margin_y) / s)
    }

    /// Part of the canvas that lands inside the container, in canvas units.
    pub fn visible_rect(&self) -> Rect {
        let (cx, cy) = self.crop_units();
        Rect::new(cx, cy, self.canvas_size - cx, self.canvas_size - cy)
    }

    /// Whether `p` is visible or within [`CULL_SLACK`] of the visible area.
    pub fn should_draw(&self, p: Point) -> bool {
        let (cx, cy) = self.crop_units();
        let bx = cx - CULL_SLACK;
        let by = cy - CULL_SLACK;
        p.x > bx && self.canvas_size - p.x > bx && p.y > by && self.canvas_size - p.y > by
    }

    /// Canvas units cropped from each side, per axis.
    fn crop_units(&self) -> (f64, f64) {
        if self.size_px <= 0.0 {
            return (0.0, 0.0);
        }
        (
            -self.margin_x / self.size_px * self.canvas_size,
            -self.margin_y / self.size_px * self.canvas_size,
        )
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}
