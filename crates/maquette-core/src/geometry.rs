//! Shared geometry: physical-unit conversion and origin-anchored frames.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Pixels per inch used for the on-screen canvas and for export.
pub const DPI: f64 = 72.0;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Convert millimeters to canvas pixels at [`DPI`].
pub fn mm_to_pixels(mm: f64) -> f64 {
    mm * (DPI / MM_PER_INCH)
}

/// Convert canvas pixels back to millimeters at [`DPI`].
pub fn pixels_to_mm(px: f64) -> f64 {
    px * (MM_PER_INCH / DPI)
}

/// Horizontal origin anchor: which point of the bounding box `left` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginX {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical origin anchor: which point of the bounding box `top` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginY {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Common geometry carried by every scene object.
///
/// Positions are stored in unzoomed page-pixel space. The effective bounding
/// box is `size * scale`, anchored at `(left, top)` according to the origin
/// anchors. `width`/`height` default to 0 so snapshots that omit them still
/// load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub left: f64,
    pub top: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default = "default_scale")]
    pub scale_x: f64,
    #[serde(default = "default_scale")]
    pub scale_y: f64,
    /// Rotation in degrees, clockwise.
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub origin_x: OriginX,
    #[serde(default)]
    pub origin_y: OriginY,
}

fn default_scale() -> f64 {
    1.0
}

impl Frame {
    /// Create a frame at a position with an unscaled size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            origin_x: OriginX::Left,
            origin_y: OriginY::Top,
        }
    }

    /// Effective width after scaling.
    pub fn scaled_width(&self) -> f64 {
        self.width * self.scale_x
    }

    /// Effective height after scaling.
    pub fn scaled_height(&self) -> f64 {
        self.height * self.scale_y
    }

    /// Top-left corner of the scaled bounding box, resolved from the origin
    /// anchors.
    pub fn anchored_origin(&self) -> Point {
        let w = self.scaled_width();
        let h = self.scaled_height();
        let x = match self.origin_x {
            OriginX::Left => self.left,
            OriginX::Center => self.left - w / 2.0,
            OriginX::Right => self.left - w,
        };
        let y = match self.origin_y {
            OriginY::Top => self.top,
            OriginY::Center => self.top - h / 2.0,
            OriginY::Bottom => self.top - h,
        };
        Point::new(x, y)
    }

    /// Axis-aligned bounding box of the scaled frame (rotation ignored).
    pub fn anchored_bounds(&self) -> Rect {
        let origin = self.anchored_origin();
        Rect::new(
            origin.x,
            origin.y,
            origin.x + self.scaled_width(),
            origin.y + self.scaled_height(),
        )
    }
}
