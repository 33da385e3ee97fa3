//! Geometric shape payload.

use serde::{Deserialize, Serialize};

/// The figure drawn inside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureKind {
    #[default]
    Rect,
    Ellipse,
    /// Straight line across the frame diagonal.
    Line,
}

/// A primitive shape filling its frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeFigure {
    pub figure: FigureKind,
    /// Corner radius for rectangles (0 = sharp).
    #[serde(default)]
    pub corner_radius: f64,
}

impl ShapeFigure {
    pub fn rect() -> Self {
        Self {
            figure: FigureKind::Rect,
            corner_radius: 0.0,
        }
    }

    pub fn rounded_rect(corner_radius: f64) -> Self {
        Self {
            figure: FigureKind::Rect,
            corner_radius,
        }
    }

    pub fn ellipse() -> Self {
        Self {
            figure: FigureKind::Ellipse,
            corner_radius: 0.0,
        }
    }

    pub fn line() -> Self {
        Self {
            figure: FigureKind::Line,
            corner_radius: 0.0,
        }
    }
}
