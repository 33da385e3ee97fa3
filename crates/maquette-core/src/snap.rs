//! Alignment snapping for dragged objects.
//!
//! While an object moves, its edges and center are compared against the page
//! center lines and every other object on the page. Matches within tolerance
//! produce a corrected position and transient guide lines for the renderer.

use crate::scene::{Rgba, SceneObject};
use kurbo::{Point, Size};

/// Snap tolerance in page pixels at 100% zoom.
pub const SNAP_TOLERANCE: f64 = 8.0;

/// Guide color for page-center alignment.
pub const PAGE_GUIDE_COLOR: Rgba = Rgba {
    r: 0,
    g: 255,
    b: 0,
    a: 255,
};

/// Guide color for object-to-object alignment.
pub const OBJECT_GUIDE_COLOR: Rgba = Rgba {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};

/// Axis a snap candidate corrects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapAxis {
    X,
    Y,
}

/// Which anchor pair matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    PageCenterX,
    PageCenterY,
    CenterX,
    CenterY,
    LeftLeft,
    RightRight,
    TopTop,
    BottomBottom,
    LeftRight,
    RightLeft,
    TopBottom,
    BottomTop,
}

impl SnapKind {
    /// The axis this kind corrects.
    pub fn axis(self) -> SnapAxis {
        match self {
            SnapKind::PageCenterX
            | SnapKind::CenterX
            | SnapKind::LeftLeft
            | SnapKind::RightRight
            | SnapKind::LeftRight
            | SnapKind::RightLeft => SnapAxis::X,
            SnapKind::PageCenterY
            | SnapKind::CenterY
            | SnapKind::TopTop
            | SnapKind::BottomBottom
            | SnapKind::TopBottom
            | SnapKind::BottomTop => SnapAxis::Y,
        }
    }
}

/// One matched alignment condition. Recomputed every drag tick, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCandidate {
    pub kind: SnapKind,
    /// Corrected `left` or `top` for the moving object.
    pub value: f64,
}

/// A transient guide line for the renderer. Purely descriptive; the engine
/// owns the collection and clears it on the next tick or at drag end.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideLine {
    pub start: Point,
    pub end: Point,
    pub color: Rgba,
    pub stroke_width: f64,
    pub dash: [f64; 2],
}

/// Corrected position to apply, per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SnapAdjustment {
    pub left: Option<f64>,
    pub top: Option<f64>,
}

impl SnapAdjustment {
    /// True when either axis matched.
    pub fn is_snapped(&self) -> bool {
        self.left.is_some() || self.top.is_some()
    }
}

/// The snapping engine. Holds the ephemeral guide collection between ticks.
#[derive(Debug, Clone)]
pub struct SnapEngine {
    tolerance: f64,
    guides: Vec<GuideLine>,
}

impl Default for SnapEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapEngine {
    /// Engine with the default tolerance.
    pub fn new() -> Self {
        Self::with_tolerance(SNAP_TOLERANCE)
    }

    /// Engine with a custom base tolerance in page pixels.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            guides: Vec::new(),
        }
    }

    /// Tolerance in page-pixel space at the given zoom. Dividing by zoom
    /// keeps the perceived on-screen snap distance constant.
    pub fn effective_tolerance(&self, zoom: f64) -> f64 {
        self.tolerance / zoom
    }

    /// Guide lines produced by the last [`SnapEngine::update`].
    pub fn guides(&self) -> &[GuideLine] {
        &self.guides
    }

    /// Drag ended (or the engine is being torn down): drop all guides.
    pub fn end_drag(&mut self) {
        self.guides.clear();
    }

    /// Evaluate one drag-move tick.
    ///
    /// `objects` is the full scene list in z-order; the moving object itself,
    /// the object that is its group, and objects sharing its group are
    /// skipped. `page` is the page's declared pixel size (positions live in
    /// unzoomed space). Candidates are applied in evaluation order, so when
    /// several match the same axis the last one in scene order wins.
    pub fn update(
        &mut self,
        moving: &SceneObject,
        objects: &[SceneObject],
        page: Size,
        zoom: f64,
    ) -> SnapAdjustment {
        self.guides.clear();

        let tolerance = self.effective_tolerance(zoom);
        let stroke_width = 1.0 / zoom;
        let dash = [5.0 / zoom, 5.0 / zoom];

        let w = moving.frame.scaled_width();
        let h = moving.frame.scaled_height();
        let left = moving.frame.left;
        let top = moving.frame.top;
        let right = left + w;
        let bottom = top + h;
        let center_x = left + w / 2.0;
        let center_y = top + h / 2.0;

        let mut candidates: Vec<SnapCandidate> = Vec::new();

        let vertical_guide = |guides: &mut Vec<GuideLine>, x: f64, color: Rgba| {
            guides.push(GuideLine {
                start: Point::new(x, 0.0),
                end: Point::new(x, page.height),
                color,
                stroke_width,
                dash,
            });
        };
        let horizontal_guide = |guides: &mut Vec<GuideLine>, y: f64, color: Rgba| {
            guides.push(GuideLine {
                start: Point::new(0.0, y),
                end: Point::new(page.width, y),
                color,
                stroke_width,
                dash,
            });
        };

        // Page center lines first, against the declared page dimensions.
        let page_cx = page.width / 2.0;
        let page_cy = page.height / 2.0;
        if (center_x - page_cx).abs() < tolerance {
            candidates.push(SnapCandidate {
                kind: SnapKind::PageCenterX,
                value: page_cx - w / 2.0,
            });
            vertical_guide(&mut self.guides, page_cx, PAGE_GUIDE_COLOR);
        }
        if (center_y - page_cy).abs() < tolerance {
            candidates.push(SnapCandidate {
                kind: SnapKind::PageCenterY,
                value: page_cy - h / 2.0,
            });
            horizontal_guide(&mut self.guides, page_cy, PAGE_GUIDE_COLOR);
        }

        for other in objects {
            let same_group = moving.group.is_some() && other.group == moving.group;
            if other.id == moving.id || Some(other.id) == moving.group || same_group {
                continue;
            }

            let ow = other.frame.scaled_width();
            let oh = other.frame.scaled_height();
            let o_left = other.frame.left;
            let o_top = other.frame.top;
            let o_right = o_left + ow;
            let o_bottom = o_top + oh;
            let o_cx = o_left + ow / 2.0;
            let o_cy = o_top + oh / 2.0;

            if (center_x - o_cx).abs() < tolerance {
                candidates.push(SnapCandidate {
                    kind: SnapKind::CenterX,
                    value: o_cx - w / 2.0,
                });
                vertical_guide(&mut self.guides, o_cx, OBJECT_GUIDE_COLOR);
            }
            if (center_y - o_cy).abs() < tolerance {
                candidates.push(SnapCandidate {
                    kind: SnapKind::CenterY,
                    value: o_cy - h / 2.0,
                });
                horizontal_guide(&mut self.guides, o_cy, OBJECT_GUIDE_COLOR);
            }
            if (left - o_left).abs() < tolerance {
                candidates.push(SnapCandidate {
                    kind: SnapKind::LeftLeft,
                    value: o_left,
                });
                vertical_guide(&mut self.guides, o_left, OBJECT_GUIDE_COLOR);
            }
            if (right - o_right).abs() < tolerance {
                candidates.push(SnapCandidate {
                    kind: SnapKind::RightRight,
                    value: o_right - w,
                });
                vertical_guide(&mut self.guides, o_right, OBJECT_GUIDE_COLOR);
            }
            if (top - o_top).abs() < tolerance {
                candidates.push(SnapCandidate {
                    kind: SnapKind::TopTop,
                    value: o_top,
                });
                horizontal_guide(&mut self.guides, o_top, OBJECT_GUIDE_COLOR);
            }
            if (bottom - o_bottom).abs() < tolerance {
                candidates.push(SnapCandidate {
                    kind: SnapKind::BottomBottom,
                    value: o_bottom - h,
                });
                horizontal_guide(&mut self.guides, o_bottom, OBJECT_GUIDE_COLOR);
            }
            if (left - o_right).abs() < tolerance {
                candidates.push(SnapCandidate {
                    kind: SnapKind::LeftRight,
                    value: o_right,
                });
                vertical_guide(&mut self.guides, o_right, OBJECT_GUIDE_COLOR);
            }
            if (right - o_left).abs() < tolerance {
                candidates.push(SnapCandidate {
                    kind: SnapKind::RightLeft,
                    value: o_left - w,
                });
                vertical_guide(&mut self.guides, o_left, OBJECT_GUIDE_COLOR);
            }
            if (top - o_bottom).abs() < tolerance {
                candidates.push(SnapCandidate {
                    kind: SnapKind::TopBottom,
                    value: o_bottom,
                });
                horizontal_guide(&mut self.guides, o_bottom, OBJECT_GUIDE_COLOR);
            }
            if (bottom - o_top).abs() < tolerance {
                candidates.push(SnapCandidate {
                    kind: SnapKind::BottomTop,
                    value: o_top - h,
                });
                horizontal_guide(&mut self.guides, o_top, OBJECT_GUIDE_COLOR);
            }
        }

        let mut adjustment = SnapAdjustment::default();
        for candidate in &candidates {
            match candidate.kind.axis() {
                SnapAxis::X => adjustment.left = Some(candidate.value),
                SnapAxis::Y => adjustment.top = Some(candidate.value),
            }
        }

        if adjustment.is_snapped() {
            log::debug!(
                "snap: {} candidate(s), left={:?} top={:?}",
                candidates.len(),
                adjustment.left,
                adjustment.top
            );
        }

        adjustment
    }
}
