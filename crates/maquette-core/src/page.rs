//! Page presets and per-page metadata.

use crate::geometry::mm_to_pixels;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for pages.
pub type PageId = Uuid;

/// Named physical page sizes, in portrait millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSizePreset {
    #[default]
    A4,
    Letter,
    Legal,
    A5,
    Flyer,
    Business,
}

impl PageSizePreset {
    /// Portrait (width, height) in millimeters.
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            PageSizePreset::A4 => (210.0, 297.0),
            PageSizePreset::Letter => (216.0, 279.0),
            PageSizePreset::Legal => (216.0, 356.0),
            PageSizePreset::A5 => (148.0, 210.0),
            PageSizePreset::Flyer => (127.0, 178.0),
            PageSizePreset::Business => (89.0, 51.0),
        }
    }

    /// Display name for UI lists.
    pub fn display_name(&self) -> &'static str {
        match self {
            PageSizePreset::A4 => "A4",
            PageSizePreset::Letter => "Letter",
            PageSizePreset::Legal => "Legal",
            PageSizePreset::A5 => "A5",
            PageSizePreset::Flyer => "Flyer/Card",
            PageSizePreset::Business => "Business Card",
        }
    }

    /// All available presets.
    pub fn all() -> &'static [PageSizePreset] {
        &[
            PageSizePreset::A4,
            PageSizePreset::Letter,
            PageSizePreset::Legal,
            PageSizePreset::A5,
            PageSizePreset::Flyer,
            PageSizePreset::Business,
        ]
    }
}

/// Page orientation. Landscape swaps the preset's mm pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

/// One page of the document.
///
/// Pixel dimensions are always derived from the size and orientation, never
/// stored, so they cannot drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub size: PageSizePreset,
    pub orientation: PageOrientation,
}

impl Page {
    /// Create a page with a fresh id.
    pub fn new(size: PageSizePreset, orientation: PageOrientation) -> Self {
        Self {
            id: Uuid::new_v4(),
            size,
            orientation,
        }
    }

    /// Oriented physical size (width, height) in millimeters.
    pub fn size_mm(&self) -> (f64, f64) {
        let (w, h) = self.size.dimensions_mm();
        match self.orientation {
            PageOrientation::Portrait => (w, h),
            PageOrientation::Landscape => (h, w),
        }
    }

    /// Canvas pixel size at the shared DPI.
    pub fn pixel_dimensions(&self) -> Size {
        let (w, h) = self.size_mm();
        Size::new(mm_to_pixels(w), mm_to_pixels(h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_portrait_pixels() {
        let page = Page::new(PageSizePreset::A4, PageOrientation::Portrait);
        let size = page.pixel_dimensions();
        assert!((size.width - 595.28).abs() < 0.01);
        assert!((size.height - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_landscape_swaps_dimensions() {
        let portrait = Page::new(PageSizePreset::Letter, PageOrientation::Portrait);
        let landscape = Page::new(PageSizePreset::Letter, PageOrientation::Landscape);
        assert_eq!(portrait.size_mm(), (216.0, 279.0));
        assert_eq!(landscape.size_mm(), (279.0, 216.0));
        let p = portrait.pixel_dimensions();
        let l = landscape.pixel_dimensions();
        assert_eq!((p.width, p.height), (l.height, l.width));
    }

    #[test]
    fn test_preset_catalog() {
        assert_eq!(PageSizePreset::all().len(), 6);
        assert_eq!(PageSizePreset::Business.dimensions_mm(), (89.0, 51.0));
        assert_eq!(PageSizePreset::Flyer.display_name(), "Flyer/Card");
    }

    #[test]
    fn test_preset_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PageSizePreset::Business).unwrap(),
            r#""business""#
        );
    }
}
