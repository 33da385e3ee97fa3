//! Canvas-pixel to output-page coordinate mapping.

use kurbo::Size;
use maquette_core::geometry::Frame;
use maquette_core::scene::{Scene, normalize_link_url};

/// Smallest emitted extent in output units. Hairline objects stay clickable
/// and visible instead of collapsing to zero.
pub const MIN_OUTPUT_EXTENT: f64 = 1.0;

/// An axis-aligned rectangle in output page units, measured from the page's
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A clickable region in output page units.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRegion {
    pub rect: OutputRect,
    pub url: String,
}

/// Map an object's scaled, origin-anchored bounding box from canvas pixel
/// space into output page space.
///
/// The top-left corner is resolved from the origin anchors, both axes scale
/// by `output / canvas` independently, and the result is clamped: `x`/`y`
/// never go negative (objects dragged partially off-page), `width`/`height`
/// never drop below [`MIN_OUTPUT_EXTENT`].
pub fn object_output_rect(frame: &Frame, canvas: Size, output: Size) -> OutputRect {
    let origin = frame.anchored_origin();
    let scale_x = output.width / canvas.width;
    let scale_y = output.height / canvas.height;
    OutputRect {
        x: (origin.x * scale_x).max(0.0),
        y: (origin.y * scale_y).max(0.0),
        width: (frame.scaled_width() * scale_x).max(MIN_OUTPUT_EXTENT),
        height: (frame.scaled_height() * scale_y).max(MIN_OUTPUT_EXTENT),
    }
}

/// One region per object carrying a link, in scene order. URLs without a
/// scheme come out with `https://` prefixed.
pub fn link_regions(scene: &Scene, canvas: Size, output: Size) -> Vec<LinkRegion> {
    scene
        .objects()
        .iter()
        .filter_map(|object| {
            let url = object.link_url.as_deref()?;
            Some(LinkRegion {
                rect: object_output_rect(&object.frame, canvas, output),
                url: normalize_link_url(url),
            })
        })
        .collect()
}
