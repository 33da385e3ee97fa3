//! Page rasterization seam.
//!
//! Rendering proper lives outside this workspace; export only needs a pixel
//! buffer per page. The [`BlankRasterizer`] fills the page background and is
//! the graceful-degradation path when nothing richer is wired up.

use crate::ExportError;
use maquette_core::scene::{Rgba, Scene};

/// An RGB8 pixel buffer of one rasterized page.
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    /// Wrap an existing RGB8 buffer; the length must be `width * height * 3`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ExportError> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(ExportError::RasterSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A buffer filled with a single color (alpha ignored).
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..width as usize * height as usize {
            pixels.extend_from_slice(&[color.r, color.g, color.b]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB8 samples, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume into the raw sample buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Encode as a PNG (standalone page-image export).
    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.pixels)?;
        }
        Ok(out)
    }
}

/// Renders one page's scene into a pixel buffer.
///
/// Export calls this once per page, in page order, and drops the buffer
/// before moving on; implementations holding an off-screen surface can reuse
/// it across calls.
pub trait PageRasterizer {
    fn rasterize(
        &mut self,
        scene: &Scene,
        width: u32,
        height: u32,
    ) -> Result<Raster, ExportError>;
}

/// Fills the page with its background color and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankRasterizer;

impl PageRasterizer for BlankRasterizer {
    fn rasterize(
        &mut self,
        scene: &Scene,
        width: u32,
        height: u32,
    ) -> Result<Raster, ExportError> {
        Ok(Raster::filled(width, height, scene.background))
    }
}
