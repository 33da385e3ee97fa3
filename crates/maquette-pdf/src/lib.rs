//! PDF export for Maquette documents.
//!
//! Walks every page of a document in index order, rasterizes it through a
//! caller-supplied [`PageRasterizer`], and assembles a multi-page PDF whose
//! page sizes come from each page's own stored metadata. Objects carrying a
//! link become clickable annotations.

pub mod raster;
pub mod transform;
pub mod writer;

pub use raster::{BlankRasterizer, PageRasterizer, Raster};
pub use transform::{LinkRegion, OutputRect, link_regions, object_output_rect};
pub use writer::{export_document, export_session, export_to_file};

use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("document has no pages to export")]
    EmptyDocument,
    #[error(transparent)]
    Session(#[from] maquette_core::session::SessionError),
    #[error("raster buffer size mismatch: expected {expected} bytes, got {actual}")]
    RasterSize { expected: usize, actual: usize },
    #[error("rasterizer failed: {0}")]
    Raster(String),
    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
