//! Multi-page PDF assembly.
//!
//! Every page is processed in strict index order: load its stored scene,
//! rasterize it, embed the raster as an image XObject scaled into the page's
//! physical space, and attach link annotations. A page whose snapshot is
//! missing, damaged, or fails to rasterize exports blank; the rest of the
//! document still comes out.

use crate::raster::PageRasterizer;
use crate::transform::link_regions;
use crate::ExportError;
use kurbo::Size;
use lopdf::content::{Content, Operation};
use lopdf::xref::XrefType;
use lopdf::{Document as PdfDocument, Object, Stream, dictionary};
use maquette_core::document::Document;
use maquette_core::scene::Scene;
use maquette_core::session::EditorSession;
use std::path::Path;

/// Points per millimeter (72 dpi).
const PT_PER_MM: f64 = 72.0 / 25.4;

/// Export a document to PDF bytes.
///
/// Each page's physical size and orientation come from that page's own
/// metadata, so one document may mix page sizes. Fails only when there is
/// nothing to export.
pub fn export_document(
    document: &Document,
    rasterizer: &mut dyn PageRasterizer,
) -> Result<Vec<u8>, ExportError> {
    if document.pages().is_empty() {
        return Err(ExportError::EmptyDocument);
    }

    let mut doc = PdfDocument::with_version("1.5");
    doc.reference_table.cross_reference_type = XrefType::CrossReferenceTable;

    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::new();

    for (index, page) in document.pages().iter().enumerate() {
        let (page_w_mm, page_h_mm) = page.size_mm();
        let page_w_pt = page_w_mm * PT_PER_MM;
        let page_h_pt = page_h_mm * PT_PER_MM;
        let canvas = page.pixel_dimensions();
        let raster_w = canvas.width.round().max(1.0) as u32;
        let raster_h = canvas.height.round().max(1.0) as u32;

        // A page that was never visited, or whose snapshot no longer parses,
        // exports blank instead of aborting the document.
        let scene = match document.page_data(page.id) {
            Some(snapshot) => match Scene::from_snapshot(snapshot) {
                Ok(scene) => Some(scene),
                Err(err) => {
                    log::warn!("page {}: unreadable snapshot, exporting blank: {err}", index + 1);
                    None
                }
            },
            None => None,
        };

        let mut operations: Vec<Operation> = Vec::new();
        let mut annotations: Vec<Object> = Vec::new();
        let mut resources = dictionary! {};

        if let Some(scene) = scene.filter(|s| !s.is_empty()) {
            match rasterizer.rasterize(&scene, raster_w, raster_h) {
                Ok(raster) => {
                    // Scale the raster to the page width, anchored at the top.
                    let img_w_mm = page_w_mm;
                    let img_h_mm = raster.height() as f64 * page_w_mm / raster.width() as f64;
                    let img_w_pt = img_w_mm * PT_PER_MM;
                    let img_h_pt = img_h_mm * PT_PER_MM;

                    let image_id = doc.add_object(Stream::new(
                        dictionary! {
                            "Type" => "XObject",
                            "Subtype" => "Image",
                            "Width" => raster.width() as i64,
                            "Height" => raster.height() as i64,
                            "ColorSpace" => "DeviceRGB",
                            "BitsPerComponent" => 8,
                        },
                        raster.into_pixels(),
                    ));
                    resources = dictionary! {
                        "XObject" => dictionary! { "Im0" => image_id },
                    };

                    operations.push(Operation::new("q", vec![]));
                    operations.push(Operation::new(
                        "cm",
                        vec![
                            (img_w_pt as f32).into(),
                            0.into(),
                            0.into(),
                            (img_h_pt as f32).into(),
                            0.into(),
                            ((page_h_pt - img_h_pt) as f32).into(),
                        ],
                    ));
                    operations.push(Operation::new("Do", vec!["Im0".into()]));
                    operations.push(Operation::new("Q", vec![]));

                    // Clickable regions, computed against the image's scaled
                    // extent the same way the raster was placed.
                    let regions =
                        link_regions(&scene, canvas, Size::new(img_w_mm, img_h_mm));
                    for region in regions {
                        let x0 = region.rect.x * PT_PER_MM;
                        let x1 = (region.rect.x + region.rect.width) * PT_PER_MM;
                        // PDF y runs bottom-up; regions are measured from the
                        // page top.
                        let y1 = (page_h_mm - region.rect.y) * PT_PER_MM;
                        let y0 = (page_h_mm - region.rect.y - region.rect.height) * PT_PER_MM;
                        let annotation_id = doc.add_object(dictionary! {
                            "Type" => "Annot",
                            "Subtype" => "Link",
                            "Rect" => vec![
                                (x0 as f32).into(),
                                (y0 as f32).into(),
                                (x1 as f32).into(),
                                (y1 as f32).into(),
                            ],
                            "Border" => vec![0.into(), 0.into(), 0.into()],
                            "A" => dictionary! {
                                "Type" => "Action",
                                "S" => "URI",
                                "URI" => Object::string_literal(region.url),
                            },
                        });
                        annotations.push(annotation_id.into());
                    }
                }
                Err(err) => {
                    log::warn!("page {}: rasterization failed, exporting blank: {err}", index + 1);
                }
            }
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let resources_id = doc.add_object(resources);

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                (page_w_pt as f32).into(),
                (page_h_pt as f32).into(),
            ],
            "Contents" => content_id,
            "Resources" => resources_id,
        };
        if !annotations.is_empty() {
            page_dict.set("Annots", annotations);
        }
        let page_id = doc.add_object(page_dict);
        kids.push(page_id.into());
    }

    doc.set_object(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i32,
            "Kids" => kids,
        },
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Maquette Export"),
        "Producer" => Object::string_literal("maquette-pdf"),
    });
    doc.trailer.set("Info", info_id);

    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Export a live session: the current page's scene is persisted first so the
/// output matches what is on screen.
pub fn export_session(
    session: &mut EditorSession,
    rasterizer: &mut dyn PageRasterizer,
) -> Result<Vec<u8>, ExportError> {
    session.persist_current_page()?;
    export_document(session.document(), rasterizer)
}

/// Export straight to a file.
pub fn export_to_file(
    document: &Document,
    rasterizer: &mut dyn PageRasterizer,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let bytes = export_document(document, rasterizer)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
