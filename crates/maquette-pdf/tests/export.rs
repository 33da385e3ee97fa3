//! End-to-end export: session -> persisted pages -> PDF -> parsed back.

use lopdf::{Document as PdfDocument, Object};
use maquette_core::geometry::Frame;
use maquette_core::page::{PageOrientation, PageSizePreset};
use maquette_core::scene::{ObjectKind, SceneObject, SceneSnapshot, ShapeFigure, TextRun};
use maquette_core::session::EditorSession;
use maquette_pdf::{BlankRasterizer, export_document, export_session, export_to_file};

const PT_PER_MM: f64 = 72.0 / 25.4;

fn number(object: &Object) -> f64 {
    match object {
        Object::Integer(i) => *i as f64,
        Object::Real(f) => *f as f64,
        other => panic!("expected number, got {other:?}"),
    }
}

fn resolve<'a>(doc: &'a PdfDocument, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap(),
        other => other,
    }
}

#[test]
fn exports_link_annotation_with_page_space_rect() {
    let mut session = EditorSession::new(PageSizePreset::A4, PageOrientation::Portrait).unwrap();
    let id = session
        .add_object(SceneObject::new(
            Frame::new(50.0, 50.0, 100.0, 20.0),
            ObjectKind::Shape(ShapeFigure::rect()),
        ))
        .unwrap();
    session.set_link(id, "example.com").unwrap();

    let bytes = export_session(&mut session, &mut BlankRasterizer).unwrap();
    let parsed = PdfDocument::load_mem(&bytes).unwrap();
    let pages = parsed.get_pages();
    assert_eq!(pages.len(), 1);

    let page_dict = parsed.get_dictionary(pages[&1]).unwrap();
    let annots = page_dict.get(b"Annots").unwrap().as_array().unwrap();
    assert_eq!(annots.len(), 1);

    let annot = resolve(&parsed, &annots[0]).as_dict().unwrap();
    assert_eq!(annot.get(b"Subtype").unwrap().as_name().unwrap(), b"Link");

    let action = resolve(&parsed, annot.get(b"A").unwrap()).as_dict().unwrap();
    match action.get(b"URI").unwrap() {
        Object::String(bytes, _) => assert_eq!(bytes.as_slice(), b"https://example.com"),
        other => panic!("expected URI string, got {other:?}"),
    }

    // Rect left edge: 50 canvas px scaled onto a 210mm page, in points.
    let rect = annot.get(b"Rect").unwrap().as_array().unwrap();
    let expected_x0 = 50.0 * (210.0 / 595.28) * PT_PER_MM;
    assert!((number(&rect[0]) - expected_x0).abs() < 0.5);
    // y0 < y1 in bottom-up PDF space.
    assert!(number(&rect[1]) < number(&rect[3]));
}

#[test]
fn unvisited_and_damaged_pages_export_blank() {
    let mut session = EditorSession::new(PageSizePreset::A4, PageOrientation::Portrait).unwrap();
    session
        .add_object(SceneObject::new(
            Frame::new(10.0, 10.0, 50.0, 50.0),
            ObjectKind::Text(TextRun::new("first page")),
        ))
        .unwrap();
    session.add_page();
    let damaged = session.add_page();
    session.persist_current_page().unwrap();

    // Sabotage the third page's stored snapshot.
    let mut document = session.document().clone();
    document.save_page_data(damaged, SceneSnapshot(serde_json::json!({"objects": 42})));

    let bytes = export_document(&document, &mut BlankRasterizer).unwrap();
    let parsed = PdfDocument::load_mem(&bytes).unwrap();
    assert_eq!(parsed.get_pages().len(), 3);

    // Neither blank page carries annotations.
    for page_number in [2u32, 3u32] {
        let dict = parsed.get_dictionary(parsed.get_pages()[&page_number]).unwrap();
        assert!(dict.get(b"Annots").is_err());
    }
}

#[test]
fn heterogeneous_page_sizes_roundtrip() {
    let mut session = EditorSession::new(PageSizePreset::A4, PageOrientation::Portrait).unwrap();
    session.add_page();
    session
        .set_page_size(1, PageSizePreset::Business, PageOrientation::Landscape)
        .unwrap();
    session.persist_current_page().unwrap();

    let bytes = export_document(session.document(), &mut BlankRasterizer).unwrap();
    let parsed = PdfDocument::load_mem(&bytes).unwrap();
    let pages = parsed.get_pages();

    let media_box = |n: u32| -> (f64, f64) {
        let dict = parsed.get_dictionary(pages[&n]).unwrap();
        let media = dict.get(b"MediaBox").unwrap().as_array().unwrap();
        (number(&media[2]), number(&media[3]))
    };

    let (w1, h1) = media_box(1);
    assert!((w1 - 210.0 * PT_PER_MM).abs() < 0.1);
    assert!((h1 - 297.0 * PT_PER_MM).abs() < 0.1);

    // Business card, landscape: 51 x 89 mm swapped.
    let (w2, h2) = media_box(2);
    assert!((w2 - 51.0 * PT_PER_MM).abs() < 0.1);
    assert!((h2 - 89.0 * PT_PER_MM).abs() < 0.1);
}

#[test]
fn export_to_file_writes_pdf() {
    let mut session = EditorSession::new(PageSizePreset::A5, PageOrientation::Portrait).unwrap();
    session.persist_current_page().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");
    export_to_file(session.document(), &mut BlankRasterizer, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
