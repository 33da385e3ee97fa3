//! Multi-page document: the page list, current index, persisted page
//! scenes, and the session zoom factor.

use crate::page::{Page, PageId, PageOrientation, PageSizePreset};
use crate::scene::SceneSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Minimum zoom factor.
pub const MIN_ZOOM: f64 = 0.25;
/// Maximum zoom factor.
pub const MAX_ZOOM: f64 = 3.0;
/// Zoom a fresh document opens at.
pub const DEFAULT_ZOOM: f64 = 0.7;

/// Document errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("page index {0} out of range")]
    PageOutOfRange(usize),
}

/// The ordered page list plus everything shared across pages.
///
/// Zoom is a session-wide factor independent of any single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pages: Vec<Page>,
    current_index: usize,
    /// Last-saved scene per page id. Pages never visited have no entry.
    page_store: HashMap<PageId, SceneSnapshot>,
    zoom: f64,
}

impl Document {
    /// Create a document with its first page.
    pub fn new(size: PageSizePreset, orientation: PageOrientation) -> Self {
        Self {
            pages: vec![Page::new(size, orientation)],
            current_index: 0,
            page_store: HashMap::new(),
            zoom: DEFAULT_ZOOM,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_page(&self) -> &Page {
        &self.pages[self.current_index]
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Append a page cloned from the current page's size and orientation,
    /// with an empty scene. Returns the new page's id.
    pub fn add_page(&mut self) -> PageId {
        let current = self.current_page();
        let page = Page::new(current.size, current.orientation);
        let id = page.id;
        self.pages.push(page);
        id
    }

    /// Delete a page and discard its stored scene.
    ///
    /// Rejected (returns `false`) when only one page remains or the index is
    /// invalid. Deleting the current page selects index 0; deleting an
    /// earlier page shifts the current index down.
    pub fn delete_page(&mut self, index: usize) -> bool {
        if self.pages.len() <= 1 || index >= self.pages.len() {
            return false;
        }
        let removed = self.pages.remove(index);
        self.page_store.remove(&removed.id);
        if index == self.current_index {
            self.current_index = 0;
        } else if index < self.current_index {
            self.current_index -= 1;
        }
        true
    }

    /// Reorder a page, keeping the current page current.
    pub fn move_page(&mut self, from: usize, to: usize) -> Result<(), DocumentError> {
        if from >= self.pages.len() {
            return Err(DocumentError::PageOutOfRange(from));
        }
        if to >= self.pages.len() {
            return Err(DocumentError::PageOutOfRange(to));
        }
        let page = self.pages.remove(from);
        self.pages.insert(to, page);

        if self.current_index == from {
            self.current_index = to;
        } else if from < self.current_index && to >= self.current_index {
            self.current_index -= 1;
        } else if from > self.current_index && to <= self.current_index {
            self.current_index += 1;
        }
        Ok(())
    }

    /// Change one page's physical size or orientation. Pages are independent;
    /// a document may mix sizes.
    pub fn set_page_size(
        &mut self,
        index: usize,
        size: PageSizePreset,
        orientation: PageOrientation,
    ) -> Result<(), DocumentError> {
        let page = self
            .pages
            .get_mut(index)
            .ok_or(DocumentError::PageOutOfRange(index))?;
        page.size = size;
        page.orientation = orientation;
        Ok(())
    }

    /// Switch the current page index.
    pub fn select_page(&mut self, index: usize) -> Result<(), DocumentError> {
        if index >= self.pages.len() {
            return Err(DocumentError::PageOutOfRange(index));
        }
        self.current_index = index;
        Ok(())
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom factor, clamped to `[0.25, 3.0]`.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Persist a page's scene under its id.
    pub fn save_page_data(&mut self, id: PageId, snapshot: SceneSnapshot) {
        self.page_store.insert(id, snapshot);
    }

    /// Last-saved scene for a page, if it was ever persisted.
    pub fn page_data(&self, id: PageId) -> Option<&SceneSnapshot> {
        self.page_store.get(&id)
    }

    /// Serialize the whole document (pages, stored scenes, zoom).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Document {
        Document::new(PageSizePreset::A4, PageOrientation::Portrait)
    }

    #[test]
    fn test_new_document_has_one_page() {
        let document = doc();
        assert_eq!(document.page_count(), 1);
        assert_eq!(document.current_index(), 0);
        assert!((document.zoom() - DEFAULT_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_page_clones_current_geometry() {
        let mut document = Document::new(PageSizePreset::Flyer, PageOrientation::Landscape);
        document.add_page();
        let added = document.page(1).unwrap();
        assert_eq!(added.size, PageSizePreset::Flyer);
        assert_eq!(added.orientation, PageOrientation::Landscape);
        // Still on the first page.
        assert_eq!(document.current_index(), 0);
    }

    #[test]
    fn test_delete_last_remaining_page_is_rejected() {
        let mut document = doc();
        assert!(!document.delete_page(0));
        assert_eq!(document.page_count(), 1);
    }

    #[test]
    fn test_delete_noncurrent_page_keeps_current_index() {
        let mut document = doc();
        document.add_page();
        document.add_page();
        document.select_page(1).unwrap();
        assert!(document.delete_page(2));
        assert_eq!(document.current_index(), 1);
    }

    #[test]
    fn test_delete_current_page_selects_first() {
        let mut document = doc();
        document.add_page();
        document.add_page();
        document.select_page(2).unwrap();
        assert!(document.delete_page(2));
        assert_eq!(document.current_index(), 0);
    }

    #[test]
    fn test_delete_earlier_page_shifts_index_down() {
        let mut document = doc();
        document.add_page();
        document.add_page();
        document.select_page(2).unwrap();
        assert!(document.delete_page(0));
        assert_eq!(document.current_index(), 1);
        assert_eq!(document.page_count(), 2);
    }

    #[test]
    fn test_delete_discards_stored_scene() {
        let mut document = doc();
        let id = document.add_page();
        document.save_page_data(id, SceneSnapshot(json!({"objects": []})));
        assert!(document.page_data(id).is_some());
        assert!(document.delete_page(1));
        assert!(document.page_data(id).is_none());
    }

    #[test]
    fn test_select_page_bounds() {
        let mut document = doc();
        assert!(document.select_page(1).is_err());
        document.add_page();
        assert!(document.select_page(1).is_ok());
        assert_eq!(document.current_index(), 1);
    }

    #[test]
    fn test_move_page_tracks_current() {
        let mut document = doc();
        document.add_page();
        document.add_page();
        let first_id = document.page(0).unwrap().id;

        // Moving the current page follows it.
        document.move_page(0, 2).unwrap();
        assert_eq!(document.current_index(), 2);
        assert_eq!(document.current_page().id, first_id);

        // Moving another page across the current one shifts the index.
        document.move_page(0, 2).unwrap();
        assert_eq!(document.current_index(), 1);
        assert_eq!(document.current_page().id, first_id);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut document = doc();
        document.set_zoom(10.0);
        assert_eq!(document.zoom(), MAX_ZOOM);
        document.set_zoom(0.01);
        assert_eq!(document.zoom(), MIN_ZOOM);
        document.set_zoom(1.5);
        assert_eq!(document.zoom(), 1.5);
    }

    #[test]
    fn test_document_file_roundtrip() {
        let mut document = doc();
        document.add_page();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("document.json");
        std::fs::write(&path, document.to_json().unwrap()).unwrap();

        let restored = Document::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(restored.page_count(), 2);
        assert_eq!(restored.current_index(), 0);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut document = doc();
        let id = document.add_page();
        document.save_page_data(id, SceneSnapshot(json!({"objects": []})));
        document.set_zoom(2.0);

        let json = document.to_json().unwrap();
        let restored = Document::from_json(&json).unwrap();
        assert_eq!(restored.page_count(), 2);
        assert_eq!(restored.zoom(), 2.0);
        assert!(restored.page_data(id).is_some());
    }
}
