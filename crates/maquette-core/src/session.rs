//! Editor session: the explicit context object owning the document, the
//! live scene, history, and the snap engine.
//!
//! All mutation handlers run to completion before the next event is
//! processed; there is no parallelism. History capture is driven by the
//! scene's mutation events, so anything that edits the scene through the
//! session lands in the undo timeline automatically.

use crate::document::{Document, DocumentError};
use crate::history::HistoryManager;
use crate::page::{PageId, PageOrientation, PageSizePreset};
use crate::scene::{ObjectId, Scene, SceneError, SceneEvent, SceneObject};
use crate::snap::{GuideLine, SnapAdjustment, SnapEngine};
use kurbo::Size;
use thiserror::Error;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// One active editing session over a document.
#[derive(Debug)]
pub struct EditorSession {
    document: Document,
    scene: Scene,
    history: HistoryManager,
    snap: SnapEngine,
    /// Declared pixel size of the live canvas (unzoomed).
    canvas_size: Size,
}

impl EditorSession {
    /// Open a session on a fresh document. History starts with a snapshot of
    /// the initial empty scene.
    pub fn new(
        size: PageSizePreset,
        orientation: PageOrientation,
    ) -> Result<Self, SessionError> {
        let document = Document::new(size, orientation);
        let scene = Scene::new();
        let history = HistoryManager::new(scene.to_snapshot()?);
        let canvas_size = document.current_page().pixel_dimensions();
        Ok(Self {
            document,
            scene,
            history,
            snap: SnapEngine::new(),
            canvas_size,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Direct scene access. Callers mutating through this must follow up
    /// with [`EditorSession::process_events`].
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Pixel size of the live canvas (the current page's declared size).
    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Guide lines from the most recent drag tick.
    pub fn guides(&self) -> &[GuideLine] {
        self.snap.guides()
    }

    /// Set the session zoom factor (clamped).
    pub fn set_zoom(&mut self, zoom: f64) {
        self.document.set_zoom(zoom);
    }

    /// Drain scene events; committed mutations capture history. Captures
    /// replayed by an in-flight restore are ignored by the history guard.
    pub fn process_events(&mut self) -> Result<(), SessionError> {
        for event in self.scene.drain_events() {
            match event {
                SceneEvent::ObjectAdded(_)
                | SceneEvent::ObjectRemoved(_)
                | SceneEvent::ObjectModified(_) => {
                    let snapshot = self.scene.to_snapshot()?;
                    self.history.capture(snapshot);
                }
                SceneEvent::ObjectMoving(_) | SceneEvent::SelectionChanged => {}
            }
        }
        Ok(())
    }

    /// Add an object to the live scene.
    pub fn add_object(&mut self, object: SceneObject) -> Result<ObjectId, SessionError> {
        let id = self.scene.add_object(object);
        self.process_events()?;
        Ok(id)
    }

    /// Remove an object from the live scene.
    pub fn remove_object(&mut self, id: ObjectId) -> Result<Option<SceneObject>, SessionError> {
        let removed = self.scene.remove_object(id);
        self.process_events()?;
        Ok(removed)
    }

    /// Duplicate an object (offset copy, link preserved).
    pub fn duplicate(&mut self, id: ObjectId) -> Result<Option<ObjectId>, SessionError> {
        let copy = self.scene.duplicate(id);
        self.process_events()?;
        Ok(copy)
    }

    /// Attach a link to an object.
    pub fn set_link(&mut self, id: ObjectId, url: &str) -> Result<(), SessionError> {
        self.scene.set_link(id, url)?;
        self.process_events()
    }

    /// Remove an object's link.
    pub fn clear_link(&mut self, id: ObjectId) -> Result<(), SessionError> {
        self.scene.clear_link(id)?;
        self.process_events()
    }

    /// Commit an in-place mutation made through [`EditorSession::scene_mut`].
    pub fn commit_object(&mut self, id: ObjectId) -> Result<(), SessionError> {
        self.scene.notify_modified(id);
        self.process_events()
    }

    /// One drag-move tick: snap the object against the page center lines and
    /// its siblings, apply the correction, and refresh the guide lines.
    pub fn drag_move(&mut self, id: ObjectId) -> Result<SnapAdjustment, SessionError> {
        let zoom = self.document.zoom();
        let page = self.document.current_page().pixel_dimensions();
        let moving = self
            .scene
            .object(id)
            .ok_or(SceneError::NotFound(id))?
            .clone();
        let adjustment = self.snap.update(&moving, self.scene.objects(), page, zoom);

        if adjustment.is_snapped() {
            if let Some(object) = self.scene.object_mut(id) {
                if let Some(left) = adjustment.left {
                    object.frame.left = left;
                }
                if let Some(top) = adjustment.top {
                    object.frame.top = top;
                }
            }
        }
        self.scene.notify_moving(id);
        self.process_events()?;
        Ok(adjustment)
    }

    /// Drag ended: drop the guides and record the committed move.
    pub fn drag_end(&mut self, id: ObjectId) -> Result<(), SessionError> {
        self.snap.end_drag();
        self.scene.notify_modified(id);
        self.process_events()
    }

    /// Undo one step. Returns `false` at the start of history.
    pub fn undo(&mut self) -> Result<bool, SessionError> {
        let Some(snapshot) = self.history.begin_undo() else {
            return Ok(false);
        };
        let restored = self.scene.restore(&snapshot).map_err(SessionError::from);
        // Replayed add notifications land while the guard is active.
        let drained = self.process_events();
        self.history.finish_restore();
        restored?;
        drained?;
        Ok(true)
    }

    /// Redo one step. Returns `false` at the end of history.
    pub fn redo(&mut self) -> Result<bool, SessionError> {
        let Some(snapshot) = self.history.begin_redo() else {
            return Ok(false);
        };
        let restored = self.scene.restore(&snapshot).map_err(SessionError::from);
        let drained = self.process_events();
        self.history.finish_restore();
        restored?;
        drained?;
        Ok(true)
    }

    /// Persist the live scene under the current page's id.
    pub fn persist_current_page(&mut self) -> Result<(), SessionError> {
        let id = self.document.current_page().id;
        let snapshot = self.scene.to_snapshot()?;
        self.document.save_page_data(id, snapshot);
        Ok(())
    }

    /// Switch pages: persist the outgoing scene, load the incoming one (or a
    /// blank white page), and resize the live canvas.
    pub fn select_page(&mut self, index: usize) -> Result<(), SessionError> {
        if index == self.document.current_index() {
            return Ok(());
        }
        self.persist_current_page()?;
        self.document.select_page(index)?;
        self.load_current_page()
    }

    /// Append a page cloned from the current page's size and orientation.
    pub fn add_page(&mut self) -> PageId {
        self.document.add_page()
    }

    /// Delete a page; when the current page changes as a result, the live
    /// scene follows.
    pub fn delete_page(&mut self, index: usize) -> Result<bool, SessionError> {
        let before = self.document.current_page().id;
        if !self.document.delete_page(index) {
            return Ok(false);
        }
        if self.document.current_page().id != before {
            self.load_current_page()?;
        }
        Ok(true)
    }

    /// Reorder pages, keeping the current page current.
    pub fn move_page(&mut self, from: usize, to: usize) -> Result<(), SessionError> {
        self.document.move_page(from, to)?;
        Ok(())
    }

    /// Change a page's physical size; the live canvas follows when it is the
    /// current page.
    pub fn set_page_size(
        &mut self,
        index: usize,
        size: PageSizePreset,
        orientation: PageOrientation,
    ) -> Result<(), SessionError> {
        self.document.set_page_size(index, size, orientation)?;
        if index == self.document.current_index() {
            self.canvas_size = self.document.current_page().pixel_dimensions();
        }
        Ok(())
    }

    /// Load the current page's stored scene into the live scene and resize
    /// the canvas. One history capture for the loaded state.
    fn load_current_page(&mut self) -> Result<(), SessionError> {
        let page = self.document.current_page();
        let id = page.id;
        self.canvas_size = page.pixel_dimensions();
        match self.document.page_data(id).cloned() {
            Some(data) => self.scene.restore(&data)?,
            None => self.scene.clear_to_blank(),
        }
        // The load itself is one committed state, not one per object.
        self.scene.drain_events();
        let snapshot = self.scene.to_snapshot()?;
        self.history.capture(snapshot);
        Ok(())
    }
}
