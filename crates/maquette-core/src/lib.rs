//! Maquette Core Library
//!
//! Renderer-agnostic model and logic for the Maquette page-layout editor:
//! the scene object model, alignment snapping, snapshot undo/redo, and the
//! multi-page document model.

pub mod document;
pub mod geometry;
pub mod history;
pub mod page;
pub mod scene;
pub mod session;
pub mod snap;

pub use document::{DEFAULT_ZOOM, Document, DocumentError, MAX_ZOOM, MIN_ZOOM};
pub use geometry::{DPI, Frame, OriginX, OriginY, mm_to_pixels, pixels_to_mm};
pub use history::{HISTORY_CAP, HistoryManager, HistoryState};
pub use page::{Page, PageId, PageOrientation, PageSizePreset};
pub use scene::{
    ObjectId, ObjectKind, Scene, SceneError, SceneEvent, SceneObject, SceneSnapshot,
    normalize_link_url,
};
pub use session::{EditorSession, SessionError};
pub use snap::{GuideLine, SNAP_TOLERANCE, SnapAdjustment, SnapEngine};
