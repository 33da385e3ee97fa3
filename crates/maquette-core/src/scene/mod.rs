//! Scene model: the placed objects on one page.
//!
//! Objects are a tagged union over a common [`Frame`] rather than one
//! dynamically-typed bag of optional fields; the per-variant payloads live in
//! their own modules.

mod icon;
mod image;
mod shape;
mod table;
mod text;

pub use icon::IconPath;
pub use image::{ImageContent, ImageFormat};
pub use shape::ShapeFigure;
pub use table::TableGrid;
pub use text::{TextAlign, TextRun};

use crate::geometry::Frame;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Offset applied to duplicated objects so the copy is visible.
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// Unique identifier for scene objects.
pub type ObjectId = Uuid;

/// Serializable RGBA color (8 bits per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

/// Drop shadow parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: Rgba,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Rgba::new(0, 0, 0, 77),
            blur: 10.0,
            offset_x: 5.0,
            offset_y: 5.0,
        }
    }
}

/// Visual styling. Opaque to the layout algorithms; it only has to
/// round-trip through snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectStyle {
    /// Fill color (None = no fill).
    pub fill: Option<Rgba>,
    /// Stroke color (None = no stroke).
    pub stroke: Option<Rgba>,
    /// Stroke width in page pixels.
    pub stroke_width: f64,
    /// Optional drop shadow.
    #[serde(default)]
    pub shadow: Option<Shadow>,
}

impl Default for ObjectStyle {
    fn default() -> Self {
        Self {
            fill: Some(Rgba::black()),
            stroke: None,
            stroke_width: 1.0,
            shadow: None,
        }
    }
}

/// Per-variant payload of a scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    Text(TextRun),
    Shape(ShapeFigure),
    Image(ImageContent),
    Table(TableGrid),
    Icon(IconPath),
}

/// One placed element on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    /// Position, size, scale, rotation, origin anchors.
    pub frame: Frame,
    #[serde(default)]
    pub style: ObjectStyle,
    /// Clickable link carried through snapshots and into export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    /// Id of the group this object belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<ObjectId>,
    #[serde(flatten)]
    pub kind: ObjectKind,
}

impl SceneObject {
    /// Create an object with a fresh id.
    pub fn new(frame: Frame, kind: ObjectKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            frame,
            style: ObjectStyle::default(),
            link_url: None,
            group: None,
            kind,
        }
    }
}

/// Mutation notifications emitted by the scene.
///
/// The scene knows nothing about rendering or history; whoever orchestrates
/// (the editor session) drains these and reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    ObjectAdded(ObjectId),
    ObjectRemoved(ObjectId),
    ObjectModified(ObjectId),
    ObjectMoving(ObjectId),
    SelectionChanged,
}

/// Scene errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("snapshot parse error: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("object not found: {0}")]
    NotFound(ObjectId),
}

/// A full serialized copy of a scene at one point in time.
///
/// The payload is JSON so that a damaged snapshot is a recoverable parse
/// error rather than a crash, and so history comparisons are value-exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot(pub serde_json::Value);

/// All objects on one page, back-to-front.
///
/// The object list order is the z-order and the deterministic iteration
/// order the snap engine depends on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Page background color.
    pub background: Rgba,
    objects: Vec<SceneObject>,
    #[serde(skip)]
    events: Vec<SceneEvent>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty white scene.
    pub fn new() -> Self {
        Self {
            background: Rgba::white(),
            objects: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Objects in z-order (back to front).
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Get an object by id.
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Get a mutable object by id. Call [`Scene::notify_modified`] after a
    /// committed change so observers see it.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Topmost object whose anchored bounding box contains the point, for
    /// pointer picking. Front-to-back so overlapping objects resolve to the
    /// one on top.
    pub fn object_at_point(&self, point: Point) -> Option<&SceneObject> {
        self.objects
            .iter()
            .rev()
            .find(|o| o.frame.anchored_bounds().contains(point))
    }

    /// Add an object on top of the stack.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id;
        self.objects.push(object);
        self.events.push(SceneEvent::ObjectAdded(id));
        id
    }

    /// Remove an object, returning it.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        let object = self.objects.remove(index);
        self.events.push(SceneEvent::ObjectRemoved(id));
        Some(object)
    }

    /// Record that an object finished a committed mutation (drag end,
    /// property change).
    pub fn notify_modified(&mut self, id: ObjectId) {
        self.events.push(SceneEvent::ObjectModified(id));
    }

    /// Record an in-progress drag tick.
    pub fn notify_moving(&mut self, id: ObjectId) {
        self.events.push(SceneEvent::ObjectMoving(id));
    }

    /// Move an object to the top of the z-order.
    pub fn bring_to_front(&mut self, id: ObjectId) {
        if let Some(index) = self.objects.iter().position(|o| o.id == id) {
            let object = self.objects.remove(index);
            self.objects.push(object);
        }
    }

    /// Move an object to the bottom of the z-order.
    pub fn send_to_back(&mut self, id: ObjectId) {
        if let Some(index) = self.objects.iter().position(|o| o.id == id) {
            let object = self.objects.remove(index);
            self.objects.insert(0, object);
        }
    }

    /// Clone an object with a fresh id at a small offset. The link carries
    /// over. Returns the new id.
    pub fn duplicate(&mut self, id: ObjectId) -> Option<ObjectId> {
        let mut copy = self.object(id)?.clone();
        copy.id = Uuid::new_v4();
        copy.frame.left += DUPLICATE_OFFSET;
        copy.frame.top += DUPLICATE_OFFSET;
        Some(self.add_object(copy))
    }

    /// Attach a link to an object, defaulting the scheme when absent.
    pub fn set_link(&mut self, id: ObjectId, url: &str) -> Result<(), SceneError> {
        let normalized = normalize_link_url(url);
        let object = self.object_mut(id).ok_or(SceneError::NotFound(id))?;
        object.link_url = if normalized.is_empty() {
            None
        } else {
            Some(normalized)
        };
        self.notify_modified(id);
        Ok(())
    }

    /// Remove an object's link.
    pub fn clear_link(&mut self, id: ObjectId) -> Result<(), SceneError> {
        let object = self.object_mut(id).ok_or(SceneError::NotFound(id))?;
        object.link_url = None;
        self.notify_modified(id);
        Ok(())
    }

    /// Reset to an empty white page.
    pub fn clear_to_blank(&mut self) {
        self.objects.clear();
        self.background = Rgba::white();
        self.events.push(SceneEvent::SelectionChanged);
    }

    /// Take the pending mutation events.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Serialize the full scene, including `link_url` fields.
    pub fn to_snapshot(&self) -> Result<SceneSnapshot, SceneError> {
        Ok(SceneSnapshot(serde_json::to_value(self)?))
    }

    /// Rebuild a scene from a snapshot.
    pub fn from_snapshot(snapshot: &SceneSnapshot) -> Result<Self, SceneError> {
        Ok(serde_json::from_value(snapshot.0.clone())?)
    }

    /// Replace this scene's content from a snapshot, emitting events for the
    /// restored objects the way a fresh load would.
    pub fn restore(&mut self, snapshot: &SceneSnapshot) -> Result<(), SceneError> {
        let loaded = Self::from_snapshot(snapshot)?;
        self.background = loaded.background;
        self.objects = loaded.objects;
        for id in self.objects.iter().map(|o| o.id).collect::<Vec<_>>() {
            self.events.push(SceneEvent::ObjectAdded(id));
        }
        Ok(())
    }
}

/// Trim a URL and prefix `https://` unless it already carries an `http`,
/// `https`, or `mailto` scheme (case-insensitive).
pub fn normalize_link_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("mailto:")
    {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Frame;

    fn text_object(left: f64, top: f64) -> SceneObject {
        SceneObject::new(
            Frame::new(left, top, 100.0, 20.0),
            ObjectKind::Text(TextRun::new("hello")),
        )
    }

    #[test]
    fn test_add_and_remove() {
        let mut scene = Scene::new();
        let id = scene.add_object(text_object(0.0, 0.0));
        assert_eq!(scene.len(), 1);
        assert!(scene.remove_object(id).is_some());
        assert!(scene.is_empty());
        assert_eq!(
            scene.drain_events(),
            vec![SceneEvent::ObjectAdded(id), SceneEvent::ObjectRemoved(id)]
        );
    }

    #[test]
    fn test_z_order() {
        let mut scene = Scene::new();
        let a = scene.add_object(text_object(0.0, 0.0));
        let b = scene.add_object(text_object(10.0, 10.0));
        scene.bring_to_front(a);
        let order: Vec<_> = scene.objects().iter().map(|o| o.id).collect();
        assert_eq!(order, vec![b, a]);
        scene.send_to_back(a);
        let order: Vec<_> = scene.objects().iter().map(|o| o.id).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn test_object_at_point_prefers_topmost() {
        let mut scene = Scene::new();
        let below = scene.add_object(text_object(0.0, 0.0));
        let above = scene.add_object(text_object(50.0, 10.0));

        // Overlap region belongs to the object on top.
        let hit = scene.object_at_point(Point::new(60.0, 15.0)).unwrap();
        assert_eq!(hit.id, above);

        let hit = scene.object_at_point(Point::new(5.0, 5.0)).unwrap();
        assert_eq!(hit.id, below);

        assert!(scene.object_at_point(Point::new(500.0, 500.0)).is_none());
    }

    #[test]
    fn test_duplicate_offsets_and_keeps_link() {
        let mut scene = Scene::new();
        let id = scene.add_object(text_object(5.0, 7.0));
        scene.set_link(id, "example.com").unwrap();
        let copy_id = scene.duplicate(id).unwrap();
        let copy = scene.object(copy_id).unwrap();
        assert_ne!(copy.id, id);
        assert_eq!(copy.frame.left, 5.0 + DUPLICATE_OFFSET);
        assert_eq!(copy.frame.top, 7.0 + DUPLICATE_OFFSET);
        assert_eq!(copy.link_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_normalize_link_url() {
        assert_eq!(normalize_link_url("example.com"), "https://example.com");
        assert_eq!(normalize_link_url("  example.com  "), "https://example.com");
        assert_eq!(normalize_link_url("http://a.b"), "http://a.b");
        assert_eq!(normalize_link_url("HTTPS://a.b"), "HTTPS://a.b");
        assert_eq!(normalize_link_url("mailto:x@y.z"), "mailto:x@y.z");
        assert_eq!(normalize_link_url(""), "");
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_link() {
        let mut scene = Scene::new();
        let id = scene.add_object(text_object(1.0, 2.0));
        scene.set_link(id, "https://example.com/page").unwrap();

        let snapshot = scene.to_snapshot().unwrap();
        let restored = Scene::from_snapshot(&snapshot).unwrap();
        assert_eq!(
            restored.object(id).unwrap().link_url.as_deref(),
            Some("https://example.com/page")
        );
        // Value-exact round-trip.
        assert_eq!(restored.to_snapshot().unwrap(), snapshot);
    }

    #[test]
    fn test_variant_tags_roundtrip() {
        let frame = || Frame::new(0.0, 0.0, 10.0, 10.0);
        let variants = vec![
            (ObjectKind::Text(TextRun::new("t")), "text"),
            (ObjectKind::Shape(ShapeFigure::ellipse()), "shape"),
            (
                ObjectKind::Image(ImageContent::from_bytes(
                    &[0x89, 0x50, 0x4E, 0x47],
                    1,
                    1,
                    ImageFormat::Png,
                )),
                "image",
            ),
            (ObjectKind::Table(TableGrid::new(2, 2, 50.0, 20.0)), "table"),
            (ObjectKind::Icon(IconPath::new("M0 0L10 10")), "icon"),
        ];
        for (kind, tag) in variants {
            let object = SceneObject::new(frame(), kind);
            let value = serde_json::to_value(&object).unwrap();
            assert_eq!(value["type"].as_str(), Some(tag));
            let back: SceneObject = serde_json::from_value(value).unwrap();
            assert_eq!(back, object);
        }
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error() {
        let snapshot = SceneSnapshot(serde_json::json!({"objects": "not-a-list"}));
        assert!(Scene::from_snapshot(&snapshot).is_err());
    }

    #[test]
    fn test_clear_to_blank() {
        let mut scene = Scene::new();
        scene.background = Rgba::black();
        scene.add_object(text_object(0.0, 0.0));
        scene.clear_to_blank();
        assert!(scene.is_empty());
        assert_eq!(scene.background, Rgba::white());
    }
}
