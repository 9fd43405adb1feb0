use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sys::geometry::{Point, Rect, Size};

pub const MIN_WIDTH: f64 = 300.0;
pub const MIN_HEIGHT: f64 = 200.0;
pub const MIN_SIZE: Size = Size::new(MIN_WIDTH, MIN_HEIGHT);

/// Identity of an open window. One window exists per application, so this
/// doubles as the application key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for WindowId {
    fn from(id: &str) -> Self { Self(id.to_string()) }
}

impl From<String> for WindowId {
    fn from(id: String) -> Self { Self(id) }
}

impl Borrow<str> for WindowId {
    fn borrow(&self) -> &str { &self.0 }
}

/// Stacking position. Allocated from a counter that only moves forward, so
/// a larger value is always closer to the viewer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ZIndex(u64);

impl ZIndex {
    pub const fn new(z: u64) -> Self { Self(z) }

    pub const fn get(self) -> u64 { self.0 }

    pub(crate) fn next(self) -> ZIndex { ZIndex(self.0 + 1) }
}

impl fmt::Display for ZIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub position: Point,
    pub size: Size,
    pub z_index: ZIndex,
    pub minimized: bool,
    pub maximized: bool,
    /// Pre-maximize geometry; `Some` exactly while `maximized` is set.
    pub saved_position: Option<Point>,
    pub saved_size: Option<Size>,
}

impl WindowRecord {
    pub fn frame(&self) -> Rect { Rect::new(self.position, self.size) }

    pub fn is_visible(&self) -> bool { !self.minimized }
}

/// A request to create a window with caller-chosen geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenRequest {
    pub id: WindowId,
    pub title: String,
    pub position: Point,
    pub size: Size,
}

impl OpenRequest {
    pub fn new(id: impl Into<WindowId>, title: impl Into<String>, frame: Rect) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            position: frame.origin,
            size: frame.size,
        }
    }
}

/// Field updates accepted by [`WindowRegistry::update`]. Flags and stacking
/// only change through their own operations.
///
/// [`WindowRegistry::update`]: super::WindowRegistry::update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowPatch {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub title: Option<String>,
}

impl WindowPatch {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn frame(frame: Rect) -> Self {
        Self {
            position: Some(frame.origin),
            size: Some(frame.size),
            title: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.size.is_none() && self.title.is_none()
    }
}
