use std::fmt;
use std::time::Duration;

use tracing::{trace, warn};

use super::mount::WindowContent;
use crate::common::collections::HashMap;
use crate::layout_engine::{ResizeHandle, SnapZone};
use crate::model::{WindowId, WindowRegistry};
use crate::sys::geometry::{Point, Rect};

/// A title-bar drag in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub window: WindowId,
    pub pointer_start: Point,
    pub frame_start: Rect,
    /// Zone the window would snap to if released now.
    pub snap_preview: Option<SnapZone>,
}

/// An edge or corner resize in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub window: WindowId,
    pub handle: ResizeHandle,
    pub pointer_start: Point,
    pub frame_start: Rect,
}

/// At most one gesture is in flight across all windows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

impl DragState {
    pub fn window(&self) -> Option<&WindowId> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(&session.window),
            DragState::Resizing(session) => Some(&session.window),
        }
    }

    pub fn frame_start(&self) -> Option<Rect> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session.frame_start),
            DragState::Resizing(session) => Some(session.frame_start),
        }
    }

    pub fn snap_preview(&self) -> Option<SnapZone> {
        match self {
            DragState::Dragging(session) => session.snap_preview,
            _ => None,
        }
    }
}

/// Manages the active drag or resize gesture
#[derive(Debug, Default)]
pub struct DragManager {
    pub drag_state: DragState,
}

impl DragManager {
    pub fn window(&self) -> Option<&WindowId> { self.drag_state.window() }

    pub fn take(&mut self) -> DragState { std::mem::take(&mut self.drag_state) }

    pub fn reset(&mut self) { self.drag_state = DragState::Idle; }
}

/// Debounces viewport changes
#[derive(Debug, Default)]
pub struct ViewportManager {
    deadline: Option<Duration>,
}

impl ViewportManager {
    /// (Re)starts the settle timer from `at`.
    pub fn arm(&mut self, at: Duration, delay: Duration) {
        let deadline = at.saturating_add(delay);
        trace!(?deadline, "Viewport settle deadline armed");
        self.deadline = Some(deadline);
    }

    pub fn is_pending(&self) -> bool { self.deadline.is_some() }

    pub fn is_due(&self, now: Duration) -> bool { self.deadline.is_some_and(|deadline| now >= deadline) }

    pub fn deadline(&self) -> Option<Duration> { self.deadline }

    pub fn clear(&mut self) { self.deadline = None; }
}

struct Mounted {
    content: Box<dyn WindowContent>,
    last_frame: Rect,
}

/// Owns the content attached to each window
#[derive(Default)]
pub struct MountManager {
    mounts: HashMap<WindowId, Mounted>,
}

impl fmt::Debug for MountManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.mounts.keys()).finish()
    }
}

impl MountManager {
    pub fn mount(
        &mut self,
        registry: &WindowRegistry,
        id: &str,
        mut content: Box<dyn WindowContent>,
    ) -> Result<(), Box<dyn WindowContent>> {
        let Some(record) = registry.get(id) else {
            warn!(id, "Refusing to mount content for a window that is not open");
            return Err(content);
        };
        let frame = record.frame();
        content.frame_changed(frame);
        self.mounts.insert(record.id.clone(), Mounted { content, last_frame: frame });
        Ok(())
    }

    pub fn is_mounted(&self, id: &str) -> bool { self.mounts.contains_key(id) }

    /// Drops content of closed windows and tells the rest about frames that
    /// moved since the last sync.
    pub fn sync(&mut self, registry: &WindowRegistry) {
        self.mounts.retain(|id, _| registry.contains(id.as_str()));
        for (id, mounted) in self.mounts.iter_mut() {
            let Some(record) = registry.get(id.as_str()) else { continue };
            let frame = record.frame();
            if frame != mounted.last_frame {
                mounted.last_frame = frame;
                mounted.content.frame_changed(frame);
            }
        }
    }
}
