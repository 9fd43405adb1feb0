use tracing::{debug, trace};

use super::window::WindowEventHandler;
use crate::actor::reactor::{DragSession, DragState, Reactor, ResizeSession, WindowPart};
use crate::layout_engine::{DeviceClass, DropOutcome};
use crate::model::{WindowId, WindowPatch};
use crate::sys::geometry::{Point, Rect};

pub struct DragEventHandler;

impl DragEventHandler {
    pub fn handle_pointer_down(reactor: &mut Reactor, window: &WindowId, part: WindowPart, at: Point) {
        if let Some(active) = reactor.drag_manager.window() {
            debug!(%window, %active, %part, "Ignoring pointer down while another gesture is active");
            return;
        }
        let Some(record) = reactor.registry.get(window.as_str()) else {
            debug!(%window, "Ignoring pointer down on unknown window");
            return;
        };
        if record.minimized {
            debug!(%window, "Ignoring pointer down on minimized window");
            return;
        }
        let frame_start = record.frame();
        let can_drag = reactor.layout.can_drag(record);
        let can_resize = reactor.layout.can_resize(record);

        match part {
            WindowPart::CloseButton => WindowEventHandler::close(reactor, window.as_str()),
            WindowPart::MinimizeButton => WindowEventHandler::minimize(reactor, window.as_str()),
            WindowPart::ZoomButton => WindowEventHandler::toggle_maximize(reactor, window.as_str()),
            WindowPart::DoneButton => {
                if reactor.layout.device_class() == DeviceClass::Compact {
                    WindowEventHandler::close(reactor, window.as_str());
                } else {
                    debug!(%window, "Done is only offered on compact viewports");
                }
            }
            WindowPart::Content => {
                reactor.registry.focus(window.as_str());
            }
            WindowPart::TitleBar => {
                reactor.registry.focus(window.as_str());
                if can_drag {
                    trace!(%window, "Drag started");
                    reactor.drag_manager.drag_state = DragState::Dragging(DragSession {
                        window: window.clone(),
                        pointer_start: at,
                        frame_start,
                        snap_preview: None,
                    });
                }
            }
            WindowPart::ResizeHandle(handle) => {
                reactor.registry.focus(window.as_str());
                if can_resize {
                    trace!(%window, ?handle, "Resize started");
                    reactor.drag_manager.drag_state = DragState::Resizing(ResizeSession {
                        window: window.clone(),
                        handle,
                        pointer_start: at,
                        frame_start,
                    });
                }
            }
        }
    }

    pub fn handle_pointer_move(reactor: &mut Reactor, at: Point) {
        match &mut reactor.drag_manager.drag_state {
            DragState::Idle => {}
            DragState::Dragging(session) => {
                let position = reactor
                    .layout
                    .drag_position(session.frame_start.origin, at - session.pointer_start);
                reactor.registry.update(session.window.as_str(), WindowPatch::position(position));
                let preview = reactor.layout.snap_zone(position, session.frame_start.size);
                if preview != session.snap_preview {
                    trace!(window = %session.window, ?preview, "Snap preview changed");
                    session.snap_preview = preview;
                }
            }
            DragState::Resizing(session) => {
                let frame = reactor.layout.resize(
                    session.frame_start,
                    session.handle,
                    at - session.pointer_start,
                );
                reactor.registry.update(session.window.as_str(), WindowPatch::frame(frame));
            }
        }
    }

    /// Ends the gesture, committing the drop (with snapping) or the final
    /// resize at the release point.
    pub fn handle_pointer_up(reactor: &mut Reactor, at: Point) {
        match reactor.drag_manager.take() {
            DragState::Idle => {}
            DragState::Dragging(session) => {
                let id = session.window.as_str();
                let position = reactor
                    .layout
                    .drag_position(session.frame_start.origin, at - session.pointer_start);
                let Some(record) = reactor.registry.get(id) else {
                    return;
                };
                let dropped = Rect::new(position, record.size);
                let zone = reactor.layout.snap_zone(position, dropped.size);
                match reactor.layout.drop_outcome(zone, dropped) {
                    DropOutcome::Maximize(bounds) => {
                        // remember where the drag began, not the live position near the top edge
                        reactor.registry.update(id, WindowPatch::position(session.frame_start.origin));
                        reactor.registry.maximize(id, bounds);
                    }
                    DropOutcome::Place(frame) => reactor.registry.update(id, WindowPatch::frame(frame)),
                    DropOutcome::Move(position) => {
                        reactor.registry.update(id, WindowPatch::position(position))
                    }
                }
                debug!(window = %session.window, ?zone, "Drag ended");
            }
            DragState::Resizing(session) => {
                let frame = reactor.layout.resize(
                    session.frame_start,
                    session.handle,
                    at - session.pointer_start,
                );
                reactor.registry.update(session.window.as_str(), WindowPatch::frame(frame));
                debug!(window = %session.window, ?frame, "Resize ended");
            }
        }
    }

    /// Aborts the active gesture and puts the window back where it started,
    /// if the interaction settings allow it.
    pub fn handle_escape(reactor: &mut Reactor) {
        if !reactor.config.interaction.escape_cancels_gesture {
            trace!("Escape does not cancel gestures");
            return;
        }
        let state = reactor.drag_manager.take();
        let (Some(window), Some(frame_start)) = (state.window(), state.frame_start()) else {
            return;
        };
        debug!(%window, "Gesture cancelled");
        reactor.registry.update(window.as_str(), WindowPatch::frame(frame_start));
    }
}
