use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::common::config::ResizeAnchoring;
use crate::model::window::{MIN_HEIGHT, MIN_WIDTH};
use crate::sys::geometry::{Point, Rect, finite_or};

bitflags! {
    /// The window edges a resize handle moves. Corners are the union of two
    /// adjacent edges.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ResizeHandle: u8 {
        const N = 1 << 0;
        const S = 1 << 1;
        const E = 1 << 2;
        const W = 1 << 3;

        const NE = Self::N.bits() | Self::E.bits();
        const NW = Self::N.bits() | Self::W.bits();
        const SE = Self::S.bits() | Self::E.bits();
        const SW = Self::S.bits() | Self::W.bits();
    }
}

/// Reshapes `start` by the pointer travel `delta` since the gesture began.
///
/// Each axis is handled on its own, and a handle naming both opposite edges
/// of an axis leaves that axis alone. Sizes never drop below the window
/// minimum. With [`ResizeAnchoring::Unclamped`] the origin tracks the raw
/// delta on north/west edges even once the size has bottomed out.
pub fn resize_frame(
    start: Rect,
    handle: ResizeHandle,
    delta: Point,
    anchoring: ResizeAnchoring,
) -> Rect {
    let dx = finite_or(delta.x, 0.0);
    let dy = finite_or(delta.y, 0.0);
    let mut frame = start;

    match (handle.contains(ResizeHandle::E), handle.contains(ResizeHandle::W)) {
        (true, false) => frame.size.width = (start.size.width + dx).max(MIN_WIDTH),
        (false, true) => {
            frame.size.width = (start.size.width - dx).max(MIN_WIDTH);
            frame.origin.x = match anchoring {
                ResizeAnchoring::Unclamped => start.origin.x + dx,
                ResizeAnchoring::Clamped => start.max_x() - frame.size.width,
            };
        }
        _ => {}
    }

    match (handle.contains(ResizeHandle::S), handle.contains(ResizeHandle::N)) {
        (true, false) => frame.size.height = (start.size.height + dy).max(MIN_HEIGHT),
        (false, true) => {
            frame.size.height = (start.size.height - dy).max(MIN_HEIGHT);
            frame.origin.y = match anchoring {
                ResizeAnchoring::Unclamped => start.origin.y + dy,
                ResizeAnchoring::Clamped => start.max_y() - frame.size.height,
            };
        }
        _ => {}
    }

    frame
}
