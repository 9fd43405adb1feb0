//! Geometry decisions for window interaction: where a dragged window goes,
//! which snap zone it is over, how a resize handle reshapes it, and how the
//! layout adapts when the viewport changes size.
//!
//! Nothing in here mutates window state. The reactor asks the engine for a
//! target and commits it through the registry.

mod engine;
mod resize;
mod responsive;
mod snap;

pub use engine::LayoutEngine;
pub use resize::{ResizeHandle, resize_frame};
pub use responsive::{DeviceClass, Orientation, Viewport, reconcile_frame};
pub use snap::{DropOutcome, SnapZone, drop_outcome, snap_zone};
