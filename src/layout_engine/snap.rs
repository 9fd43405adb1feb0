use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::responsive::{DeviceClass, Viewport};
use crate::common::config::{ChromeSettings, SnappingSettings};
use crate::sys::geometry::{Point, Rect, Size};

/// Screen regions that resize a dropped window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SnapZone {
    /// Fill the available area.
    Top,
    /// Left half.
    Left,
    /// Right half.
    Right,
}

/// What to do with a window when the drag ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DropOutcome {
    Maximize(Size),
    Place(Rect),
    /// Leave the window where it was dropped.
    Move(Point),
}

/// The zone a window with top-left `position` would snap to, if any.
///
/// Top wins over the sides so a window dragged into a corner maximizes.
pub fn snap_zone(
    position: Point,
    size: Size,
    viewport: Viewport,
    menu_bar_height: f64,
    threshold: f64,
) -> Option<SnapZone> {
    if position.y <= menu_bar_height + threshold {
        Some(SnapZone::Top)
    } else if position.x <= threshold && position.y > menu_bar_height {
        Some(SnapZone::Left)
    } else if position.x + size.width >= viewport.width - threshold
        && position.y > menu_bar_height
    {
        Some(SnapZone::Right)
    } else {
        None
    }
}

/// Resolves a drop of `dropped` into its committed geometry.
///
/// Without a zone, constrained viewports pull drops that land near the
/// centered position onto it. Everything else stays where it was dropped.
pub fn drop_outcome(
    zone: Option<SnapZone>,
    dropped: Rect,
    viewport: Viewport,
    class: DeviceClass,
    chrome: &ChromeSettings,
    snapping: &SnappingSettings,
) -> DropOutcome {
    let available = chrome.available_height(viewport.height);
    let half = viewport.width / 2.0;
    match zone {
        Some(SnapZone::Top) => DropOutcome::Maximize(Size::new(viewport.width, available)),
        Some(SnapZone::Left) => {
            DropOutcome::Place(Rect::from_xywh(0.0, chrome.menu_bar_height, half, available))
        }
        Some(SnapZone::Right) => {
            DropOutcome::Place(Rect::from_xywh(half, chrome.menu_bar_height, half, available))
        }
        None if class == DeviceClass::Constrained => {
            let width = viewport.width * snapping.magnet_width_ratio;
            let x = (viewport.width - width) / 2.0;
            if (dropped.origin.x - x).abs() < snapping.magnet_tolerance {
                DropOutcome::Place(Rect::from_xywh(x, dropped.origin.y, width, dropped.size.height))
            } else {
                DropOutcome::Move(dropped.origin)
            }
        }
        None => DropOutcome::Move(dropped.origin),
    }
}
