//! Where new windows appear.

use super::window::{OpenRequest, WindowId, WindowRecord};
use crate::common::config::{AppConfig, ChromeSettings, SnappingSettings};
use crate::layout_engine::{DeviceClass, Viewport};
use crate::sys::geometry::{Point, Rect, Size};

/// Desktop windows open at a fixed offset from the top-left corner.
const DESKTOP_ORIGIN: Point = Point::new(100.0, 100.0);

/// Used by "new window" when nothing is on screen to cascade from.
const FALLBACK_NEW_WINDOW: Rect = Rect::from_xywh(200.0, 100.0, 800.0, 600.0);

/// Initial geometry for `app` on the current viewport.
///
/// Full-size viewports use the app's own default size. Constrained viewports
/// get a window spanning most of the width, centered in the area between the
/// menu bar and the dock. Compact viewports get the whole available area; the
/// caller is expected to maximize the window right away.
pub fn launch_request(
    app: &AppConfig,
    viewport: Viewport,
    class: DeviceClass,
    chrome: &ChromeSettings,
    snapping: &SnappingSettings,
) -> OpenRequest {
    let available = chrome.available_height(viewport.height);
    let frame = match class {
        DeviceClass::Full => Rect::new(DESKTOP_ORIGIN, Size::new(app.width, app.height)),
        DeviceClass::Constrained => {
            let width = viewport.width * snapping.magnet_width_ratio;
            let height = app.height.min(available);
            Rect::from_xywh(
                (viewport.width - width) / 2.0,
                chrome.menu_bar_height + (available - height) / 2.0,
                width,
                height,
            )
        }
        DeviceClass::Compact => {
            Rect::from_xywh(0.0, chrome.menu_bar_height, viewport.width, available)
        }
    };
    OpenRequest::new(app.id.as_str(), app.title.as_str(), frame)
}

/// A fresh window stacked diagonally below `frontmost`, with the same size.
pub fn cascade_request(
    id: WindowId,
    title: String,
    frontmost: Option<&WindowRecord>,
    offset: f64,
) -> OpenRequest {
    let frame = match frontmost {
        Some(record) => Rect::new(
            record.position + Point::new(offset, offset),
            record.size,
        ),
        None => FALLBACK_NEW_WINDOW,
    };
    OpenRequest {
        id,
        title,
        position: frame.origin,
        size: frame.size,
    }
}
