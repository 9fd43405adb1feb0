use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::common::config::{ChromeSettings, DeviceSettings};
use crate::sys::geometry::{Point, Rect, Size, finite_or};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// The primary pointer is a finger rather than a mouse.
    #[serde(default)]
    pub touch: bool,
}

/// Coarse classification of the viewport that decides which interactions are
/// offered.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeviceClass {
    /// Phone-sized. Every window is full-bleed and geometry is fixed.
    Compact,
    /// Tablet-sized. Windows move but do not resize.
    Constrained,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Viewport {
    /// Non-finite or negative dimensions are treated as zero.
    pub fn new(width: f64, height: f64, touch: bool) -> Self {
        Self {
            width: finite_or(width, 0.0).max(0.0),
            height: finite_or(height, 0.0).max(0.0),
            touch,
        }
    }

    pub fn sanitized(self) -> Self { Self::new(self.width, self.height, self.touch) }

    pub fn size(&self) -> Size { Size::new(self.width, self.height) }

    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

impl Default for Viewport {
    fn default() -> Self { Self::new(1920.0, 1080.0, false) }
}

impl DeviceClass {
    pub fn classify(width: f64, settings: &DeviceSettings) -> Self {
        if width < settings.compact_max_width {
            DeviceClass::Compact
        } else if width < settings.constrained_max_width {
            DeviceClass::Constrained
        } else {
            DeviceClass::Full
        }
    }

    pub fn allows_drag(self) -> bool { self != DeviceClass::Compact }

    pub fn allows_resize(self) -> bool { self == DeviceClass::Full }

    pub fn forces_fullscreen(self) -> bool { self == DeviceClass::Compact }
}

/// Pulls a window that hangs off the right or bottom edge back on screen.
///
/// Returns `None` for windows that already fit, which are left exactly where
/// they are. Windows larger than the viewport are pinned to the left edge and
/// just below the menu bar.
pub fn reconcile_frame(frame: Rect, viewport: Viewport, chrome: &ChromeSettings) -> Option<Point> {
    if frame.max_x() <= viewport.width && frame.max_y() <= viewport.height {
        return None;
    }
    let x = frame.origin.x.min(viewport.width - frame.size.width).max(0.0);
    let y = frame
        .origin
        .y
        .min(viewport.height - chrome.dock_height - frame.size.height)
        .max(chrome.menu_bar_height);
    let origin = Point::new(x, y);
    (origin != frame.origin).then_some(origin)
}
