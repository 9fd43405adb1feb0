use tracing::{debug, info};

use super::resize::{ResizeHandle, resize_frame};
use super::responsive::{DeviceClass, Viewport, reconcile_frame};
use super::snap::{DropOutcome, SnapZone, drop_outcome, snap_zone};
use crate::common::config::{
    ChromeSettings, Config, DeviceSettings, ResizeAnchoring, SnappingSettings,
};
use crate::model::window::WindowRecord;
use crate::sys::geometry::{Point, Rect, Size};

/// The geometry rules bound to the current viewport and settings.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    viewport: Viewport,
    device_class: DeviceClass,
    chrome: ChromeSettings,
    snapping: SnappingSettings,
    device: DeviceSettings,
    anchoring: ResizeAnchoring,
}

impl LayoutEngine {
    pub fn new(config: &Config, viewport: Viewport) -> Self {
        let viewport = viewport.sanitized();
        let device_class = DeviceClass::classify(viewport.width, &config.device);
        Self {
            viewport,
            device_class,
            chrome: config.chrome,
            snapping: config.snapping,
            device: config.device,
            anchoring: config.interaction.resize_anchoring,
        }
    }

    pub fn update_settings(&mut self, config: &Config) {
        self.chrome = config.chrome;
        self.snapping = config.snapping;
        self.device = config.device;
        self.anchoring = config.interaction.resize_anchoring;
        self.device_class = DeviceClass::classify(self.viewport.width, &self.device);
    }

    /// Switches to a new viewport. Returns the previous class if the device
    /// class changed.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Option<DeviceClass> {
        self.viewport = viewport.sanitized();
        let class = DeviceClass::classify(self.viewport.width, &self.device);
        if class == self.device_class {
            return None;
        }
        info!(from = %self.device_class, to = %class, "Device class changed");
        Some(std::mem::replace(&mut self.device_class, class))
    }

    pub fn viewport(&self) -> Viewport { self.viewport }

    pub fn device_class(&self) -> DeviceClass { self.device_class }

    pub fn chrome(&self) -> &ChromeSettings { &self.chrome }

    pub fn snapping(&self) -> &SnappingSettings { &self.snapping }

    pub fn anchoring(&self) -> ResizeAnchoring { self.anchoring }

    pub fn snap_threshold(&self) -> f64 {
        match self.device_class {
            DeviceClass::Constrained => self.snapping.constrained_threshold,
            DeviceClass::Compact | DeviceClass::Full => self.snapping.threshold,
        }
    }

    /// Height between the menu bar and the dock.
    pub fn available_height(&self) -> f64 { self.chrome.available_height(self.viewport.height) }

    /// Area handed to `maximize`: the full width and the available height.
    pub fn maximize_bounds(&self) -> Size { Size::new(self.viewport.width, self.available_height()) }

    pub fn can_drag(&self, window: &WindowRecord) -> bool {
        !window.maximized && self.device_class.allows_drag()
    }

    pub fn can_resize(&self, window: &WindowRecord) -> bool {
        !window.maximized && self.device_class.allows_resize()
    }

    pub fn drag_position(&self, start: Point, delta: Point) -> Point { start + delta }

    pub fn snap_zone(&self, position: Point, size: Size) -> Option<SnapZone> {
        snap_zone(
            position,
            size,
            self.viewport,
            self.chrome.menu_bar_height,
            self.snap_threshold(),
        )
    }

    pub fn drop_outcome(&self, zone: Option<SnapZone>, dropped: Rect) -> DropOutcome {
        let outcome = drop_outcome(
            zone,
            dropped,
            self.viewport,
            self.device_class,
            &self.chrome,
            &self.snapping,
        );
        debug!(?zone, ?outcome, "Resolved drop");
        outcome
    }

    pub fn resize(&self, start: Rect, handle: ResizeHandle, delta: Point) -> Rect {
        resize_frame(start, handle, delta, self.anchoring)
    }

    /// New origin for a window that no longer fits the viewport.
    pub fn reconcile(&self, frame: Rect) -> Option<Point> {
        reconcile_frame(frame, self.viewport, &self.chrome)
    }
}
