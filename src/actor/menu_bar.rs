//! The menu bar's application label.
//!
//! Follows the frontmost visible window. Registry changes that do not move
//! the label (dragging, resizing, reordering windows behind the front one)
//! are filtered out by comparing a signature of what is shown.

use tracing::trace;

use crate::common::config::MenuBarSettings;
use crate::model::server::MenuBarData;
use crate::model::{RegistryEvent, WindowRecord, frontmost_visible_in};

#[derive(Debug)]
pub struct MenuBar {
    idle_title: String,
    shown: MenuBarData,
    last_signature: Option<u64>,
    updates_applied: usize,
}

impl MenuBar {
    pub fn new(settings: &MenuBarSettings) -> Self {
        Self {
            idle_title: settings.idle_title.clone(),
            shown: MenuBarData::new(None, &settings.idle_title),
            last_signature: None,
            updates_applied: 0,
        }
    }

    pub fn on_registry_event(&mut self, event: &RegistryEvent, records: &[WindowRecord]) {
        trace!(?event, "Menu bar saw registry change");
        self.handle_update(MenuBarData::new(frontmost_visible_in(records), &self.idle_title));
    }

    /// Shows `update` unless it matches what is already shown. Returns
    /// whether anything changed.
    pub fn handle_update(&mut self, update: MenuBarData) -> bool {
        let sig = sig(&update);
        if self.last_signature == Some(sig) {
            return false;
        }
        self.last_signature = Some(sig);
        self.shown = update;
        self.updates_applied += 1;
        true
    }

    pub fn handle_config_updated(&mut self, settings: &MenuBarSettings) {
        let was_idle = self.shown.active_window.is_none();
        self.idle_title = settings.idle_title.clone();
        self.last_signature = None;
        if was_idle {
            self.handle_update(MenuBarData::new(None, &self.idle_title));
        }
    }

    pub fn label(&self) -> &str { &self.shown.active_title }

    pub fn data(&self) -> &MenuBarData { &self.shown }

    /// How many times the label was actually redrawn.
    pub fn updates_applied(&self) -> usize { self.updates_applied }
}

#[inline(always)]
fn sig(data: &MenuBarData) -> u64 {
    let window = data.active_window.as_ref().map_or(0, |id| hash_str(id.as_str()));
    hash_str(&data.active_title) ^ window.rotate_left(29)
}

#[inline(always)]
fn hash_str(s: &str) -> u64 {
    let mut x = 0xcbf2_9ce4_8422_2325u64;
    for &b in s.as_bytes() {
        x ^= b as u64;
        x = x.wrapping_mul(0x0000_0100_0000_01B3);
    }
    x
}
