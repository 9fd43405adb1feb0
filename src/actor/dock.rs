//! Running-app indicators for the dock.

use crate::model::server::{DockData, DockItem};
use crate::model::{RegistryEvent, WindowRecord, frontmost_visible_in};

#[derive(Debug, Default)]
pub struct Dock {
    data: DockData,
}

impl Dock {
    pub fn new() -> Self { Self::default() }

    pub fn on_registry_event(&mut self, _event: &RegistryEvent, records: &[WindowRecord]) {
        let frontmost = frontmost_visible_in(records).map(|w| &w.id);
        self.data = DockData::from_records(records, frontmost);
    }

    pub fn items(&self) -> &[DockItem] { &self.data.items }

    pub fn data(&self) -> &DockData { &self.data }

    pub fn is_running(&self, id: &str) -> bool { self.data.item(id).is_some() }

    pub fn is_active(&self, id: &str) -> bool { self.data.item(id).is_some_and(|item| item.active) }

    pub fn is_minimized(&self, id: &str) -> bool {
        self.data.item(id).is_some_and(|item| item.minimized)
    }
}
