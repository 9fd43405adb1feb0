use crate::actor::reactor::Reactor;
use crate::model::server::{DockData, MenuBarData, WindowData};

impl Reactor {
    /// Every open window in dock order.
    pub fn query_windows(&self) -> Vec<WindowData> {
        let frontmost = self.registry.frontmost_visible();
        self.registry.iter().map(|record| WindowData::new(record, frontmost)).collect()
    }

    pub fn query_window_info(&self, id: &str) -> Option<WindowData> {
        let record = self.registry.get(id)?;
        Some(WindowData::new(record, self.registry.frontmost_visible()))
    }

    pub fn query_dock(&self) -> DockData {
        DockData::from_records(self.registry.iter(), self.registry.frontmost_visible())
    }

    pub fn query_menu_bar(&self) -> MenuBarData {
        MenuBarData::new(
            self.registry.frontmost_record(),
            &self.config.menu_bar.idle_title,
        )
    }
}
