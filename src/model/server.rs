//! Serializable snapshots handed to the shell surfaces that sit outside the
//! window manager (dock, menu bar, debugging tools).

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::window::{WindowId, WindowRecord, ZIndex};
use crate::sys::geometry::{Point, Rect, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct WindowData {
    pub record: WindowRecord,
    pub is_frontmost: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockItem {
    pub id: WindowId,
    pub title: String,
    pub minimized: bool,
    /// The window is the frontmost visible one.
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DockData {
    pub items: Vec<DockItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuBarData {
    pub active_title: String,
    pub active_window: Option<WindowId>,
}

impl WindowData {
    pub fn new(record: &WindowRecord, frontmost: Option<&WindowId>) -> Self {
        Self {
            is_frontmost: frontmost == Some(&record.id),
            record: record.clone(),
        }
    }
}

impl DockData {
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a WindowRecord>,
        frontmost: Option<&WindowId>,
    ) -> Self {
        let items = records
            .into_iter()
            .map(|record| DockItem {
                id: record.id.clone(),
                title: record.title.clone(),
                minimized: record.minimized,
                active: frontmost == Some(&record.id),
            })
            .collect();
        Self { items }
    }

    pub fn item(&self, id: &str) -> Option<&DockItem> {
        self.items.iter().find(|item| item.id.as_str() == id)
    }
}

impl MenuBarData {
    pub fn new(frontmost: Option<&WindowRecord>, idle_title: &str) -> Self {
        match frontmost {
            Some(record) => Self {
                active_title: record.title.clone(),
                active_window: Some(record.id.clone()),
            },
            None => Self {
                active_title: idle_title.to_string(),
                active_window: None,
            },
        }
    }
}

impl Serialize for WindowData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        #[skip_serializing_none]
        #[derive(Serialize)]
        struct WindowDataSer<'a> {
            id: &'a WindowId,
            title: &'a str,
            frame: Rect,
            z_index: ZIndex,
            minimized: bool,
            maximized: bool,
            is_frontmost: bool,
            saved_frame: Option<Rect>,
        }

        let record = &self.record;
        let saved_frame = match (record.saved_position, record.saved_size) {
            (Some(origin), Some(size)) => Some(Rect::new(origin, size)),
            _ => None,
        };
        let helper = WindowDataSer {
            id: &record.id,
            title: &record.title,
            frame: record.frame(),
            z_index: record.z_index,
            minimized: record.minimized,
            maximized: record.maximized,
            is_frontmost: self.is_frontmost,
            saved_frame,
        };

        helper.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WindowData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de> {
        #[derive(Deserialize)]
        struct WindowDataDe {
            id: WindowId,
            title: String,
            frame: Rect,
            z_index: ZIndex,
            minimized: bool,
            maximized: bool,
            is_frontmost: bool,
            #[serde(default)]
            saved_frame: Option<Rect>,
        }

        let helper = WindowDataDe::deserialize(deserializer)?;
        let (saved_position, saved_size): (Option<Point>, Option<Size>) = match helper.saved_frame
        {
            Some(rect) => (Some(rect.origin), Some(rect.size)),
            None => (None, None),
        };

        Ok(WindowData {
            record: WindowRecord {
                id: helper.id,
                title: helper.title,
                position: helper.frame.origin,
                size: helper.frame.size,
                z_index: helper.z_index,
                minimized: helper.minimized,
                maximized: helper.maximized,
                saved_position,
                saved_size,
            },
            is_frontmost: helper.is_frontmost,
        })
    }
}
