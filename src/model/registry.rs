//! The window registry: the single source of truth for open windows and the
//! stacking counter.
//!
//! Every operation is infallible. Operations addressed at an id that is not
//! open are silently ignored, since stale input handlers may still fire after
//! a window has gone away. Each mutation that actually changes state is
//! reported to every subscriber exactly once; ignored calls report nothing.

use std::fmt;

use slotmap::SlotMap;
use tracing::{debug, trace};

use super::window::{MIN_SIZE, OpenRequest, WindowId, WindowPatch, WindowRecord, ZIndex};
use crate::sys::geometry::{Point, Size, finite_or};

slotmap::new_key_type! {
    pub struct SubscriptionId;
}

/// What changed. Listeners receive this together with the full record list
/// as it stands after the change.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEvent {
    Opened(WindowId),
    Closed(WindowId),
    Focused(WindowId, ZIndex),
    Minimized(WindowId),
    Restored(WindowId),
    Maximized(WindowId),
    Updated(WindowId),
}

impl RegistryEvent {
    pub fn window(&self) -> &WindowId {
        match self {
            RegistryEvent::Opened(id)
            | RegistryEvent::Closed(id)
            | RegistryEvent::Focused(id, _)
            | RegistryEvent::Minimized(id)
            | RegistryEvent::Restored(id)
            | RegistryEvent::Maximized(id)
            | RegistryEvent::Updated(id) => id,
        }
    }
}

pub type Listener = Box<dyn FnMut(&RegistryEvent, &[WindowRecord])>;

#[derive(Default)]
pub struct WindowRegistry {
    /// Open windows in the order they were opened.
    windows: Vec<WindowRecord>,
    max_z: ZIndex,
    listeners: SlotMap<SubscriptionId, Listener>,
}

impl fmt::Debug for WindowRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowRegistry")
            .field("windows", &self.windows)
            .field("max_z", &self.max_z)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl WindowRegistry {
    pub fn new() -> Self { Self::default() }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&RegistryEvent, &[WindowRecord]) + 'static,
    ) -> SubscriptionId {
        self.listeners.insert(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id).is_some()
    }

    /// Inserts a new window on top of the stack. Returns the allocated
    /// z-index, or `None` without touching anything if `id` is already open.
    pub fn open(&mut self, request: OpenRequest) -> Option<ZIndex> {
        if self.contains(request.id.as_str()) {
            debug!(id = %request.id, "Ignoring open for a window that already exists");
            return None;
        }
        let z_index = self.next_z();
        let id = request.id.clone();
        self.windows.push(WindowRecord {
            id: request.id,
            title: request.title,
            position: sanitize_point(request.position, Point::ZERO),
            size: request.size.at_least(MIN_SIZE),
            z_index,
            minimized: false,
            maximized: false,
            saved_position: None,
            saved_size: None,
        });
        self.notify(RegistryEvent::Opened(id));
        Some(z_index)
    }

    pub fn close(&mut self, id: &str) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        let record = self.windows.remove(index);
        self.notify(RegistryEvent::Closed(record.id));
    }

    /// Raises the window by giving it a fresh z-index.
    pub fn focus(&mut self, id: &str) -> Option<ZIndex> {
        let index = self.index_of(id)?;
        let z_index = self.next_z();
        let record = &mut self.windows[index];
        record.z_index = z_index;
        let id = record.id.clone();
        self.notify(RegistryEvent::Focused(id, z_index));
        Some(z_index)
    }

    pub fn minimize(&mut self, id: &str) {
        let Some(record) = self.get_mut(id) else {
            return;
        };
        if record.minimized {
            return;
        }
        record.minimized = true;
        let id = record.id.clone();
        self.notify(RegistryEvent::Minimized(id));
    }

    /// Un-minimizes the window and, if it is maximized, puts back the
    /// geometry it had before maximizing.
    pub fn restore(&mut self, id: &str) {
        let Some(record) = self.get_mut(id) else {
            return;
        };
        if !record.minimized && !record.maximized {
            return;
        }
        record.minimized = false;
        if record.maximized {
            record.maximized = false;
            if let Some(position) = record.saved_position.take() {
                record.position = position;
            }
            if let Some(size) = record.saved_size.take() {
                record.size = size;
            }
        }
        let id = record.id.clone();
        self.notify(RegistryEvent::Restored(id));
    }

    /// Fills `bounds` from the top-left corner, remembering the current
    /// geometry for [`restore`](Self::restore). Already-maximized windows are
    /// left alone so the remembered geometry is never overwritten.
    pub fn maximize(&mut self, id: &str, bounds: Size) {
        let Some(record) = self.get_mut(id) else {
            return;
        };
        if record.maximized {
            return;
        }
        record.saved_position = Some(record.position);
        record.saved_size = Some(record.size);
        record.position = Point::ZERO;
        record.size = bounds.at_least(Size::default());
        record.maximized = true;
        let id = record.id.clone();
        self.notify(RegistryEvent::Maximized(id));
    }

    /// Merges geometry and title updates. Sizes of windows that are not
    /// maximized are held at the minimum.
    pub fn update(&mut self, id: &str, patch: WindowPatch) {
        if patch.is_empty() {
            return;
        }
        let Some(record) = self.get_mut(id) else {
            return;
        };
        let before = (record.position, record.size);
        if let Some(position) = patch.position {
            record.position = sanitize_point(position, record.position);
        }
        if let Some(size) = patch.size {
            let floor = if record.maximized { Size::default() } else { MIN_SIZE };
            record.size = size.at_least(floor);
        }
        let title_changed = match patch.title {
            Some(title) if title != record.title => {
                record.title = title;
                true
            }
            _ => false,
        };
        if before == (record.position, record.size) && !title_changed {
            return;
        }
        let id = record.id.clone();
        self.notify(RegistryEvent::Updated(id));
    }

    /// The non-minimized window with the highest z-index.
    pub fn frontmost_visible(&self) -> Option<&WindowId> {
        self.frontmost_record().map(|w| &w.id)
    }

    pub fn frontmost_record(&self) -> Option<&WindowRecord> { frontmost_visible_in(&self.windows) }

    pub fn get(&self, id: &str) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool { self.index_of(id).is_some() }

    /// Records in the order they were opened.
    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord> + '_ { self.windows.iter() }

    pub fn records(&self) -> &[WindowRecord] { &self.windows }

    pub fn len(&self) -> usize { self.windows.len() }

    pub fn is_empty(&self) -> bool { self.windows.is_empty() }

    pub fn max_z(&self) -> ZIndex { self.max_z }

    /// Visible windows from back to front.
    pub fn stacking_order(&self) -> Vec<WindowId> {
        let mut visible: Vec<&WindowRecord> =
            self.windows.iter().filter(|w| w.is_visible()).collect();
        visible.sort_by_key(|w| w.z_index);
        visible.into_iter().map(|w| w.id.clone()).collect()
    }

    pub fn debug_stack(&self) -> String {
        let mut ordered: Vec<&WindowRecord> = self.windows.iter().collect();
        ordered.sort_by_key(|w| std::cmp::Reverse(w.z_index));
        let leaves = ordered
            .into_iter()
            .map(|w| {
                let mut flags = String::new();
                if w.minimized {
                    flags.push_str(" minimized");
                }
                if w.maximized {
                    flags.push_str(" maximized");
                }
                ascii_tree::Tree::Leaf(vec![format!(
                    "z={} {} {:?} ({}, {}) {}x{}{}",
                    w.z_index,
                    w.id,
                    w.title,
                    w.position.x,
                    w.position.y,
                    w.size.width,
                    w.size.height,
                    flags
                )])
            })
            .collect();
        let tree = ascii_tree::Tree::Node(format!("windows (max z {})", self.max_z), leaves);
        let mut out = String::new();
        let _ = ascii_tree::write_tree(&mut out, &tree);
        out
    }

    fn next_z(&mut self) -> ZIndex {
        self.max_z = self.max_z.next();
        self.max_z
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.windows.iter().position(|w| w.id.as_str() == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id.as_str() == id)
    }

    fn notify(&mut self, event: RegistryEvent) {
        trace!(?event, "Registry changed");
        if self.listeners.is_empty() {
            return;
        }
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in listeners.iter_mut() {
            listener(&event, &self.windows);
        }
        self.listeners = listeners;
    }
}

/// The non-minimized record with the highest z-index in `records`.
pub fn frontmost_visible_in(records: &[WindowRecord]) -> Option<&WindowRecord> {
    records.iter().filter(|w| w.is_visible()).max_by_key(|w| w.z_index)
}

fn sanitize_point(point: Point, fallback: Point) -> Point {
    Point::new(finite_or(point.x, fallback.x), finite_or(point.y, fallback.y))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::window::{MIN_HEIGHT, MIN_WIDTH};
    use crate::sys::geometry::Rect;

    fn open(registry: &mut WindowRegistry, id: &str, frame: Rect) -> Option<ZIndex> {
        registry.open(OpenRequest::new(id, id.to_uppercase(), frame))
    }

    fn recorder(registry: &mut WindowRegistry) -> Rc<RefCell<Vec<RegistryEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        registry.subscribe(move |event, _| sink.borrow_mut().push(event.clone()));
        events
    }

    #[test]
    fn z_indices_strictly_increase_across_open_and_focus() {
        let mut registry = WindowRegistry::new();
        let frame = Rect::from_xywh(0.0, 0.0, 400.0, 300.0);
        let mut last = ZIndex::default();
        for step in ["a", "b", "a", "c", "b", "b", "a"] {
            let z = match open(&mut registry, step, frame) {
                Some(z) => z,
                None => registry.focus(step).unwrap(),
            };
            assert!(z > last, "{z} should exceed {last}");
            last = z;
        }
        let mut current: Vec<ZIndex> = registry.iter().map(|w| w.z_index).collect();
        current.sort();
        current.dedup();
        assert_eq!(current.len(), registry.len());
        assert_eq!(registry.max_z(), last);
    }

    #[test]
    fn duplicate_open_keeps_first_geometry() {
        let mut registry = WindowRegistry::new();
        assert!(open(&mut registry, "notes", Rect::from_xywh(10.0, 20.0, 400.0, 300.0)).is_some());
        assert!(open(&mut registry, "notes", Rect::from_xywh(99.0, 99.0, 900.0, 900.0)).is_none());
        assert_eq!(registry.len(), 1);
        let notes = registry.get("notes").unwrap();
        assert_eq!(notes.frame(), Rect::from_xywh(10.0, 20.0, 400.0, 300.0));
        assert_eq!(notes.z_index, ZIndex::new(1));
    }

    #[test]
    fn open_clamps_initial_size_to_minimum() {
        let mut registry = WindowRegistry::new();
        open(&mut registry, "tiny", Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
        assert_eq!(registry.get("tiny").unwrap().size, MIN_SIZE);
    }

    #[test]
    fn maximize_then_restore_is_exact() {
        let mut registry = WindowRegistry::new();
        let frame = Rect::from_xywh(123.25, 77.5, 640.125, 480.75);
        open(&mut registry, "w", frame);

        registry.maximize("w", Size::new(1920.0, 995.0));
        let w = registry.get("w").unwrap();
        assert!(w.maximized);
        assert_eq!(w.frame(), Rect::from_xywh(0.0, 0.0, 1920.0, 995.0));
        assert_eq!(w.saved_position, Some(frame.origin));
        assert_eq!(w.saved_size, Some(frame.size));

        registry.restore("w");
        let w = registry.get("w").unwrap();
        assert!(!w.maximized);
        assert_eq!(w.frame(), frame);
        assert_eq!(w.saved_position, None);
        assert_eq!(w.saved_size, None);
    }

    #[test]
    fn maximize_twice_keeps_original_snapshot() {
        let mut registry = WindowRegistry::new();
        let frame = Rect::from_xywh(50.0, 60.0, 500.0, 400.0);
        open(&mut registry, "w", frame);
        registry.maximize("w", Size::new(1920.0, 995.0));
        registry.maximize("w", Size::new(800.0, 600.0));
        let w = registry.get("w").unwrap();
        assert_eq!(w.size, Size::new(1920.0, 995.0));
        assert_eq!(w.saved_position, Some(frame.origin));
    }

    #[test]
    fn maximize_clamps_degenerate_bounds() {
        let mut registry = WindowRegistry::new();
        open(&mut registry, "w", Rect::from_xywh(0.0, 0.0, 400.0, 300.0));
        registry.maximize("w", Size::new(-50.0, f64::NAN));
        assert_eq!(registry.get("w").unwrap().size, Size::new(0.0, 0.0));
    }

    #[test]
    fn minimize_and_restore_preserve_geometry() {
        let mut registry = WindowRegistry::new();
        let frame = Rect::from_xywh(100.0, 100.0, 320.0, 500.0);
        open(&mut registry, "calc", frame);
        registry.focus("calc");
        registry.minimize("calc");
        assert_eq!(registry.frontmost_visible(), None);
        registry.restore("calc");
        assert_eq!(registry.get("calc").unwrap().frame(), frame);
        assert_eq!(registry.frontmost_visible().map(WindowId::as_str), Some("calc"));
    }

    #[test]
    fn focus_order_determines_frontmost() {
        let mut registry = WindowRegistry::new();
        let frame = Rect::from_xywh(0.0, 0.0, 400.0, 300.0);
        open(&mut registry, "a", frame);
        open(&mut registry, "b", frame);
        registry.focus("a");
        registry.focus("b");
        assert_eq!(registry.frontmost_visible().map(WindowId::as_str), Some("b"));
        registry.focus("a");
        assert_eq!(registry.frontmost_visible().map(WindowId::as_str), Some("a"));
        assert_eq!(
            registry.stacking_order(),
            vec![WindowId::from("b"), WindowId::from("a")]
        );
    }

    #[test]
    fn restore_of_minimized_maximized_window_unmaximizes_it() {
        let mut registry = WindowRegistry::new();
        let frame = Rect::from_xywh(10.0, 30.0, 400.0, 300.0);
        open(&mut registry, "w", frame);
        registry.maximize("w", Size::new(1000.0, 700.0));
        registry.minimize("w");
        registry.restore("w");
        let w = registry.get("w").unwrap();
        assert!(!w.minimized && !w.maximized);
        assert_eq!(w.frame(), frame);
    }

    #[test]
    fn update_clamps_size_and_ignores_non_finite_positions() {
        let mut registry = WindowRegistry::new();
        open(&mut registry, "w", Rect::from_xywh(10.0, 30.0, 400.0, 300.0));
        registry.update(
            "w",
            WindowPatch {
                position: Some(Point::new(f64::NAN, 45.0)),
                size: Some(Size::new(-100.0, 50.0)),
                title: None,
            },
        );
        let w = registry.get("w").unwrap();
        assert_eq!(w.position, Point::new(10.0, 45.0));
        assert_eq!(w.size, Size::new(MIN_WIDTH, MIN_HEIGHT));
    }

    #[test]
    fn operations_on_unknown_ids_are_silent() {
        let mut registry = WindowRegistry::new();
        let events = recorder(&mut registry);
        registry.close("ghost");
        registry.minimize("ghost");
        registry.restore("ghost");
        registry.maximize("ghost", Size::new(100.0, 100.0));
        registry.update("ghost", WindowPatch::position(Point::new(1.0, 1.0)));
        assert_eq!(registry.focus("ghost"), None);
        assert!(events.borrow().is_empty());
        assert_eq!(registry.max_z(), ZIndex::default());
    }

    #[test]
    fn each_effective_mutation_notifies_once() {
        let mut registry = WindowRegistry::new();
        let events = recorder(&mut registry);
        let frame = Rect::from_xywh(0.0, 40.0, 400.0, 300.0);

        open(&mut registry, "a", frame);
        open(&mut registry, "a", frame);
        registry.focus("a");
        registry.minimize("a");
        registry.minimize("a");
        registry.restore("a");
        registry.restore("a");
        registry.maximize("a", Size::new(800.0, 600.0));
        registry.maximize("a", Size::new(800.0, 600.0));
        registry.update("a", WindowPatch::default());
        registry.update("a", WindowPatch::position(Point::ZERO));
        registry.update("a", WindowPatch::position(Point::new(5.0, 5.0)));
        registry.close("a");
        registry.close("a");

        let id = WindowId::from("a");
        assert_eq!(
            *events.borrow(),
            vec![
                RegistryEvent::Opened(id.clone()),
                RegistryEvent::Focused(id.clone(), ZIndex::new(2)),
                RegistryEvent::Minimized(id.clone()),
                RegistryEvent::Restored(id.clone()),
                RegistryEvent::Maximized(id.clone()),
                RegistryEvent::Updated(id.clone()),
                RegistryEvent::Closed(id),
            ]
        );
    }

    #[test]
    fn listeners_see_post_mutation_state_and_can_unsubscribe() {
        let mut registry = WindowRegistry::new();
        let counts = Rc::new(RefCell::new(Vec::new()));
        let sink = counts.clone();
        let sub = registry.subscribe(move |_, records| sink.borrow_mut().push(records.len()));

        let frame = Rect::from_xywh(0.0, 40.0, 400.0, 300.0);
        open(&mut registry, "a", frame);
        open(&mut registry, "b", frame);
        registry.close("a");
        assert!(registry.unsubscribe(sub));
        assert!(!registry.unsubscribe(sub));
        open(&mut registry, "c", frame);

        assert_eq!(*counts.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn debug_stack_lists_front_to_back() {
        let mut registry = WindowRegistry::new();
        let frame = Rect::from_xywh(0.0, 40.0, 400.0, 300.0);
        open(&mut registry, "back", frame);
        open(&mut registry, "front", frame);
        registry.minimize("back");
        let dump = registry.debug_stack();
        let front = dump.find("front").unwrap();
        let back = dump.find("back").unwrap();
        assert!(front < back, "{dump}");
        assert!(dump.contains("minimized"));
    }
}
