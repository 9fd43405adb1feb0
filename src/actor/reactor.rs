//! The Reactor's job is to keep the window registry coherent with the input
//! the shell receives.
//!
//! It takes raw events (pointer, keyboard, viewport, launch and menu
//! commands), asks the layout engine what they mean geometrically, and
//! commits the result through registry mutations. Subscribers to the
//! registry (the menu bar, the dock and anything else that registers) hear
//! about every committed change.

mod events;
mod managers;
mod mount;
mod query;

#[cfg(test)]
mod testing;


use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

use events::command::CommandEventHandler;
use events::drag::DragEventHandler;
use events::viewport::ViewportEventHandler;
use events::window::WindowEventHandler;
pub use managers::{DragSession, DragState, ResizeSession};
use managers::{DragManager, MountManager, ViewportManager};
pub use mount::WindowContent;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use strum::Display;
use tracing::{debug, instrument};

use crate::actor::dock::Dock;
use crate::actor::menu_bar::MenuBar;
use crate::common::config::Config;
use crate::layout_engine::{LayoutEngine, ResizeHandle, Viewport};
use crate::model::{
    OpenRequest, RegistryEvent, SubscriptionId, WindowId, WindowRecord, WindowRegistry,
};
use crate::sys::geometry::Point;

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Event {
    /// The viewport was resized. `at` is the time since the session started;
    /// geometry is reconciled once the viewport has been stable for the
    /// configured settle delay.
    ViewportChanged {
        viewport: Viewport,
        #[serde_as(as = "DurationMilliSeconds<u64>")]
        at: Duration,
    },

    /// Time has passed. Drives the viewport settle deadline.
    Tick(#[serde_as(as = "DurationMilliSeconds<u64>")] Duration),

    /// Open a window with caller-chosen geometry, or bring it forward if it
    /// is already open.
    Open(OpenRequest),

    /// Open the catalog app with this id, placed for the current device class.
    Launch(String),

    Pointer(PointerEvent),
    Key(Key),
    Command(Command),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Down {
        window: WindowId,
        part: WindowPart,
        at: Point,
    },
    Move {
        at: Point,
    },
    Up {
        at: Point,
    },
}

/// The piece of window chrome a pointer went down on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum WindowPart {
    TitleBar,
    Content,
    ResizeHandle(ResizeHandle),
    CloseButton,
    MinimizeButton,
    ZoomButton,
    /// The single dismiss control shown on compact viewports.
    DoneButton,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Command {
    Close(WindowId),
    Minimize(WindowId),
    ToggleMaximize(WindowId),
    /// Bring a window forward, un-minimizing it first if needed.
    Focus(WindowId),
    Restore(WindowId),
    CloseFrontmost,
    MinimizeFrontmost,
    ZoomFrontmost,
    BringAllToFront,
    CloseAll,
    NewWindow { app: String, title: Option<String> },
}

pub struct Reactor {
    config: Config,
    registry: WindowRegistry,
    layout: LayoutEngine,
    drag_manager: DragManager,
    viewport_manager: ViewportManager,
    mount_manager: MountManager,
    menu_bar: Rc<RefCell<MenuBar>>,
    dock: Rc<RefCell<Dock>>,
    new_window_count: u64,
}

impl Reactor {
    pub fn new(config: Config, viewport: Viewport) -> Self {
        let mut registry = WindowRegistry::new();

        let menu_bar = Rc::new(RefCell::new(MenuBar::new(&config.menu_bar)));
        let sink = Rc::clone(&menu_bar);
        registry.subscribe(move |event, records| sink.borrow_mut().on_registry_event(event, records));

        let dock = Rc::new(RefCell::new(Dock::new()));
        let sink = Rc::clone(&dock);
        registry.subscribe(move |event, records| sink.borrow_mut().on_registry_event(event, records));

        Reactor {
            layout: LayoutEngine::new(&config, viewport),
            config,
            registry,
            drag_manager: DragManager::default(),
            viewport_manager: ViewportManager::default(),
            mount_manager: MountManager::default(),
            menu_bar,
            dock,
            new_window_count: 0,
        }
    }

    pub fn handle_events(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.handle_event(event);
        }
    }

    #[instrument(name = "reactor::handle_event", skip(self))]
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::ViewportChanged { viewport, at } => {
                ViewportEventHandler::handle_viewport_changed(self, viewport, at)
            }
            Event::Tick(at) => ViewportEventHandler::handle_tick(self, at),
            Event::Open(request) => WindowEventHandler::handle_open(self, request),
            Event::Launch(app) => WindowEventHandler::handle_launch(self, &app),
            Event::Pointer(PointerEvent::Down { window, part, at }) => {
                DragEventHandler::handle_pointer_down(self, &window, part, at)
            }
            Event::Pointer(PointerEvent::Move { at }) => {
                DragEventHandler::handle_pointer_move(self, at)
            }
            Event::Pointer(PointerEvent::Up { at }) => DragEventHandler::handle_pointer_up(self, at),
            Event::Key(Key::Escape) => DragEventHandler::handle_escape(self),
            Event::Command(command) => CommandEventHandler::handle_command(self, command),
        }
        self.finalize_event_processing();
    }

    /// Runs any pending viewport reconciliation now instead of waiting for
    /// the settle deadline.
    pub fn flush_viewport(&mut self) {
        if self.viewport_manager.is_pending() {
            ViewportEventHandler::settle(self);
            self.finalize_event_processing();
        }
    }

    pub fn update_config(&mut self, config: Config) {
        self.layout.update_settings(&config);
        self.menu_bar.borrow_mut().handle_config_updated(&config.menu_bar);
        self.config = config;
    }

    /// Attaches content to an open window. The content is told its frame
    /// right away and after every geometry change, and is dropped when the
    /// window closes. Content for a window that is not open is handed back.
    pub fn mount(
        &mut self,
        id: &str,
        content: Box<dyn WindowContent>,
    ) -> Result<(), Box<dyn WindowContent>> {
        self.mount_manager.mount(&self.registry, id, content)
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&RegistryEvent, &[WindowRecord]) + 'static,
    ) -> SubscriptionId {
        self.registry.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool { self.registry.unsubscribe(id) }

    pub fn windows(&self) -> &[WindowRecord] { self.registry.records() }

    pub fn registry(&self) -> &WindowRegistry { &self.registry }

    pub fn layout(&self) -> &LayoutEngine { &self.layout }

    pub fn config(&self) -> &Config { &self.config }

    pub fn drag_state(&self) -> &DragState { &self.drag_manager.drag_state }

    /// When the pending viewport change will be reconciled, if one is pending.
    pub fn settle_deadline(&self) -> Option<Duration> { self.viewport_manager.deadline() }

    pub fn is_mounted(&self, id: &str) -> bool { self.mount_manager.is_mounted(id) }

    pub fn menu_bar(&self) -> Ref<'_, MenuBar> { self.menu_bar.borrow() }

    pub fn dock(&self) -> Ref<'_, Dock> { self.dock.borrow() }

    fn finalize_event_processing(&mut self) {
        if let Some(window) = self.drag_manager.window()
            && !self
                .registry
                .get(window.as_str())
                .is_some_and(|w| w.is_visible() && !w.maximized)
        {
            debug!(%window, "Gesture target closed, minimized or maximized, ending gesture");
            self.drag_manager.reset();
        }

        if self.layout.device_class().forces_fullscreen() && !self.viewport_manager.is_pending() {
            ViewportEventHandler::force_fullscreen(self);
        }

        self.mount_manager.sync(&self.registry);
    }

    fn next_window_id(&mut self, app: &str) -> WindowId {
        loop {
            self.new_window_count += 1;
            let id = WindowId::new(format!("{app}-{}", self.new_window_count));
            if !self.registry.contains(id.as_str()) {
                return id;
            }
        }
    }
}
