use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::{Command, Event, PointerEvent, Reactor, WindowContent, WindowPart};
use crate::common::config::Config;
use crate::layout_engine::{ResizeHandle, Viewport};
use crate::model::{OpenRequest, WindowId, WindowRecord};
use crate::sys::geometry::{Point, Rect};

pub fn desktop() -> Reactor { reactor_with(Config::default(), 1920.0, 1080.0) }

pub fn tablet() -> Reactor { reactor_with(Config::default(), 800.0, 1000.0) }

pub fn phone() -> Reactor { reactor_with(Config::default(), 390.0, 844.0) }

pub fn reactor_with(config: Config, width: f64, height: f64) -> Reactor {
    Reactor::new(config, Viewport::new(width, height, false))
}

pub fn open(reactor: &mut Reactor, id: &str, frame: Rect) {
    reactor.handle_event(Event::Open(OpenRequest::new(id, id.to_uppercase(), frame)));
}

pub fn down(window: &str, part: WindowPart, x: f64, y: f64) -> Event {
    Event::Pointer(PointerEvent::Down {
        window: WindowId::from(window),
        part,
        at: Point::new(x, y),
    })
}

pub fn move_to(x: f64, y: f64) -> Event { Event::Pointer(PointerEvent::Move { at: Point::new(x, y) }) }

pub fn up(x: f64, y: f64) -> Event { Event::Pointer(PointerEvent::Up { at: Point::new(x, y) }) }

pub fn command(command: Command) -> Event { Event::Command(command) }

pub fn viewport(width: f64, height: f64, ms: u64) -> Event {
    Event::ViewportChanged {
        viewport: Viewport::new(width, height, false),
        at: Duration::from_millis(ms),
    }
}

pub fn tick(ms: u64) -> Event { Event::Tick(Duration::from_millis(ms)) }

/// Title-bar drag from `from` to `to`, with one intermediate move.
pub fn drag(reactor: &mut Reactor, id: &str, from: Point, to: Point) {
    let mid = Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
    reactor.handle_events([
        down(id, WindowPart::TitleBar, from.x, from.y),
        move_to(mid.x, mid.y),
        move_to(to.x, to.y),
        up(to.x, to.y),
    ]);
}

pub fn resize(reactor: &mut Reactor, id: &str, handle: ResizeHandle, from: Point, to: Point) {
    reactor.handle_events([
        down(id, WindowPart::ResizeHandle(handle), from.x, from.y),
        move_to(to.x, to.y),
        up(to.x, to.y),
    ]);
}

pub fn window<'a>(reactor: &'a Reactor, id: &str) -> &'a WindowRecord {
    reactor.registry().get(id).unwrap_or_else(|| panic!("window {id} is not open"))
}

pub fn frame(reactor: &Reactor, id: &str) -> Rect { window(reactor, id).frame() }

pub fn frontmost(reactor: &Reactor) -> Option<&str> {
    reactor.registry().frontmost_visible().map(WindowId::as_str)
}

/// Content that records every frame it is told about.
#[derive(Clone, Default)]
pub struct FrameLog(pub Rc<RefCell<Vec<Rect>>>);

impl FrameLog {
    pub fn frames(&self) -> Vec<Rect> { self.0.borrow().clone() }
}

impl WindowContent for FrameLog {
    fn frame_changed(&mut self, frame: Rect) { self.0.borrow_mut().push(frame); }
}
