use tracing::{debug, info};

use super::window::WindowEventHandler;
use crate::actor::reactor::{Command, Reactor};
use crate::model::WindowId;
use crate::model::apps::cascade_request;

pub struct CommandEventHandler;

impl CommandEventHandler {
    pub fn handle_command(reactor: &mut Reactor, command: Command) {
        match command {
            Command::Close(id) => WindowEventHandler::close(reactor, id.as_str()),
            Command::Minimize(id) => WindowEventHandler::minimize(reactor, id.as_str()),
            Command::ToggleMaximize(id) => WindowEventHandler::toggle_maximize(reactor, id.as_str()),
            Command::Focus(id) => WindowEventHandler::activate(reactor, id.as_str()),
            Command::Restore(id) => WindowEventHandler::restore(reactor, id.as_str()),
            Command::CloseFrontmost => {
                if let Some(id) = Self::frontmost(reactor) {
                    WindowEventHandler::close(reactor, id.as_str());
                }
            }
            Command::MinimizeFrontmost => {
                if let Some(id) = Self::frontmost(reactor) {
                    WindowEventHandler::minimize(reactor, id.as_str());
                }
            }
            Command::ZoomFrontmost => {
                if let Some(id) = Self::frontmost(reactor) {
                    WindowEventHandler::toggle_maximize(reactor, id.as_str());
                }
            }
            Command::BringAllToFront => {
                // back to front, so the windows keep their relative order
                for id in reactor.registry.stacking_order() {
                    reactor.registry.focus(id.as_str());
                }
            }
            Command::CloseAll => {
                let ids: Vec<WindowId> = reactor.registry.iter().map(|w| w.id.clone()).collect();
                info!(count = ids.len(), "Closing all windows");
                for id in ids {
                    reactor.registry.close(id.as_str());
                }
            }
            Command::NewWindow { app, title } => Self::new_window(reactor, &app, title),
        }
    }

    fn frontmost(reactor: &Reactor) -> Option<WindowId> {
        let id = reactor.registry.frontmost_visible().cloned();
        if id.is_none() {
            debug!("No frontmost window");
        }
        id
    }

    /// Opens another window for `app`, cascaded from the frontmost window.
    fn new_window(reactor: &mut Reactor, app: &str, title: Option<String>) {
        let title = title.unwrap_or_else(|| {
            let name = reactor.config.app(app).map_or(app, |entry| entry.title.as_str());
            format!("{name} - New Window")
        });
        let id = reactor.next_window_id(app);
        let request = cascade_request(
            id,
            title,
            reactor.registry.frontmost_record(),
            reactor.config.interaction.cascade_offset,
        );
        info!(id = %request.id, "Opening new window");
        reactor.registry.open(request);
    }
}
