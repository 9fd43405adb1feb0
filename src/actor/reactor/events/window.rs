use tracing::{debug, info, warn};

use crate::actor::reactor::Reactor;
use crate::model::OpenRequest;
use crate::model::apps::launch_request;

pub struct WindowEventHandler;

impl WindowEventHandler {
    pub fn handle_open(reactor: &mut Reactor, request: OpenRequest) {
        if reactor.registry.contains(request.id.as_str()) {
            Self::activate(reactor, request.id.as_str());
            return;
        }
        info!(id = %request.id, title = %request.title, "Opening window");
        reactor.registry.open(request);
    }

    /// Opens the catalog entry for `app`, or brings its window forward if it
    /// is already running.
    pub fn handle_launch(reactor: &mut Reactor, app: &str) {
        if reactor.registry.contains(app) {
            Self::activate(reactor, app);
            return;
        }
        let Some(entry) = reactor.config.app(app) else {
            warn!(app, "Launch requested for an unknown app");
            return;
        };
        let request = launch_request(
            entry,
            reactor.layout.viewport(),
            reactor.layout.device_class(),
            reactor.layout.chrome(),
            reactor.layout.snapping(),
        );
        info!(
            id = %request.id,
            class = %reactor.layout.device_class(),
            "Launching app"
        );
        reactor.registry.open(request);
    }

    /// Un-minimizes the window if needed and raises it.
    pub fn activate(reactor: &mut Reactor, id: &str) {
        let Some(record) = reactor.registry.get(id) else {
            debug!(id, "Ignoring activation of unknown window");
            return;
        };
        if record.minimized {
            reactor.registry.restore(id);
        }
        reactor.registry.focus(id);
    }

    pub fn close(reactor: &mut Reactor, id: &str) {
        if reactor.registry.contains(id) {
            info!(id, "Closing window");
        }
        reactor.registry.close(id);
    }

    pub fn minimize(reactor: &mut Reactor, id: &str) { reactor.registry.minimize(id); }

    pub fn restore(reactor: &mut Reactor, id: &str) { reactor.registry.restore(id); }

    /// The zoom button: maximize into the available area, or put back the
    /// geometry from before maximizing.
    pub fn toggle_maximize(reactor: &mut Reactor, id: &str) {
        let Some(record) = reactor.registry.get(id) else {
            return;
        };
        if record.maximized {
            reactor.registry.restore(id);
        } else {
            let bounds = reactor.layout.maximize_bounds();
            reactor.registry.maximize(id, bounds);
        }
    }
}
