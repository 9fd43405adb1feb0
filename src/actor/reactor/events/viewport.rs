use std::time::Duration;

use tracing::{debug, info, trace};

use crate::actor::reactor::{DragState, Reactor};
use crate::layout_engine::Viewport;
use crate::model::{WindowId, WindowPatch};

pub struct ViewportEventHandler;

impl ViewportEventHandler {
    /// The device class (and with it which gestures are allowed) switches
    /// immediately. Window geometry is only reconciled once the viewport has
    /// stopped changing.
    pub fn handle_viewport_changed(reactor: &mut Reactor, viewport: Viewport, at: Duration) {
        let previous = reactor.layout.set_viewport(viewport);
        trace!(?viewport, ?previous, "Viewport changed");

        let class = reactor.layout.device_class();
        let allowed = match &reactor.drag_manager.drag_state {
            DragState::Idle => true,
            DragState::Dragging(_) => class.allows_drag(),
            DragState::Resizing(_) => class.allows_resize(),
        };
        if !allowed {
            debug!(%class, "Gesture no longer allowed on this device class, ending it");
            reactor.drag_manager.reset();
        }

        let delay = reactor.config.responsive.settle_delay();
        if delay.is_zero() {
            Self::settle(reactor);
        } else {
            reactor.viewport_manager.arm(at, delay);
        }
    }

    pub fn handle_tick(reactor: &mut Reactor, at: Duration) {
        if reactor.viewport_manager.is_due(at) {
            Self::settle(reactor);
        }
    }

    /// Fits every window to the settled viewport: maximized windows take the
    /// new available area, compact viewports force everything full-bleed, and
    /// on larger viewports windows hanging off the edge are pulled back.
    pub fn settle(reactor: &mut Reactor) {
        reactor.viewport_manager.clear();
        let bounds = reactor.layout.maximize_bounds();
        info!(
            viewport = ?reactor.layout.viewport(),
            class = %reactor.layout.device_class(),
            "Viewport settled"
        );

        let maximized: Vec<WindowId> =
            reactor.registry.iter().filter(|w| w.maximized).map(|w| w.id.clone()).collect();
        for id in maximized {
            reactor.registry.update(
                id.as_str(),
                WindowPatch {
                    size: Some(bounds),
                    ..Default::default()
                },
            );
        }

        if reactor.layout.device_class().forces_fullscreen() {
            Self::force_fullscreen(reactor);
            return;
        }

        let moves: Vec<(WindowId, WindowPatch)> = reactor
            .registry
            .iter()
            .filter(|w| w.is_visible() && !w.maximized)
            .filter_map(|w| {
                let origin = reactor.layout.reconcile(w.frame())?;
                Some((w.id.clone(), WindowPatch::position(origin)))
            })
            .collect();
        for (id, patch) in moves {
            debug!(%id, ?patch.position, "Pulling window back on screen");
            reactor.registry.update(id.as_str(), patch);
        }
    }

    /// Maximizes every window that is not already, so its own geometry is
    /// kept for when the viewport grows again.
    pub fn force_fullscreen(reactor: &mut Reactor) {
        let bounds = reactor.layout.maximize_bounds();
        let pending: Vec<WindowId> =
            reactor.registry.iter().filter(|w| !w.maximized).map(|w| w.id.clone()).collect();
        for id in pending {
            debug!(%id, "Forcing window full-bleed");
            reactor.registry.maximize(id.as_str(), bounds);
        }
    }
}
