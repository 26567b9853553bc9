// crates/dockpanel-runtime/src/lib.rs

use dockpanel_core::{
    Dimension, PanelConfig, PanelError, PanelId, PanelTree, Positioning, SurfaceBackend,
    SurfaceId, FULLSCREEN_BODY_MARKER,
};
use dockpanel_layout::DockLayoutEngine;
use glam::Vec2;
use tracing::info;

pub mod event_bus;

pub use event_bus::*;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Not subscribed: {0}")]
    NotSubscribed(String),

    #[error(transparent)]
    Panel(#[from] PanelError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Event type published whenever the host reports a viewport size change.
pub const VIEWPORT_RESIZE_EVENT: &str = "viewport.resize";

struct FullscreenState {
    panel: PanelId,
    container: SurfaceId,
}

/// Application wiring: owns the panel tree, the surface backend, the layout
/// engine and the event bus, and routes external signals between them.
///
/// Single-threaded and synchronous throughout; every layout recomputation
/// happens inside the call that triggered it.
pub struct DockRuntime<B: SurfaceBackend> {
    tree: PanelTree,
    backend: B,
    bus: EventBus,
    engine: DockLayoutEngine,
    fullscreen: Option<FullscreenState>,
}

impl<B: SurfaceBackend> DockRuntime<B> {
    pub fn new(backend: B) -> Self {
        Self {
            tree: PanelTree::new(),
            backend,
            bus: EventBus::new(),
            engine: DockLayoutEngine::new(),
            fullscreen: None,
        }
    }

    pub fn tree(&self) -> &PanelTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut PanelTree {
        &mut self.tree
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn insert(&mut self, config: PanelConfig) -> PanelId {
        self.tree.insert(config, &mut self.backend)
    }

    pub fn add_child(&mut self, parent: PanelId, child: PanelId) -> Result<()> {
        self.tree.add_child(parent, child, &mut self.backend)?;
        Ok(())
    }

    pub fn remove_child(&mut self, parent: PanelId, child: PanelId) -> Result<()> {
        self.tree.remove_child(parent, child, &mut self.backend)?;
        Ok(())
    }

    /// Recompute layout for the tree containing `id`.
    pub fn update(&mut self, id: PanelId) {
        self.engine.update(&self.tree, &mut self.backend, id);
    }

    /// Promote a parentless panel to a full-viewport overlay.
    ///
    /// Creates a viewport-sized container above every other top-level
    /// absolutely-positioned surface, moves the panel's surface into it,
    /// marks the surface tree root as non-scrolling, and keeps the panel
    /// sized to the viewport on every subsequent resize signal. There is no
    /// way to undo this: the wiring lives as long as the runtime.
    pub fn make_fullscreen(&mut self, id: PanelId) -> Result<()> {
        let panel = self
            .tree
            .get(id)
            .ok_or(PanelError::UnknownPanel(id))?;
        if panel.parent.is_some() {
            return Err(RuntimeError::InvalidOperation(format!(
                "panel {id} still has a parent; detach it before making it full screen"
            )));
        }
        let surface = panel.surface;

        let max_order = self
            .backend
            .root_surfaces()
            .into_iter()
            .filter(|&s| self.backend.positioning(s) == Positioning::Absolute)
            .map(|s| self.backend.stacking_order(s))
            .max()
            .unwrap_or(1);

        let container = self.backend.create_surface();
        self.backend.set_positioning(container, Positioning::Absolute);
        self.backend.set_position(container, Vec2::ZERO);
        self.backend.set_stacking_order(container, max_order + 1);
        self.backend.attach_to_root(container);
        self.backend.attach(container, surface);
        self.backend.set_root_marker(FULLSCREEN_BODY_MARKER, true);

        info!("panel {id} is now full screen at stacking order {}", max_order + 1);
        self.fullscreen = Some(FullscreenState {
            panel: id,
            container,
        });
        self.apply_viewport_size();
        Ok(())
    }

    /// External-signal entry point for viewport size changes.
    ///
    /// Publishes [`VIEWPORT_RESIZE_EVENT`] on the bus with the measured
    /// viewport, then re-applies the viewport size to any full-screen panel
    /// and re-runs its layout.
    pub fn notify_viewport_resized(&mut self) {
        let size = self.backend.viewport_size();
        self.bus.publish(
            VIEWPORT_RESIZE_EVENT,
            &EventData::Resize {
                width: size.x,
                height: size.y,
            },
        );
        self.apply_viewport_size();
    }

    fn apply_viewport_size(&mut self) {
        let Some(state) = &self.fullscreen else {
            return;
        };
        let (panel_id, container) = (state.panel, state.container);

        let size = self.backend.viewport_size();
        self.backend.set_width(container, Dimension::Pixels(size.x));
        self.backend.set_height(container, Dimension::Pixels(size.y));
        if let Some(panel) = self.tree.get_mut(panel_id) {
            panel.width = Dimension::Pixels(size.x);
            panel.height = Dimension::Pixels(size.y);
        }
        self.update(panel_id);
    }
}
