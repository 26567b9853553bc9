// crates/dockpanel-core/src/surface.rs
use glam::Vec2;

use crate::units::Dimension;

pub type SurfaceId = u32;

/// Marker toggled on a surface while its panel is hidden.
pub const HIDDEN_MARKER: &str = "hidden";
/// Marker applied to the surface tree root while a panel is full screen;
/// backends are expected to suppress scrolling while it is set.
pub const FULLSCREEN_BODY_MARKER: &str = "fullscreen-body";

/// How a surface is positioned relative to the surface tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Positioning {
    #[default]
    Static,
    Relative,
    Absolute,
}

/// Capability contract required from the rendering collaborator.
///
/// The layout crates drive surfaces exclusively through this trait; the
/// rendering technology behind it stays opaque. Operations on unknown
/// surface ids are expected to be silent no-ops.
pub trait SurfaceBackend {
    /// Create a new detached surface.
    fn create_surface(&mut self) -> SurfaceId;

    /// Attach `child` under `parent` in the surface tree, detaching it from
    /// any previous parent.
    fn attach(&mut self, parent: SurfaceId, child: SurfaceId);

    /// Detach `child` from `parent`. No effect if `child` is not a child of
    /// `parent`.
    fn detach(&mut self, parent: SurfaceId, child: SurfaceId);

    /// Attach a surface at the top level of the surface tree.
    fn attach_to_root(&mut self, id: SurfaceId);

    fn set_width(&mut self, id: SurfaceId, width: Dimension);
    fn set_height(&mut self, id: SurfaceId, height: Dimension);

    /// Set the absolute position of the surface's top-left corner.
    fn set_position(&mut self, id: SurfaceId, position: Vec2);

    fn set_positioning(&mut self, id: SurfaceId, mode: Positioning);
    fn positioning(&self, id: SurfaceId) -> Positioning;

    fn set_stacking_order(&mut self, id: SurfaceId, order: i32);
    fn stacking_order(&self, id: SurfaceId) -> i32;

    /// Toggle a named visual marker on a surface.
    fn set_marker(&mut self, id: SurfaceId, marker: &str, on: bool);

    /// Toggle a named visual marker on the surface tree root.
    fn set_root_marker(&mut self, marker: &str, on: bool);

    /// Set the textual content hosted by a surface.
    fn set_content(&mut self, id: SurfaceId, text: &str);

    /// Set the external identifier of a surface.
    fn set_name(&mut self, id: SurfaceId, name: &str);

    /// Concrete size of a surface after its declared sizes are resolved.
    fn measure(&self, id: SurfaceId) -> Vec2;

    /// Surfaces currently attached at the top level, in attachment order.
    fn root_surfaces(&self) -> Vec<SurfaceId>;

    /// Current viewport size.
    fn viewport_size(&self) -> Vec2;
}
