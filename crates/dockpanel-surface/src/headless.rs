// crates/dockpanel-surface/src/headless.rs
use std::collections::{HashMap, HashSet};

use dockpanel_core::{Dimension, Positioning, SurfaceBackend, SurfaceId};
use glam::Vec2;
use tracing::trace;

#[derive(Debug, Default)]
struct SurfaceState {
    parent: Option<SurfaceId>,
    children: Vec<SurfaceId>,
    width: Dimension,
    height: Dimension,
    position: Option<Vec2>,
    positioning: Positioning,
    stacking_order: Option<i32>,
    markers: HashSet<String>,
    content: Option<String>,
    name: Option<String>,
}

/// In-memory surface backend.
///
/// Surfaces are boxes with declared sizes, a position, a positioning mode,
/// a stacking order and a set of named markers. Measuring resolves declared
/// sizes against the parent's measured size, or against the viewport for
/// top-level surfaces. Used by tests and the demo binary; a real rendering
/// backend implements the same contract.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    surfaces: HashMap<SurfaceId, SurfaceState>,
    root_children: Vec<SurfaceId>,
    root_markers: HashSet<String>,
    viewport: Vec2,
    next_id: SurfaceId,
}

impl HeadlessBackend {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Simulate a viewport change. The host is still responsible for
    /// delivering the resize signal to the runtime.
    pub fn set_viewport_size(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn position(&self, id: SurfaceId) -> Option<Vec2> {
        self.surfaces.get(&id).and_then(|s| s.position)
    }

    pub fn declared_width(&self, id: SurfaceId) -> Option<Dimension> {
        self.surfaces.get(&id).map(|s| s.width)
    }

    pub fn declared_height(&self, id: SurfaceId) -> Option<Dimension> {
        self.surfaces.get(&id).map(|s| s.height)
    }

    pub fn parent_of(&self, id: SurfaceId) -> Option<SurfaceId> {
        self.surfaces.get(&id).and_then(|s| s.parent)
    }

    pub fn children_of(&self, id: SurfaceId) -> Vec<SurfaceId> {
        self.surfaces
            .get(&id)
            .map(|s| s.children.clone())
            .unwrap_or_default()
    }

    pub fn has_marker(&self, id: SurfaceId, marker: &str) -> bool {
        self.surfaces
            .get(&id)
            .is_some_and(|s| s.markers.contains(marker))
    }

    pub fn has_root_marker(&self, marker: &str) -> bool {
        self.root_markers.contains(marker)
    }

    pub fn content(&self, id: SurfaceId) -> Option<&str> {
        self.surfaces.get(&id).and_then(|s| s.content.as_deref())
    }

    pub fn name(&self, id: SurfaceId) -> Option<&str> {
        self.surfaces.get(&id).and_then(|s| s.name.as_deref())
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    fn unlink(&mut self, id: SurfaceId) {
        let old_parent = self.surfaces.get(&id).and_then(|s| s.parent);
        if let Some(parent) = old_parent {
            if let Some(state) = self.surfaces.get_mut(&parent) {
                state.children.retain(|&c| c != id);
            }
        }
        self.root_children.retain(|&c| c != id);
        if let Some(state) = self.surfaces.get_mut(&id) {
            state.parent = None;
        }
    }
}

impl SurfaceBackend for HeadlessBackend {
    fn create_surface(&mut self) -> SurfaceId {
        let id = self.next_id;
        self.next_id += 1;
        self.surfaces.insert(id, SurfaceState::default());
        id
    }

    fn attach(&mut self, parent: SurfaceId, child: SurfaceId) {
        if !self.surfaces.contains_key(&parent) || !self.surfaces.contains_key(&child) {
            return;
        }
        self.unlink(child);
        if let Some(state) = self.surfaces.get_mut(&parent) {
            state.children.push(child);
        }
        if let Some(state) = self.surfaces.get_mut(&child) {
            state.parent = Some(parent);
        }
        trace!("attached surface {child} under {parent}");
    }

    fn detach(&mut self, parent: SurfaceId, child: SurfaceId) {
        let is_child = self
            .surfaces
            .get(&child)
            .is_some_and(|s| s.parent == Some(parent));
        if is_child {
            self.unlink(child);
        }
    }

    fn attach_to_root(&mut self, id: SurfaceId) {
        if !self.surfaces.contains_key(&id) {
            return;
        }
        self.unlink(id);
        self.root_children.push(id);
    }

    fn set_width(&mut self, id: SurfaceId, width: Dimension) {
        if let Some(state) = self.surfaces.get_mut(&id) {
            state.width = width;
        }
    }

    fn set_height(&mut self, id: SurfaceId, height: Dimension) {
        if let Some(state) = self.surfaces.get_mut(&id) {
            state.height = height;
        }
    }

    fn set_position(&mut self, id: SurfaceId, position: Vec2) {
        if let Some(state) = self.surfaces.get_mut(&id) {
            state.position = Some(position);
        }
    }

    fn set_positioning(&mut self, id: SurfaceId, mode: Positioning) {
        if let Some(state) = self.surfaces.get_mut(&id) {
            state.positioning = mode;
        }
    }

    fn positioning(&self, id: SurfaceId) -> Positioning {
        self.surfaces
            .get(&id)
            .map(|s| s.positioning)
            .unwrap_or_default()
    }

    fn set_stacking_order(&mut self, id: SurfaceId, order: i32) {
        if let Some(state) = self.surfaces.get_mut(&id) {
            state.stacking_order = Some(order);
        }
    }

    fn stacking_order(&self, id: SurfaceId) -> i32 {
        // Surfaces with no explicit stacking order report 1.
        self.surfaces
            .get(&id)
            .and_then(|s| s.stacking_order)
            .unwrap_or(1)
    }

    fn set_marker(&mut self, id: SurfaceId, marker: &str, on: bool) {
        if let Some(state) = self.surfaces.get_mut(&id) {
            if on {
                state.markers.insert(marker.to_string());
            } else {
                state.markers.remove(marker);
            }
        }
    }

    fn set_root_marker(&mut self, marker: &str, on: bool) {
        if on {
            self.root_markers.insert(marker.to_string());
        } else {
            self.root_markers.remove(marker);
        }
    }

    fn set_content(&mut self, id: SurfaceId, text: &str) {
        if let Some(state) = self.surfaces.get_mut(&id) {
            state.content = Some(text.to_string());
        }
    }

    fn set_name(&mut self, id: SurfaceId, name: &str) {
        if let Some(state) = self.surfaces.get_mut(&id) {
            state.name = Some(name.to_string());
        }
    }

    fn measure(&self, id: SurfaceId) -> Vec2 {
        let Some(state) = self.surfaces.get(&id) else {
            return Vec2::ZERO;
        };
        let container = match state.parent {
            Some(parent) => self.measure(parent),
            None => self.viewport,
        };
        Vec2::new(
            state.width.to_pixels(container.x),
            state.height.to_pixels(container.y),
        )
    }

    fn root_surfaces(&self) -> Vec<SurfaceId> {
        self.root_children.clone()
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }
}
