// crates/dockpanel-core/src/panel.rs
use std::collections::HashMap;

use serde::Deserialize;
use tracing::trace;

use crate::surface::{SurfaceBackend, SurfaceId};
use crate::units::Dimension;
use crate::{PanelError, Result};

pub type PanelId = u32;

/// Which edge of the remaining container rectangle a panel is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dock {
    Top,
    Bottom,
    Left,
    Right,
    /// Undocked: the panel consumes no space and is not positioned.
    #[default]
    None,
}

/// Declarative panel settings, the primary external API surface.
///
/// All fields are optional: width and height default to "100%", `hidden` to
/// false and `dock` to none.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Textual content for the panel's content region. The content region
    /// occupies whatever rectangle is left after docked children are placed.
    pub content: Option<String>,
    /// External identifier applied to the panel's surface.
    pub id: Option<String>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub hidden: bool,
    /// Extra visual marker applied to the panel's surface.
    pub cls: Option<String>,
    pub dock: Dock,
    pub children: Vec<PanelConfig>,
}

impl PanelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dock(mut self, dock: Dock) -> Self {
        self.dock = dock;
        self
    }

    pub fn width(mut self, width: Dimension) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: Dimension) -> Self {
        self.height = Some(height);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn content(mut self, text: &str) -> Self {
        self.content = Some(text.to_string());
        self
    }

    pub fn named(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn child(mut self, child: PanelConfig) -> Self {
        self.children.push(child);
        self
    }
}

/// A positioned box in the panel tree.
///
/// Layout inputs (`width`, `height`, `dock`, `hidden`) are plain fields and
/// may be mutated directly between updates.
#[derive(Debug, Clone)]
pub struct Panel {
    pub name: Option<String>,
    /// Non-owning back reference; `None` for a root.
    pub parent: Option<PanelId>,
    /// Ordered: earlier children claim space from the remaining rectangle
    /// first.
    pub children: Vec<PanelId>,
    pub dock: Dock,
    pub width: Dimension,
    pub height: Dimension,
    pub hidden: bool,
    /// Rendering handle exclusively owned by this panel.
    pub surface: SurfaceId,
    /// Optional content-region surface, at most one per panel.
    pub content: Option<SurfaceId>,
}

/// Arena owning every panel. Parents own their children through id lists;
/// parent links are back references only, so the tree cannot form ownership
/// cycles.
#[derive(Debug, Default)]
pub struct PanelTree {
    panels: HashMap<PanelId, Panel>,
    next_id: PanelId,
}

impl PanelTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(&id)
    }

    pub fn get_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.panels.get_mut(&id)
    }

    pub fn contains(&self, id: PanelId) -> bool {
        self.panels.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Construct a panel (and, recursively, its configured children) from
    /// settings, creating its surfaces on the backend.
    pub fn insert(&mut self, config: PanelConfig, backend: &mut dyn SurfaceBackend) -> PanelId {
        let surface = backend.create_surface();

        let content = config.content.map(|text| {
            let holder = backend.create_surface();
            backend.attach(surface, holder);
            backend.set_content(holder, &text);
            holder
        });

        if let Some(name) = &config.id {
            backend.set_name(surface, name);
        }
        if let Some(cls) = &config.cls {
            backend.set_marker(surface, cls, true);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.panels.insert(
            id,
            Panel {
                name: config.id,
                parent: None,
                children: Vec::new(),
                dock: config.dock,
                width: config.width.unwrap_or_default(),
                height: config.height.unwrap_or_default(),
                hidden: config.hidden,
                surface,
                content,
            },
        );

        for child_config in config.children {
            let child = self.insert(child_config, backend);
            self.attach_child(id, child, backend);
        }

        id
    }

    /// Append `child` to `parent`'s children, detaching it from any current
    /// parent first. A panel has exactly one parent at a time; re-parenting
    /// is implicit, never silent duplication.
    ///
    /// Fails with [`PanelError::WouldCycle`] when `child` is `parent` itself
    /// or one of its ancestors; nothing is detached on failure.
    pub fn add_child(
        &mut self,
        parent: PanelId,
        child: PanelId,
        backend: &mut dyn SurfaceBackend,
    ) -> Result<()> {
        if !self.panels.contains_key(&parent) {
            return Err(PanelError::UnknownPanel(parent));
        }
        if !self.panels.contains_key(&child) {
            return Err(PanelError::UnknownPanel(child));
        }
        // A panel on its own ancestor path would leave the parent links
        // circular and `root_of` non-terminating.
        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == child {
                return Err(PanelError::WouldCycle { parent, child });
            }
            ancestor = self.panels.get(&current).and_then(|p| p.parent);
        }
        self.attach_child(parent, child, backend);
        Ok(())
    }

    /// Remove `child` from `parent`'s children and detach its surface.
    /// Removing a panel that is not a child of `parent` leaves state
    /// unchanged.
    pub fn remove_child(
        &mut self,
        parent: PanelId,
        child: PanelId,
        backend: &mut dyn SurfaceBackend,
    ) -> Result<()> {
        if !self.panels.contains_key(&parent) {
            return Err(PanelError::UnknownPanel(parent));
        }
        if !self.panels.contains_key(&child) {
            return Err(PanelError::UnknownPanel(child));
        }
        self.detach_child(parent, child, backend);
        Ok(())
    }

    /// Walk parent links from `id` to the root of its tree.
    pub fn root_of(&self, id: PanelId) -> PanelId {
        let mut current = id;
        while let Some(parent) = self.panels.get(&current).and_then(|p| p.parent) {
            current = parent;
        }
        current
    }

    fn attach_child(&mut self, parent: PanelId, child: PanelId, backend: &mut dyn SurfaceBackend) {
        let old_parent = self.panels.get(&child).and_then(|p| p.parent);
        if let Some(old) = old_parent {
            self.detach_child(old, child, backend);
        }

        let Some(child_surface) = self.panels.get(&child).map(|p| p.surface) else {
            return;
        };
        let Some(parent_panel) = self.panels.get_mut(&parent) else {
            return;
        };
        parent_panel.children.push(child);
        let parent_surface = parent_panel.surface;
        backend.attach(parent_surface, child_surface);

        if let Some(child_panel) = self.panels.get_mut(&child) {
            child_panel.parent = Some(parent);
        }
        trace!("panel {child} attached under {parent}");
    }

    fn detach_child(&mut self, parent: PanelId, child: PanelId, backend: &mut dyn SurfaceBackend) {
        let Some(index) = self
            .panels
            .get(&parent)
            .and_then(|p| p.children.iter().position(|&c| c == child))
        else {
            return;
        };

        let parent_surface = match self.panels.get_mut(&parent) {
            Some(p) => {
                p.children.remove(index);
                p.surface
            }
            None => return,
        };

        if let Some(child_panel) = self.panels.get_mut(&child) {
            backend.detach(parent_surface, child_panel.surface);
            child_panel.parent = None;
        }
        trace!("panel {child} detached from {parent}");
    }
}
