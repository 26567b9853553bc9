// crates/dockpanel-layout/src/lib.rs

use dockpanel_core::{
    Dimension, Dock, PanelId, PanelTree, Positioning, SurfaceBackend, HIDDEN_MARKER,
};
use glam::Vec2;
use tracing::debug;

/// Recursive dock-partitioning layout over a panel tree.
///
/// Children claim space from the remaining container rectangle in order,
/// each pinned to the edge named by its dock side; the optional content
/// region receives whatever rectangle is left. All writes go through the
/// surface backend; the tree itself is not mutated, so a layout pass can be
/// repeated any number of times.
#[derive(Debug, Default)]
pub struct DockLayoutEngine {
    debug: bool,
}

impl DockLayoutEngine {
    pub fn new() -> Self {
        Self { debug: false }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Recompute the tree containing `id`.
    ///
    /// Walks up to the root, mirrors the root's hidden flag onto its
    /// surface, applies the root's declared size and measures the concrete
    /// result, then partitions that box among the children. A hidden root
    /// short-circuits the whole pass.
    pub fn update(&self, tree: &PanelTree, backend: &mut dyn SurfaceBackend, id: PanelId) {
        let root_id = tree.root_of(id);
        let Some(root) = tree.get(root_id) else {
            return;
        };

        backend.set_marker(root.surface, HIDDEN_MARKER, root.hidden);
        if root.hidden {
            return;
        }

        backend.set_width(root.surface, root.width);
        backend.set_height(root.surface, root.height);
        backend.set_positioning(root.surface, Positioning::Relative);

        let size = backend.measure(root.surface);
        if self.debug {
            debug!("layout pass: root panel {root_id} measured {size:?}");
        }
        self.resize_all_children(tree, backend, root_id, size);
    }

    /// Partition `container` among the children of `id` and recurse.
    pub fn resize_all_children(
        &self,
        tree: &PanelTree,
        backend: &mut dyn SurfaceBackend,
        id: PanelId,
        container: Vec2,
    ) {
        let Some(panel) = tree.get(id) else {
            return;
        };

        let mut current_left = 0.0_f32;
        let mut current_top = 0.0_f32;
        let mut remaining_width = container.x;
        let mut remaining_height = container.y;

        for &child_id in &panel.children {
            let Some(child) = tree.get(child_id) else {
                continue;
            };

            backend.set_marker(child.surface, HIDDEN_MARKER, child.hidden);
            backend.set_positioning(child.surface, Positioning::Absolute);
            if child.hidden {
                continue;
            }

            // Percentages resolve against the container passed into this
            // call, not against the shrinking remainder.
            let child_width = child.width.to_pixels(container.x);
            let child_height = child.height.to_pixels(container.y);

            let child_size = match child.dock {
                Dock::Top => {
                    backend.set_position(child.surface, Vec2::new(current_left, current_top));
                    backend.set_width(child.surface, Dimension::Pixels(remaining_width));
                    backend.set_height(child.surface, Dimension::Pixels(child_height));
                    let size = Vec2::new(remaining_width, child_height);
                    current_top += child_height;
                    remaining_height -= child_height;
                    size
                }
                Dock::Bottom => {
                    backend.set_position(
                        child.surface,
                        Vec2::new(current_left, remaining_height + current_top - child_height),
                    );
                    backend.set_width(child.surface, Dimension::Pixels(remaining_width));
                    backend.set_height(child.surface, Dimension::Pixels(child_height));
                    remaining_height -= child_height;
                    Vec2::new(remaining_width, child_height)
                }
                Dock::Left => {
                    backend.set_position(child.surface, Vec2::new(current_left, current_top));
                    backend.set_width(child.surface, Dimension::Pixels(child_width));
                    backend.set_height(child.surface, Dimension::Pixels(remaining_height));
                    let size = Vec2::new(child_width, remaining_height);
                    current_left += child_width;
                    remaining_width -= child_width;
                    size
                }
                Dock::Right => {
                    backend.set_position(
                        child.surface,
                        Vec2::new(remaining_width + current_left - child_width, current_top),
                    );
                    backend.set_width(child.surface, Dimension::Pixels(child_width));
                    backend.set_height(child.surface, Dimension::Pixels(remaining_height));
                    remaining_width -= child_width;
                    Vec2::new(child_width, remaining_height)
                }
                Dock::None => {
                    // Undocked children keep their declared sizes, are not
                    // positioned and consume no space from siblings.
                    backend.set_width(child.surface, child.width);
                    backend.set_height(child.surface, child.height);
                    backend.measure(child.surface)
                }
            };

            if self.debug {
                debug!(
                    "placed panel {child_id} (dock {:?}) size {child_size:?}, remaining {remaining_width}x{remaining_height}",
                    child.dock
                );
            }
            self.resize_all_children(tree, backend, child_id, child_size);
        }

        if let Some(content) = panel.content {
            backend.set_positioning(content, Positioning::Absolute);
            backend.set_position(content, Vec2::new(current_left, current_top));
            backend.set_width(content, Dimension::Pixels(remaining_width));
            backend.set_height(content, Dimension::Pixels(remaining_height));
        }
    }
}

#[cfg(test)]
mod tests {
    use dockpanel_core::PanelConfig;
    use dockpanel_surface::HeadlessBackend;

    use super::*;

    fn measure(backend: &HeadlessBackend, surface: dockpanel_core::SurfaceId) -> Vec2 {
        backend.measure(surface)
    }

    #[test]
    fn test_single_top_child_with_percent_height() {
        // Container 1000x500, one top child at 40% height.
        let mut backend = HeadlessBackend::new(Vec2::new(1000.0, 500.0));
        let mut tree = PanelTree::new();
        let root = tree.insert(
            PanelConfig::new().child(
                PanelConfig::new()
                    .dock(Dock::Top)
                    .height(Dimension::Percent(40.0)),
            ),
            &mut backend,
        );

        DockLayoutEngine::new().update(&tree, &mut backend, root);

        let child = tree.get(tree.get(root).unwrap().children[0]).unwrap();
        assert_eq!(backend.position(child.surface), Some(Vec2::ZERO));
        assert_eq!(measure(&backend, child.surface), Vec2::new(1000.0, 200.0));
        assert_eq!(backend.positioning(child.surface), Positioning::Absolute);
    }

    #[test]
    fn test_left_right_docks_and_content_region() {
        // Container 800x600: left 200px, right 100px, content takes the rest.
        let mut backend = HeadlessBackend::new(Vec2::new(800.0, 600.0));
        let mut tree = PanelTree::new();
        let root = tree.insert(
            PanelConfig::new()
                .content("main")
                .child(
                    PanelConfig::new()
                        .dock(Dock::Left)
                        .width(Dimension::Pixels(200.0)),
                )
                .child(
                    PanelConfig::new()
                        .dock(Dock::Right)
                        .width(Dimension::Pixels(100.0)),
                ),
            &mut backend,
        );

        DockLayoutEngine::new().update(&tree, &mut backend, root);

        let root_panel = tree.get(root).unwrap();
        let left = tree.get(root_panel.children[0]).unwrap();
        let right = tree.get(root_panel.children[1]).unwrap();
        let content = root_panel.content.unwrap();

        assert_eq!(backend.position(left.surface), Some(Vec2::ZERO));
        assert_eq!(measure(&backend, left.surface), Vec2::new(200.0, 600.0));

        assert_eq!(backend.position(right.surface), Some(Vec2::new(700.0, 0.0)));
        assert_eq!(measure(&backend, right.surface), Vec2::new(100.0, 600.0));

        assert_eq!(backend.position(content), Some(Vec2::new(200.0, 0.0)));
        assert_eq!(measure(&backend, content), Vec2::new(500.0, 600.0));
    }

    #[test]
    fn test_top_before_bottom_does_not_overlap() {
        let mut backend = HeadlessBackend::new(Vec2::new(400.0, 300.0));
        let mut tree = PanelTree::new();
        let root = tree.insert(
            PanelConfig::new()
                .child(
                    PanelConfig::new()
                        .dock(Dock::Top)
                        .height(Dimension::Pixels(50.0)),
                )
                .child(
                    PanelConfig::new()
                        .dock(Dock::Bottom)
                        .height(Dimension::Pixels(60.0)),
                ),
            &mut backend,
        );

        DockLayoutEngine::new().update(&tree, &mut backend, root);

        let root_panel = tree.get(root).unwrap();
        let top = tree.get(root_panel.children[0]).unwrap();
        let bottom = tree.get(root_panel.children[1]).unwrap();

        let top_bottom_edge = backend.position(top.surface).unwrap().y
            + measure(&backend, top.surface).y;
        let bottom_top_edge = backend.position(bottom.surface).unwrap().y;

        // Top child ends at 50; bottom child starts at 300 - 60 + 50... the
        // bottom position is computed inside the remaining rectangle, which
        // already excludes the top child's 50 pixels.
        assert_eq!(top_bottom_edge, 50.0);
        assert_eq!(bottom_top_edge, 240.0);
        assert!(top_bottom_edge <= bottom_top_edge);
    }

    #[test]
    fn test_same_side_docks_stack_in_order() {
        let mut backend = HeadlessBackend::new(Vec2::new(400.0, 300.0));
        let mut tree = PanelTree::new();
        let root = tree.insert(
            PanelConfig::new()
                .child(
                    PanelConfig::new()
                        .dock(Dock::Top)
                        .height(Dimension::Pixels(40.0))
                        .named("first"),
                )
                .child(
                    PanelConfig::new()
                        .dock(Dock::Top)
                        .height(Dimension::Pixels(40.0))
                        .named("second"),
                ),
            &mut backend,
        );

        DockLayoutEngine::new().update(&tree, &mut backend, root);

        let root_panel = tree.get(root).unwrap();
        let first = tree.get(root_panel.children[0]).unwrap();
        let second = tree.get(root_panel.children[1]).unwrap();

        assert_eq!(backend.position(first.surface), Some(Vec2::new(0.0, 0.0)));
        assert_eq!(backend.position(second.surface), Some(Vec2::new(0.0, 40.0)));
    }

    #[test]
    fn test_percent_children_resolve_against_original_container() {
        // Two left children at 50% width each: both resolve against the full
        // container width, so together they consume all of it.
        let mut backend = HeadlessBackend::new(Vec2::new(600.0, 400.0));
        let mut tree = PanelTree::new();
        let root = tree.insert(
            PanelConfig::new()
                .child(
                    PanelConfig::new()
                        .dock(Dock::Left)
                        .width(Dimension::Percent(50.0)),
                )
                .child(
                    PanelConfig::new()
                        .dock(Dock::Left)
                        .width(Dimension::Percent(50.0)),
                ),
            &mut backend,
        );

        DockLayoutEngine::new().update(&tree, &mut backend, root);

        let root_panel = tree.get(root).unwrap();
        let first = tree.get(root_panel.children[0]).unwrap();
        let second = tree.get(root_panel.children[1]).unwrap();

        assert_eq!(measure(&backend, first.surface).x, 300.0);
        assert_eq!(backend.position(second.surface), Some(Vec2::new(300.0, 0.0)));
        assert_eq!(measure(&backend, second.surface).x, 300.0);
    }

    #[test]
    fn test_hidden_child_consumes_no_space() {
        let mut backend = HeadlessBackend::new(Vec2::new(400.0, 300.0));
        let mut tree = PanelTree::new();
        let root = tree.insert(
            PanelConfig::new()
                .content("body")
                .child(
                    PanelConfig::new()
                        .dock(Dock::Top)
                        .height(Dimension::Pixels(100.0))
                        .hidden(true),
                ),
            &mut backend,
        );

        DockLayoutEngine::new().update(&tree, &mut backend, root);

        let root_panel = tree.get(root).unwrap();
        let hidden = tree.get(root_panel.children[0]).unwrap();
        let content = root_panel.content.unwrap();

        assert!(backend.has_marker(hidden.surface, HIDDEN_MARKER));
        assert_eq!(backend.position(hidden.surface), None);
        assert_eq!(backend.position(content), Some(Vec2::ZERO));
        assert_eq!(measure(&backend, content), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_undocked_child_does_not_affect_siblings() {
        let mut backend = HeadlessBackend::new(Vec2::new(400.0, 300.0));
        let mut tree = PanelTree::new();
        let root = tree.insert(
            PanelConfig::new()
                .content("body")
                .child(
                    PanelConfig::new()
                        .width(Dimension::Pixels(120.0))
                        .height(Dimension::Pixels(80.0)),
                )
                .child(
                    PanelConfig::new()
                        .dock(Dock::Top)
                        .height(Dimension::Pixels(30.0)),
                ),
            &mut backend,
        );

        DockLayoutEngine::new().update(&tree, &mut backend, root);

        let root_panel = tree.get(root).unwrap();
        let floating = tree.get(root_panel.children[0]).unwrap();
        let header = tree.get(root_panel.children[1]).unwrap();
        let content = root_panel.content.unwrap();

        // The undocked child keeps its declared size and gets no position.
        assert_eq!(backend.position(floating.surface), None);
        assert_eq!(measure(&backend, floating.surface), Vec2::new(120.0, 80.0));

        // The docked sibling still claims the full container width.
        assert_eq!(measure(&backend, header.surface), Vec2::new(400.0, 30.0));
        assert_eq!(measure(&backend, content), Vec2::new(400.0, 270.0));
    }

    #[test]
    fn test_zero_children_content_gets_full_container() {
        let mut backend = HeadlessBackend::new(Vec2::new(512.0, 384.0));
        let mut tree = PanelTree::new();
        let root = tree.insert(PanelConfig::new().content("everything"), &mut backend);

        DockLayoutEngine::new().update(&tree, &mut backend, root);

        let content = tree.get(root).unwrap().content.unwrap();
        assert_eq!(backend.position(content), Some(Vec2::ZERO));
        assert_eq!(measure(&backend, content), Vec2::new(512.0, 384.0));
    }

    #[test]
    fn test_recursion_uses_assigned_child_size() {
        // A left-docked sidebar whose own top child resolves percentages
        // against the sidebar's assigned box, not the outer container.
        let mut backend = HeadlessBackend::new(Vec2::new(1000.0, 500.0));
        let mut tree = PanelTree::new();
        let root = tree.insert(
            PanelConfig::new().child(
                PanelConfig::new()
                    .dock(Dock::Left)
                    .width(Dimension::Pixels(200.0))
                    .child(
                        PanelConfig::new()
                            .dock(Dock::Top)
                            .height(Dimension::Percent(10.0)),
                    ),
            ),
            &mut backend,
        );

        DockLayoutEngine::new().update(&tree, &mut backend, root);

        let sidebar = tree.get(tree.get(root).unwrap().children[0]).unwrap();
        let nested = tree.get(sidebar.children[0]).unwrap();

        assert_eq!(measure(&backend, sidebar.surface), Vec2::new(200.0, 500.0));
        // 10% of the sidebar's 500px height, full sidebar width.
        assert_eq!(measure(&backend, nested.surface), Vec2::new(200.0, 50.0));
    }

    #[test]
    fn test_hidden_root_skips_layout() {
        let mut backend = HeadlessBackend::new(Vec2::new(400.0, 300.0));
        let mut tree = PanelTree::new();
        let root = tree.insert(
            PanelConfig::new().hidden(true).child(
                PanelConfig::new()
                    .dock(Dock::Top)
                    .height(Dimension::Pixels(40.0)),
            ),
            &mut backend,
        );

        DockLayoutEngine::new().update(&tree, &mut backend, root);

        let root_panel = tree.get(root).unwrap();
        let child = tree.get(root_panel.children[0]).unwrap();
        assert!(backend.has_marker(root_panel.surface, HIDDEN_MARKER));
        assert_eq!(backend.position(child.surface), None);
    }

    #[test]
    fn test_update_from_leaf_reaches_root() {
        let mut backend = HeadlessBackend::new(Vec2::new(400.0, 300.0));
        let mut tree = PanelTree::new();
        let root = tree.insert(
            PanelConfig::new().child(
                PanelConfig::new()
                    .dock(Dock::Top)
                    .height(Dimension::Pixels(40.0)),
            ),
            &mut backend,
        );
        let leaf = tree.get(root).unwrap().children[0];

        DockLayoutEngine::new().update(&tree, &mut backend, leaf);

        let child = tree.get(leaf).unwrap();
        assert_eq!(backend.position(child.surface), Some(Vec2::ZERO));
        assert_eq!(measure(&backend, child.surface), Vec2::new(400.0, 40.0));
    }

    #[test]
    fn test_remaining_space_never_grows() {
        let mut backend = HeadlessBackend::new(Vec2::new(800.0, 600.0));
        let mut tree = PanelTree::new();
        let root = tree.insert(
            PanelConfig::new()
                .content("rest")
                .child(
                    PanelConfig::new()
                        .dock(Dock::Top)
                        .height(Dimension::Pixels(100.0)),
                )
                .child(
                    PanelConfig::new()
                        .dock(Dock::Left)
                        .width(Dimension::Pixels(150.0)),
                )
                .child(
                    PanelConfig::new()
                        .dock(Dock::Bottom)
                        .height(Dimension::Pixels(50.0)),
                ),
            &mut backend,
        );

        DockLayoutEngine::new().update(&tree, &mut backend, root);

        // 800 - 150 wide, 600 - 100 - 50 tall, offset below the header and
        // right of the sidebar.
        let content = tree.get(root).unwrap().content.unwrap();
        assert_eq!(backend.position(content), Some(Vec2::new(150.0, 100.0)));
        assert_eq!(measure(&backend, content), Vec2::new(650.0, 450.0));
    }
}
