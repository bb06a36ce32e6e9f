// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Understory Scene.
//!
//! ## Feature
//!
//! Enable with `scene_adapter`.
//!
//! ## Notes
//!
//! [`SceneHost`] implements every host trait over a [`Scene`]:
//! - The scene root is the scrolling root; the viewport is the scene's viewport.
//! - The floating copy of the dragged item is a pinned ([`NodeFlags::FIXED`]) child of the root,
//!   so its layout box is in client coordinates and document scrolling does not move it.
//! - Drop animations jump to their end state; there is no clock in the scene.
//! - Drop-target styles are recorded per zone and can be inspected with
//!   [`SceneHost::active_style`].
//!
//! [`ListRenderer`] plays the part of a keyed list view: it turns a zone's entries into scene
//! children, reusing nodes by item id and marking the placeholder with [`NodeFlags::SHADOW`].

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::{Affine, Point, Rect, Size, Vec2};
use log::{debug, trace};
use understory_scene::{LocalNode, NodeFlags, NodeId, Scene};

use crate::host::{Geometry, Scrolling, Styler};
use crate::options::DropTargetStyle;
use crate::types::{ElementTransform, Entry, Item, ScrollMetrics, TransformMatrix};

/// Placement of a floating copy: where it was created plus what the engine applied since.
#[derive(Copy, Clone, Debug)]
struct Floating {
    offset: Vec2,
    extra: Affine,
}

impl Floating {
    fn transform(&self) -> Affine {
        Affine::translate(self.offset) * self.extra
    }
}

/// A [`Scene`] driven by a drag engine.
#[derive(Debug)]
pub struct SceneHost {
    /// The scene; mutate it freely between engine calls.
    pub scene: Scene,
    styles: BTreeMap<NodeId, DropTargetStyle>,
    floating: BTreeMap<NodeId, Floating>,
}

impl SceneHost {
    /// Wrap a scene.
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            styles: BTreeMap::new(),
            floating: BTreeMap::new(),
        }
    }

    /// Style currently applied to `zone` as a drop target.
    pub fn active_style(&self, zone: NodeId) -> Option<&DropTargetStyle> {
        self.styles.get(&zone)
    }

    /// Zones currently styled as drop targets.
    pub fn active_zones(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.styles.keys().copied()
    }

    /// The floating copies that are alive.
    pub fn floating(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.floating.keys().copied()
    }

    fn apply_floating(&mut self, dragged: NodeId) {
        if let Some(f) = self.floating.get(&dragged) {
            self.scene.set_transform(dragged, f.transform());
        }
    }
}

impl Geometry for SceneHost {
    type Node = NodeId;

    fn client_rect(&self, node: NodeId) -> Option<Rect> {
        self.scene.client_rect(node)
    }

    fn transform(&self, node: NodeId) -> Option<ElementTransform> {
        let (affine, origin) = self.scene.transform(node)?;
        Some(ElementTransform {
            matrix: TransformMatrix::Matrix(affine.as_coeffs()),
            origin,
        })
    }

    fn document_scroll(&self) -> Vec2 {
        self.scene.scroll_offset(self.scene.root())
    }

    fn viewport_size(&self) -> Size {
        self.scene.viewport()
    }

    fn document_size(&self) -> Size {
        self.scene.content_size(self.scene.root())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.scene.parent(node)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.scene.children(node).to_vec()
    }

    fn is_shadow(&self, node: NodeId) -> bool {
        self.scene
            .flags(node)
            .is_some_and(|f| f.contains(NodeFlags::SHADOW))
    }

    fn probe_phantom_slot(&mut self, zone: NodeId) -> Option<Rect> {
        let slot = self.scene.phantom_slot(zone)?;
        Some(slot - self.document_scroll())
    }
}

impl Scrolling for SceneHost {
    fn scrolling_root(&self) -> NodeId {
        self.scene.root()
    }

    fn scroll_metrics(&self, node: NodeId) -> Option<ScrollMetrics> {
        let root = self.scene.root();
        let client_size = if node == root {
            self.scene.viewport()
        } else {
            let flags = self.scene.flags(node)?;
            if !flags.intersects(NodeFlags::SCROLL_X | NodeFlags::SCROLL_Y) {
                return None;
            }
            self.scene.local(node)?.bounds.size()
        };
        Some(ScrollMetrics {
            offset: self.scene.scroll_offset(node),
            scroll_size: self.scene.content_size(node),
            client_size,
        })
    }

    fn scroll_by(&mut self, node: NodeId, delta: Vec2) -> Vec2 {
        self.scene.scroll_by(node, delta)
    }
}

impl Styler for SceneHost {
    fn create_dragged(&mut self, original: NodeId) -> NodeId {
        let bounds = self.scene.client_rect(original).unwrap_or_else(|| {
            debug!("{original:?} is detached; the floating copy starts at the origin");
            Rect::ZERO
        });
        let root = self.scene.root();
        let dragged = self.scene.insert(
            root,
            LocalNode {
                bounds,
                flags: NodeFlags::VISIBLE | NodeFlags::FIXED,
                ..Default::default()
            },
        );
        self.floating.insert(
            dragged,
            Floating {
                offset: Vec2::ZERO,
                extra: Affine::IDENTITY,
            },
        );
        trace!("floating copy {dragged:?} of {original:?} at {bounds:?}");
        dragged
    }

    fn move_dragged(&mut self, dragged: NodeId, offset: Vec2) {
        if let Some(f) = self.floating.get_mut(&dragged) {
            f.offset = offset;
        }
        self.apply_floating(dragged);
    }

    fn morph_dragged(&mut self, dragged: NodeId, like: NodeId, pointer: Point) {
        let (Some(current), Some(like)) = (
            self.scene.client_rect(dragged),
            self.scene.local(like).map(|l| l.bounds.size()),
        ) else {
            return;
        };
        let Some(bounds) = self.scene.local(dragged).map(|l| l.bounds) else {
            return;
        };
        let dw = current.width() - like.width;
        let dh = current.height() - like.height;
        if dw == 0.0 && dh == 0.0 {
            return;
        }
        // Keep the pointer at the same relative spot of the copy.
        let rx = if current.width() > 0.0 {
            (pointer.x - current.x0) / current.width()
        } else {
            0.0
        };
        let ry = if current.height() > 0.0 {
            (pointer.y - current.y0) / current.height()
        } else {
            0.0
        };
        let origin = bounds.origin() + Vec2::new(rx * dw, ry * dh);
        self.scene
            .set_bounds(dragged, Rect::from_origin_size(origin, like));
        trace!("morphed {dragged:?} to {like:?}");
    }

    fn transform_dragged(&mut self, dragged: NodeId, transform: Affine) {
        if let Some(f) = self.floating.get_mut(&dragged) {
            f.extra = transform;
        }
        self.apply_floating(dragged);
    }

    fn animate_drop(&mut self, dragged: NodeId, target: Rect, duration_ms: u64) {
        trace!("{dragged:?} lands on {target:?} after {duration_ms}ms");
        if let Some(f) = self.floating.get_mut(&dragged) {
            f.offset = Vec2::ZERO;
            f.extra = Affine::IDENTITY;
        }
        self.scene.set_transform(dragged, Affine::IDENTITY);
        self.scene.set_bounds(dragged, target);
    }

    fn remove_dragged(&mut self, dragged: NodeId) {
        self.floating.remove(&dragged);
        self.scene.remove(dragged);
    }

    fn style_active_zone(&mut self, zone: NodeId, style: &DropTargetStyle) {
        self.styles.insert(zone, style.clone());
    }

    fn style_inactive_zone(&mut self, zone: NodeId, _style: &DropTargetStyle) {
        self.styles.remove(&zone);
    }
}

/// Keyed rendering of zone lists into scene children.
///
/// Each zone's children mirror its entries in order. A node keeps representing the same item id
/// for as long as the item stays in the zone; items that leave a zone lose their node, and items
/// that arrive get a fresh one.
#[derive(Debug)]
pub struct ListRenderer<Id> {
    bound: BTreeMap<NodeId, Vec<(Id, NodeId)>>,
}

impl<Id> Default for ListRenderer<Id> {
    fn default() -> Self {
        Self {
            bound: BTreeMap::new(),
        }
    }
}

impl<Id: Clone + Eq> ListRenderer<Id> {
    /// Create a renderer with no bound zones.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `entries` as the children of `zone`.
    ///
    /// `make` builds the node of an item that has none yet. Returns the zone's children.
    pub fn render<T>(
        &mut self,
        scene: &mut Scene,
        zone: NodeId,
        entries: &[Entry<T>],
        mut make: impl FnMut(&T) -> LocalNode,
    ) -> Vec<NodeId>
    where
        T: Item<Id = Id>,
    {
        let mut old = self.bound.remove(&zone).unwrap_or_default();
        let mut next = Vec::with_capacity(entries.len());
        for entry in entries {
            let id = entry.id();
            let node = match old.iter().position(|(k, _)| *k == id) {
                Some(pos) => old.swap_remove(pos).1,
                None => scene.insert(zone, make(entry.data())),
            };
            let mut flags = scene.flags(node).unwrap_or_default();
            flags.set(NodeFlags::SHADOW, entry.is_shadow());
            scene.set_flags(node, flags);
            next.push((id, node));
        }
        for (_, stale) in old {
            scene.remove(stale);
        }
        let order: Vec<NodeId> = next.iter().map(|(_, n)| *n).collect();
        scene.set_children_order(zone, &order);
        self.bound.insert(zone, next);
        order
    }

    /// Node currently rendering item `id` in `zone`.
    pub fn node_of(&self, zone: NodeId, id: &Id) -> Option<NodeId> {
        self.bound
            .get(&zone)?
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, n)| *n)
    }

    /// Nodes of `zone` in list order.
    pub fn nodes(&self, zone: NodeId) -> Vec<NodeId> {
        self.bound
            .get(&zone)
            .map(|b| b.iter().map(|(_, n)| *n).collect())
            .unwrap_or_default()
    }

    /// Forget `zone` without touching the scene.
    pub fn unbind(&mut self, zone: NodeId) {
        self.bound.remove(&zone);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use understory_scene::FlowLayout;

    #[derive(Clone, Debug, PartialEq)]
    struct Row(u32);

    impl Item for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.0
        }
    }

    fn row(_: &Row) -> LocalNode {
        LocalNode {
            bounds: Rect::new(0.0, 0.0, 200.0, 50.0),
            ..Default::default()
        }
    }

    fn host_with_zone() -> (SceneHost, NodeId) {
        let mut scene = Scene::new(Size::new(800.0, 600.0));
        let zone = scene.insert(
            scene.root(),
            LocalNode {
                bounds: Rect::new(0.0, 100.0, 200.0, 400.0),
                ..Default::default()
            },
        );
        scene.set_layout(zone, Some(FlowLayout::column()));
        (SceneHost::new(scene), zone)
    }

    /// Make the document tall enough to scroll.
    fn tall_document(host: &mut SceneHost) {
        let root = host.scene.root();
        host.scene.insert(
            root,
            LocalNode {
                bounds: Rect::new(0.0, 0.0, 10.0, 2000.0),
                ..Default::default()
            },
        );
    }

    #[test]
    fn renderer_reuses_nodes_by_id() {
        let (mut host, zone) = host_with_zone();
        let mut lists = ListRenderer::new();
        let first = lists.render(
            &mut host.scene,
            zone,
            &[Entry::Item(Row(1)), Entry::Item(Row(2)), Entry::Item(Row(3))],
            row,
        );
        let second = lists.render(
            &mut host.scene,
            zone,
            &[Entry::Item(Row(3)), Entry::Shadow(Row(1))],
            row,
        );
        assert_eq!(second, vec![first[2], first[0]]);
        assert!(!host.scene.is_alive(first[1]), "dropped items lose their node");
        assert!(host.is_shadow(first[0]));
        assert!(!host.is_shadow(first[2]));
        assert_eq!(host.children(zone), second);
        assert_eq!(
            host.client_rect(first[0]),
            Some(Rect::new(0.0, 150.0, 200.0, 200.0))
        );

        lists.render(&mut host.scene, zone, &[Entry::Item(Row(1))], row);
        assert!(!host.is_shadow(first[0]), "shadow flag is cleared");
        assert_eq!(lists.node_of(zone, &1), Some(first[0]));
        assert_eq!(lists.node_of(zone, &3), None);
    }

    #[test]
    fn floating_copy_is_pinned_to_the_viewport() {
        let (mut host, zone) = host_with_zone();
        tall_document(&mut host);
        let mut lists = ListRenderer::new();
        let nodes = lists.render(
            &mut host.scene,
            zone,
            &(1..=20).map(|i| Entry::Item(Row(i))).collect::<Vec<_>>(),
            row,
        );
        let dragged = host.create_dragged(nodes[0]);
        assert_eq!(
            host.client_rect(dragged),
            Some(Rect::new(0.0, 100.0, 200.0, 150.0))
        );
        host.move_dragged(dragged, Vec2::new(5.0, 20.0));
        let root = host.scrolling_root();
        assert_eq!(host.scroll_by(root, Vec2::new(0.0, 100.0)), Vec2::new(0.0, 100.0));
        assert_eq!(
            host.client_rect(dragged),
            Some(Rect::new(5.0, 120.0, 205.0, 170.0)),
            "document scroll must not carry the floating copy"
        );
        assert_eq!(
            host.client_rect(nodes[0]),
            Some(Rect::new(0.0, 0.0, 200.0, 50.0))
        );
        host.remove_dragged(dragged);
        assert!(!host.scene.is_alive(dragged));
        assert_eq!(host.floating().count(), 0);
    }

    #[test]
    fn morph_keeps_the_pointer_inside() {
        let (mut host, zone) = host_with_zone();
        let other = host.scene.insert(
            host.scene.root(),
            LocalNode {
                bounds: Rect::new(400.0, 0.0, 500.0, 100.0),
                ..Default::default()
            },
        );
        let mut lists = ListRenderer::new();
        let nodes = lists.render(&mut host.scene, zone, &[Entry::Item(Row(1))], row);
        let dragged = host.create_dragged(nodes[0]);
        // Pointer at the middle of the 200x50 copy.
        host.morph_dragged(dragged, other, Point::new(100.0, 125.0));
        let r = host.client_rect(dragged).unwrap();
        assert_eq!(r.size(), Size::new(100.0, 100.0));
        assert_eq!(r.center(), Point::new(100.0, 125.0));
    }

    #[test]
    fn metrics_for_root_and_scroll_containers_only() {
        let (mut host, zone) = host_with_zone();
        let root = host.scrolling_root();
        let m = host.scroll_metrics(root).unwrap();
        assert_eq!(m.client_size, Size::new(800.0, 600.0));
        assert!(host.scroll_metrics(zone).is_none());

        host.scene
            .set_flags(zone, NodeFlags::default() | NodeFlags::SCROLL_Y);
        let mut lists = ListRenderer::new();
        lists.render(
            &mut host.scene,
            zone,
            &(1..=10).map(|i| Entry::Item(Row(i))).collect::<Vec<_>>(),
            row,
        );
        let m = host.scroll_metrics(zone).unwrap();
        assert_eq!(m.client_size, Size::new(200.0, 300.0));
        assert_eq!(m.scroll_size, Size::new(200.0, 500.0));
        assert!(m.overflows_y());
        assert!(!m.overflows_x());
    }

    #[test]
    fn styles_are_tracked_per_zone() {
        let (mut host, zone) = host_with_zone();
        let style = DropTargetStyle::outline("red solid 1px");
        host.style_active_zone(zone, &style);
        assert_eq!(host.active_style(zone), Some(&style));
        host.style_inactive_zone(zone, &style);
        assert_eq!(host.active_zones().count(), 0);
    }

    #[test]
    fn phantom_slot_is_in_client_space() {
        let (mut host, zone) = host_with_zone();
        tall_document(&mut host);
        let mut lists = ListRenderer::new();
        lists.render(
            &mut host.scene,
            zone,
            &(1..=20).map(|i| Entry::Item(Row(i))).collect::<Vec<_>>(),
            row,
        );
        let root = host.scrolling_root();
        host.scroll_by(root, Vec2::new(0.0, 40.0));
        assert_eq!(
            host.probe_phantom_slot(zone),
            Some(Rect::new(0.0, 1060.0, 200.0, 1110.0))
        );
    }
}
