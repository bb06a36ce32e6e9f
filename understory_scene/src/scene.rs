// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained element tree.

use alloc::vec::Vec;
use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::types::{FlowLayout, LocalNode, NodeFlags, NodeId};
use crate::util::{flow_positions, transform_rect_bbox};

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
    layout: Option<FlowLayout>,
    scroll: Vec2,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            layout: None,
            scroll: Vec2::ZERO,
        }
    }
}

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched node.
    pub node: NodeId,
    /// Path from root to node (inclusive).
    pub path: Vec<NodeId>,
}

/// Filters applied during hit testing.
///
/// Used by [`Scene::hit_test_point`].
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryFilter {
    /// If true, only consider nodes marked [`NodeFlags::VISIBLE`].
    pub visible_only: bool,
    /// If true, only consider nodes marked [`NodeFlags::PICKABLE`] (hit-test).
    pub pickable_only: bool,
}

/// A document of nested boxes.
///
/// The scene always has a root node standing in for the document. Its bounds are the viewport,
/// and its scroll offset is the document scroll. Every other node is positioned relative to its
/// parent's content origin (the parent's layout box shifted by the parent's scroll offset).
///
/// Coordinate spaces:
/// - *document*: root content space. Unaffected by document scroll.
/// - *client*: viewport space, i.e. document minus the document scroll.
pub struct Scene {
    nodes: Vec<Option<Node>>,
    // Freed slots with the generation of their last occupant.
    free_list: Vec<(usize, u32)>,
    root: NodeId,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// Create a scene whose root (the document) has the given viewport size.
    pub fn new(viewport: Size) -> Self {
        let root_local = LocalNode {
            bounds: Rect::from_origin_size(Point::ORIGIN, viewport),
            flags: NodeFlags::VISIBLE
                | NodeFlags::PICKABLE
                | NodeFlags::SCROLL_X
                | NodeFlags::SCROLL_Y,
            ..Default::default()
        };
        Self {
            nodes: alloc::vec![Some(Node::new(1, root_local))],
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
        }
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Current viewport size.
    pub fn viewport(&self) -> Size {
        self.node(self.root).local.bounds.size()
    }

    /// Resize the viewport. The document scroll is clamped to the new extent.
    pub fn set_viewport(&mut self, size: Size) {
        let root = self.root;
        self.node_mut(root).local.bounds = Rect::from_origin_size(Point::ORIGIN, size);
        self.relayout(root);
        self.clamp_scroll(root);
    }

    /// Insert a new node as the last child of `parent`.
    pub fn insert(&mut self, parent: NodeId, local: LocalNode) -> NodeId {
        let len = self.node(parent).children.len();
        self.insert_at(parent, len, local)
    }

    /// Insert a new node as a child of `parent` at `index` (clamped to the child count).
    pub fn insert_at(&mut self, parent: NodeId, index: usize, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some((idx, retired)) = self.free_list.pop() {
            let generation = retired + 1;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        self.link_parent(id, parent, index);
        self.relayout(parent);
        id
    }

    /// Remove a node (and its subtree). The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.root {
            return;
        }
        let parent = self.node(id).parent;
        self.remove_subtree(id);
        if let Some(parent) = parent {
            self.relayout(parent);
        }
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove_subtree(child);
        }
        let generation = self.node(id).generation;
        self.nodes[id.idx()] = None;
        self.free_list.push((id.idx(), generation));
    }

    /// Move `id` under `new_parent` at `index` (clamped; `None` appends).
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId, index: Option<usize>) {
        if !self.is_alive(id) || !self.is_alive(new_parent) || id == self.root {
            return;
        }
        let old_parent = self.node(id).parent;
        if let Some(parent) = old_parent {
            self.unlink_parent(id, parent);
        }
        let index = index.unwrap_or(usize::MAX);
        self.link_parent(id, new_parent, index);
        if let Some(parent) = old_parent
            && parent != new_parent
        {
            self.relayout(parent);
        }
        self.relayout(new_parent);
    }

    /// Reorder the children of `parent`.
    ///
    /// Ids in `order` that are not children of `parent` are ignored. Children not named in
    /// `order` keep their relative order and follow the named ones.
    pub fn set_children_order(&mut self, parent: NodeId, order: &[NodeId]) {
        if !self.is_alive(parent) {
            return;
        }
        let current = self.node(parent).children.clone();
        let mut next: Vec<NodeId> = Vec::with_capacity(current.len());
        for id in order {
            if current.contains(id) && !next.contains(id) {
                next.push(*id);
            }
        }
        for id in current {
            if !next.contains(&id) {
                next.push(id);
            }
        }
        self.node_mut(parent).children = next;
        self.relayout(parent);
    }

    /// Set (or clear) the flow layout of a container and lay out its children.
    pub fn set_layout(&mut self, id: NodeId, layout: Option<FlowLayout>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.layout = layout;
            self.relayout(id);
        }
    }

    /// Update local bounds. Under a flow layout only the size is kept.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        let Some(n) = self.node_opt_mut(id) else {
            return;
        };
        n.local.bounds = bounds;
        let parent = n.parent;
        self.relayout(id);
        if let Some(parent) = parent {
            self.relayout(parent);
        }
        self.clamp_scroll(id);
    }

    /// Update the size of a node, keeping its origin.
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        if let Some(n) = self.nodes.get(id.idx()).and_then(|n| n.as_ref())
            && n.generation == id.1
        {
            let origin = n.local.bounds.origin();
            self.set_bounds(id, Rect::from_origin_size(origin, size));
        }
    }

    /// Update the visual transform.
    pub fn set_transform(&mut self, id: NodeId, transform: Affine) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.transform = transform;
        }
    }

    /// Update the transform origin (relative to the layout box, `None` for center).
    pub fn set_transform_origin(&mut self, id: NodeId, origin: Option<Vec2>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.transform_origin = origin;
        }
    }

    /// Update flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
        self.clamp_scroll(id);
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Local data of a node.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.get(id).map(|n| &n.local)
    }

    /// Flags of a node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.get(id).map(|n| n.local.flags)
    }

    /// Flow layout of a node, if any.
    pub fn layout(&self, id: NodeId) -> Option<FlowLayout> {
        self.get(id).and_then(|n| n.layout)
    }

    /// Parent of a node. The root has none.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of a node in order. Empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Number of ancestors of `id`. The root has depth `0`.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            depth += 1;
            cur = self.parent(p);
        }
        depth
    }

    /// Layout box of `id` in document space, ignoring the node's own transform.
    ///
    /// A [`NodeFlags::FIXED`] node follows the document scroll so that its client rect stays put.
    pub fn world_rect(&self, id: NodeId) -> Option<Rect> {
        let node = self.get(id)?;
        let parent = match node.parent {
            None => return Some(node.local.bounds),
            Some(parent) => parent,
        };
        let mut origin = self.content_origin(parent)?;
        if node.local.flags.contains(NodeFlags::FIXED) {
            origin += self.node(self.root).scroll;
        }
        Some(node.local.bounds + origin)
    }

    /// Rendered box of `id` in client space: the layout box shifted by the document scroll,
    /// then bounded through the node's own transform.
    pub fn client_rect(&self, id: NodeId) -> Option<Rect> {
        let world = self.world_rect(id)?;
        let node = self.get(id)?;
        if id == self.root {
            return Some(world);
        }
        let base = world - self.node(self.root).scroll;
        if node.local.transform == Affine::IDENTITY {
            return Some(base);
        }
        Some(transform_rect_bbox(
            self.full_transform(node, base.origin()),
            base,
        ))
    }

    /// The node's own transform together with its origin, relative to the top-left of the
    /// layout box.
    ///
    /// Returns `None` for stale ids and for nodes with an identity transform.
    pub fn transform(&self, id: NodeId) -> Option<(Affine, Vec2)> {
        let node = self.get(id)?;
        if node.local.transform == Affine::IDENTITY || id == self.root {
            return None;
        }
        Some((node.local.transform, self.origin_offset(node)))
    }

    /// Current scroll offset of a node.
    pub fn scroll_offset(&self, id: NodeId) -> Vec2 {
        self.get(id).map(|n| n.scroll).unwrap_or(Vec2::ZERO)
    }

    /// Extent of a node's content: its own size grown to enclose every child (plus padding).
    ///
    /// Pinned children do not count.
    pub fn content_size(&self, id: NodeId) -> Size {
        let Some(node) = self.get(id) else {
            return Size::ZERO;
        };
        let padding = node.layout.map(|l| l.padding).unwrap_or(0.0);
        let mut width = node.local.bounds.width();
        let mut height = node.local.bounds.height();
        for child in &node.children {
            let child = self.node(*child);
            if child.local.flags.contains(NodeFlags::FIXED) {
                continue;
            }
            let b = child.local.bounds;
            width = width.max(b.x1 + padding);
            height = height.max(b.y1 + padding);
        }
        Size::new(width, height)
    }

    /// Scroll `id` by `delta`, clamped to its scrollable range on the axes its flags allow.
    ///
    /// Returns the delta actually applied.
    pub fn scroll_by(&mut self, id: NodeId, delta: Vec2) -> Vec2 {
        let Some(max) = self.max_scroll(id) else {
            return Vec2::ZERO;
        };
        let node = self.node_mut(id);
        let before = node.scroll;
        let flags = node.local.flags;
        let mut next = before + delta;
        next.x = if flags.contains(NodeFlags::SCROLL_X) {
            next.x.clamp(0.0, max.x)
        } else {
            before.x
        };
        next.y = if flags.contains(NodeFlags::SCROLL_Y) {
            next.y.clamp(0.0, max.y)
        } else {
            before.y
        };
        node.scroll = next;
        next - before
    }

    /// Scroll `id` to an absolute offset (clamped).
    pub fn scroll_to(&mut self, id: NodeId, offset: Vec2) -> Vec2 {
        let current = self.scroll_offset(id);
        self.scroll_by(id, offset - current)
    }

    /// Where one more child shaped like the last child of `container` would land, in document
    /// space.
    ///
    /// Returns `None` if the container has no children or no flow layout.
    pub fn phantom_slot(&self, container: NodeId) -> Option<Rect> {
        let node = self.get(container)?;
        let layout = node.layout?;
        let last = *node.children.last()?;
        let mut sizes: Vec<Size> = node
            .children
            .iter()
            .map(|c| self.node(*c).local.bounds.size())
            .collect();
        let last_size = self.node(last).local.bounds.size();
        sizes.push(last_size);
        let positions = flow_positions(&layout, node.local.bounds.width(), &sizes);
        let slot = Rect::from_origin_size(*positions.last()?, last_size);
        Some(slot + self.content_origin(container)?)
    }

    /// Hit test a document-space point. Returns the deepest, topmost matching node.
    ///
    /// Later siblings are on top. Honors [`QueryFilter`].
    pub fn hit_test_point(&self, pt: Point, filter: QueryFilter) -> Option<Hit> {
        let node = self.hit_recursive(self.root, pt, filter)?;
        Some(Hit {
            node,
            path: self.path_to_root(node),
        })
    }

    // --- internals ---

    fn hit_recursive(&self, id: NodeId, pt: Point, filter: QueryFilter) -> Option<NodeId> {
        let node = self.node(id);
        let rect = self.world_rect(id)?;
        if !rect.contains(pt) {
            return None;
        }
        if filter.visible_only && !node.local.flags.contains(NodeFlags::VISIBLE) {
            return None;
        }
        for child in node.children.iter().rev() {
            if let Some(hit) = self.hit_recursive(*child, pt, filter) {
                return Some(hit);
            }
        }
        if filter.pickable_only && !node.local.flags.contains(NodeFlags::PICKABLE) {
            return None;
        }
        Some(id)
    }

    fn content_origin(&self, id: NodeId) -> Option<Vec2> {
        if id == self.root {
            return Some(Vec2::ZERO);
        }
        let world = self.world_rect(id)?;
        Some(world.origin().to_vec2() - self.node(id).scroll)
    }

    fn origin_offset(&self, node: &Node) -> Vec2 {
        node.local.transform_origin.unwrap_or_else(|| {
            let size = node.local.bounds.size();
            Vec2::new(size.width / 2.0, size.height / 2.0)
        })
    }

    fn full_transform(&self, node: &Node, origin: Point) -> Affine {
        let pivot = origin.to_vec2() + self.origin_offset(node);
        Affine::translate(pivot) * node.local.transform * Affine::translate(-pivot)
    }

    fn max_scroll(&self, id: NodeId) -> Option<Vec2> {
        let node = self.get(id)?;
        let content = self.content_size(id);
        let client = node.local.bounds.size();
        Some(Vec2::new(
            (content.width - client.width).max(0.0),
            (content.height - client.height).max(0.0),
        ))
    }

    fn clamp_scroll(&mut self, id: NodeId) {
        if self.is_alive(id) {
            let _ = self.scroll_by(id, Vec2::ZERO);
        }
    }

    fn relayout(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let Some(layout) = node.layout else {
            return;
        };
        let width = node.local.bounds.width();
        let children = node.children.clone();
        let sizes: Vec<Size> = children
            .iter()
            .map(|c| self.node(*c).local.bounds.size())
            .collect();
        let positions = flow_positions(&layout, width, &sizes);
        for (child, pos) in children.iter().zip(positions) {
            let n = self.node_mut(*child);
            n.local.bounds = Rect::from_origin_size(pos, n.local.bounds.size());
        }
        self.clamp_scroll(id);
    }

    fn get(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId, index: usize) {
        let parent_node = self.node_mut(parent);
        let index = index.min(parent_node.children.len());
        parent_node.children.insert(index, id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    fn path_to_root(&self, mut id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        loop {
            out.push(id);
            match self.node(id).parent {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }
}
