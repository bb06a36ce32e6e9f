// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, local geometry, and flow layouts.

use kurbo::{Affine, Rect, Vec2};

/// Handle to a scene node: a slot index plus a generation.
///
/// Removing a node frees its slot; a later insert may reuse the slot with a bumped generation,
/// so handles to removed nodes never alias new ones. Fresh slots start at generation `1`.
///
/// Ordering is by slot then generation. It carries no geometric meaning and only exists so
/// that ids can key ordered maps.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility, picking, overflow scrolling, pinning, and shadow marking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible.
        const VISIBLE  = 0b0000_0001;
        /// Node is pickable (participates in hit testing).
        const PICKABLE = 0b0000_0010;
        /// Content overflowing horizontally can be scrolled.
        const SCROLL_X = 0b0000_0100;
        /// Content overflowing vertically can be scrolled.
        const SCROLL_Y = 0b0000_1000;
        /// Node renders a drag placeholder (the shadow of a dragged item).
        const SHADOW   = 0b0001_0000;
        /// Node is pinned to the viewport: the document scroll does not move it.
        const FIXED    = 0b0010_0000;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Local geometry for a node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Layout box relative to the parent's content origin.
    ///
    /// When the parent has a [`FlowLayout`], only the size is honored and the origin is
    /// recomputed by the parent.
    pub bounds: Rect,
    /// Visual transform, applied about [`LocalNode::transform_origin`].
    ///
    /// Transforms affect the node's own client rect only; they do not move descendants
    /// and do not participate in layout, like an in-flight reorder animation.
    pub transform: Affine,
    /// Transform origin relative to the top-left of the layout box. `None` means the center.
    pub transform_origin: Option<Vec2>,
    /// Visibility, picking, scroll, and shadow flags.
    pub flags: NodeFlags,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            transform: Affine::IDENTITY,
            transform_origin: None,
            flags: NodeFlags::default(),
        }
    }
}

/// Direction in which a [`FlowLayout`] places children.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Top to bottom.
    Column,
    /// Left to right, on a single line.
    Row,
    /// Left to right, wrapping onto a new line when the container width is exhausted.
    Wrap,
}

/// A minimal flow layout for containers whose children are reordered at runtime.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlowLayout {
    /// Placement direction.
    pub flow: Flow,
    /// Space between consecutive children (and between wrapped lines).
    pub gap: f64,
    /// Inset applied on all four sides of the container.
    pub padding: f64,
}

impl FlowLayout {
    /// A column with no gap and no padding.
    pub const fn column() -> Self {
        Self {
            flow: Flow::Column,
            gap: 0.0,
            padding: 0.0,
        }
    }

    /// A single row with no gap and no padding.
    pub const fn row() -> Self {
        Self {
            flow: Flow::Row,
            gap: 0.0,
            padding: 0.0,
        }
    }

    /// A wrapping row with no gap and no padding.
    pub const fn wrap() -> Self {
        Self {
            flow: Flow::Wrap,
            gap: 0.0,
            padding: 0.0,
        }
    }

    /// Returns a copy with `gap` set.
    pub const fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Returns a copy with `padding` set.
    pub const fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }
}
