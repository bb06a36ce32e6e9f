// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seams through which the engine reads and drives the host's rendering.
//!
//! ## Overview
//!
//! The engine never owns elements. Everything it knows about geometry comes from a
//! [`Geometry`] implementation, scrolling goes through [`Scrolling`], and visual effects
//! (the floating copy of the dragged item, drop-target hints) through [`Styler`].
//! [`Host`] bundles the three and is implemented automatically.
//!
//! Rects reported by the host are *client* rects: viewport coordinates, including the node's own
//! transform, like a browser's bounding client rect. The engine converts them to document space
//! itself (see [`geometry`](crate::geometry)).
//!
//! An adapter for Understory Scene lives in [`adapters`](crate::adapters).

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::options::DropTargetStyle;
use crate::types::{ElementTransform, ScrollMetrics};

/// Read access to the host's element tree and geometry.
pub trait Geometry {
    /// Handle of an element (zones, items, the dragged visual).
    type Node: Copy + Eq + Ord + Debug;

    /// Bounding box in viewport coordinates, including the element's own transform.
    ///
    /// `None` if the element is detached.
    fn client_rect(&self, node: Self::Node) -> Option<Rect>;

    /// The element's own active transform, if any.
    fn transform(&self, node: Self::Node) -> Option<ElementTransform> {
        let _ = node;
        None
    }

    /// Current document scroll offset.
    fn document_scroll(&self) -> Vec2;

    /// Size of the viewport.
    fn viewport_size(&self) -> Size;

    /// Full size of the document, including the part scrolled out of view.
    fn document_size(&self) -> Size;

    /// Parent element, `None` for the document root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Children of an element in document order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Returns true if the element currently renders the drag placeholder.
    fn is_shadow(&self, node: Self::Node) -> bool;

    /// Client rect an invisible copy of the zone's last child would occupy if appended.
    ///
    /// Implementations append the copy, measure it, and remove it before returning, leaving no
    /// trace. `None` if the zone has no children.
    fn probe_phantom_slot(&mut self, zone: Self::Node) -> Option<Rect>;
}

/// Overflow scrolling.
pub trait Scrolling: Geometry {
    /// The element that scrolls the document.
    fn scrolling_root(&self) -> Self::Node;

    /// Scroll state of an element whose overflow is scrollable, `None` otherwise.
    ///
    /// The scrolling root always reports metrics.
    fn scroll_metrics(&self, node: Self::Node) -> Option<ScrollMetrics>;

    /// Scroll an element by `delta`, clamped to its range. Returns the delta actually applied.
    fn scroll_by(&mut self, node: Self::Node, delta: Vec2) -> Vec2;
}

/// Visual effects around a drag.
///
/// Only the dragged visual's lifecycle is required; every hint has a no-op default.
pub trait Styler: Geometry {
    /// Create a floating copy of `original`, placed exactly over it.
    fn create_dragged(&mut self, original: Self::Node) -> Self::Node;

    /// Offset the floating copy from where it was created.
    fn move_dragged(&mut self, dragged: Self::Node, offset: Vec2);

    /// Reshape the floating copy to look like `like`, keeping it under `pointer`.
    fn morph_dragged(&mut self, dragged: Self::Node, like: Self::Node, pointer: Point) {
        let _ = (dragged, like, pointer);
    }

    /// Apply an extra transform to the floating copy.
    fn transform_dragged(&mut self, dragged: Self::Node, transform: Affine) {
        let _ = (dragged, transform);
    }

    /// Start animating the floating copy onto `target` (a client rect) over `duration_ms`.
    fn animate_drop(&mut self, dragged: Self::Node, target: Rect, duration_ms: u64) {
        let _ = (dragged, target, duration_ms);
    }

    /// Remove the floating copy once the drop has settled.
    fn remove_dragged(&mut self, dragged: Self::Node);

    /// Highlight a zone that accepts the dragged item.
    fn style_active_zone(&mut self, zone: Self::Node, style: &DropTargetStyle) {
        let _ = (zone, style);
    }

    /// Remove a zone's highlight.
    fn style_inactive_zone(&mut self, zone: Self::Node, style: &DropTargetStyle) {
        let _ = (zone, style);
    }
}

/// Everything the engine needs from its host.
pub trait Host: Scrolling + Styler {}

impl<H: Scrolling + Styler> Host for H {}
