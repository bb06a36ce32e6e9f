// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Scene: a Kurbo-native retained element tree for headless hosts.
//!
//! Understory Scene models just enough of a document to host interactive list editing without a
//! browser or a windowing toolkit:
//!
//! - A hierarchy of boxes with local bounds, visual transforms, and flags.
//! - Minimal flow layouts (column, row, wrapping row) that re-run eagerly whenever children are
//!   inserted, removed, reordered, or resized.
//! - Overflow scrolling per node (see [`NodeFlags::SCROLL_X`] and [`NodeFlags::SCROLL_Y`]) with a
//!   root node that stands in for the document and its viewport.
//! - Hit testing and a phantom-slot probe that reports where one more child would land.
//!
//! ## Not a layout engine
//!
//! The flow layouts exist so that reordering children produces believable geometry. There is no
//! measurement, no intrinsic sizing, and no alignment. Sizes are whatever the caller sets.
//!
//! ## Coordinates
//!
//! [`Scene::world_rect`] reports layout boxes in document space, already shifted by the scroll
//! offsets of every ancestor except the root. [`Scene::client_rect`] subtracts the document scroll
//! and bounds the node's own transform, which is what a browser's client rect would report.
//! Transforms are visual only: they do not move descendants and do not influence layout.
//!
//! ## API overview
//!
//! - [`Scene`]: container managing nodes, layout, and scrolling.
//! - [`LocalNode`]: per-node local data (bounds, transform, transform origin, flags).
//! - [`NodeFlags`]: visibility, picking, scroll axes, viewport pinning, and shadow marking.
//! - [`FlowLayout`]: the layout of a container's children.
//! - [`NodeId`]: generational handle of a node.
//! - [`QueryFilter`]: restricts hit results (visible/pickable).
//!
//! ### Minimal usage
//!
//! ```
//! use understory_scene::{FlowLayout, LocalNode, QueryFilter, Scene};
//! use kurbo::{Point, Rect, Size, Vec2};
//!
//! let mut scene = Scene::new(Size::new(800.0, 600.0));
//! let list = scene.insert(
//!     scene.root(),
//!     LocalNode { bounds: Rect::new(10.0, 10.0, 210.0, 310.0), ..Default::default() },
//! );
//! scene.set_layout(list, Some(FlowLayout::column()));
//!
//! let a = scene.insert(list, LocalNode { bounds: Rect::new(0.0, 0.0, 200.0, 50.0), ..Default::default() });
//! let b = scene.insert(list, LocalNode { bounds: Rect::new(0.0, 0.0, 200.0, 50.0), ..Default::default() });
//! assert_eq!(scene.world_rect(b), Some(Rect::new(10.0, 60.0, 210.0, 110.0)));
//!
//! // Reordering re-runs the layout.
//! scene.set_children_order(list, &[b, a]);
//! assert_eq!(scene.world_rect(b), Some(Rect::new(10.0, 10.0, 210.0, 60.0)));
//!
//! // Document scroll moves client rects but not document rects.
//! scene.set_bounds(list, Rect::new(10.0, 10.0, 210.0, 1310.0));
//! assert_eq!(scene.scroll_by(scene.root(), Vec2::new(0.0, 100.0)), Vec2::new(0.0, 100.0));
//! assert_eq!(scene.client_rect(b), Some(Rect::new(10.0, -90.0, 210.0, -40.0)));
//!
//! let filter = QueryFilter { visible_only: true, pickable_only: true };
//! let hit = scene.hit_test_point(Point::new(20.0, 70.0), filter).unwrap();
//! assert_eq!(hit.node, a);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod scene;
mod types;
mod util;

pub use scene::{Hit, QueryFilter, Scene};
pub use types::{Flow, FlowLayout, LocalNode, NodeFlags, NodeId};
