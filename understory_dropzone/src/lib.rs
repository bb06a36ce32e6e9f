// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dropzone --heading-base-level=0

//! Understory Dropzone: drag-and-drop reconciliation for reorderable lists.
//!
//! ## Overview
//!
//! The host owns the lists and renders them. This crate tracks a drag: it decides which zone and
//! which index the dragged element is over, keeps a single placeholder (the *shadow*) in the
//! right list, scrolls containers near their edges, and tells the host what to render
//! ([`Notification::Consider`]) and what to commit ([`Notification::Finalize`]).
//!
//! ## Inputs
//!
//! - Zones are registered with [`DragEngine::configure`], which also takes every list update
//!   the host renders in response to a notification.
//! - Pointer input: [`DragEngine::pointer_down`], [`DragEngine::pointer_move`],
//!   [`DragEngine::pointer_up`].
//! - Keyboard input: [`DragEngine::key_down`], [`DragEngine::focus_zone`],
//!   [`DragEngine::click_item`], [`DragEngine::click_outside`].
//! - Time: the engine never reads a clock. Call [`DragEngine::advance`] with the current time
//!   in milliseconds whenever [`DragEngine::next_deadline`] has passed; observation ticks,
//!   auto-scroll frames, and drop cleanup all run from there.
//!
//! Everything the engine knows about the rendered document comes through the traits in
//! [`host`]. An implementation for Understory Scene lives in [`adapters`].
//!
//! ## Building blocks
//!
//! The engine is assembled from parts that can be used on their own:
//!
//! - [`resolver::IndexResolver`]: point-in-zone to insertion index, tolerant of in-flight
//!   reorder animations and wrapping layouts.
//! - [`scroller::Scroller`] and [`scroller::MultiScroller`]: edge-triggered auto-scroll of the
//!   innermost scrollable container under the pointer.
//! - [`observer::Observer`]: the polling loop that turns geometry into enter, leave, and
//!   over-index transitions.
//! - [`scheduler::Scheduler`]: the timer queue behind [`DragEngine::advance`].
//! - [`geometry`]: pure rect helpers.
//!
//! ## Minimal usage
//!
//! ```
//! # #[cfg(feature = "scene_adapter")]
//! # fn main() {
//! use kurbo::{Point, Rect, Size};
//! use understory_dropzone::adapters::scene::{ListRenderer, SceneHost};
//! use understory_dropzone::{DragEngine, Entry, Item, Notification, PointerButton, ZoneOptions};
//! use understory_scene::{FlowLayout, LocalNode, NodeId, Scene};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Card(u32);
//!
//! impl Item for Card {
//!     type Id = u32;
//!     fn id(&self) -> u32 {
//!         self.0
//!     }
//! }
//!
//! let row = |_: &Card| LocalNode { bounds: Rect::new(0.0, 0.0, 200.0, 50.0), ..Default::default() };
//!
//! let mut host = SceneHost::new(Scene::new(Size::new(800.0, 600.0)));
//! let root = host.scene.root();
//! let zone = host.scene.insert(
//!     root,
//!     LocalNode { bounds: Rect::new(0.0, 0.0, 200.0, 300.0), ..Default::default() },
//! );
//! host.scene.set_layout(zone, Some(FlowLayout::column()));
//!
//! let mut lists = ListRenderer::new();
//! let items: Vec<Entry<Card>> = (1..=3).map(|i| Entry::Item(Card(i))).collect();
//! let nodes = lists.render(&mut host.scene, zone, &items, row);
//!
//! let mut engine: DragEngine<NodeId, Card> = DragEngine::default();
//! engine.configure(&mut host, zone, ZoneOptions::with_entries(items));
//!
//! // Press on the first card and drag it past the last one.
//! engine
//!     .pointer_down(&host, zone, nodes[0], Point::new(100.0, 25.0), PointerButton::Primary)
//!     .unwrap();
//! let mut notes = engine.pointer_move(&mut host, 0, Point::new(100.0, 30.0));
//! notes.extend(engine.pointer_move(&mut host, 0, Point::new(100.0, 140.0)));
//! notes.extend(engine.advance(&mut host, 0));
//!
//! // Render every consider and hand the new list back to the engine.
//! for note in &notes {
//!     let event = note.event();
//!     lists.render(&mut host.scene, event.zone, &event.items, row);
//!     engine.configure(&mut host, event.zone, ZoneOptions::with_entries(event.items.clone()));
//! }
//!
//! let drop = engine.pointer_up(&mut host, 1000);
//! let Some(Notification::Finalize(done)) = drop.last() else { panic!("expected a finalize") };
//! assert_eq!(done.items_without_shadow(), [Card(2), Card(3), Card(1)]);
//! # }
//! # #[cfg(not(feature = "scene_adapter"))]
//! # fn main() {}
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo.
//! - `libm`: `no_std` math for Kurbo.
//! - `serde`: serialize and deserialize [`EngineOptions`].
//! - `scene_adapter`: a host over Understory Scene, in `adapters::scene`.
//!
//! This crate is `no_std` and uses `alloc`.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod adapters;
mod engine;
mod error;
pub mod geometry;
pub mod host;
mod keyboard;
pub mod observer;
mod options;
mod registry;
pub mod resolver;
pub mod scheduler;
pub mod scroller;
mod types;

pub use engine::{DragEngine, DragSession, DragState};
pub use error::DndError;
pub use keyboard::{Key, KeyboardSession};
pub use options::{
    DEFAULT_DROP_TARGET_OUTLINE, DEFAULT_ZONE_TYPE, DropTargetStyle, EngineOptions, TransformHook,
    ZoneFlags, ZoneOptions,
};
pub use registry::{Registry, ZoneConfig};
pub use types::{
    DragInfo, ElementTransform, Entry, IndexResult, Item, Notification, PointerButton,
    ScrollMetrics, Source, TransformMatrix, Trigger, ZoneEvent,
};

#[cfg(test)]
mod tests;
