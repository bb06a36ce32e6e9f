// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core value types: items and list entries, index results, and the notifications the engine
//! hands back to the host.

use alloc::vec::Vec;
use core::fmt::{self, Debug};

use kurbo::{Size, Vec2};

/// A host-owned list record.
///
/// The engine clones items when it builds proposed orderings. It never mutates them.
pub trait Item: Clone {
    /// Stable unique identifier of the record.
    type Id: Clone + Eq + Debug;

    /// Identifier of this record.
    fn id(&self) -> Self::Id;
}

/// An entry of a zone's list: a real item or the placeholder of the item being dragged.
///
/// The shadow carries a copy of the dragged item's data and reports the real item's identifier,
/// so host lookups by id keep working while the original node is detached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry<T> {
    /// A regular item.
    Item(T),
    /// The placeholder of the dragged item.
    Shadow(T),
}

impl<T> Entry<T> {
    /// Returns true for the drag placeholder.
    pub fn is_shadow(&self) -> bool {
        matches!(self, Self::Shadow(_))
    }

    /// The item data, regardless of the entry kind.
    pub fn data(&self) -> &T {
        match self {
            Self::Item(t) | Self::Shadow(t) => t,
        }
    }

    /// Unwraps the item data.
    pub fn into_data(self) -> T {
        match self {
            Self::Item(t) | Self::Shadow(t) => t,
        }
    }
}

impl<T: Item> Entry<T> {
    /// Identifier of the underlying item.
    pub fn id(&self) -> T::Id {
        self.data().id()
    }
}

/// Where a dragged element would land in a zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IndexResult {
    /// The would-be insertion index, `0..=child_count`.
    pub index: usize,
    /// False when the point is directly over the child at `index`; true when `index` was
    /// chosen as the nearest slot.
    pub is_proximity_based: bool,
}

/// Why a notification was raised.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// A drag started in this zone.
    DragStarted,
    /// The dragged item entered this zone.
    DraggedEntered,
    /// The dragged item entered another zone and its placeholder left this one.
    DraggedEnteredAnother,
    /// The dragged item moved to another index of this zone.
    DraggedOverIndex,
    /// The dragged item left this zone.
    DraggedLeft,
    /// The dragged item left every zone; its placeholder returned to its origin.
    DraggedLeftAll,
    /// A keyboard drag stopped.
    DragStopped,
    /// The item was dropped into this zone.
    DroppedIntoZone,
    /// The item was dropped into another zone and is permanently gone from this one.
    DroppedIntoAnother,
    /// The item was dropped outside of every zone and returned to its origin.
    DroppedOutsideOfAny,
}

impl Trigger {
    /// Wire name of the trigger.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DragStarted => "dragStarted",
            Self::DraggedEntered => "draggedEntered",
            Self::DraggedEnteredAnother => "draggedEnteredAnother",
            Self::DraggedOverIndex => "draggedOverIndex",
            Self::DraggedLeft => "draggedLeft",
            Self::DraggedLeftAll => "draggedLeftAll",
            Self::DragStopped => "dragStopped",
            Self::DroppedIntoZone => "droppedIntoZone",
            Self::DroppedIntoAnother => "droppedIntoAnother",
            Self::DroppedOutsideOfAny => "droppedOutsideOfAny",
        }
    }

    /// Returns true for the triggers that accompany a finalize notification.
    pub const fn is_drop(self) -> bool {
        matches!(
            self,
            Self::DroppedIntoZone | Self::DroppedIntoAnother | Self::DroppedOutsideOfAny
        )
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input path that produced a notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// Mouse, pen, or touch.
    Pointer,
    /// Keyboard.
    Keyboard,
}

impl Source {
    /// Wire name of the source.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::Keyboard => "keyboard",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to every notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragInfo<Id> {
    /// Why the notification was raised.
    pub trigger: Trigger,
    /// Identifier of the dragged item.
    pub id: Id,
    /// Input path.
    pub source: Source,
}

/// A proposed or final ordering for one zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneEvent<N, T: Item> {
    /// The zone whose list changed.
    pub zone: N,
    /// The zone's full list. During a pointer drag exactly one entry across all zones is a
    /// [`Entry::Shadow`]. Finalize lists never contain a shadow.
    pub items: Vec<Entry<T>>,
    /// Trigger, item id, and source.
    pub info: DragInfo<T::Id>,
}

impl<N, T: Item> ZoneEvent<N, T> {
    /// The list as plain items, dropping the placeholder.
    pub fn items_without_shadow(&self) -> Vec<T> {
        self.items
            .iter()
            .filter(|e| !e.is_shadow())
            .map(|e| e.data().clone())
            .collect()
    }
}

/// What the engine asks the host to render or commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification<N, T: Item> {
    /// Provisional reorder while dragging.
    Consider(ZoneEvent<N, T>),
    /// Commit on drop.
    Finalize(ZoneEvent<N, T>),
}

impl<N: Copy, T: Item> Notification<N, T> {
    /// The zone the notification is addressed to.
    pub fn zone(&self) -> N {
        self.event().zone
    }

    /// The payload.
    pub fn event(&self) -> &ZoneEvent<N, T> {
        match self {
            Self::Consider(e) | Self::Finalize(e) => e,
        }
    }

    /// Returns true for [`Notification::Finalize`].
    pub fn is_finalize(&self) -> bool {
        matches!(self, Self::Finalize(_))
    }
}

/// Pointer button of a press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Left mouse button, pen contact, or touch.
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button.
    Auxiliary,
    /// Any other button.
    Other(u16),
}

/// An element's own transform matrix, as reported by the host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TransformMatrix {
    /// A 2D affine matrix `[a, b, c, d, e, f]`, mapping `(x, y)` to
    /// `(a·x + c·y + e, b·x + d·y + f)`.
    Matrix([f64; 6]),
    /// A 4×4 matrix in column-major order.
    Matrix3d([f64; 16]),
}

/// An element's own transform and where it is anchored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ElementTransform {
    /// The matrix.
    pub matrix: TransformMatrix,
    /// Transform origin, relative to the top-left of the untransformed box.
    pub origin: Vec2,
}

/// Scroll state of an overflow-scrollable element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollMetrics {
    /// Current scroll offset.
    pub offset: Vec2,
    /// Full size of the scrollable content.
    pub scroll_size: Size,
    /// Size of the visible area.
    pub client_size: Size,
}

impl ScrollMetrics {
    /// Content is taller than the visible area.
    pub fn overflows_y(&self) -> bool {
        self.scroll_size.height > self.client_size.height
    }

    /// Content is wider than the visible area.
    pub fn overflows_x(&self) -> bool {
        self.scroll_size.width > self.client_size.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Clone, Debug, PartialEq)]
    struct Card(u32);

    impl Item for Card {
        type Id = u32;
        fn id(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn shadow_reports_the_real_id() {
        let e = Entry::Shadow(Card(7));
        assert!(e.is_shadow());
        assert_eq!(e.id(), 7);
        assert_eq!(e.into_data(), Card(7));
    }

    #[test]
    fn trigger_wire_names() {
        assert_eq!(Trigger::DraggedEnteredAnother.as_str(), "draggedEnteredAnother");
        assert_eq!(Trigger::DroppedOutsideOfAny.to_string(), "droppedOutsideOfAny");
        assert!(Trigger::DroppedIntoAnother.is_drop());
        assert!(!Trigger::DragStopped.is_drop());
        assert_eq!(Source::Keyboard.to_string(), "keyboard");
    }

    #[test]
    fn items_without_shadow_skips_the_placeholder() {
        let ev: ZoneEvent<u8, Card> = ZoneEvent {
            zone: 1,
            items: vec![Entry::Item(Card(1)), Entry::Shadow(Card(2)), Entry::Item(Card(3))],
            info: DragInfo {
                trigger: Trigger::DraggedOverIndex,
                id: 2,
                source: Source::Pointer,
            },
        };
        assert_eq!(ev.items_without_shadow(), vec![Card(1), Card(3)]);
        let n = Notification::Consider(ev);
        assert_eq!(n.zone(), 1);
        assert!(!n.is_finalize());
    }
}
