// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recoverable caller errors.
//!
//! Contract breaches (a second drag session, an active-zone count underflow) are not errors:
//! they panic.

use alloc::string::String;

/// Errors returned by [`DragEngine`](crate::DragEngine) and [`Registry`](crate::Registry).
///
/// Node handles are carried in their `Debug` form so the error stays independent of the host's
/// node type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DndError {
    /// The zone was never registered, or has been unregistered.
    #[error("drop zone {zone} is not registered")]
    UnknownZone {
        /// The zone handle.
        zone: String,
    },
    /// The node is not a child of the zone it was reported for.
    #[error("node {node} is not an item of drop zone {zone}")]
    UnknownItemNode {
        /// The zone handle.
        zone: String,
        /// The node handle.
        node: String,
    },
    /// The zone takes part in the active drag and cannot be unregistered.
    #[error("drop zone {zone} is in use by the active drag")]
    ZoneInUse {
        /// The zone handle.
        zone: String,
    },
    /// Engine options cannot change while a drag is in progress.
    #[error("a drag session is active")]
    SessionActive,
}

impl DndError {
    pub(crate) fn unknown_zone(zone: impl core::fmt::Debug) -> Self {
        Self::UnknownZone {
            zone: alloc::format!("{zone:?}"),
        }
    }

    pub(crate) fn unknown_item_node(zone: impl core::fmt::Debug, node: impl core::fmt::Debug) -> Self {
        Self::UnknownItemNode {
            zone: alloc::format!("{zone:?}"),
            node: alloc::format!("{node:?}"),
        }
    }

    pub(crate) fn zone_in_use(zone: impl core::fmt::Debug) -> Self {
        Self::ZoneInUse {
            zone: alloc::format!("{zone:?}"),
        }
    }
}
