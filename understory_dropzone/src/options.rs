// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine-wide tuning and per-zone configuration.

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Affine;

use crate::types::Entry;

/// Zone type used when a zone does not name one.
pub const DEFAULT_ZONE_TYPE: &str = "--any--";

/// Outline applied to zones that accept the dragged item, unless the zone overrides it.
pub const DEFAULT_DROP_TARGET_OUTLINE: &str = "rgba(255, 255, 102, 0.7) solid 2px";

/// Engine-wide tuning. The defaults are the values the engine is designed around.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineOptions {
    /// Pointer travel (on either axis) before a press becomes a drag.
    pub min_movement_px: f64,
    /// Lower bound of the observation interval, in milliseconds.
    pub min_observation_interval_ms: u64,
    /// Multiplier applied to the observation interval so a tick never lands mid-animation.
    pub observation_interval_factor: f64,
    /// Center travel (on both axes) below which an observation tick is skipped.
    pub tolerance_px: f64,
    /// Width of the auto-scroll trigger band along each edge of a scroll container.
    pub scroll_margin_px: f64,
    /// Interval between auto-scroll steps, in milliseconds.
    pub scroll_frame_ms: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            min_movement_px: 3.0,
            min_observation_interval_ms: 100,
            observation_interval_factor: 1.07,
            tolerance_px: 10.0,
            scroll_margin_px: 30.0,
            scroll_frame_ms: 16,
        }
    }
}

impl EngineOptions {
    /// Observation interval for zones with the given flip durations.
    pub fn observation_interval_ms(&self, flip_durations_ms: impl IntoIterator<Item = u64>) -> u64 {
        let base = flip_durations_ms
            .into_iter()
            .fold(self.min_observation_interval_ms, u64::max);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "Intervals are small, non-negative millisecond counts."
        )]
        let scaled = (base as f64 * self.observation_interval_factor) as u64;
        scaled.max(1)
    }
}

bitflags::bitflags! {
    /// Per-zone behavior switches.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ZoneFlags: u8 {
        /// Items of this zone cannot be picked up.
        const DRAG_DISABLED = 0b0000_0001;
        /// Items dragged from other zones cannot be dropped here.
        const DROP_FROM_OTHERS_DISABLED = 0b0000_0010;
    }
}

/// Visual hint applied to zones that accept the dragged item.
///
/// A list of CSS-like `(property, value)` pairs; the host's styler decides what they mean.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropTargetStyle {
    /// Style declarations, applied in order.
    pub properties: Vec<(String, String)>,
}

impl DropTargetStyle {
    /// A style with no declarations.
    pub fn none() -> Self {
        Self {
            properties: Vec::new(),
        }
    }

    /// A style consisting of a single outline declaration.
    pub fn outline(value: &str) -> Self {
        Self {
            properties: alloc::vec![("outline".to_owned(), value.to_owned())],
        }
    }

    /// Value of a declared property.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }
}

impl Default for DropTargetStyle {
    fn default() -> Self {
        Self::outline(DEFAULT_DROP_TARGET_OUTLINE)
    }
}

/// Hook producing an extra transform for the dragged visual while it hovers a zone.
///
/// Receives the dragged item and the index of its placeholder in the zone.
pub type TransformHook<T> = Box<dyn Fn(&T, usize) -> Affine>;

/// Configuration of one zone, as passed to [`DragEngine::configure`](crate::DragEngine::configure).
pub struct ZoneOptions<T> {
    /// The zone's current list, as rendered by the host.
    pub items: Vec<Entry<T>>,
    /// Compatibility tag; items only move between zones of the same type.
    /// `None` selects [`DEFAULT_ZONE_TYPE`].
    pub zone_type: Option<String>,
    /// Length of the host's reorder animation, in milliseconds.
    pub flip_duration_ms: u64,
    /// Behavior switches.
    pub flags: ZoneFlags,
    /// Hint applied while the zone accepts the dragged item.
    pub drop_target_style: DropTargetStyle,
    /// Extra transform for the dragged visual while its placeholder is in this zone.
    pub transform_dragged: Option<TransformHook<T>>,
}

impl<T> ZoneOptions<T> {
    /// Options for a list of plain items with every other setting at its default.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self::with_entries(items.into_iter().map(Entry::Item))
    }

    /// Options for a list that may already contain the drag placeholder.
    pub fn with_entries(entries: impl IntoIterator<Item = Entry<T>>) -> Self {
        Self {
            items: entries.into_iter().collect(),
            zone_type: None,
            flip_duration_ms: 0,
            flags: ZoneFlags::empty(),
            drop_target_style: DropTargetStyle::default(),
            transform_dragged: None,
        }
    }

    /// Sets the zone type.
    pub fn zone_type(mut self, zone_type: &str) -> Self {
        self.zone_type = Some(zone_type.to_owned());
        self
    }

    /// Sets the flip duration.
    pub fn flip_duration_ms(mut self, ms: u64) -> Self {
        self.flip_duration_ms = ms;
        self
    }

    /// Sets the behavior switches.
    pub fn flags(mut self, flags: ZoneFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the drop-target hint.
    pub fn drop_target_style(mut self, style: DropTargetStyle) -> Self {
        self.drop_target_style = style;
        self
    }

    /// Sets the dragged-visual transform hook.
    pub fn transform_dragged(mut self, hook: impl Fn(&T, usize) -> Affine + 'static) -> Self {
        self.transform_dragged = Some(Box::new(hook));
        self
    }
}

impl<T: fmt::Debug> fmt::Debug for ZoneOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoneOptions")
            .field("items", &self.items)
            .field("zone_type", &self.zone_type)
            .field("flip_duration_ms", &self.flip_duration_ms)
            .field("flags", &self.flags)
            .field("drop_target_style", &self.drop_target_style)
            .field("transform_dragged", &self.transform_dragged.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_interval_is_floored_and_scaled() {
        let o = EngineOptions::default();
        assert_eq!(o.observation_interval_ms([0]), 107);
        assert_eq!(o.observation_interval_ms([50, 80]), 107);
        assert_eq!(o.observation_interval_ms([0, 300]), 321);
    }

    #[test]
    fn default_style_is_the_outline() {
        let s = DropTargetStyle::default();
        assert_eq!(s.get("outline"), Some(DEFAULT_DROP_TARGET_OUTLINE));
        assert_eq!(DropTargetStyle::none().get("outline"), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn options_round_trip_through_json() {
        let o = EngineOptions {
            scroll_margin_px: 48.0,
            ..EngineOptions::default()
        };
        let json = serde_json::to_string(&o).unwrap();
        let back: EngineOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, o);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_take_defaults() {
        let o: EngineOptions = serde_json::from_str(r#"{ "tolerance_px": 4.0 }"#).unwrap();
        assert_eq!(o.tolerance_px, 4.0);
        assert_eq!(o.min_movement_px, 3.0);
    }
}
