// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zone registration: which zones exist, their configuration, and which types they belong to.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use log::debug;

use crate::error::DndError;
use crate::options::{DEFAULT_ZONE_TYPE, DropTargetStyle, TransformHook, ZoneFlags, ZoneOptions};
use crate::types::Entry;

/// The engine's view of one zone.
pub struct ZoneConfig<T> {
    /// The zone's list, including the placeholder when the drag is over it.
    pub items: Vec<Entry<T>>,
    /// Compatibility tag.
    pub zone_type: String,
    /// Length of the host's reorder animation, in milliseconds.
    pub flip_duration_ms: u64,
    /// Behavior switches.
    pub flags: ZoneFlags,
    /// Hint applied while the zone accepts the dragged item.
    pub drop_target_style: DropTargetStyle,
    /// Extra transform for the dragged visual.
    pub transform_dragged: Option<TransformHook<T>>,
}

impl<T> ZoneConfig<T> {
    /// Returns true if items of this zone can be picked up.
    pub fn drag_enabled(&self) -> bool {
        !self.flags.contains(ZoneFlags::DRAG_DISABLED)
    }

    /// Returns true if items from other zones may be dropped here.
    pub fn accepts_others(&self) -> bool {
        !self.flags.contains(ZoneFlags::DROP_FROM_OTHERS_DISABLED)
    }

    /// Index of the placeholder in this zone's list.
    pub fn shadow_index(&self) -> Option<usize> {
        self.items.iter().position(Entry::is_shadow)
    }
}

impl<T> From<ZoneOptions<T>> for ZoneConfig<T> {
    fn from(options: ZoneOptions<T>) -> Self {
        Self {
            items: options.items,
            zone_type: options
                .zone_type
                .unwrap_or_else(|| String::from(DEFAULT_ZONE_TYPE)),
            flip_duration_ms: options.flip_duration_ms,
            flags: options.flags,
            drop_target_style: options.drop_target_style,
            transform_dragged: options.transform_dragged,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ZoneConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoneConfig")
            .field("items", &self.items)
            .field("zone_type", &self.zone_type)
            .field("flip_duration_ms", &self.flip_duration_ms)
            .field("flags", &self.flags)
            .field("drop_target_style", &self.drop_target_style)
            .field("transform_dragged", &self.transform_dragged.is_some())
            .finish()
    }
}

/// Registered zones grouped by type.
///
/// A zone belongs to exactly one type at a time. Registration is explicit: a zone's
/// configuration lives exactly as long as its registration.
pub struct Registry<N, T> {
    types: BTreeMap<String, BTreeSet<N>>,
    configs: BTreeMap<N, ZoneConfig<T>>,
    active: usize,
}

impl<N, T> Default for Registry<N, T> {
    fn default() -> Self {
        Self {
            types: BTreeMap::new(),
            configs: BTreeMap::new(),
            active: 0,
        }
    }
}

impl<N: fmt::Debug, T: fmt::Debug> fmt::Debug for Registry<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("types", &self.types)
            .field("configs", &self.configs)
            .field("active", &self.active)
            .finish()
    }
}

impl<N: Copy + Ord + fmt::Debug, T> Registry<N, T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `zone` with `config`, replacing any previous configuration.
    ///
    /// A change of type moves the zone to the new type. Returns the previous configuration.
    pub fn register(&mut self, zone: N, config: ZoneConfig<T>) -> Option<ZoneConfig<T>> {
        let previous = self.configs.remove(&zone);
        if let Some(prev) = &previous
            && prev.zone_type != config.zone_type
        {
            debug!(
                "{zone:?} changes type from {:?} to {:?}",
                prev.zone_type, config.zone_type
            );
            self.remove_from_type(zone, &prev.zone_type);
        }
        if self
            .types
            .entry(config.zone_type.clone())
            .or_default()
            .insert(zone)
        {
            self.active += 1;
            debug!(
                "registered {zone:?} as {:?} ({} active)",
                config.zone_type, self.active
            );
        }
        self.configs.insert(zone, config);
        previous
    }

    /// Remove `zone` and return its configuration.
    pub fn unregister(&mut self, zone: N) -> Result<ZoneConfig<T>, DndError> {
        let config = self
            .configs
            .remove(&zone)
            .ok_or_else(|| DndError::unknown_zone(zone))?;
        self.remove_from_type(zone, &config.zone_type);
        debug!("unregistered {zone:?} ({} active)", self.active);
        Ok(config)
    }

    /// Returns true if `zone` is registered.
    pub fn contains(&self, zone: N) -> bool {
        self.configs.contains_key(&zone)
    }

    /// Configuration of `zone`.
    pub fn config(&self, zone: N) -> Option<&ZoneConfig<T>> {
        self.configs.get(&zone)
    }

    /// Mutable configuration of `zone`.
    pub fn config_mut(&mut self, zone: N) -> Option<&mut ZoneConfig<T>> {
        self.configs.get_mut(&zone)
    }

    /// Zones registered under `zone_type`, in handle order.
    pub fn zones_of_type(&self, zone_type: &str) -> Vec<N> {
        self.types
            .get(zone_type)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Every registered zone, in handle order.
    pub fn zones(&self) -> impl Iterator<Item = N> + '_ {
        self.configs.keys().copied()
    }

    /// Number of registered zones.
    pub fn active_count(&self) -> usize {
        self.active
    }

    fn remove_from_type(&mut self, zone: N, zone_type: &str) {
        let Some(set) = self.types.get_mut(zone_type) else {
            return;
        };
        if set.remove(&zone) {
            self.active = self
                .active
                .checked_sub(1)
                .expect("active zone count underflow");
        }
        if set.is_empty() {
            self.types.remove(zone_type);
        }
    }
}
