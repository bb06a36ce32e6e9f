// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard dragging.
//!
//! A simpler input path than the pointer one: no floating visual, no placeholder, no observer.
//! Enter or Space on an item starts dragging it, arrow keys swap it with its neighbours, and
//! focusing another compatible zone moves it there. Every move is committed at once with a
//! finalize. Escape stops the drag wherever focus is; Enter or Space on the item and clicks
//! outside any item stop it too.
//!
//! Keyboard drags share the single-session guard with pointer drags.

use alloc::string::String;
use alloc::vec::Vec;

use log::{debug, trace};

use crate::engine::{DragEngine, Phase, zone_event};
use crate::error::DndError;
use crate::host::Host;
use crate::types::{Entry, Item, Notification, Source, Trigger};

/// Keys the keyboard path reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Start or stop dragging.
    Enter,
    /// Start or stop dragging.
    Space,
    /// Stop dragging.
    Escape,
    /// Move towards the front of the list.
    ArrowUp,
    /// Move towards the back of the list.
    ArrowDown,
    /// Move towards the front of the list.
    ArrowLeft,
    /// Move towards the back of the list.
    ArrowRight,
}

/// The single active keyboard drag.
#[derive(Clone, Debug)]
pub struct KeyboardSession<N, Id> {
    pub(crate) item_id: Id,
    pub(crate) zone_type: String,
    pub(crate) zone: N,
}

impl<N: Copy, Id> KeyboardSession<N, Id> {
    /// Identifier of the dragged item.
    pub fn item_id(&self) -> &Id {
        &self.item_id
    }

    /// Zone currently holding the item.
    pub fn zone(&self) -> N {
        self.zone
    }

    /// Type of the dragged item.
    pub fn zone_type(&self) -> &str {
        &self.zone_type
    }
}

impl<N, T> DragEngine<N, T>
where
    N: Copy + Ord + core::fmt::Debug,
    T: Item,
{
    /// The active keyboard drag.
    pub fn keyboard_session(&self) -> Option<&KeyboardSession<N, T::Id>> {
        match &self.phase {
            Phase::Keyboard(k) => Some(k),
            _ => None,
        }
    }

    /// A key press on `node`, an item of `zone`.
    pub fn key_down<H>(
        &mut self,
        host: &mut H,
        zone: N,
        node: N,
        key: Key,
    ) -> Result<Vec<Notification<N, T>>, DndError>
    where
        H: Host<Node = N> + ?Sized,
    {
        let config = self
            .registry
            .config(zone)
            .ok_or_else(|| DndError::unknown_zone(zone))?;
        let index = host
            .children(zone)
            .iter()
            .position(|c| *c == node)
            .ok_or_else(|| DndError::unknown_item_node(zone, node))?;
        if !config.drag_enabled() {
            trace!("{zone:?} is drag-disabled; ignoring {key:?}");
            return Ok(Vec::new());
        }
        let dragging = matches!(self.phase, Phase::Keyboard(_));
        Ok(match key {
            Key::Enter | Key::Space if dragging => self.stop_keyboard_drag(host, true),
            Key::Enter | Key::Space => self.start_keyboard_drag(host, zone, index),
            Key::Escape if dragging => self.stop_keyboard_drag(host, true),
            Key::ArrowDown | Key::ArrowRight if dragging => self.swap(zone, index, index + 1),
            Key::ArrowUp | Key::ArrowLeft if dragging && index > 0 => {
                self.swap(zone, index, index - 1)
            }
            _ => Vec::new(),
        })
    }

    /// Focus moved to `zone` while a keyboard drag may be active.
    ///
    /// Moves the dragged item into a compatible zone: to its end when the zone lies above or to
    /// the left of the current one, to its beginning otherwise.
    pub fn focus_zone<H>(&mut self, host: &mut H, zone: N) -> Result<Vec<Notification<N, T>>, DndError>
    where
        H: Host<Node = N> + ?Sized,
    {
        let target = self
            .registry
            .config(zone)
            .ok_or_else(|| DndError::unknown_zone(zone))?;
        let Phase::Keyboard(session) = &mut self.phase else {
            return Ok(Vec::new());
        };
        if session.zone == zone {
            return Ok(Vec::new());
        }
        if target.zone_type != session.zone_type || !target.accepts_others() {
            trace!("{zone:?} does not accept {:?}", session.item_id);
            return Ok(Vec::new());
        }
        let from = session.zone;
        let goes_to_end = match (host.client_rect(zone), host.client_rect(from)) {
            (Some(to), Some(current)) => to.y0 < current.y0 || to.x0 < current.x0,
            _ => true,
        };

        let Some(source) = self.registry.config_mut(from) else {
            return Ok(Vec::new());
        };
        let Some(pos) = source.items.iter().position(|e| e.id() == session.item_id) else {
            debug!("{:?} is no longer in {from:?}", session.item_id);
            return Ok(Vec::new());
        };
        let moved = source.items.remove(pos);
        let from_items = source.items.clone();

        let Some(target) = self.registry.config_mut(zone) else {
            return Ok(Vec::new());
        };
        let moved = Entry::Item(moved.into_data());
        if goes_to_end {
            target.items.push(moved);
        } else {
            target.items.insert(0, moved);
        }
        debug!(
            "moved {:?} from {from:?} to the {} of {zone:?}",
            session.item_id,
            if goes_to_end { "end" } else { "beginning" }
        );
        let id = session.item_id.clone();
        session.zone = zone;
        Ok(alloc::vec![
            Notification::Finalize(zone_event(
                from,
                from_items,
                Trigger::DroppedIntoAnother,
                id.clone(),
                Source::Keyboard,
            )),
            Notification::Finalize(zone_event(
                zone,
                target.items.clone(),
                Trigger::DroppedIntoZone,
                id,
                Source::Keyboard,
            )),
        ])
    }

    /// Escape pressed anywhere, not necessarily on an item. Stops a keyboard drag.
    ///
    /// Hosts route window-level Escape here; [`key_down`](Self::key_down) only sees keys on
    /// items of registered zones.
    pub fn escape<H>(&mut self, host: &mut H) -> Vec<Notification<N, T>>
    where
        H: Host<Node = N> + ?Sized,
    {
        if matches!(self.phase, Phase::Keyboard(_)) {
            debug!("escape pressed outside of any draggable");
            self.stop_keyboard_drag(host, true)
        } else {
            Vec::new()
        }
    }

    /// A click landed outside of every item. Stops a keyboard drag.
    pub fn click_outside<H>(&mut self, host: &mut H) -> Vec<Notification<N, T>>
    where
        H: Host<Node = N> + ?Sized,
    {
        if matches!(self.phase, Phase::Keyboard(_)) {
            debug!("clicked outside of any draggable");
            self.stop_keyboard_drag(host, true)
        } else {
            Vec::new()
        }
    }

    /// A click on `node`, an item of `zone`, during a keyboard drag switches the drag to it.
    pub fn click_item<H>(
        &mut self,
        host: &mut H,
        zone: N,
        node: N,
    ) -> Result<Vec<Notification<N, T>>, DndError>
    where
        H: Host<Node = N> + ?Sized,
    {
        let Phase::Keyboard(session) = &self.phase else {
            return Ok(Vec::new());
        };
        let config = self
            .registry
            .config(zone)
            .ok_or_else(|| DndError::unknown_zone(zone))?;
        let index = host
            .children(zone)
            .iter()
            .position(|c| *c == node)
            .ok_or_else(|| DndError::unknown_item_node(zone, node))?;
        if config.items.get(index).is_some_and(|e| e.id() == session.item_id) {
            return Ok(Vec::new());
        }
        self.stop_keyboard_drag(host, false);
        Ok(self.start_keyboard_drag(host, zone, index))
    }

    fn start_keyboard_drag<H>(&mut self, host: &mut H, zone: N, index: usize) -> Vec<Notification<N, T>>
    where
        H: Host<Node = N> + ?Sized,
    {
        if !matches!(self.phase, Phase::Idle) {
            debug!("cannot start a keyboard drag while another session is active");
            return Vec::new();
        }
        let Some(config) = self.registry.config(zone) else {
            return Vec::new();
        };
        let Some(entry) = config.items.get(index) else {
            debug!("list of {zone:?} has no entry for child {index}");
            return Vec::new();
        };
        let id = entry.id();
        let zone_type = config.zone_type.clone();
        let items = config.items.clone();
        debug!("keyboard drag start: {id:?} in {zone:?}");
        for z in self.registry.zones_of_type(&zone_type) {
            if let Some(c) = self.registry.config(z)
                && (z == zone || c.accepts_others())
            {
                host.style_active_zone(z, &c.drop_target_style);
            }
        }
        self.phase = Phase::Keyboard(KeyboardSession {
            item_id: id.clone(),
            zone_type,
            zone,
        });
        alloc::vec![Notification::Consider(zone_event(
            zone,
            items,
            Trigger::DragStarted,
            id,
            Source::Keyboard,
        ))]
    }

    fn stop_keyboard_drag<H>(&mut self, host: &mut H, notify: bool) -> Vec<Notification<N, T>>
    where
        H: Host<Node = N> + ?Sized,
    {
        let session = match core::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Keyboard(session) => session,
            other => {
                self.phase = other;
                return Vec::new();
            }
        };
        debug!("keyboard drag of {:?} stopped", session.item_id);
        for z in self.registry.zones_of_type(&session.zone_type) {
            if let Some(c) = self.registry.config(z) {
                host.style_inactive_zone(z, &c.drop_target_style);
            }
        }
        if !notify {
            return Vec::new();
        }
        let Some(config) = self.registry.config(session.zone) else {
            return Vec::new();
        };
        alloc::vec![Notification::Consider(zone_event(
            session.zone,
            config.items.clone(),
            Trigger::DragStopped,
            session.item_id,
            Source::Keyboard,
        ))]
    }

    fn swap(&mut self, zone: N, from: usize, to: usize) -> Vec<Notification<N, T>> {
        let Phase::Keyboard(session) = &self.phase else {
            return Vec::new();
        };
        let Some(config) = self.registry.config_mut(zone) else {
            return Vec::new();
        };
        if from.max(to) >= config.items.len() {
            return Vec::new();
        }
        config.items.swap(from, to);
        trace!("swapped {zone:?}[{from}] and [{to}]");
        alloc::vec![Notification::Finalize(zone_event(
            zone,
            config.items.clone(),
            Trigger::DroppedIntoZone,
            session.item_id.clone(),
            Source::Keyboard,
        ))]
    }
}
