// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag session state machine.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──press──▶ Pending ──moved ≥ threshold──▶ Dragging ──release / left document──▶ Finalizing
//!   ▲                │                                                                    │
//!   └────release─────┘◀────────────────────────── drop animation settled ─────────────────┘
//! ```
//!
//! - A primary press on an item of a registered zone records the start point. Nothing is created
//!   until the pointer has travelled [`EngineOptions::min_movement_px`] on either axis.
//! - Drag start replaces the item with its placeholder ([`Entry::Shadow`]) in the origin list,
//!   asks the host for a floating visual, highlights the zones that accept the item, starts the
//!   observer, and emits a `DragStarted` consider.
//! - While dragging, the observer's transitions move the placeholder between lists. The events
//!   of one tick are applied as a batch: all lists are updated first, then one consider is
//!   emitted per changed zone. At every consider, exactly one placeholder exists across the
//!   zones of the dragged type.
//! - Release (or leaving the document) lands the item where its placeholder is, or back home if
//!   it is over no zone. The landing zone gets a finalize; the origin gets a second one when it
//!   lost the item. Cleanup waits for the landing zone's flip duration.
//!
//! There is no cancel: a drop always lands somewhere.

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use kurbo::Point;
use log::{debug, trace, warn};

use crate::error::DndError;
use crate::host::Host;
use crate::keyboard::KeyboardSession;
use crate::observer::{LeftKind, ObserveOptions, Observer, ObserverEvent};
use crate::options::{EngineOptions, ZoneOptions};
use crate::registry::{Registry, ZoneConfig};
use crate::resolver::IndexResolver;
use crate::scheduler::{Scheduler, Task};
use crate::types::{
    DragInfo, Entry, Item, Notification, PointerButton, Source, Trigger, ZoneEvent,
};

/// Coarse state of the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragState {
    /// Nothing is happening.
    Idle,
    /// A press is waiting for the movement threshold.
    Pending,
    /// A pointer drag is in progress.
    Dragging,
    /// The drop animation is running.
    Finalizing,
    /// A keyboard drag is in progress.
    KeyboardDragging,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct PendingPress<N> {
    zone: N,
    node: N,
    start: Point,
}

/// The single active pointer drag.
#[derive(Clone, Debug)]
pub struct DragSession<N, T> {
    item: T,
    zone_type: String,
    origin_zone: N,
    origin_index: usize,
    original: N,
    dragged: N,
    start: Point,
    pointer: Point,
    over_zone: bool,
    landing: Option<N>,
}

impl<N: Copy, T> DragSession<N, T> {
    /// The dragged item.
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Type of the origin zone.
    pub fn zone_type(&self) -> &str {
        &self.zone_type
    }

    /// Zone the drag started in.
    pub fn origin_zone(&self) -> N {
        self.origin_zone
    }

    /// Index the item had in its origin zone.
    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    /// The pressed item element.
    pub fn original(&self) -> N {
        self.original
    }

    /// The floating visual.
    pub fn dragged(&self) -> N {
        self.dragged
    }

    /// Latest pointer position.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Returns true while the visual is over a zone that accepted the placeholder.
    pub fn is_over_zone(&self) -> bool {
        self.over_zone
    }

    /// Where the item landed, once dropped.
    pub fn landing_zone(&self) -> Option<N> {
        self.landing
    }
}

#[derive(Debug)]
pub(crate) enum Phase<N, T: Item> {
    Idle,
    Pending(PendingPress<N>),
    Dragging(DragSession<N, T>),
    Finalizing(DragSession<N, T>),
    Keyboard(KeyboardSession<N, T::Id>),
}

/// Zones whose consider is due at the end of a batch, in first-touched order, each with the
/// latest trigger.
struct Touched<N>(Vec<(N, Trigger)>);

impl<N: PartialEq> Touched<N> {
    fn touch(&mut self, zone: N, trigger: Trigger) {
        match self.0.iter_mut().find(|(z, _)| *z == zone) {
            Some(entry) => entry.1 = trigger,
            None => self.0.push((zone, trigger)),
        }
    }
}

/// Drag-and-drop engine for one host.
///
/// Owns the zone registry, the timer queue, and at most one drag session. All input arrives
/// through method calls; everything the host must render or commit comes back as
/// [`Notification`]s.
#[derive(Debug)]
pub struct DragEngine<N, T: Item> {
    pub(crate) options: EngineOptions,
    pub(crate) registry: Registry<N, T>,
    pub(crate) scheduler: Scheduler,
    resolver: IndexResolver<N>,
    observer: Observer<N>,
    pub(crate) phase: Phase<N, T>,
}

impl<N, T> Default for DragEngine<N, T>
where
    N: Copy + Ord + core::fmt::Debug,
    T: Item,
{
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl<N, T> DragEngine<N, T>
where
    N: Copy + Ord + core::fmt::Debug,
    T: Item,
{
    /// Create an idle engine.
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            registry: Registry::new(),
            scheduler: Scheduler::new(),
            resolver: IndexResolver::new(),
            observer: Observer::new(),
            phase: Phase::Idle,
        }
    }

    /// Engine-wide tuning.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Replace the engine-wide tuning. Only allowed while idle.
    pub fn set_options(&mut self, options: EngineOptions) -> Result<(), DndError> {
        if !matches!(self.phase, Phase::Idle) {
            return Err(DndError::SessionActive);
        }
        self.options = options;
        Ok(())
    }

    /// Registered zones and their current lists.
    pub fn registry(&self) -> &Registry<N, T> {
        &self.registry
    }

    /// Coarse state.
    pub fn state(&self) -> DragState {
        match self.phase {
            Phase::Idle => DragState::Idle,
            Phase::Pending(_) => DragState::Pending,
            Phase::Dragging(_) => DragState::Dragging,
            Phase::Finalizing(_) => DragState::Finalizing,
            Phase::Keyboard(_) => DragState::KeyboardDragging,
        }
    }

    /// The active pointer drag, while dragging or finalizing.
    pub fn session(&self) -> Option<&DragSession<N, T>> {
        match &self.phase {
            Phase::Dragging(s) | Phase::Finalizing(s) => Some(s),
            _ => None,
        }
    }

    /// Earliest time [`advance`](Self::advance) has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    /// Register or update a zone.
    ///
    /// Re-configuring during a drag restyles the zone when its hint or its
    /// [`DROP_FROM_OTHERS_DISABLED`](crate::ZoneFlags::DROP_FROM_OTHERS_DISABLED) flag changed, and
    /// morphs the floating visual toward the placeholder when the new list renders it.
    pub fn configure<H>(&mut self, host: &mut H, zone: N, options: ZoneOptions<T>)
    where
        H: Host<Node = N> + ?Sized,
    {
        let mut config = ZoneConfig::from(options);
        if let Phase::Dragging(session) = &self.phase {
            let holds_shadow = self
                .registry
                .config(zone)
                .is_some_and(|c| c.shadow_index().is_some());
            if !holds_shadow && config.shadow_index().is_some() {
                trace!("dropping stale placeholder from the list of {zone:?}");
                config.items.retain(|e| !e.is_shadow());
            }
            if let Some(previous) = self.registry.config(zone)
                && previous.zone_type == session.zone_type
            {
                restyle_live(host, zone, session.origin_zone, previous, &config);
            }
            if let Some(idx) = config.shadow_index()
                && let Some(&child) = host.children(zone).get(idx)
            {
                host.morph_dragged(session.dragged, child, session.pointer);
                if let Some(hook) = &config.transform_dragged {
                    host.transform_dragged(session.dragged, hook(&session.item, idx));
                }
            }
        }
        self.registry.register(zone, config);
    }

    /// Remove a zone.
    ///
    /// Fails with [`DndError::ZoneInUse`] for the origin zone and the zone holding the
    /// placeholder while a drag is active.
    pub fn unregister(&mut self, zone: N) -> Result<ZoneConfig<T>, DndError> {
        match &self.phase {
            Phase::Dragging(s) | Phase::Finalizing(s)
                if s.origin_zone == zone || s.landing == Some(zone) || self.shadow_in(zone) =>
            {
                return Err(DndError::zone_in_use(zone));
            }
            Phase::Keyboard(k) if k.zone == zone => return Err(DndError::zone_in_use(zone)),
            Phase::Pending(p) if p.zone == zone => {
                debug!("press on {zone:?} abandoned: zone unregistered");
                self.phase = Phase::Idle;
            }
            _ => {}
        }
        self.registry.unregister(zone)
    }

    /// A pointer press on `node`, an item of `zone`, at client position `pos`.
    ///
    /// Presses with another button, on a drag-disabled zone, or while any session is active are
    /// ignored.
    pub fn pointer_down<H>(
        &mut self,
        host: &H,
        zone: N,
        node: N,
        pos: Point,
        button: PointerButton,
    ) -> Result<(), DndError>
    where
        H: Host<Node = N> + ?Sized,
    {
        if button != PointerButton::Primary {
            trace!("ignoring {button:?} press");
            return Ok(());
        }
        if !matches!(self.phase, Phase::Idle) {
            debug!("cannot start a new drag before finalizing the previous one");
            return Ok(());
        }
        let config = self
            .registry
            .config(zone)
            .ok_or_else(|| DndError::unknown_zone(zone))?;
        if !config.drag_enabled() {
            trace!("{zone:?} is drag-disabled");
            return Ok(());
        }
        if !host.children(zone).contains(&node) {
            return Err(DndError::unknown_item_node(zone, node));
        }
        self.phase = Phase::Pending(PendingPress {
            zone,
            node,
            start: pos,
        });
        Ok(())
    }

    /// The pointer moved to client position `pos`.
    pub fn pointer_move<H>(&mut self, host: &mut H, now: u64, pos: Point) -> Vec<Notification<N, T>>
    where
        H: Host<Node = N> + ?Sized,
    {
        match &mut self.phase {
            Phase::Pending(press) => {
                let press = *press;
                let travel = pos - press.start;
                let threshold = self.options.min_movement_px;
                if travel.x.abs() >= threshold || travel.y.abs() >= threshold {
                    return self.start_drag(host, now, press, pos);
                }
                Vec::new()
            }
            Phase::Dragging(session) => {
                session.pointer = pos;
                host.move_dragged(session.dragged, pos - session.start);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// The pointer was released.
    pub fn pointer_up<H>(&mut self, host: &mut H, now: u64) -> Vec<Notification<N, T>>
    where
        H: Host<Node = N> + ?Sized,
    {
        match self.phase {
            Phase::Pending(_) => {
                trace!("released before the drag threshold");
                self.phase = Phase::Idle;
                Vec::new()
            }
            Phase::Dragging(_) => self.drop_dragged(host, now, Vec::new()),
            _ => Vec::new(),
        }
    }

    /// Run every task due at `now`: observer ticks, auto-scroll frames, and drop cleanup.
    pub fn advance<H>(&mut self, host: &mut H, now: u64) -> Vec<Notification<N, T>>
    where
        H: Host<Node = N> + ?Sized,
    {
        let mut out = Vec::new();
        while let Some(task) = self.scheduler.pop_due(now) {
            match task {
                Task::ObserverTick => {
                    let events =
                        self.observer
                            .tick(host, &mut self.resolver, &mut self.scheduler, now);
                    if !events.is_empty() {
                        let notes = self.apply_observer_events(host, now, events);
                        out.extend(notes);
                    }
                }
                Task::ScrollFrame => {
                    if self.observer.scroll_frame(host, &mut self.scheduler, now) {
                        self.resolver.reset_indexes_cache();
                    }
                }
                Task::DropSettled => self.finish_drop(host),
            }
        }
        out
    }

    fn start_drag<H>(
        &mut self,
        host: &mut H,
        now: u64,
        press: PendingPress<N>,
        pos: Point,
    ) -> Vec<Notification<N, T>>
    where
        H: Host<Node = N> + ?Sized,
    {
        self.phase = Phase::Idle;
        let Some(index) = host.children(press.zone).iter().position(|c| *c == press.node) else {
            warn!("{:?} left {:?} before the drag started", press.node, press.zone);
            return Vec::new();
        };
        let Some(config) = self.registry.config_mut(press.zone) else {
            warn!("{:?} was unregistered before the drag started", press.zone);
            return Vec::new();
        };
        let Some(entry) = config.items.get(index) else {
            warn!(
                "list of {:?} has no entry for child {index}; host has not rendered it yet",
                press.zone
            );
            return Vec::new();
        };
        let item = entry.data().clone();
        config.items[index] = Entry::Shadow(item.clone());
        let zone_type = config.zone_type.clone();
        let items = config.items.clone();
        debug!(
            "drag start: {:?} from {:?}[{index}] as {zone_type:?}",
            item.id(),
            press.zone
        );

        let dragged = host.create_dragged(press.node);
        host.move_dragged(dragged, pos - press.start);

        let zones = self.registry.zones_of_type(&zone_type);
        for &z in &zones {
            if let Some(c) = self.registry.config(z)
                && (z == press.zone || c.accepts_others())
            {
                host.style_active_zone(z, &c.drop_target_style);
            }
        }

        self.resolver.reset_indexes_cache();
        let interval_ms = self.options.observation_interval_ms(
            zones
                .iter()
                .filter_map(|z| self.registry.config(*z))
                .map(|c| c.flip_duration_ms),
        );
        self.observer.observe(
            &*host,
            &mut self.scheduler,
            now,
            dragged,
            zones.iter().copied(),
            ObserveOptions {
                interval_ms,
                tolerance_px: self.options.tolerance_px,
                scroll_margin_px: self.options.scroll_margin_px,
                scroll_frame_ms: self.options.scroll_frame_ms,
            },
        );

        let id = item.id();
        self.phase = Phase::Dragging(DragSession {
            item,
            zone_type,
            origin_zone: press.zone,
            origin_index: index,
            original: press.node,
            dragged,
            start: press.start,
            pointer: pos,
            over_zone: true,
            landing: None,
        });
        alloc::vec![Notification::Consider(zone_event(
            press.zone,
            items,
            Trigger::DragStarted,
            id,
            Source::Pointer,
        ))]
    }

    fn apply_observer_events<H>(
        &mut self,
        host: &mut H,
        now: u64,
        events: Vec<ObserverEvent<N>>,
    ) -> Vec<Notification<N, T>>
    where
        H: Host<Node = N> + ?Sized,
    {
        let Phase::Dragging(session) = &mut self.phase else {
            return Vec::new();
        };
        let registry = &mut self.registry;
        let mut touched = Touched(Vec::new());
        let mut left_document = false;

        for event in events {
            match event {
                ObserverEvent::LeftDocument => {
                    left_document = true;
                    break;
                }
                ObserverEvent::Left { zone, kind } => {
                    if !accepts(registry, session, zone) {
                        continue;
                    }
                    trace!("left {zone:?} ({kind:?})");
                    session.over_zone = false;
                    if take_shadow_from(registry, zone).is_some() {
                        touched.touch(zone, Trigger::DraggedLeft);
                    }
                    if kind == LeftKind::ForNone && return_home(registry, session) {
                        touched.touch(session.origin_zone, Trigger::DraggedLeftAll);
                    }
                }
                ObserverEvent::Entered { zone, index } => {
                    enter_zone(registry, session, &mut touched, zone, index.index);
                }
                ObserverEvent::OverIndex { zone, index } => {
                    if !accepts(registry, session, zone) {
                        continue;
                    }
                    let Some(config) = registry.config_mut(zone) else {
                        continue;
                    };
                    match config.shadow_index() {
                        Some(current) => {
                            session.over_zone = true;
                            let shadow = config.items.remove(current);
                            let at = index.index.min(config.items.len());
                            config.items.insert(at, shadow);
                            if at != current {
                                touched.touch(zone, Trigger::DraggedOverIndex);
                            }
                        }
                        None => enter_zone(registry, session, &mut touched, zone, index.index),
                    }
                }
            }
        }

        if left_document {
            session.over_zone = false;
        }
        if shadow_location(registry, &session.zone_type).is_none() && return_home(registry, session) {
            touched.touch(session.origin_zone, Trigger::DraggedLeftAll);
        }

        let id = session.item.id();
        let mut out: Vec<Notification<N, T>> = touched
            .0
            .into_iter()
            .filter_map(|(zone, trigger)| {
                let items = registry.config(zone)?.items.clone();
                Some(Notification::Consider(zone_event(
                    zone,
                    items,
                    trigger,
                    id.clone(),
                    Source::Pointer,
                )))
            })
            .collect();

        if left_document {
            debug!("dragged visual left the document; dropping");
            out = self.drop_dragged(host, now, out);
        }
        out
    }

    fn drop_dragged<H>(
        &mut self,
        host: &mut H,
        now: u64,
        mut out: Vec<Notification<N, T>>,
    ) -> Vec<Notification<N, T>>
    where
        H: Host<Node = N> + ?Sized,
    {
        let mut session = match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dragging(session) => session,
            other => {
                self.phase = other;
                return out;
            }
        };
        self.observer.unobserve(&mut self.scheduler);
        self.resolver.reset_indexes_cache();
        let id = session.item.id();
        let origin = session.origin_zone;

        let landed = if session.over_zone {
            shadow_location(&self.registry, &session.zone_type)
        } else {
            None
        };
        let (landing, trigger) = match landed {
            Some((zone, _)) => (zone, Trigger::DroppedIntoZone),
            None => {
                if return_home(&mut self.registry, &session) {
                    if let Some(c) = self.registry.config(origin) {
                        out.push(Notification::Consider(zone_event(
                            origin,
                            c.items.clone(),
                            Trigger::DroppedOutsideOfAny,
                            id.clone(),
                            Source::Pointer,
                        )));
                    }
                }
                (origin, Trigger::DroppedOutsideOfAny)
            }
        };
        debug!("dropped {id:?} into {landing:?} ({trigger})");

        let mut shadow_index = session.origin_index;
        let mut flip_duration_ms = 0;
        if let Some(config) = self.registry.config_mut(landing) {
            shadow_index = config.shadow_index().unwrap_or(shadow_index);
            for entry in &mut config.items {
                if entry.is_shadow() {
                    *entry = Entry::Item(session.item.clone());
                }
            }
            flip_duration_ms = config.flip_duration_ms;
            out.push(Notification::Finalize(zone_event(
                landing,
                config.items.clone(),
                trigger,
                id.clone(),
                Source::Pointer,
            )));
        }
        if landing != origin
            && let Some(config) = self.registry.config(origin)
        {
            out.push(Notification::Finalize(zone_event(
                origin,
                config.items.clone(),
                Trigger::DroppedIntoAnother,
                id,
                Source::Pointer,
            )));
        }

        for zone in self.registry.zones_of_type(&session.zone_type) {
            if let Some(c) = self.registry.config(zone) {
                host.style_inactive_zone(zone, &c.drop_target_style);
            }
        }
        if let Some(target) = host
            .children(landing)
            .get(shadow_index)
            .and_then(|c| host.client_rect(*c))
        {
            host.animate_drop(session.dragged, target, flip_duration_ms);
        }
        session.landing = Some(landing);
        self.scheduler
            .schedule_at(now + flip_duration_ms, Task::DropSettled);
        self.phase = Phase::Finalizing(session);
        out
    }

    fn finish_drop<H>(&mut self, host: &mut H)
    where
        H: Host<Node = N> + ?Sized,
    {
        match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Finalizing(session) => {
                host.remove_dragged(session.dragged);
                debug!("drop of {:?} settled", session.item.id());
            }
            other => self.phase = other,
        }
    }

    fn shadow_in(&self, zone: N) -> bool {
        self.registry
            .config(zone)
            .is_some_and(|c| c.shadow_index().is_some())
    }
}

pub(crate) fn zone_event<N, T: Item>(
    zone: N,
    items: Vec<Entry<T>>,
    trigger: Trigger,
    id: T::Id,
    source: Source,
) -> ZoneEvent<N, T> {
    ZoneEvent {
        zone,
        items,
        info: DragInfo {
            trigger,
            id,
            source,
        },
    }
}

/// Zones that refuse drops from other zones ignore the drag, except for its origin.
fn accepts<N, T>(registry: &Registry<N, T>, session: &DragSession<N, T>, zone: N) -> bool
where
    N: Copy + Ord + core::fmt::Debug,
    T: Item,
{
    match registry.config(zone) {
        Some(c) => zone == session.origin_zone || c.accepts_others(),
        None => false,
    }
}

fn shadow_location<N, T>(registry: &Registry<N, T>, zone_type: &str) -> Option<(N, usize)>
where
    N: Copy + Ord + core::fmt::Debug,
{
    registry
        .zones_of_type(zone_type)
        .into_iter()
        .find_map(|z| Some((z, registry.config(z)?.shadow_index()?)))
}

fn take_shadow_from<N, T>(registry: &mut Registry<N, T>, zone: N) -> Option<Entry<T>>
where
    N: Copy + Ord + core::fmt::Debug,
{
    let config = registry.config_mut(zone)?;
    let index = config.shadow_index()?;
    Some(config.items.remove(index))
}

/// Put the placeholder back at the origin index. Returns true if any list changed.
fn return_home<N, T>(registry: &mut Registry<N, T>, session: &DragSession<N, T>) -> bool
where
    N: Copy + Ord + core::fmt::Debug,
    T: Item,
{
    let origin = session.origin_zone;
    if let Some((zone, index)) = shadow_location(registry, &session.zone_type) {
        if zone == origin && index == session.origin_index {
            return false;
        }
        take_shadow_from(registry, zone);
    }
    let Some(config) = registry.config_mut(origin) else {
        return false;
    };
    let id = session.item.id();
    config.items.retain(|e| e.id() != id);
    let at = session.origin_index.min(config.items.len());
    config.items.insert(at, Entry::Shadow(session.item.clone()));
    trace!("placeholder returned to {origin:?}[{at}]");
    true
}

fn enter_zone<N, T>(
    registry: &mut Registry<N, T>,
    session: &mut DragSession<N, T>,
    touched: &mut Touched<N>,
    zone: N,
    index: usize,
) where
    N: Copy + Ord + core::fmt::Debug,
    T: Item,
{
    if !accepts(registry, session, zone) {
        trace!("{zone:?} does not accept drops from other zones");
        return;
    }
    let previous = shadow_location(registry, &session.zone_type);
    // Still over the zone holding the placeholder: only the index changed.
    let same_zone = session.over_zone && previous.is_some_and(|(from, _)| from == zone);
    if previous == Some((zone, index)) {
        session.over_zone = true;
        return;
    }
    if let Some((from, _)) = previous {
        take_shadow_from(registry, from);
        if from != zone {
            touched.touch(from, Trigger::DraggedEnteredAnother);
        }
    }
    let Some(config) = registry.config_mut(zone) else {
        return;
    };
    let id = session.item.id();
    config.items.retain(|e| e.id() != id);
    let at = index.min(config.items.len());
    config.items.insert(at, Entry::Shadow(session.item.clone()));
    session.over_zone = true;
    if same_zone {
        trace!("placeholder moved to {zone:?}[{at}]");
        touched.touch(zone, Trigger::DraggedOverIndex);
    } else {
        trace!("placeholder entered {zone:?}[{at}]");
        touched.touch(zone, Trigger::DraggedEntered);
    }
}

/// Live restyling of a zone re-configured mid-drag.
fn restyle_live<H, T>(
    host: &mut H,
    zone: H::Node,
    origin: H::Node,
    previous: &ZoneConfig<T>,
    next: &ZoneConfig<T>,
) where
    H: Host + ?Sized,
{
    let was_active = zone == origin || previous.accepts_others();
    let is_active = zone == origin || next.accepts_others();
    match (was_active, is_active) {
        (true, true) if previous.drop_target_style != next.drop_target_style => {
            host.style_inactive_zone(zone, &previous.drop_target_style);
            host.style_active_zone(zone, &next.drop_target_style);
        }
        (true, false) => host.style_inactive_zone(zone, &previous.drop_target_style),
        (false, true) => host.style_active_zone(zone, &next.drop_target_style),
        _ => {}
    }
}
