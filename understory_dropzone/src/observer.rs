// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag observer: a polling loop that turns the dragged visual's position into zone
//! transitions.
//!
//! ## Overview
//!
//! Every observation interval the observer measures the dragged visual, lets the
//! [`MultiScroller`] scroll if the visual sits near an edge, and asks the [`IndexResolver`] which
//! zone (deepest first) and index it is over. It reports [`ObserverEvent`]s only when that answer
//! changes, in the same spirit as hover transitions: leave the old target, then enter the new one.
//!
//! A tick is skipped when nothing scrolled and the center moved less than the tolerance on both
//! axes. When the dragged visual has left the document entirely the observer reports
//! [`ObserverEvent::LeftDocument`] and stops ticking.

use alloc::vec::Vec;

use kurbo::Point;
use log::{debug, trace};

use crate::geometry::{depth, is_off_document, rendered_rect};
use crate::host::Scrolling;
use crate::resolver::IndexResolver;
use crate::scheduler::{Scheduler, Task, TimerId};
use crate::scroller::MultiScroller;
use crate::types::IndexResult;

/// Why the dragged visual left a zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LeftKind {
    /// It is now over another zone, reported right after.
    ForAnother,
    /// It is over no zone at all.
    ForNone,
}

/// A change in what the dragged visual is over.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ObserverEvent<N> {
    /// The visual entered `zone` and would land at `index`.
    Entered {
        /// The zone entered.
        zone: N,
        /// Would-be index in that zone.
        index: IndexResult,
    },
    /// The visual left `zone`.
    Left {
        /// The zone left.
        zone: N,
        /// Whether another zone took over.
        kind: LeftKind,
    },
    /// The visual moved to another index of the zone it is over.
    OverIndex {
        /// The zone.
        zone: N,
        /// New would-be index.
        index: IndexResult,
    },
    /// The visual is entirely outside the document.
    LeftDocument,
}

/// Tuning of one observation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObserveOptions {
    /// Time between ticks, in milliseconds.
    pub interval_ms: u64,
    /// Center travel below which a tick is skipped.
    pub tolerance_px: f64,
    /// Auto-scroll trigger band.
    pub scroll_margin_px: f64,
    /// Auto-scroll frame interval, in milliseconds.
    pub scroll_frame_ms: u64,
}

#[derive(Debug)]
struct Observation<N> {
    dragged: N,
    zones_deep_to_shallow: Vec<N>,
    options: ObserveOptions,
    scroller: MultiScroller<N>,
    timer: Option<TimerId>,
    last_zone: Option<N>,
    last_index: Option<usize>,
    last_center: Option<Point>,
}

/// Watches one dragged visual at a time.
#[derive(Debug)]
pub struct Observer<N> {
    observation: Option<Observation<N>>,
}

impl<N> Default for Observer<N> {
    fn default() -> Self {
        Self { observation: None }
    }
}

impl<N: Copy + Ord + core::fmt::Debug> Observer<N> {
    /// Create an idle observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true between [`observe`](Self::observe) and [`unobserve`](Self::unobserve)
    /// (or a [`LeftDocument`](ObserverEvent::LeftDocument)).
    pub fn is_observing(&self) -> bool {
        self.observation.as_ref().is_some_and(|o| o.timer.is_some())
    }

    /// The zone the visual was last found over.
    pub fn current_zone(&self) -> Option<N> {
        self.observation.as_ref().and_then(|o| o.last_zone)
    }

    /// Start watching `dragged` against `zones`. The first tick is due at `now`.
    ///
    /// # Panics
    ///
    /// If an observation is already running.
    pub fn observe<H>(
        &mut self,
        host: &H,
        scheduler: &mut Scheduler,
        now: u64,
        dragged: N,
        zones: impl IntoIterator<Item = N>,
        options: ObserveOptions,
    ) where
        H: Scrolling<Node = N> + ?Sized,
    {
        assert!(
            self.observation.is_none(),
            "observe called while already observing"
        );
        let zones: Vec<N> = zones.into_iter().collect();
        let scroller = MultiScroller::new(
            host,
            zones.iter().copied(),
            options.scroll_margin_px,
            options.scroll_frame_ms,
        );
        let mut by_depth: Vec<(usize, N)> = zones.into_iter().map(|z| (depth(host, z), z)).collect();
        by_depth.sort_by(|a, b| b.0.cmp(&a.0));
        debug!(
            "observing {dragged:?} over {} zones every {} ms",
            by_depth.len(),
            options.interval_ms
        );
        self.observation = Some(Observation {
            dragged,
            zones_deep_to_shallow: by_depth.into_iter().map(|(_, z)| z).collect(),
            options,
            scroller,
            timer: Some(scheduler.schedule_at(now, Task::ObserverTick)),
            last_zone: None,
            last_index: None,
            last_center: None,
        });
    }

    /// Stop watching. Cancels the pending tick and any running auto-scroll.
    pub fn unobserve(&mut self, scheduler: &mut Scheduler) {
        if let Some(mut o) = self.observation.take() {
            debug!("unobserving {:?}", o.dragged);
            if let Some(timer) = o.timer.take() {
                scheduler.cancel(timer);
            }
            o.scroller.reset(scheduler);
        }
    }

    /// Run one auto-scroll frame. Returns true if anything scrolled.
    pub fn scroll_frame<H>(&mut self, host: &mut H, scheduler: &mut Scheduler, now: u64) -> bool
    where
        H: Scrolling<Node = N> + ?Sized,
    {
        match self.observation.as_mut() {
            Some(o) => o.scroller.frame(host, scheduler, now),
            None => false,
        }
    }

    /// Run one observation tick. Call when [`Task::ObserverTick`] comes due.
    pub fn tick<H>(
        &mut self,
        host: &mut H,
        resolver: &mut IndexResolver<N>,
        scheduler: &mut Scheduler,
        now: u64,
    ) -> Vec<ObserverEvent<N>>
    where
        H: Scrolling<Node = N> + ?Sized,
    {
        let mut events = Vec::new();
        let Some(o) = self.observation.as_mut() else {
            return events;
        };
        o.timer = None;
        let Some(rect) = rendered_rect(&*host, o.dragged) else {
            trace!("dragged visual {:?} is detached", o.dragged);
            o.timer = Some(scheduler.schedule_at(now + o.options.interval_ms, Task::ObserverTick));
            return events;
        };
        let center = rect.center();
        let client_center = center - host.document_scroll();
        let scrolled = o
            .scroller
            .multi_scroll_if_needed(host, scheduler, now, client_center);
        if scrolled {
            resolver.reset_indexes_cache();
        }
        let tolerance = o.options.tolerance_px;
        if !scrolled
            && let Some(last) = o.last_center
            && (last.x - center.x).abs() < tolerance
            && (last.y - center.y).abs() < tolerance
        {
            o.timer = Some(scheduler.schedule_at(now + o.options.interval_ms, Task::ObserverTick));
            return events;
        }

        if is_off_document(rect, host.document_size()) {
            debug!("{:?} is off the document", o.dragged);
            o.scroller.reset(scheduler);
            events.push(ObserverEvent::LeftDocument);
            return events;
        }
        o.last_center = Some(center);

        let mut found = false;
        for &zone in &o.zones_deep_to_shallow {
            let Some(index) = resolver.resolve_index(host, o.dragged, zone) else {
                continue;
            };
            found = true;
            if o.last_zone != Some(zone) {
                if let Some(prev) = o.last_zone {
                    events.push(ObserverEvent::Left {
                        zone: prev,
                        kind: LeftKind::ForAnother,
                    });
                }
                events.push(ObserverEvent::Entered { zone, index });
                o.last_zone = Some(zone);
                o.last_index = Some(index.index);
            } else if o.last_index != Some(index.index) {
                events.push(ObserverEvent::OverIndex { zone, index });
                o.last_index = Some(index.index);
            }
            break;
        }
        if !found && let Some(prev) = o.last_zone.take() {
            events.push(ObserverEvent::Left {
                zone: prev,
                kind: LeftKind::ForNone,
            });
            o.last_index = None;
        }
        if !events.is_empty() {
            trace!("observer events: {events:?}");
        }
        o.timer = Some(scheduler.schedule_at(now + o.options.interval_ms, Task::ObserverTick));
        events
    }
}
