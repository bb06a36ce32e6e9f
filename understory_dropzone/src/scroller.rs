// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge auto-scrolling.
//!
//! ## Overview
//!
//! While a drag is in progress, holding the dragged visual close to an edge of a scroll
//! container scrolls that container. Each side has a trigger band of
//! [`EngineOptions::scroll_margin_px`](crate::EngineOptions::scroll_margin_px); the closer the
//! point is to the edge, the larger the step (`margin - distance` per frame).
//!
//! [`Scroller`] handles one container at a time. Scrolling continues on its own through
//! [`Task::ScrollFrame`] at frame cadence until a later [`Scroller::scroll_if_needed`] finds the
//! point outside the band, the container can move no further, or [`Scroller::reset`] is called.
//!
//! [`MultiScroller`] considers every scrollable ancestor of the registered zones (and the
//! document, when it overflows) from the innermost outwards; the first one that needs scrolling
//! wins.
//!
//! Points are in client (viewport) coordinates.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use log::{debug, trace};

use crate::geometry::{depth, inner_distances, point_in_rect};
use crate::host::Scrolling;
use crate::scheduler::{Scheduler, Task, TimerId};

#[derive(Copy, Clone, Debug)]
struct ActiveScroll<N> {
    target: N,
    delta: Vec2,
    timer: TimerId,
}

/// Scrolls a single container while a point hovers near its edges.
#[derive(Clone, Debug)]
pub struct Scroller<N> {
    margin: f64,
    frame_ms: u64,
    active: Option<ActiveScroll<N>>,
}

impl<N: Copy + Eq + core::fmt::Debug> Scroller<N> {
    /// Create a scroller with the given trigger band width and frame interval.
    ///
    /// The frame interval is at least one millisecond.
    pub fn new(margin: f64, frame_ms: u64) -> Self {
        Self {
            margin,
            frame_ms: frame_ms.max(1),
            active: None,
        }
    }

    /// Returns true while a scroll loop is running.
    pub fn is_scrolling(&self) -> bool {
        self.active.is_some()
    }

    /// The container currently being scrolled.
    pub fn target(&self) -> Option<N> {
        self.active.map(|a| a.target)
    }

    /// Scroll `target` if `point` is inside its trigger band.
    ///
    /// Applies one step immediately and keeps scrolling through [`Task::ScrollFrame`]. Returns
    /// true if the container moved. Any other outcome stops the loop.
    pub fn scroll_if_needed<H>(
        &mut self,
        host: &mut H,
        scheduler: &mut Scheduler,
        now: u64,
        point: Point,
        target: Option<N>,
    ) -> bool
    where
        H: Scrolling<Node = N> + ?Sized,
    {
        let Some(target) = target else {
            return false;
        };
        let Some(delta) = self.step_for(&*host, point, target) else {
            self.reset(scheduler);
            return false;
        };
        let applied = host.scroll_by(target, delta);
        if applied == Vec2::ZERO {
            trace!("{target:?} cannot scroll further by {delta:?}");
            self.reset(scheduler);
            return false;
        }
        match &mut self.active {
            Some(active) if active.target == target => active.delta = delta,
            _ => {
                self.reset(scheduler);
                debug!("auto-scrolling {target:?} by {delta:?} per frame");
                let timer = scheduler.schedule_at(now + self.frame_ms, Task::ScrollFrame);
                self.active = Some(ActiveScroll {
                    target,
                    delta,
                    timer,
                });
            }
        }
        true
    }

    /// Run one scroll step. Call when [`Task::ScrollFrame`] comes due.
    ///
    /// Returns true if the container moved; the next frame is then already scheduled.
    pub fn frame<H>(&mut self, host: &mut H, scheduler: &mut Scheduler, now: u64) -> bool
    where
        H: Scrolling<Node = N> + ?Sized,
    {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if host.scroll_by(active.target, active.delta) == Vec2::ZERO {
            self.reset(scheduler);
            return false;
        }
        scheduler.cancel(active.timer);
        active.timer = scheduler.schedule_at(now + self.frame_ms, Task::ScrollFrame);
        true
    }

    /// Stop scrolling and cancel the pending frame.
    pub fn reset(&mut self, scheduler: &mut Scheduler) {
        if let Some(active) = self.active.take() {
            trace!("auto-scroll of {:?} stopped", active.target);
            scheduler.cancel(active.timer);
        }
    }

    fn step_for<H>(&self, host: &H, point: Point, target: N) -> Option<Vec2>
    where
        H: Scrolling<Node = N> + ?Sized,
    {
        let rect = if target == host.scrolling_root() {
            Rect::from_origin_size(Point::ORIGIN, host.viewport_size())
        } else {
            host.client_rect(target)?
        };
        let metrics = host.scroll_metrics(target)?;
        let d = inner_distances(point, rect)?;
        let margin = self.margin;
        if metrics.overflows_y() {
            if d.bottom < margin {
                return Some(Vec2::new(0.0, margin - d.bottom));
            }
            if d.top < margin {
                return Some(Vec2::new(0.0, -(margin - d.top)));
            }
        }
        if metrics.overflows_x() {
            if d.right < margin {
                return Some(Vec2::new(margin - d.right, 0.0));
            }
            if d.left < margin {
                return Some(Vec2::new(-(margin - d.left), 0.0));
            }
        }
        None
    }
}

/// Scrolls whichever of a set of nested containers needs it, innermost first.
#[derive(Clone, Debug)]
pub struct MultiScroller<N> {
    containers_deep_to_shallow: Vec<N>,
    root: N,
    scroller: Scroller<N>,
}

impl<N: Copy + Ord + core::fmt::Debug> MultiScroller<N> {
    /// Collect the scroll containers relevant to `zones`.
    ///
    /// These are the zones themselves and their ancestors that report
    /// [`scroll_metrics`](Scrolling::scroll_metrics), plus the scrolling root when the document
    /// overflows.
    pub fn new<H>(host: &H, zones: impl IntoIterator<Item = N>, margin: f64, frame_ms: u64) -> Self
    where
        H: Scrolling<Node = N> + ?Sized,
    {
        let root = host.scrolling_root();
        let mut found = BTreeSet::new();
        for zone in zones {
            let mut cur = Some(zone);
            while let Some(node) = cur {
                if node != root && host.scroll_metrics(node).is_some() {
                    found.insert(node);
                }
                cur = host.parent(node);
            }
        }
        if host
            .scroll_metrics(root)
            .is_some_and(|m| m.overflows_x() || m.overflows_y())
        {
            found.insert(root);
        }
        let mut containers: Vec<(usize, N)> = found.into_iter().map(|n| (depth(host, n), n)).collect();
        containers.sort_by(|a, b| b.0.cmp(&a.0));
        debug!("multi-scroller watching {} containers", containers.len());
        Self {
            containers_deep_to_shallow: containers.into_iter().map(|(_, n)| n).collect(),
            root,
            scroller: Scroller::new(margin, frame_ms),
        }
    }

    /// The watched containers, deepest first.
    pub fn containers(&self) -> &[N] {
        &self.containers_deep_to_shallow
    }

    /// Scroll the innermost container under `point` that needs it.
    ///
    /// The scrolling root is considered whenever it is watched. Returns true if anything
    /// scrolled; otherwise any running loop is stopped.
    pub fn multi_scroll_if_needed<H>(
        &mut self,
        host: &mut H,
        scheduler: &mut Scheduler,
        now: u64,
        point: Point,
    ) -> bool
    where
        H: Scrolling<Node = N> + ?Sized,
    {
        if self.containers_deep_to_shallow.is_empty() {
            self.scroller.reset(scheduler);
            return false;
        }
        for &container in &self.containers_deep_to_shallow {
            let under_point = container == self.root
                || host
                    .client_rect(container)
                    .is_some_and(|r| point_in_rect(point, r));
            if !under_point {
                continue;
            }
            if self
                .scroller
                .scroll_if_needed(host, scheduler, now, point, Some(container))
            {
                return true;
            }
        }
        self.scroller.reset(scheduler);
        false
    }

    /// Run one scroll step of the active container.
    pub fn frame<H>(&mut self, host: &mut H, scheduler: &mut Scheduler, now: u64) -> bool
    where
        H: Scrolling<Node = N> + ?Sized,
    {
        self.scroller.frame(host, scheduler, now)
    }

    /// Stop scrolling.
    pub fn reset(&mut self, scheduler: &mut Scheduler) {
        self.scroller.reset(scheduler);
    }

    /// Returns true while a scroll loop is running.
    pub fn is_scrolling(&self) -> bool {
        self.scroller.is_scrolling()
    }
}
