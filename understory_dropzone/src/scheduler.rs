// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An explicit timer queue for the engine's self-rescheduling loops.
//!
//! ## Overview
//!
//! The engine has three kinds of deferred work: the drag observer's poll tick, the
//! auto-scroller's frame step, and the end of the drop animation. Each is a [`Task`] scheduled at
//! an absolute time (host milliseconds). The host asks for [`Scheduler::next_deadline`], waits,
//! and feeds the time back through [`DragEngine::advance`](crate::DragEngine::advance).
//!
//! Cancellation is a single call with the [`TimerId`] returned at scheduling time, so every path
//! that ends a session can stop its loops unconditionally.
//!
//! ```
//! use understory_dropzone::scheduler::{Scheduler, Task};
//!
//! let mut s = Scheduler::new();
//! let tick = s.schedule_at(100, Task::ObserverTick);
//! let _frame = s.schedule_at(16, Task::ScrollFrame);
//! assert_eq!(s.next_deadline(), Some(16));
//! assert_eq!(s.pop_due(50), Some(Task::ScrollFrame));
//! assert_eq!(s.pop_due(50), None);
//! assert!(s.cancel(tick));
//! assert!(s.is_empty());
//! ```

use alloc::collections::BTreeMap;

/// Deferred work owned by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Task {
    /// One poll of the drag observer.
    ObserverTick,
    /// One auto-scroll step.
    ScrollFrame,
    /// The drop animation has finished.
    DropSettled,
}

/// Handle of a scheduled task.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Timer queue ordered by due time, then by scheduling order.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    queue: BTreeMap<(u64, u64), Task>,
    due_of: BTreeMap<u64, u64>,
    next_seq: u64,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to run once at `due`.
    pub fn schedule_at(&mut self, due: u64, task: Task) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((due, seq), task);
        self.due_of.insert(seq, due);
        TimerId(seq)
    }

    /// Cancel a scheduled task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let Some(due) = self.due_of.remove(&id.0) else {
            return false;
        };
        self.queue.remove(&(due, id.0)).is_some()
    }

    /// Returns true if `id` is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.due_of.contains_key(&id.0)
    }

    /// Earliest due time, if anything is scheduled.
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Task> {
        let (&(due, seq), _) = self.queue.iter().next()?;
        if due > now {
            return None;
        }
        self.due_of.remove(&seq);
        self.queue.remove(&(due, seq))
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.due_of.clear();
    }
}
