//! Two-phase mount / settle sequencing for a modal dialog.
//!
//! `mounted` says whether the dialog is in the render tree, `settled` whether
//! its visual transition has reached the open state. Opening mounts first and
//! settles one short delay later; closing unsettles first and unmounts once
//! the exit transition has had time to play.
//!
//! Every transition bumps a generation counter and tags its delayed task with
//! it. The pending timer is also cancelled explicitly, so a task from an
//! earlier transition can never land on a newer state.

use std::time::Duration;

use tracing::debug;

use crate::constants::{MENU_EXIT_DELAY, MENU_SETTLE_DELAY};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::state::OverlayPhase;

/// Delayed effects scheduled by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTask {
    Settle { generation: u64 },
    Unmount { generation: u64 },
}

/// Accessibility attributes the host exposes while the dialog is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogRole {
    pub role: &'static str,
    pub aria_modal: bool,
    pub label: &'static str,
}

#[derive(Debug)]
pub struct Overlay {
    phase: OverlayPhase,
    generation: u64,
    pending: Option<TimerHandle>,
    settle_delay: Duration,
    exit_delay: Duration,
    label: &'static str,
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(MENU_SETTLE_DELAY, MENU_EXIT_DELAY)
    }
}

impl Overlay {
    pub fn new(settle_delay: Duration, exit_delay: Duration) -> Self {
        Self {
            phase: OverlayPhase::Closed,
            generation: 0,
            pending: None,
            settle_delay,
            exit_delay,
            label: "Full menu",
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn is_mounted(&self) -> bool {
        self.phase.is_mounted()
    }

    pub fn is_settled(&self) -> bool {
        self.phase.is_settled()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dialog_role(&self) -> Option<DialogRole> {
        self.is_mounted().then_some(DialogRole {
            role: "dialog",
            aria_modal: true,
            label: self.label,
        })
    }

    /// Mounts the dialog unsettled and schedules the settle. No-op while mounted.
    pub fn open<S>(&mut self, scheduler: &mut Scheduler<S>) -> bool
    where
        S: From<OverlayTask>,
    {
        if self.is_mounted() {
            return false;
        }
        let generation = self.begin(scheduler);
        self.phase = OverlayPhase::Opening;
        let task = OverlayTask::Settle { generation };
        self.pending = Some(scheduler.schedule_once(self.settle_delay, S::from(task)));
        debug!(generation, "overlay opening");
        true
    }

    /// Unsettles the dialog and schedules the unmount. No-op when unmounted
    /// or already closing.
    pub fn close<S>(&mut self, scheduler: &mut Scheduler<S>) -> bool
    where
        S: From<OverlayTask>,
    {
        if matches!(self.phase, OverlayPhase::Closed | OverlayPhase::Closing) {
            return false;
        }
        let generation = self.begin(scheduler);
        self.phase = OverlayPhase::Closing;
        let task = OverlayTask::Unmount { generation };
        self.pending = Some(scheduler.schedule_once(self.exit_delay, S::from(task)));
        debug!(generation, "overlay closing");
        true
    }

    /// Unmounts immediately, dropping any pending transition. Used on page teardown.
    pub fn reset<S>(&mut self, scheduler: &mut Scheduler<S>) {
        self.begin(scheduler);
        self.phase = OverlayPhase::Closed;
    }

    /// Applies a fired task if it belongs to the current transition.
    pub fn handle(&mut self, task: OverlayTask) -> bool {
        let (generation, expected, next) = match task {
            OverlayTask::Settle { generation } => {
                (generation, OverlayPhase::Opening, OverlayPhase::Open)
            }
            OverlayTask::Unmount { generation } => {
                (generation, OverlayPhase::Closing, OverlayPhase::Closed)
            }
        };
        if generation != self.generation || self.phase != expected {
            debug!(?task, current = self.generation, "stale overlay task ignored");
            return false;
        }
        self.pending = None;
        self.phase = next;
        debug!(generation, phase = ?next, "overlay settled");
        true
    }

    fn begin<S>(&mut self, scheduler: &mut Scheduler<S>) -> u64 {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }
        self.generation += 1;
        self.generation
    }
}
