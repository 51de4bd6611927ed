//! Virtual-clock timer queue.
//!
//! Nothing here sleeps or spawns. The host advances the clock once per frame
//! and drains whatever fell due, so every delayed effect on the page runs on
//! the same thread as user input, in due-time order.

use std::time::Duration;

use crate::error::{Error, Result};

// Periods a repeating timer may fire in one drain before the rest are skipped
const MAX_BURST: u32 = 1_000;

/// Identifies a scheduled timer so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy)]
enum Cadence {
    Once,
    Every(Duration),
}

#[derive(Debug)]
struct Entry<T> {
    handle: TimerHandle,
    due: Duration,
    // Breaks ties between entries due at the same instant
    seq: u64,
    cadence: Cadence,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_handle: u64,
    next_seq: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_handle: 0,
            next_seq: 0,
            entries: Vec::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers still waiting to fire.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Fires `task` once, `delay` after now.
    pub fn schedule_once(&mut self, delay: Duration, task: T) -> TimerHandle {
        self.push(delay, Cadence::Once, task)
    }

    /// Fires `task` every `period`, first at now + `period`.
    pub fn schedule_repeating(&mut self, period: Duration, task: T) -> Result<TimerHandle> {
        if period.is_zero() {
            return Err(Error::ZeroInterval);
        }
        Ok(self.push(period, Cadence::Every(period), task))
    }

    /// Returns false if the timer already fired (one-shot) or was never scheduled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Moves the clock forward without firing anything.
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    fn push(&mut self, delay: Duration, cadence: Cadence, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            handle,
            due: self.now.saturating_add(delay),
            seq,
            cadence,
            task,
        });
        handle
    }
}

impl<T: Clone> Scheduler<T> {
    /// Pops the earliest task due at or before `deadline`.
    ///
    /// The clock moves to the task's due time, so anything the caller
    /// schedules while handling it is measured from that instant. Repeating
    /// timers are re-armed one period later under the same handle, unless
    /// the deadline is more than `MAX_BURST` periods away, in which case the
    /// missed periods are skipped and the timer lands just past `deadline`.
    pub fn next_due(&mut self, deadline: Duration) -> Option<T> {
        let position = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= deadline)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i)?;

        let entry = self.entries.swap_remove(position);
        self.now = self.now.max(entry.due);

        match entry.cadence {
            Cadence::Once => Some(entry.task),
            Cadence::Every(period) => {
                let task = entry.task.clone();
                if let Some(due) = rearm(entry.due, period, deadline) {
                    let seq = self.next_seq;
                    self.next_seq += 1;
                    self.entries.push(Entry { due, seq, ..entry });
                }
                Some(task)
            }
        }
    }
}

/// Next due time of a repeating timer that fired at `due`. `None` once that
/// instant no longer fits in a `Duration`.
fn rearm(due: Duration, period: Duration, deadline: Duration) -> Option<Duration> {
    let next = due.checked_add(period)?;
    let burst = period.checked_mul(MAX_BURST).unwrap_or(Duration::MAX);
    if deadline.saturating_sub(next) < burst {
        return Some(next);
    }
    let missed = (deadline - due).as_nanos() / period.as_nanos();
    let nanos = due.as_nanos() + (missed + 1) * period.as_nanos();
    let secs = u64::try_from(nanos / 1_000_000_000).ok()?;
    Some(Duration::new(secs, (nanos % 1_000_000_000) as u32))
}
