use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::scheduler::{Scheduler, TimerHandle};

/// Payload of the carousel's repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselTask {
    /// `mount` is the mount generation that installed the timer.
    AutoAdvance { mount: u64 },
}

/// A wraparound pointer into a fixed, non-empty list, advanced by the user
/// and by a repeating timer while mounted.
#[derive(Debug)]
pub struct Carousel<T> {
    items: Vec<T>,
    index: usize,
    interval: Duration,
    timer: Option<TimerHandle>,
    mount: u64,
}

impl<T> Carousel<T> {
    pub fn new(items: Vec<T>, interval: Duration) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::EmptyCarousel);
        }
        if interval.is_zero() {
            return Err(Error::ZeroInterval);
        }
        Ok(Self {
            items,
            index: 0,
            interval,
            timer: None,
            mount: 0,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: `new` rejects an empty list.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current(&self) -> &T {
        &self.items[self.index]
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.items.len();
    }

    pub fn retreat(&mut self) {
        let len = self.items.len();
        self.index = (self.index + len - 1) % len;
    }

    pub fn is_mounted(&self) -> bool {
        self.timer.is_some()
    }

    /// Installs the auto-advance timer. Returns false if it was already installed.
    pub fn mount<S>(&mut self, scheduler: &mut Scheduler<S>) -> Result<bool>
    where
        S: From<CarouselTask>,
    {
        if self.timer.is_some() {
            return Ok(false);
        }
        self.mount += 1;
        let task = CarouselTask::AutoAdvance { mount: self.mount };
        let handle = scheduler.schedule_repeating(self.interval, S::from(task))?;
        self.timer = Some(handle);
        debug!(mount = self.mount, interval = ?self.interval, "carousel timer installed");
        Ok(true)
    }

    /// Removes the auto-advance timer. Returns false if nothing was installed.
    pub fn unmount<S>(&mut self, scheduler: &mut Scheduler<S>) -> bool {
        match self.timer.take() {
            Some(handle) => {
                scheduler.cancel(handle);
                debug!(mount = self.mount, "carousel timer removed");
                true
            }
            None => false,
        }
    }

    /// Applies a fired timer task. Ticks from an earlier mount, or arriving
    /// after teardown, are dropped.
    pub fn handle(&mut self, task: CarouselTask) -> bool {
        match task {
            CarouselTask::AutoAdvance { mount } => {
                if self.timer.is_none() || mount != self.mount {
                    debug!(mount, current = self.mount, "stale carousel tick ignored");
                    return false;
                }
                self.advance();
                true
            }
        }
    }
}
