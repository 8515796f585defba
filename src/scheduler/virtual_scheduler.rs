use std::{cell::Cell, time::Duration};

use super::{Scheduler, Task, TimerId, timer_queue::TimerQueue};

/// Scheduler driven by a manual clock.
///
/// Time only moves when [`VirtualScheduler::advance`] is called. Every task
/// due inside the advanced span runs in deadline order with the clock set to
/// its deadline, including tasks scheduled by tasks of the same pass.
#[derive(Default)]
pub struct VirtualScheduler {
    clock: Cell<Duration>,
    queue: TimerQueue,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `by`, running every task that falls due.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.clock.get() + by;
        let mut ran = 0;
        while let Some((deadline, task)) = self.queue.pop_due(target) {
            self.clock.set(deadline.max(self.clock.get()));
            log::trace!("virtual scheduler running task due at {:?}", deadline);
            task();
            ran += 1;
        }
        self.clock.set(target);
        ran
    }

    /// Runs queued tasks until none remain, jumping the clock as needed.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while let Some(deadline) = self.queue.next_deadline() {
            let by = deadline.saturating_sub(self.clock.get());
            ran += self.advance(by);
        }
        ran
    }

    /// Number of queued tasks.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl Scheduler for VirtualScheduler {
    fn now(&self) -> Duration {
        self.clock.get()
    }

    fn schedule(&self, wait: Duration, task: Task) -> TimerId {
        let id = self.queue.insert(self.clock.get() + wait, task);
        log::debug!("scheduled {} in {:?}", id, wait);
        id
    }

    fn cancel(&self, id: TimerId) -> bool {
        let cancelled = self.queue.cancel(id);
        log::debug!("cancel {}: {}", id, cancelled);
        cancelled
    }
}
