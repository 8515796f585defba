//! Deferred-execution contract used by `delay` and `throttle`.
//!
//! The collection core never owns a timer. Hosts hand it something that
//! implements [`Scheduler`]; two implementations ship with the crate:
//! - [`VirtualScheduler`] advances a manual clock, so every deferred call is
//!   deterministic. Tests and simulation hosts use it.
//! - [`EventLoop`] follows the wall clock and blocks while waiting for the
//!   next deadline.
//!
//! Tasks are plain `FnOnce` closures and run on the thread that drives the
//! scheduler. Nothing here is `Send`.
use std::{fmt, time::Duration};

mod event_loop;
mod timer_queue;
mod virtual_scheduler;

pub use event_loop::EventLoop;
pub use virtual_scheduler::VirtualScheduler;

/// Deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

/// Cancellation handle returned by [`Scheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

pub trait Scheduler {
    /// Time elapsed since the scheduler's origin.
    fn now(&self) -> Duration;

    /// Queues `task` to run no sooner than `wait` from now.
    fn schedule(&self, wait: Duration, task: Task) -> TimerId;

    /// Drops a queued task. Returns `false` if it already ran or was cancelled.
    fn cancel(&self, id: TimerId) -> bool;
}
