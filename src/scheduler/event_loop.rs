use std::time::{Duration, Instant};

use super::{Scheduler, Task, TimerId, timer_queue::TimerQueue};

/// Wall-clock scheduler for hosts that own their main loop.
///
/// Nothing runs on its own: the host calls [`EventLoop::run_pending`] from its
/// loop, or hands control over with [`EventLoop::run_until_idle`].
pub struct EventLoop {
    origin: Instant,
    queue: TimerQueue,
    #[cfg(feature = "mio-loop")]
    poll: std::cell::RefCell<mio::Poll>,
}

impl EventLoop {
    pub fn new() -> Result<Self, String> {
        Ok(Self {
            origin: Instant::now(),
            queue: TimerQueue::default(),
            #[cfg(feature = "mio-loop")]
            poll: std::cell::RefCell::new(
                mio::Poll::new().map_err(|e| format!("event loop: cannot create poller: {}", e))?,
            ),
        })
    }

    /// Runs every task whose deadline has passed. Returns the number run.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Some((deadline, task)) = self.queue.pop_due(self.now()) {
            log::trace!("event loop running task due at {:?}", deadline);
            task();
            ran += 1;
        }
        ran
    }

    /// Blocks until the queue is empty, running tasks as they fall due.
    pub fn run_until_idle(&self) -> Result<usize, String> {
        let mut ran = 0;
        loop {
            ran += self.run_pending();
            let Some(deadline) = self.queue.next_deadline() else {
                return Ok(ran);
            };
            let timeout = deadline.saturating_sub(self.now());
            if !timeout.is_zero() {
                self.wait(timeout)?;
            }
        }
    }

    /// Number of queued tasks.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    #[cfg(feature = "mio-loop")]
    fn wait(&self, timeout: Duration) -> Result<(), String> {
        let mut events = mio::Events::with_capacity(8);
        match self.poll.borrow_mut().poll(&mut events, Some(timeout)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => Ok(()),
            Err(e) => Err(format!("event loop: poll failed: {}", e)),
        }
    }

    #[cfg(not(feature = "mio-loop"))]
    fn wait(&self, timeout: Duration) -> Result<(), String> {
        std::thread::sleep(timeout);
        Ok(())
    }
}

impl Scheduler for EventLoop {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn schedule(&self, wait: Duration, task: Task) -> TimerId {
        let id = self.queue.insert(self.now() + wait, task);
        log::debug!("scheduled {} in {:?}", id, wait);
        id
    }

    fn cancel(&self, id: TimerId) -> bool {
        let cancelled = self.queue.cancel(id);
        log::debug!("cancel {}: {}", id, cancelled);
        cancelled
    }
}
