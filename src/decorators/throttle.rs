use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    time::Duration,
};

use crate::{
    runtime::{function::Function, value::Value},
    scheduler::{Scheduler, TimerId},
};

/// Limits the wrapped function to one call per `wait` window.
///
/// A call outside any window runs immediately and opens a window. Calls made
/// inside the window are coalesced into a single trailing call at the window
/// boundary, using the receiver and arguments of the latest one; that
/// trailing call opens the next window. Every call returns the result of the
/// most recent underlying invocation (`undefined` before the first).
///
/// Clones share state. The pending trailing call only holds a weak handle,
/// so it is dropped together with the last clone.
#[derive(Clone)]
pub struct Throttle {
    inner: Rc<Inner>,
}

struct Inner {
    func: Function,
    wait: Duration,
    scheduler: Rc<dyn Scheduler>,
    state: RefCell<State>,
}

#[derive(Default)]
struct State {
    window_end: Option<Duration>,
    pending: Option<(Value, Vec<Value>)>,
    timer: Option<TimerId>,
    last_result: Value,
}

impl Throttle {
    pub fn new(scheduler: Rc<dyn Scheduler>, func: Function, wait: Duration) -> Self {
        Self {
            inner: Rc::new(Inner {
                func,
                wait,
                scheduler,
                state: RefCell::new(State::default()),
            }),
        }
    }

    pub fn call(&self, receiver: &Value, args: &[Value]) -> Result<Value, String> {
        let now = self.inner.scheduler.now();
        {
            let mut state = self.inner.state.borrow_mut();
            match state.window_end {
                Some(end) if now < end => {
                    state.pending = Some((receiver.clone(), args.to_vec()));
                    if state.timer.is_none() {
                        state.timer = Some(self.schedule_trailing(end - now));
                    }
                    return Ok(state.last_result.clone());
                }
                _ => {}
            }
            // The window closed but its trailing call has not run yet; this
            // call supersedes it.
            if let Some(id) = state.timer.take() {
                self.inner.scheduler.cancel(id);
                state.pending = None;
            }
        }
        self.invoke(receiver, args)
    }

    /// Drops any pending trailing call and closes the current window.
    pub fn cancel(&self) {
        let mut state = self.inner.state.borrow_mut();
        if let Some(id) = state.timer.take() {
            self.inner.scheduler.cancel(id);
        }
        state.pending = None;
        state.window_end = None;
    }

    /// Result of the most recent underlying invocation.
    pub fn last_result(&self) -> Value {
        self.inner.state.borrow().last_result.clone()
    }

    pub fn into_function(self) -> Function {
        let name = self.inner.func.name().to_string();
        Function::new(name, move |receiver, args| self.call(receiver, args))
    }

    fn schedule_trailing(&self, wait: Duration) -> TimerId {
        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        self.inner.scheduler.schedule(
            wait,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Throttle { inner }.run_trailing();
                }
            }),
        )
    }

    fn run_trailing(&self) {
        let pending = {
            let mut state = self.inner.state.borrow_mut();
            state.timer = None;
            state.pending.take()
        };
        if let Some((receiver, args)) = pending {
            if let Err(err) = self.invoke(&receiver, &args) {
                log::warn!("trailing call to {} failed: {}", self.inner.func.name(), err);
            }
        }
    }

    fn invoke(&self, receiver: &Value, args: &[Value]) -> Result<Value, String> {
        let now = self.inner.scheduler.now();
        self.inner.state.borrow_mut().window_end = Some(now + self.inner.wait);
        let result = self.inner.func.call(receiver, args)?;
        self.inner.state.borrow_mut().last_result = result.clone();
        Ok(result)
    }
}

pub fn throttle(scheduler: Rc<dyn Scheduler>, func: Function, wait: Duration) -> Function {
    Throttle::new(scheduler, func, wait).into_function()
}
