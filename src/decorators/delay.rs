use std::time::Duration;

use crate::{
    runtime::{function::Function, value::Value},
    scheduler::{Scheduler, TimerId},
};

/// Schedules `func(...args)` to run once, no sooner than `wait` from now.
///
/// The call has no caller to report to, so a failure is logged at `warn`
/// and dropped. Cancel through the returned handle.
pub fn delay(
    scheduler: &dyn Scheduler,
    func: Function,
    wait: Duration,
    args: Vec<Value>,
) -> TimerId {
    scheduler.schedule(
        wait,
        Box::new(move || {
            if let Err(err) = func.apply(&args) {
                log::warn!("delayed call to {} failed: {}", func.name(), err);
            }
        }),
    )
}
