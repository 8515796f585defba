//! Higher-order wrappers around [`Function`](crate::runtime::function::Function).
//!
//! Each decorator owns its call state in a struct (`Once`, `Memoize`,
//! `Throttle`) and can be turned back into a plain `Function` value with
//! `into_function`. State lives in `RefCell`s that are never borrowed across
//! a call into user code, so wrapped functions may call their own wrapper.
//!
//! `delay` and `throttle` defer work through a
//! [`Scheduler`](crate::scheduler::Scheduler) supplied by the host.
pub mod delay;
pub mod memoize;
pub mod once;
pub mod throttle;

pub use delay::delay;
pub use memoize::{Memoize, memoize};
pub use once::{Once, once};
pub use throttle::{Throttle, throttle};
