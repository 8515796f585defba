//! Value model and the named builtin registry.
//!
//! # No-Cycle Invariant
//! Heap-backed `Value` variants use `Rc` for cheap sharing, so values are
//! expected to form DAGs. Operations here never create back-edges: they copy
//! on write instead of mutating a shared array or object. Callers that build
//! a cycle by hand (an object holding a function that captures the object)
//! leak it.
use std::rc::Rc;

use crate::{runtime::value::Value, scheduler::Scheduler};

pub mod builtin_function;
pub mod builtins;
pub mod function;
pub mod object;
pub mod toolkit;
pub mod value;

/// What a builtin may ask of its host.
pub trait RuntimeContext {
    /// Scheduler backing `delay`, `cancel` and `throttle`.
    fn scheduler(&self) -> Rc<dyn Scheduler>;
}

pub type BuiltinFn = fn(&dyn RuntimeContext, Vec<Value>) -> Result<Value, String>;
