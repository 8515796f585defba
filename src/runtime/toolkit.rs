use std::rc::Rc;

use crate::{
    runtime::{
        RuntimeContext,
        builtins::{BUILTINS, get_builtin},
        function::Function,
        value::Value,
    },
    scheduler::Scheduler,
};

/// Default host for the builtin registry.
///
/// Owns the scheduler that deferred builtins use and dispatches calls by
/// name. Cloning shares the scheduler.
#[derive(Clone)]
pub struct Toolkit {
    scheduler: Rc<dyn Scheduler>,
}

impl Toolkit {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self { scheduler }
    }

    /// Calls the builtin registered under `name`.
    pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Value, String> {
        let builtin = get_builtin(name).ok_or_else(|| format!("unknown builtin `{}`", name))?;
        builtin.call(self, args)
    }

    /// The builtin registered under `name` as a callable value.
    ///
    /// The receiver is ignored; arguments are passed through as is.
    pub fn function(&self, name: &str) -> Option<Function> {
        let builtin = get_builtin(name)?;
        let toolkit = self.clone();
        Some(Function::new(builtin.name, move |_, args| {
            builtin.call(&toolkit, args.to_vec())
        }))
    }

    /// Names of every registered builtin, in registry order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        BUILTINS.iter().map(|builtin| builtin.name)
    }
}

impl RuntimeContext for Toolkit {
    fn scheduler(&self) -> Rc<dyn Scheduler> {
        Rc::clone(&self.scheduler)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::scheduler::VirtualScheduler;

    fn toolkit() -> (Rc<VirtualScheduler>, Toolkit) {
        let scheduler = Rc::new(VirtualScheduler::new());
        (scheduler.clone(), Toolkit::new(scheduler))
    }

    #[test]
    fn test_call_dispatches_by_name() {
        let (_, toolkit) = toolkit();
        let result = toolkit
            .call("uniq", vec![Value::from(json!([1, 2, 1]))])
            .unwrap();
        assert_eq!(result, Value::from(json!([1, 2])));
    }

    #[test]
    fn test_unknown_builtin_is_an_error() {
        let (_, toolkit) = toolkit();
        let err = toolkit.call("frobnicate", vec![]).unwrap_err();
        assert_eq!(err, "unknown builtin `frobnicate`");
        assert!(toolkit.function("frobnicate").is_none());
    }

    #[test]
    fn test_builtins_compose_as_function_values() {
        let (_, toolkit) = toolkit();
        let identity = toolkit.function("identity").unwrap();
        let truthy = toolkit
            .call(
                "filter",
                vec![Value::from(json!([0, 1, "", "a"])), Value::from(identity)],
            )
            .unwrap();
        assert_eq!(truthy, Value::from(json!([1, "a"])));
    }

    #[test]
    fn test_deferred_builtins_share_the_scheduler() {
        let (scheduler, toolkit) = toolkit();
        let noop = Function::new("noop", |_, _| Ok(Value::Undefined));
        toolkit
            .call("delay", vec![Value::from(noop), Value::Integer(5)])
            .unwrap();
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.advance(Duration::from_millis(5)), 1);
    }

    #[test]
    fn test_names_lists_the_registry() {
        let (_, toolkit) = toolkit();
        let names: Vec<_> = toolkit.names().collect();
        assert!(names.contains(&"each"));
        assert!(names.contains(&"throttle"));
        assert_eq!(names.len(), BUILTINS.len());
    }
}
