use std::cell::RefCell;

use crate::runtime::{function::Function, value::Value};

/// Runs the wrapped function at most once and replays its result.
///
/// A call that fails is not remembered; the next call tries again.
pub struct Once {
    func: Function,
    result: RefCell<Option<Value>>,
}

impl Once {
    pub fn new(func: Function) -> Self {
        Self {
            func,
            result: RefCell::new(None),
        }
    }

    pub fn call(&self, receiver: &Value, args: &[Value]) -> Result<Value, String> {
        if let Some(result) = self.result.borrow().as_ref() {
            return Ok(result.clone());
        }
        let result = self.func.call(receiver, args)?;
        *self.result.borrow_mut() = Some(result.clone());
        Ok(result)
    }

    /// Whether a call has completed successfully.
    pub fn has_run(&self) -> bool {
        self.result.borrow().is_some()
    }

    pub fn into_function(self) -> Function {
        let name = self.func.name().to_string();
        Function::new(name, move |receiver, args| self.call(receiver, args))
    }
}

pub fn once(func: Function) -> Function {
    Once::new(func).into_function()
}
