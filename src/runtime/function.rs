use std::{fmt, rc::Rc};

use crate::runtime::value::Value;

/// Signature every callable value implements: `(receiver, args) -> result`.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> Result<Value, String>;

/// Callable value carrying a receiver (`this`) and positional arguments.
///
/// Cloning shares the underlying closure; two clones are the same function
/// under [`Function::ptr_eq`].
#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    func: Rc<NativeFn>,
}

impl Function {
    pub fn new<F>(name: impl Into<Rc<str>>, func: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, String> + 'static,
    {
        Self {
            name: name.into(),
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the function with an explicit receiver.
    pub fn call(&self, receiver: &Value, args: &[Value]) -> Result<Value, String> {
        (self.func)(receiver, args)
    }

    /// Invokes the function with an `undefined` receiver.
    pub fn apply(&self, args: &[Value]) -> Result<Value, String> {
        self.call(&Value::Undefined, args)
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.func), Rc::as_ptr(&other.func))
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.name)
    }
}
