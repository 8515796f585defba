use std::fmt;

use crate::runtime::{BuiltinFn, RuntimeContext, value::Value};

#[derive(Clone)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl BuiltinFunction {
    pub fn call(&self, ctx: &dyn RuntimeContext, args: Vec<Value>) -> Result<Value, String> {
        log::trace!("builtin {} called with {} argument(s)", self.name, args.len());
        (self.func)(ctx, args)
    }
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFunction({})", self.name)
    }
}

impl PartialEq for BuiltinFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
