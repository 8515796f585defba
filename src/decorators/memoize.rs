use std::{cell::RefCell, collections::HashMap};

use crate::runtime::{function::Function, value::Value};

/// Caches results keyed by the string form of the first argument.
///
/// Only the first argument is part of the key, and `1` and `"1"` share an
/// entry. Errors are returned but never cached.
pub struct Memoize {
    func: Function,
    cache: RefCell<HashMap<String, Value>>,
}

impl Memoize {
    pub fn new(func: Function) -> Self {
        Self {
            func,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn call(&self, receiver: &Value, args: &[Value]) -> Result<Value, String> {
        let key = args
            .first()
            .map(Value::to_string_value)
            .unwrap_or_else(|| "undefined".to_string());
        if let Some(hit) = self.cache.borrow().get(&key) {
            log::trace!("memoize {}: hit for {:?}", self.func.name(), key);
            return Ok(hit.clone());
        }
        log::debug!("memoize {}: miss for {:?}", self.func.name(), key);
        let result = self.func.call(receiver, args)?;
        self.cache.borrow_mut().insert(key, result.clone());
        Ok(result)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    pub fn into_function(self) -> Function {
        let name = self.func.name().to_string();
        Function::new(name, move |receiver, args| self.call(receiver, args))
    }
}

pub fn memoize(func: Function) -> Function {
    Memoize::new(func).into_function()
}
