use std::{collections::HashMap, rc::Rc};

use crate::runtime::value::Value;

/// String-keyed mapping backing [`Value::Object`].
///
/// Own keys iterate in insertion order; overwriting a key keeps its original
/// position. An optional prototype supplies inherited keys: they are visible
/// to [`Object::get`] and to `for_in` walks, but are never owned.
#[derive(Debug, Clone, Default)]
pub struct Object {
    keys: Vec<Rc<str>>,
    entries: HashMap<Rc<str>, Value>,
    prototype: Option<Rc<Object>>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty object inheriting every key of `prototype`.
    pub fn with_prototype(prototype: Rc<Object>) -> Self {
        Self {
            prototype: Some(prototype),
            ..Self::default()
        }
    }

    pub fn prototype(&self) -> Option<&Rc<Object>> {
        self.prototype.as_ref()
    }

    /// Sets an own key, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<Rc<str>>, value: Value) -> Option<Value> {
        let key = key.into();
        if !self.entries.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.entries.insert(key, value)
    }

    pub fn get_own(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Looks a key up on this object, then along the prototype chain.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.entries.get(key) {
            Some(value) => Some(value),
            None => self.prototype.as_ref().and_then(|proto| proto.get(key)),
        }
    }

    pub fn has_own(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of own keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Own keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.as_ref())
    }

    /// Own entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.keys.iter().map(|k| (k.as_ref(), &self.entries[k]))
    }
}

impl PartialEq for Object {
    /// Key order is not significant.
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries && self.prototype == other.prototype
    }
}

impl<K: Into<Rc<str>>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut object = Object::new();
        object.insert("a", Value::Integer(1));
        object.insert("b", Value::Integer(2));
        let replaced = object.insert("a", Value::Integer(3));

        assert_eq!(replaced, Some(Value::Integer(1)));
        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(object.get_own("a"), Some(&Value::Integer(3)));
        assert_eq!(object.len(), 2);
    }

    #[test]
    fn test_prototype_chain_lookup() {
        let base: Object = [("kind", Value::from("animal")), ("legs", Value::Integer(4))]
            .into_iter()
            .collect();
        let mut bird = Object::with_prototype(Rc::new(base));
        bird.insert("legs", Value::Integer(2));

        assert_eq!(bird.get("kind"), Some(&Value::from("animal")));
        assert_eq!(bird.get("legs"), Some(&Value::Integer(2)));
        assert!(!bird.has_own("kind"));
        assert!(bird.has_own("legs"));
        assert_eq!(bird.len(), 1);
    }

    #[test]
    fn test_equality_ignores_key_order() {
        let left: Object = [("a", Value::Integer(1)), ("b", Value::Integer(2))]
            .into_iter()
            .collect();
        let right: Object = [("b", Value::Integer(2)), ("a", Value::Integer(1))]
            .into_iter()
            .collect();
        assert_eq!(left, right);
    }
}
