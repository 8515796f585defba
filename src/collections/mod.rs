//! Collection traversal and the operations derived from it.
//!
//! # Layering
//! [`each`] is the only function that walks a collection. Everything in
//! [`traversal`] is written in terms of `each` or [`traversal::reduce`], and
//! everything in [`array_ops`] and [`object_ops`] is written in terms of
//! those. Nothing here depends on the decorators.
//!
//! Callback errors stop the walk and propagate unchanged to the caller.
use crate::runtime::{object::Object, value::Value};

pub mod array_ops;
pub mod object_ops;
pub mod traversal;

/// Position of an element inside its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    /// 0-based position in a sequence.
    Index(usize),
    /// Own key of a mapping.
    Name(&'a str),
}

impl Key<'_> {
    /// The key as a value: an integer for indices, a string for names.
    pub fn to_value(self) -> Value {
        match self {
            Key::Index(i) => Value::Integer(i as i64),
            Key::Name(name) => Value::from(name),
        }
    }
}

/// Anything `each` can walk.
#[derive(Debug, Clone, Copy)]
pub enum Collection<'a> {
    /// Ordered elements, visited by ascending index.
    Sequence(&'a [Value]),
    /// Own entries of an object, visited in insertion order.
    Mapping(&'a Object),
}

impl Collection<'_> {
    /// Number of elements a walk visits.
    pub fn len(&self) -> usize {
        match self {
            Collection::Sequence(items) => items.len(),
            Collection::Mapping(object) => object.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<&'a [Value]> for Collection<'a> {
    fn from(items: &'a [Value]) -> Self {
        Collection::Sequence(items)
    }
}

impl<'a> From<&'a Vec<Value>> for Collection<'a> {
    fn from(items: &'a Vec<Value>) -> Self {
        Collection::Sequence(items.as_slice())
    }
}

impl<'a> From<&'a Object> for Collection<'a> {
    fn from(object: &'a Object) -> Self {
        Collection::Mapping(object)
    }
}

/// A collection read out of a [`Value`].
///
/// Arrays are borrowed. An object is copied when it is read, so callbacks
/// may write to the source object while its entries are being walked.
#[derive(Debug, Clone)]
pub enum CollectionValue<'a> {
    Sequence(&'a [Value]),
    Mapping(Object),
}

impl CollectionValue<'_> {
    pub fn as_collection(&self) -> Collection<'_> {
        match self {
            CollectionValue::Sequence(items) => Collection::Sequence(*items),
            CollectionValue::Mapping(object) => Collection::Mapping(object),
        }
    }
}

impl<'a> TryFrom<&'a Value> for CollectionValue<'a> {
    type Error = String;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) => Ok(CollectionValue::Sequence(items.as_slice())),
            Value::Object(object) => Ok(CollectionValue::Mapping(object.borrow().clone())),
            other => Err(format!(
                "expected collection to be Array or Object, got {}",
                other.type_name()
            )),
        }
    }
}

/// Calls `iterator(value, key, collection)` once for every element.
///
/// Sequences are visited by ascending index, mappings by own key in insertion
/// order. The collection itself is never modified.
pub fn each<'a, F>(collection: Collection<'a>, mut iterator: F) -> Result<(), String>
where
    F: FnMut(&'a Value, Key<'a>, Collection<'a>) -> Result<(), String>,
{
    match collection {
        Collection::Sequence(items) => {
            for (index, value) in items.iter().enumerate() {
                iterator(value, Key::Index(index), collection)?;
            }
        }
        Collection::Mapping(object) => {
            for (key, value) in object.iter() {
                iterator(value, Key::Name(key), collection)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod traversal_test;
