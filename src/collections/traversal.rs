use std::cmp::Ordering;

use crate::{
    collections::{Collection, Key, each},
    runtime::{function::Function, value::Value},
};

/// Truth test over a single element.
pub type Predicate<'f> = dyn FnMut(&Value) -> Result<bool, String> + 'f;

/// Projection of a single element.
pub type Projection<'f> = dyn FnMut(&Value) -> Result<Value, String> + 'f;

/// How [`sort_by`] derives the sort criterion of each element.
pub enum SortKey<'f> {
    /// Numeric value of the named property.
    Property(&'f str),
    /// Numeric value of a projection.
    Iterator(&'f mut Projection<'f>),
}

/// What [`invoke`] calls on each element.
#[derive(Debug, Clone, Copy)]
pub enum Callee<'f> {
    /// The same function for every element.
    Function(&'f Function),
    /// The function stored under this property of each element.
    Method(&'f str),
}

/// Returns its argument. The default iterator of [`every`] and [`some`].
pub fn identity(value: Value) -> Value {
    value
}

/// Position of the first element strictly equal to `target`.
pub fn index_of(array: &[Value], target: &Value) -> Option<usize> {
    let mut result = None;
    // The callback cannot fail, so neither can the walk.
    let _ = each(Collection::Sequence(array), |item, key, _| {
        if let (None, Key::Index(index)) = (result, key) {
            if item.strict_equals(target) {
                result = Some(index);
            }
        }
        Ok(())
    });
    result
}

/// Elements passing `test`, in traversal order.
pub fn filter<F>(collection: Collection<'_>, mut test: F) -> Result<Vec<Value>, String>
where
    F: FnMut(&Value) -> Result<bool, String>,
{
    let mut results = Vec::new();
    each(collection, |item, _, _| {
        if test(item)? {
            results.push(item.clone());
        }
        Ok(())
    })?;
    Ok(results)
}

/// Elements failing `test`: [`filter`] with the test negated.
pub fn reject<F>(collection: Collection<'_>, mut test: F) -> Result<Vec<Value>, String>
where
    F: FnMut(&Value) -> Result<bool, String>,
{
    filter(collection, |item| test(item).map(|passed| !passed))
}

/// One projected output per element, in traversal order.
pub fn map<F>(collection: Collection<'_>, mut iterator: F) -> Result<Vec<Value>, String>
where
    F: FnMut(&Value) -> Result<Value, String>,
{
    let mut results = Vec::with_capacity(collection.len());
    each(collection, |item, _, _| {
        results.push(iterator(item)?);
        Ok(())
    })?;
    Ok(results)
}

/// The `key` property of every element.
pub fn pluck(collection: Collection<'_>, key: &str) -> Result<Vec<Value>, String> {
    map(collection, |item| Ok(item.property(key)))
}

/// Folds the collection left to right with `iterator(accumulator, item)`.
///
/// Without a seed, the first element becomes the accumulator and is never
/// passed to `iterator`; a one-element collection is returned untouched and
/// an empty one yields `undefined`.
pub fn reduce<F>(
    collection: Collection<'_>,
    mut iterator: F,
    accumulator: Option<Value>,
) -> Result<Value, String>
where
    F: FnMut(Value, &Value) -> Result<Value, String>,
{
    let mut acc = accumulator;
    each(collection, |item, _, _| {
        acc = Some(match acc.take() {
            None => item.clone(),
            Some(current) => iterator(current, item)?,
        });
        Ok(())
    })?;
    Ok(acc.unwrap_or_default())
}

/// Whether any element is strictly equal to `target`.
pub fn contains(collection: Collection<'_>, target: &Value) -> Result<bool, String> {
    let found = reduce(
        collection,
        |was_found, item| {
            if was_found.is_truthy() {
                return Ok(was_found);
            }
            Ok(Value::Boolean(item.strict_equals(target)))
        },
        Some(Value::Boolean(false)),
    )?;
    Ok(found.is_truthy())
}

/// Whether every element passes `iterator` (truthiness when `None`).
///
/// The test runs on every element; a failure does not stop the fold.
pub fn every(
    collection: Collection<'_>,
    iterator: Option<&mut Predicate<'_>>,
) -> Result<bool, String> {
    match iterator {
        Some(test) => every_by(collection, test),
        None => every_by(collection, &mut |item: &Value| {
            Ok(identity(item.clone()).is_truthy())
        }),
    }
}

/// Whether at least one element passes `iterator` (truthiness when `None`).
///
/// Computed as "not every element fails".
pub fn some(
    collection: Collection<'_>,
    iterator: Option<&mut Predicate<'_>>,
) -> Result<bool, String> {
    let none_pass = match iterator {
        Some(test) => every_by(collection, &mut |item: &Value| test(item).map(|passed| !passed)),
        None => every_by(collection, &mut |item: &Value| {
            Ok(!identity(item.clone()).is_truthy())
        }),
    }?;
    Ok(!none_pass)
}

fn every_by(collection: Collection<'_>, test: &mut Predicate<'_>) -> Result<bool, String> {
    let all = reduce(
        collection,
        |acc, item| {
            if test(item)? {
                Ok(acc)
            } else {
                Ok(Value::Boolean(false))
            }
        },
        Some(Value::Boolean(true)),
    )?;
    Ok(all.is_truthy())
}

/// Elements ordered by the numeric value of their criterion.
///
/// Returns a new sequence; the input is left as is. The sort is stable and
/// each criterion is computed once. Elements whose criterion has no numeric
/// reading (`NaN`) keep their relative order after all numeric ones.
pub fn sort_by(collection: Collection<'_>, key: SortKey<'_>) -> Result<Vec<Value>, String> {
    let criteria = match key {
        SortKey::Property(name) => map(collection, |item| Ok(item.property(name)))?,
        SortKey::Iterator(iterator) => map(collection, |item| iterator(item))?,
    };
    let criteria: Vec<f64> = criteria.iter().map(Value::to_number).collect();
    let items = map(collection, |item| Ok(item.clone()))?;

    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| compare_criteria(criteria[a], criteria[b]));
    Ok(order.into_iter().map(|i| items[i].clone()).collect())
}

fn compare_criteria(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

/// Calls the resolved function on every element, with the element as receiver.
///
/// A method that resolves to `undefined` or `null` is not called; the nullish
/// value becomes that element's result.
pub fn invoke(
    collection: Collection<'_>,
    callee: Callee<'_>,
    args: &[Value],
) -> Result<Vec<Value>, String> {
    map(collection, |item| {
        let name = match callee {
            Callee::Function(func) => return func.call(item, args),
            Callee::Method(name) => name,
        };
        match item.property(name) {
            Value::Function(func) => func.call(item, args),
            nullish if nullish.is_nullish() => Ok(nullish),
            other => Err(format!(
                "invoke expected method `{}` to be Function, got {}\n\nHint:\n  {}",
                name,
                other.type_name(),
                "invoke(collection, functionOrKey, args)"
            )),
        }
    })
}
