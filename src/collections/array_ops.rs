use rand::{Rng, seq::SliceRandom};

use crate::{
    collections::{
        Collection, each,
        traversal::{contains, filter, index_of},
    },
    runtime::value::Value,
};

/// First element when `n` is `None`, otherwise the first `n` elements.
///
/// An `n` past the end returns the whole array; an empty array has no first
/// element and yields `undefined`.
pub fn first(array: &[Value], n: Option<usize>) -> Value {
    match n {
        None => array.first().cloned().unwrap_or_default(),
        Some(n) => Value::array(array[..n.min(array.len())].to_vec()),
    }
}

/// Last element when `n` is `None`, otherwise the final `n` elements.
pub fn last(array: &[Value], n: Option<usize>) -> Value {
    match n {
        None => array.last().cloned().unwrap_or_default(),
        Some(0) => Value::array(Vec::new()),
        Some(n) if n >= array.len() => Value::array(array.to_vec()),
        Some(n) => Value::array(array[array.len() - n..].to_vec()),
    }
}

/// Duplicate-free copy in first-occurrence order, under strict equality.
pub fn uniq(array: &[Value]) -> Vec<Value> {
    let mut results: Vec<Value> = Vec::new();
    let _ = each(Collection::Sequence(array), |item, _, _| {
        if index_of(&results, item).is_none() {
            results.push(item.clone());
        }
        Ok(())
    });
    results
}

/// Groups the i-th element of every array into row `i`.
///
/// There are as many rows as the longest array has elements; shorter arrays
/// contribute `undefined` past their end.
pub fn zip(arrays: &[&[Value]]) -> Vec<Value> {
    let longest = arrays.iter().map(|array| array.len()).max().unwrap_or(0);
    (0..longest)
        .map(|i| {
            Value::array(
                arrays
                    .iter()
                    .map(|array| array.get(i).cloned().unwrap_or_default())
                    .collect(),
            )
        })
        .collect()
}

/// Flattens nested arrays to any depth, depth-first, left to right.
pub fn flatten(nested: &[Value]) -> Vec<Value> {
    let mut out = Vec::new();
    flatten_into(nested, &mut out);
    out
}

fn flatten_into(array: &[Value], out: &mut Vec<Value>) {
    let _ = each(Collection::Sequence(array), |value, _, _| {
        match value {
            Value::Array(inner) => flatten_into(inner, out),
            other => out.push(other.clone()),
        }
        Ok(())
    });
}

/// Values shared by all `arrays`.
///
/// Occurrences are counted across every array and a value is kept when its
/// count equals the number of arrays, so a value repeated inside one array
/// can stand in for an array that lacks it. Results keep first-seen order.
pub fn intersection(arrays: &[&[Value]]) -> Vec<Value> {
    let mut counts: Vec<(Value, usize)> = Vec::new();
    for array in arrays {
        let _ = each(Collection::Sequence(array), |item, _, _| {
            match counts.iter_mut().find(|(seen, _)| seen.strict_equals(item)) {
                Some((_, count)) => *count += 1,
                None => counts.push((item.clone(), 1)),
            }
            Ok(())
        });
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count == arrays.len())
        .map(|(value, _)| value)
        .collect()
}

/// Elements of `array` absent from every one of `others` (flattened).
pub fn difference(array: &[Value], others: &[Value]) -> Result<Vec<Value>, String> {
    let excluded = flatten(others);
    filter(Collection::Sequence(array), |value| {
        Ok(!contains(Collection::Sequence(&excluded), value)?)
    })
}

/// New array holding a uniformly random permutation of `array`.
pub fn shuffle(array: &[Value]) -> Vec<Value> {
    shuffle_with(array, &mut rand::thread_rng())
}

/// [`shuffle`] with a caller-supplied random source.
pub fn shuffle_with<R: Rng + ?Sized>(array: &[Value], rng: &mut R) -> Vec<Value> {
    let mut copy = array.to_vec();
    copy.shuffle(rng);
    copy
}
