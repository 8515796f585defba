use crate::{
    collections::array_ops,
    runtime::{RuntimeContext, value::Value},
};

use super::helpers::{
    arg_array, arg_count, check_arity, check_arity_min, check_arity_range, type_error,
};

/// Every argument as an array slice, for the variadic set operations.
fn arrays<'a>(args: &'a [Value], name: &str, signature: &str) -> Result<Vec<&'a [Value]>, String> {
    args.iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Array(arr) => Ok(arr.as_slice()),
            other => Err(type_error(
                name,
                &format!("argument {}", index + 1),
                "Array",
                other.type_name(),
                signature,
            )),
        })
        .collect()
}

/// first(array, n?) - First element, or the first n elements
pub(super) fn builtin_first(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    check_arity_range(&args, 1, 2, "first", "first(array, n)")?;
    let arr = arg_array(&args, 0, "first", "first argument", "first(array, n)")?;
    let n = arg_count(&args, 1, "first", "second argument", "first(array, n)")?;
    Ok(array_ops::first(arr, n))
}

/// last(array, n?) - Last element, or the final n elements
pub(super) fn builtin_last(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    check_arity_range(&args, 1, 2, "last", "last(array, n)")?;
    let arr = arg_array(&args, 0, "last", "first argument", "last(array, n)")?;
    let n = arg_count(&args, 1, "last", "second argument", "last(array, n)")?;
    Ok(array_ops::last(arr, n))
}

pub(super) fn builtin_uniq(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    check_arity(&args, 1, "uniq", "uniq(array)")?;
    let arr = arg_array(&args, 0, "uniq", "argument", "uniq(array)")?;
    Ok(Value::array(array_ops::uniq(arr)))
}

/// zip(...arrays) - Rows of same-index elements, padded with undefined
pub(super) fn builtin_zip(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    let arrs = arrays(&args, "zip", "zip(...arrays)")?;
    Ok(Value::array(array_ops::zip(&arrs)))
}

pub(super) fn builtin_flatten(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    check_arity(&args, 1, "flatten", "flatten(array)")?;
    let arr = arg_array(&args, 0, "flatten", "argument", "flatten(array)")?;
    Ok(Value::array(array_ops::flatten(arr)))
}

/// intersection(array, ...others) - Values present in every array
///
/// Occurrences are counted across all arrays, so a value repeated in one
/// array can make up for its absence from another.
pub(super) fn builtin_intersection(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    const SIGNATURE: &str = "intersection(array, ...others)";
    check_arity_min(&args, 1, "intersection", SIGNATURE)?;
    let arrs = arrays(&args, "intersection", SIGNATURE)?;
    Ok(Value::array(array_ops::intersection(&arrs)))
}

/// difference(array, ...others) - Elements of array found in none of the others
///
/// The others are flattened first, so plain values may be passed as well.
pub(super) fn builtin_difference(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    const SIGNATURE: &str = "difference(array, ...others)";
    check_arity_min(&args, 1, "difference", SIGNATURE)?;
    let arr = arg_array(&args, 0, "difference", "first argument", SIGNATURE)?;
    Ok(Value::array(array_ops::difference(arr, &args[1..])?))
}

pub(super) fn builtin_shuffle(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    check_arity(&args, 1, "shuffle", "shuffle(array)")?;
    let arr = arg_array(&args, 0, "shuffle", "argument", "shuffle(array)")?;
    Ok(Value::array(array_ops::shuffle(arr)))
}
