use crate::{
    collections::{
        each,
        traversal::{self, Callee, SortKey},
    },
    runtime::{RuntimeContext, function::Function, value::Value},
};

use super::helpers::{
    arg_array, arg_collection, arg_function, arg_optional_function, check_arity, check_arity_min,
    check_arity_range, property_key, type_error,
};

/// Truthiness of `func(item)`, the test every predicate builtin applies.
fn passes(func: &Function, item: &Value) -> Result<bool, String> {
    Ok(func.apply(std::slice::from_ref(item))?.is_truthy())
}

pub(super) fn builtin_identity(
    _ctx: &dyn RuntimeContext,
    mut args: Vec<Value>,
) -> Result<Value, String> {
    check_arity(&args, 1, "identity", "identity(value)")?;
    Ok(traversal::identity(args.swap_remove(0)))
}

/// each(collection, iterator) - Call iterator once per element
///
/// Callback signature: iterator(value, key, collection), receiver `undefined`
/// Keys are integer indices for arrays and own key names for objects
pub(super) fn builtin_each(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    const SIGNATURE: &str = "each(collection, iterator)";
    check_arity(&args, 2, "each", SIGNATURE)?;
    let source = arg_collection(&args, 0, "each", "first argument", SIGNATURE)?;
    let collection = source.as_collection();
    let func = arg_function(&args, 1, "each", "second argument", SIGNATURE)?;

    each(collection, |value, key, _| {
        func.apply(&[value.clone(), key.to_value(), args[0].clone()])?;
        Ok(())
    })?;
    Ok(Value::Undefined)
}

/// index_of(array, value) - Index of the first strictly equal element, or -1
pub(super) fn builtin_index_of(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    check_arity(&args, 2, "index_of", "index_of(array, value)")?;
    let array = arg_array(&args, 0, "index_of", "first argument", "index_of(array, value)")?;
    let index = traversal::index_of(array, &args[1]).map_or(-1, |i| i as i64);
    Ok(Value::Integer(index))
}

/// filter(collection, predicate) - Keep elements where predicate returns truthy
pub(super) fn builtin_filter(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    const SIGNATURE: &str = "filter(collection, predicate)";
    check_arity(&args, 2, "filter", SIGNATURE)?;
    let source = arg_collection(&args, 0, "filter", "first argument", SIGNATURE)?;
    let collection = source.as_collection();
    let func = arg_function(&args, 1, "filter", "second argument", SIGNATURE)?;
    let kept = traversal::filter(collection, |item| passes(func, item))?;
    Ok(Value::array(kept))
}

/// reject(collection, predicate) - Keep elements where predicate returns falsy
pub(super) fn builtin_reject(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    const SIGNATURE: &str = "reject(collection, predicate)";
    check_arity(&args, 2, "reject", SIGNATURE)?;
    let source = arg_collection(&args, 0, "reject", "first argument", SIGNATURE)?;
    let collection = source.as_collection();
    let func = arg_function(&args, 1, "reject", "second argument", SIGNATURE)?;
    let kept = traversal::reject(collection, |item| passes(func, item))?;
    Ok(Value::array(kept))
}

/// map(collection, iterator) - Apply iterator to each element, return new array of results
///
/// Callback signature: iterator(element)
/// Objects map their values in insertion order
pub(super) fn builtin_map(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    const SIGNATURE: &str = "map(collection, iterator)";
    check_arity(&args, 2, "map", SIGNATURE)?;
    let source = arg_collection(&args, 0, "map", "first argument", SIGNATURE)?;
    let collection = source.as_collection();
    let func = arg_function(&args, 1, "map", "second argument", SIGNATURE)?;
    let mapped = traversal::map(collection, |item| func.apply(std::slice::from_ref(item)))?;
    Ok(Value::array(mapped))
}

pub(super) fn builtin_pluck(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    const SIGNATURE: &str = "pluck(collection, key)";
    check_arity(&args, 2, "pluck", SIGNATURE)?;
    let source = arg_collection(&args, 0, "pluck", "first argument", SIGNATURE)?;
    let collection = source.as_collection();
    let key = property_key(&args[1]).ok_or_else(|| {
        type_error(
            "pluck",
            "second argument",
            "String or Number",
            args[1].type_name(),
            SIGNATURE,
        )
    })?;
    Ok(Value::array(traversal::pluck(collection, &key)?))
}

/// reduce(collection, iterator, memo?) - Left fold
///
/// Callback signature: iterator(accumulator, element)
/// With `memo` omitted the first element seeds the accumulator and the
/// callback starts at the second one. An explicit `undefined` memo is a seed.
pub(super) fn builtin_reduce(
    _ctx: &dyn RuntimeContext,
    mut args: Vec<Value>,
) -> Result<Value, String> {
    const SIGNATURE: &str = "reduce(collection, iterator, memo)";
    check_arity_range(&args, 2, 3, "reduce", SIGNATURE)?;
    let memo = if args.len() == 3 { args.pop() } else { None };
    let source = arg_collection(&args, 0, "reduce", "first argument", SIGNATURE)?;
    let collection = source.as_collection();
    let func = arg_function(&args, 1, "reduce", "second argument", SIGNATURE)?;
    traversal::reduce(
        collection,
        |acc, item| func.apply(&[acc, item.clone()]),
        memo,
    )
}

pub(super) fn builtin_contains(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    const SIGNATURE: &str = "contains(collection, value)";
    check_arity(&args, 2, "contains", SIGNATURE)?;
    let source = arg_collection(&args, 0, "contains", "first argument", SIGNATURE)?;
    let collection = source.as_collection();
    Ok(Value::Boolean(traversal::contains(collection, &args[1])?))
}

/// every(collection, iterator?) - Whether every element passes
///
/// A missing, `undefined` or `null` iterator tests truthiness of the element.
pub(super) fn builtin_every(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    const SIGNATURE: &str = "every(collection, iterator)";
    check_arity_range(&args, 1, 2, "every", SIGNATURE)?;
    let source = arg_collection(&args, 0, "every", "first argument", SIGNATURE)?;
    let collection = source.as_collection();
    let all = match arg_optional_function(&args, 1, "every", "second argument", SIGNATURE)? {
        Some(func) => traversal::every(collection, Some(&mut |item: &Value| passes(func, item)))?,
        None => traversal::every(collection, None)?,
    };
    Ok(Value::Boolean(all))
}

/// some(collection, iterator?) - Whether at least one element passes
pub(super) fn builtin_some(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    const SIGNATURE: &str = "some(collection, iterator)";
    check_arity_range(&args, 1, 2, "some", SIGNATURE)?;
    let source = arg_collection(&args, 0, "some", "first argument", SIGNATURE)?;
    let collection = source.as_collection();
    let any = match arg_optional_function(&args, 1, "some", "second argument", SIGNATURE)? {
        Some(func) => traversal::some(collection, Some(&mut |item: &Value| passes(func, item)))?,
        None => traversal::some(collection, None)?,
    };
    Ok(Value::Boolean(any))
}

/// sort_by(collection, iterator) - New array ordered by a numeric criterion
///
/// `iterator` is either a property name or a function of the element.
pub(super) fn builtin_sort_by(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    const SIGNATURE: &str = "sort_by(collection, iterator)";
    check_arity(&args, 2, "sort_by", SIGNATURE)?;
    let source = arg_collection(&args, 0, "sort_by", "first argument", SIGNATURE)?;
    let collection = source.as_collection();
    let sorted = match &args[1] {
        Value::Function(func) => {
            let mut criterion = |item: &Value| func.apply(std::slice::from_ref(item));
            traversal::sort_by(collection, SortKey::Iterator(&mut criterion))?
        }
        other => match property_key(other) {
            Some(name) => traversal::sort_by(collection, SortKey::Property(&name))?,
            None => {
                return Err(type_error(
                    "sort_by",
                    "second argument",
                    "Function, String or Number",
                    other.type_name(),
                    SIGNATURE,
                ));
            }
        },
    };
    Ok(Value::array(sorted))
}

/// invoke(collection, function_or_key, ...args) - Call a function on every element
///
/// The element is the receiver. A key names a method looked up on each element.
pub(super) fn builtin_invoke(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    const SIGNATURE: &str = "invoke(collection, function_or_key, ...args)";
    check_arity_min(&args, 2, "invoke", SIGNATURE)?;
    let source = arg_collection(&args, 0, "invoke", "first argument", SIGNATURE)?;
    let collection = source.as_collection();
    let key;
    let callee = match &args[1] {
        Value::Function(func) => Callee::Function(func),
        other => match property_key(other) {
            Some(name) => {
                key = name;
                Callee::Method(&key)
            }
            None => {
                return Err(type_error(
                    "invoke",
                    "second argument",
                    "Function, String or Number",
                    other.type_name(),
                    SIGNATURE,
                ));
            }
        },
    };
    Ok(Value::array(traversal::invoke(collection, callee, &args[2..])?))
}
