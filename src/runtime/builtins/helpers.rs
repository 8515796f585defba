use std::{cell::RefCell, rc::Rc, time::Duration};

use crate::{
    collections::CollectionValue,
    runtime::{function::Function, object::Object, value::Value},
};

pub(super) fn format_hint(signature: &str) -> String {
    format!("\n\nHint:\n  {}", signature)
}

pub(super) fn arity_error(name: &str, expected: &str, got: usize, signature: &str) -> String {
    format!(
        "wrong number of arguments\n\n  function: {}/{}\n  expected: {}\n  got: {}{}",
        name,
        expected,
        expected,
        got,
        format_hint(signature)
    )
}

pub(super) fn type_error(
    name: &str,
    label: &str,
    expected: &str,
    got: &str,
    signature: &str,
) -> String {
    format!(
        "{} expected {} to be {}, got {}{}",
        name,
        label,
        expected,
        got,
        format_hint(signature)
    )
}

pub(super) fn check_arity(
    args: &[Value],
    expected: usize,
    name: &str,
    signature: &str,
) -> Result<(), String> {
    if args.len() != expected {
        return Err(arity_error(
            name,
            &expected.to_string(),
            args.len(),
            signature,
        ));
    }
    Ok(())
}

pub(super) fn check_arity_range(
    args: &[Value],
    min: usize,
    max: usize,
    name: &str,
    signature: &str,
) -> Result<(), String> {
    if args.len() < min || args.len() > max {
        return Err(arity_error(
            name,
            &format!("{}..{}", min, max),
            args.len(),
            signature,
        ));
    }
    Ok(())
}

/// Arity check for variadic builtins.
pub(super) fn check_arity_min(
    args: &[Value],
    min: usize,
    name: &str,
    signature: &str,
) -> Result<(), String> {
    if args.len() < min {
        return Err(arity_error(
            name,
            &format!("{}+", min),
            args.len(),
            signature,
        ));
    }
    Ok(())
}

pub(super) fn arg_array<'a>(
    args: &'a [Value],
    index: usize,
    name: &str,
    label: &str,
    signature: &str,
) -> Result<&'a [Value], String> {
    match &args[index] {
        Value::Array(arr) => Ok(arr),
        other => Err(type_error(
            name,
            label,
            "Array",
            other.type_name(),
            signature,
        )),
    }
}

pub(super) fn arg_object<'a>(
    args: &'a [Value],
    index: usize,
    name: &str,
    label: &str,
    signature: &str,
) -> Result<&'a Rc<RefCell<Object>>, String> {
    match &args[index] {
        Value::Object(object) => Ok(object),
        other => Err(type_error(
            name,
            label,
            "Object",
            other.type_name(),
            signature,
        )),
    }
}

pub(super) fn arg_function<'a>(
    args: &'a [Value],
    index: usize,
    name: &str,
    label: &str,
    signature: &str,
) -> Result<&'a Function, String> {
    match &args[index] {
        Value::Function(func) => Ok(func),
        other => Err(type_error(
            name,
            label,
            "Function",
            other.type_name(),
            signature,
        )),
    }
}

/// Like [`arg_function`], but `undefined`, `null` and a missing argument
/// mean "no function".
pub(super) fn arg_optional_function<'a>(
    args: &'a [Value],
    index: usize,
    name: &str,
    label: &str,
    signature: &str,
) -> Result<Option<&'a Function>, String> {
    match args.get(index) {
        None => Ok(None),
        Some(value) if value.is_nullish() => Ok(None),
        Some(_) => arg_function(args, index, name, label, signature).map(Some),
    }
}

pub(super) fn arg_collection<'a>(
    args: &'a [Value],
    index: usize,
    name: &str,
    label: &str,
    signature: &str,
) -> Result<CollectionValue<'a>, String> {
    CollectionValue::try_from(&args[index]).map_err(|_| {
        type_error(
            name,
            label,
            "Array or Object",
            args[index].type_name(),
            signature,
        )
    })
}

/// Property key. Numbers name array indices and are coerced to strings.
pub(super) fn property_key(value: &Value) -> Option<String> {
    match value {
        Value::String(key) => Some(key.to_string()),
        Value::Integer(_) | Value::Float(_) => Some(value.to_string_value()),
        _ => None,
    }
}

/// Optional element count. Missing or `undefined` means "not given";
/// fractions truncate and negative counts clamp to zero.
pub(super) fn arg_count(
    args: &[Value],
    index: usize,
    name: &str,
    label: &str,
    signature: &str,
) -> Result<Option<usize>, String> {
    match args.get(index) {
        None | Some(Value::Undefined) => Ok(None),
        Some(Value::Integer(n)) => Ok(Some((*n).max(0) as usize)),
        Some(Value::Float(n)) if !n.is_nan() => Ok(Some(n.max(0.0) as usize)),
        Some(other) => Err(type_error(
            name,
            label,
            "Number",
            other.type_name(),
            signature,
        )),
    }
}

/// Wait time in milliseconds. Negative waits clamp to zero.
pub(super) fn arg_wait(
    args: &[Value],
    index: usize,
    name: &str,
    label: &str,
    signature: &str,
) -> Result<Duration, String> {
    let wait = args[index]
        .as_number()
        .filter(|ms| !ms.is_nan())
        .and_then(|ms| Duration::try_from_secs_f64(ms.max(0.0) / 1000.0).ok());
    match wait {
        Some(wait) => Ok(wait),
        None => Err(type_error(
            name,
            label,
            "finite Number",
            args[index].type_name(),
            signature,
        )),
    }
}
