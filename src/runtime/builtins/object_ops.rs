use crate::{
    collections::object_ops,
    runtime::{RuntimeContext, object::Object, value::Value},
};

use super::helpers::{arg_object, check_arity_min, type_error};

type Merge = for<'t> fn(&'t mut Object, &[&Object]) -> &'t mut Object;

/// Writes the sources into the first argument and returns that same object.
///
/// Sources are read before the target is borrowed mutably, so a target that
/// also appears among its own sources is fine. `undefined` and `null`
/// sources are skipped.
fn merge_into_target(
    args: Vec<Value>,
    name: &str,
    signature: &str,
    merge: Merge,
) -> Result<Value, String> {
    check_arity_min(&args, 1, name, signature)?;
    let target = arg_object(&args, 0, name, "first argument", signature)?;

    let mut sources = Vec::with_capacity(args.len() - 1);
    for (index, value) in args.iter().enumerate().skip(1) {
        match value {
            Value::Object(source) => sources.push(source.borrow().clone()),
            nullish if nullish.is_nullish() => {}
            other => {
                return Err(type_error(
                    name,
                    &format!("argument {}", index + 1),
                    "Object",
                    other.type_name(),
                    signature,
                ));
            }
        }
    }

    let sources: Vec<&Object> = sources.iter().collect();
    merge(&mut *target.borrow_mut(), &sources);
    Ok(Value::Object(target.clone()))
}

/// extend(object, ...sources) - Copy every own and inherited key of the sources
pub(super) fn builtin_extend(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    merge_into_target(args, "extend", "extend(object, ...sources)", object_ops::extend)
}

/// defaults(object, ...sources) - Fill keys the object does not own
pub(super) fn builtin_defaults(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    merge_into_target(args, "defaults", "defaults(object, ...sources)", object_ops::defaults)
}
