use crate::{
    decorators,
    runtime::{RuntimeContext, value::Value},
    scheduler::TimerId,
};

use super::helpers::{arg_function, arg_wait, check_arity, check_arity_min, type_error};

pub(super) fn builtin_once(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    check_arity(&args, 1, "once", "once(func)")?;
    let func = arg_function(&args, 0, "once", "argument", "once(func)")?;
    Ok(Value::Function(decorators::once(func.clone())))
}

pub(super) fn builtin_memoize(
    _ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    check_arity(&args, 1, "memoize", "memoize(func)")?;
    let func = arg_function(&args, 0, "memoize", "argument", "memoize(func)")?;
    Ok(Value::Function(decorators::memoize(func.clone())))
}

/// delay(func, wait, ...args) - Call func(...args) after wait milliseconds
///
/// Returns an integer timer id accepted by `cancel`.
pub(super) fn builtin_delay(
    ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    const SIGNATURE: &str = "delay(func, wait, ...args)";
    check_arity_min(&args, 2, "delay", SIGNATURE)?;
    let func = arg_function(&args, 0, "delay", "first argument", SIGNATURE)?;
    let wait = arg_wait(&args, 1, "delay", "second argument", SIGNATURE)?;
    let scheduler = ctx.scheduler();
    let id = decorators::delay(scheduler.as_ref(), func.clone(), wait, args[2..].to_vec());
    Ok(Value::Integer(id.as_raw() as i64))
}

/// cancel(timer_id) - Drop a pending delayed call; true if it was still pending
pub(super) fn builtin_cancel(
    ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    check_arity(&args, 1, "cancel", "cancel(timer_id)")?;
    match &args[0] {
        Value::Integer(raw) if *raw >= 0 => {
            let cancelled = ctx.scheduler().cancel(TimerId::from_raw(*raw as u64));
            Ok(Value::Boolean(cancelled))
        }
        other => Err(type_error(
            "cancel",
            "argument",
            "timer id",
            other.type_name(),
            "cancel(timer_id)",
        )),
    }
}

/// throttle(func, wait) - Call func at most once per wait milliseconds
///
/// Calls inside the window collapse into one trailing call with the latest
/// arguments. Each call returns the most recent result.
pub(super) fn builtin_throttle(
    ctx: &dyn RuntimeContext,
    args: Vec<Value>,
) -> Result<Value, String> {
    check_arity(&args, 2, "throttle", "throttle(func, wait)")?;
    let func = arg_function(&args, 0, "throttle", "first argument", "throttle(func, wait)")?;
    let wait = arg_wait(&args, 1, "throttle", "second argument", "throttle(func, wait)")?;
    Ok(Value::Function(decorators::throttle(
        ctx.scheduler(),
        func.clone(),
        wait,
    )))
}
