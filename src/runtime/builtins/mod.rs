use crate::runtime::builtin_function::BuiltinFunction;

mod array_ops;
mod collection_ops;
mod function_ops;
mod helpers;
mod object_ops;

use array_ops::{
    builtin_difference, builtin_first, builtin_flatten, builtin_intersection, builtin_last,
    builtin_shuffle, builtin_uniq, builtin_zip,
};
use collection_ops::{
    builtin_contains, builtin_each, builtin_every, builtin_filter, builtin_identity,
    builtin_index_of, builtin_invoke, builtin_map, builtin_pluck, builtin_reduce, builtin_reject,
    builtin_some, builtin_sort_by,
};
use function_ops::{
    builtin_cancel, builtin_delay, builtin_memoize, builtin_once, builtin_throttle,
};
use object_ops::{builtin_defaults, builtin_extend};

/// Every builtin, grouped by the layer that implements it.
pub static BUILTINS: &[BuiltinFunction] = &[
    BuiltinFunction {
        name: "identity",
        func: builtin_identity,
    },
    BuiltinFunction {
        name: "each",
        func: builtin_each,
    },
    BuiltinFunction {
        name: "index_of",
        func: builtin_index_of,
    },
    BuiltinFunction {
        name: "filter",
        func: builtin_filter,
    },
    BuiltinFunction {
        name: "reject",
        func: builtin_reject,
    },
    BuiltinFunction {
        name: "map",
        func: builtin_map,
    },
    BuiltinFunction {
        name: "pluck",
        func: builtin_pluck,
    },
    BuiltinFunction {
        name: "reduce",
        func: builtin_reduce,
    },
    BuiltinFunction {
        name: "contains",
        func: builtin_contains,
    },
    BuiltinFunction {
        name: "every",
        func: builtin_every,
    },
    BuiltinFunction {
        name: "some",
        func: builtin_some,
    },
    BuiltinFunction {
        name: "sort_by",
        func: builtin_sort_by,
    },
    BuiltinFunction {
        name: "invoke",
        func: builtin_invoke,
    },
    BuiltinFunction {
        name: "first",
        func: builtin_first,
    },
    BuiltinFunction {
        name: "last",
        func: builtin_last,
    },
    BuiltinFunction {
        name: "uniq",
        func: builtin_uniq,
    },
    BuiltinFunction {
        name: "zip",
        func: builtin_zip,
    },
    BuiltinFunction {
        name: "flatten",
        func: builtin_flatten,
    },
    BuiltinFunction {
        name: "intersection",
        func: builtin_intersection,
    },
    BuiltinFunction {
        name: "difference",
        func: builtin_difference,
    },
    BuiltinFunction {
        name: "shuffle",
        func: builtin_shuffle,
    },
    BuiltinFunction {
        name: "extend",
        func: builtin_extend,
    },
    BuiltinFunction {
        name: "defaults",
        func: builtin_defaults,
    },
    BuiltinFunction {
        name: "once",
        func: builtin_once,
    },
    BuiltinFunction {
        name: "memoize",
        func: builtin_memoize,
    },
    BuiltinFunction {
        name: "delay",
        func: builtin_delay,
    },
    BuiltinFunction {
        name: "cancel",
        func: builtin_cancel,
    },
    BuiltinFunction {
        name: "throttle",
        func: builtin_throttle,
    },
];

pub fn get_builtin(name: &str) -> Option<&'static BuiltinFunction> {
    BUILTINS.iter().find(|b| b.name == name)
}
