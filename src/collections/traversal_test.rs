use std::{cell::Cell, rc::Rc};

use serde_json::json;

use super::{
    Collection,
    traversal::{
        Callee, SortKey, contains, every, filter, identity, index_of, invoke, map, pluck, reduce,
        reject, some, sort_by,
    },
};
use crate::runtime::{function::Function, object::Object, value::Value};

fn values(json: serde_json::Value) -> Vec<Value> {
    match Value::from(json) {
        Value::Array(items) => items.to_vec(),
        other => vec![other],
    }
}

fn is_even(value: &Value) -> Result<bool, String> {
    Ok(value.to_number() % 2.0 == 0.0)
}

#[test]
fn identity_returns_its_argument() {
    assert_eq!(identity(Value::from("x")), Value::from("x"));
    assert_eq!(identity(Value::Undefined), Value::Undefined);
}

#[test]
fn index_of_uses_strict_equality() {
    let items = values(json!([1, "1", 2.0, 1]));
    assert_eq!(index_of(&items, &Value::Integer(1)), Some(0));
    assert_eq!(index_of(&items, &Value::from("1")), Some(1));
    assert_eq!(index_of(&items, &Value::Integer(2)), Some(2));
    assert_eq!(index_of(&items, &Value::Integer(5)), None);
    assert_eq!(index_of(&[], &Value::Integer(1)), None);
}

#[test]
fn index_of_never_finds_nan() {
    let items = vec![Value::Float(f64::NAN)];
    assert_eq!(index_of(&items, &Value::Float(f64::NAN)), None);
}

#[test]
fn index_of_compares_heap_values_by_identity() {
    let shared = Value::array(vec![Value::Integer(1)]);
    let items = vec![Value::array(vec![Value::Integer(1)]), shared.clone()];
    assert_eq!(index_of(&items, &shared), Some(1));
}

#[test]
fn filter_keeps_passing_elements_in_order() {
    let items = values(json!([1, 2, 3, 4, 5, 6]));
    let evens = filter(Collection::from(&items), is_even).unwrap();
    assert_eq!(evens, values(json!([2, 4, 6])));
}

#[test]
fn filter_is_idempotent() {
    let items = values(json!([1, 2, 3, 4, 5, 6]));
    let once = filter(Collection::from(&items), is_even).unwrap();
    let twice = filter(Collection::from(&once), is_even).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn reject_is_the_complement_of_filter() {
    let items = values(json!([1, 2, 3, 4, 5, 6]));
    let kept = filter(Collection::from(&items), is_even).unwrap();
    let dropped = reject(Collection::from(&items), is_even).unwrap();
    assert_eq!(dropped, values(json!([1, 3, 5])));
    assert_eq!(kept.len() + dropped.len(), items.len());
}

#[test]
fn filter_over_objects_yields_values() {
    let object = Object::from_iter([
        ("a", Value::Integer(1)),
        ("b", Value::Integer(2)),
        ("c", Value::Integer(4)),
    ]);
    let evens = filter(Collection::from(&object), is_even).unwrap();
    assert_eq!(evens, values(json!([2, 4])));
}

#[test]
fn map_preserves_length_and_order() {
    let items = values(json!([1, 2, 3]));
    let doubled = map(Collection::from(&items), |item| {
        Ok(Value::Float(item.to_number() * 2.0))
    })
    .unwrap();
    assert_eq!(doubled, values(json!([2, 4, 6])));
}

#[test]
fn map_propagates_callback_errors() {
    let items = values(json!([1, 2, 3]));
    let err = map(Collection::from(&items), |item| {
        if item == &Value::Integer(2) {
            Err("cannot map 2".to_string())
        } else {
            Ok(item.clone())
        }
    })
    .unwrap_err();
    assert_eq!(err, "cannot map 2");
}

#[test]
fn pluck_reads_the_property_of_every_element() {
    let people = values(json!([
        {"name": "moe", "age": 40},
        {"name": "larry"},
        "not an object"
    ]));
    let ages = pluck(Collection::from(&people), "age").unwrap();
    assert_eq!(
        ages,
        vec![Value::Integer(40), Value::Undefined, Value::Undefined]
    );
}

#[test]
fn reduce_with_seed_folds_every_element() {
    let items = values(json!([1, 2, 3]));
    let sum = reduce(
        Collection::from(&items),
        |acc, item| Ok(Value::Float(acc.to_number() + item.to_number())),
        Some(Value::Integer(0)),
    )
    .unwrap();
    assert_eq!(sum, Value::Integer(6));
}

#[test]
fn reduce_without_seed_starts_from_first_element() {
    let calls = Cell::new(0);
    let single = values(json!([5]));
    let result = reduce(
        Collection::from(&single),
        |acc, _| {
            calls.set(calls.get() + 1);
            Ok(acc)
        },
        None,
    )
    .unwrap();
    assert_eq!(result, Value::Integer(5));
    assert_eq!(calls.get(), 0);

    let items = values(json!(["a", "b", "c"]));
    let joined = reduce(
        Collection::from(&items),
        |acc, item| {
            calls.set(calls.get() + 1);
            Ok(Value::from(format!(
                "{}{}",
                acc.to_string_value(),
                item.to_string_value()
            )))
        },
        None,
    )
    .unwrap();
    assert_eq!(joined, Value::from("abc"));
    assert_eq!(calls.get(), 2);
}

#[test]
fn reduce_of_empty_collection_returns_seed_or_undefined() {
    let empty: Vec<Value> = Vec::new();
    let unseeded = reduce(Collection::from(&empty), |acc, _| Ok(acc), None).unwrap();
    assert_eq!(unseeded, Value::Undefined);

    let seeded = reduce(
        Collection::from(&empty),
        |acc, _| Ok(acc),
        Some(Value::from("seed")),
    )
    .unwrap();
    assert_eq!(seeded, Value::from("seed"));
}

#[test]
fn contains_checks_values_of_arrays_and_objects() {
    let items = values(json!([1, 2, 3]));
    assert!(contains(Collection::from(&items), &Value::Integer(3)).unwrap());
    assert!(!contains(Collection::from(&items), &Value::from("3")).unwrap());

    let object = Object::from_iter([("k", Value::from("v"))]);
    assert!(contains(Collection::from(&object), &Value::from("v")).unwrap());
    assert!(!contains(Collection::from(&object), &Value::from("k")).unwrap());
}

#[test]
fn every_defaults_to_truthiness() {
    let truthy = values(json!([1, "a", true]));
    let mixed = values(json!([1, 0, true]));
    assert!(every(Collection::from(&truthy), None).unwrap());
    assert!(!every(Collection::from(&mixed), None).unwrap());
    let empty: Vec<Value> = Vec::new();
    assert!(every(Collection::from(&empty), None).unwrap());
}

#[test]
fn every_visits_all_elements_even_after_a_failure() {
    let items = values(json!([1, 2, 3, 4]));
    let mut visited = 0;
    let mut test = |item: &Value| -> Result<bool, String> {
        visited += 1;
        Ok(item.to_number() > 10.0)
    };
    assert!(!every(Collection::from(&items), Some(&mut test)).unwrap());
    assert_eq!(visited, 4);
}

#[test]
fn some_is_not_every_negated() {
    let items = values(json!([1, 3, 4]));
    let odd_only = values(json!([1, 3, 5]));
    let mut test = is_even;
    assert!(some(Collection::from(&items), Some(&mut test)).unwrap());
    assert!(!some(Collection::from(&odd_only), Some(&mut test)).unwrap());

    let falsy = values(json!([0, "", null]));
    assert!(!some(Collection::from(&falsy), None).unwrap());
    let empty: Vec<Value> = Vec::new();
    assert!(!some(Collection::from(&empty), None).unwrap());
}

#[test]
fn sort_by_property_is_stable() {
    let people = values(json!([
        {"name": "moe", "age": 40},
        {"name": "larry", "age": 50},
        {"name": "curly", "age": 40},
        {"name": "shemp", "age": 30}
    ]));
    let sorted = sort_by(Collection::from(&people), SortKey::Property("age")).unwrap();
    let names = pluck(Collection::from(&sorted), "name").unwrap();
    assert_eq!(names, values(json!(["shemp", "moe", "curly", "larry"])));
}

#[test]
fn sort_by_iterator_leaves_input_untouched() {
    let items = values(json!([3, 1, 2]));
    let mut negate = |item: &Value| -> Result<Value, String> {
        Ok(Value::Float(-item.to_number()))
    };
    let sorted = sort_by(Collection::from(&items), SortKey::Iterator(&mut negate)).unwrap();
    assert_eq!(sorted, values(json!([3, 2, 1])));
    assert_eq!(items, values(json!([3, 1, 2])));
}

#[test]
fn sort_by_places_non_numeric_criteria_last() {
    let items = values(json!([{"n": "x"}, {"n": 2}, {"n": null}, {"n": 1}]));
    let sorted = sort_by(Collection::from(&items), SortKey::Property("n")).unwrap();
    let criteria = pluck(Collection::from(&sorted), "n").unwrap();
    // null reads as 0, "x" has no numeric reading.
    assert_eq!(criteria, values(json!([null, 1, 2, "x"])));
}

#[test]
fn invoke_calls_a_function_with_each_element_as_receiver() {
    let items = values(json!([[3, 1], [2]]));
    let length = Function::new("length", |receiver: &Value, args: &[Value]| {
        let extra = args.first().map(Value::to_number).unwrap_or(0.0);
        match receiver {
            Value::Array(items) => Ok(Value::Float(items.len() as f64 + extra)),
            other => Err(format!("no length for {}", other.type_name())),
        }
    });
    let lengths = invoke(
        Collection::from(&items),
        Callee::Function(&length),
        &[Value::Integer(10)],
    )
    .unwrap();
    assert_eq!(lengths, values(json!([12, 11])));
}

#[test]
fn invoke_resolves_methods_by_name() {
    let greet = Function::new("greet", |receiver: &Value, _: &[Value]| {
        Ok(Value::from(format!(
            "hi {}",
            receiver.property("name").to_string_value()
        )))
    });
    let calls = Rc::new(Cell::new(0));
    let counted = {
        let calls = Rc::clone(&calls);
        Function::new("greet", move |receiver: &Value, args: &[Value]| {
            calls.set(calls.get() + 1);
            greet.call(receiver, args)
        })
    };
    let person = |name: &str| {
        Value::from(Object::from_iter([
            ("name", Value::from(name)),
            ("greet", Value::from(counted.clone())),
        ]))
    };
    let items = vec![person("moe"), Value::from(Object::new())];

    let greetings = invoke(Collection::from(&items), Callee::Method("greet"), &[]).unwrap();
    assert_eq!(greetings, vec![Value::from("hi moe"), Value::Undefined]);
    assert_eq!(calls.get(), 1);
}

#[test]
fn invoke_rejects_non_function_methods() {
    let items = values(json!([{"greet": 42}]));
    let err = invoke(Collection::from(&items), Callee::Method("greet"), &[]).unwrap_err();
    assert!(err.contains("to be Function"));
    assert!(err.contains("got Int"));
    assert!(err.ends_with("Hint:\n  invoke(collection, functionOrKey, args)"));
}
