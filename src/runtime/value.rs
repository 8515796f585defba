use std::{cell::RefCell, fmt, rc::Rc};

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::runtime::{function::Function, object::Object};

/// Dynamic value consumed and produced by every collection operation.
///
/// ## Memory Management Model
///
/// Heap-backed variants (`String`, `Array`, `Object`, `Function`) are `Rc`-shared,
/// so cloning a value is O(1) and never copies elements. Primitives stay unboxed.
///
/// Objects are the only mutable values. They sit behind a `RefCell` so that
/// `extend` and `defaults` write into the caller's object in place. Every
/// borrow is released before control returns to user code.
///
/// ### Equality
///
/// Two notions of equality exist side by side:
/// - [`PartialEq`] is structural: arrays and objects compare element by element.
/// - [`Value::strict_equals`] is identity-based for arrays, objects and functions.
///   Every "is this element present" question (`index_of`, `uniq`, `contains`,
///   `intersection`, `difference`) goes through it.
///
/// Integers and floats share one numeric domain in both: `Integer(1)` equals
/// `Float(1.0)`.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absence of any value; what a missing property or argument reads as.
    #[default]
    Undefined,
    /// Explicit empty value.
    Null,
    /// Boolean value.
    Boolean(bool),
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit floating point number.
    Float(f64),
    /// UTF-8 string value.
    String(Rc<str>),
    /// Ordered, 0-indexed sequence.
    Array(Rc<Vec<Value>>),
    /// Shared, mutable string-keyed mapping with an optional prototype.
    Object(Rc<RefCell<Object>>),
    /// Callable value.
    Function(Function),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (left, right) => match (left.as_number(), right.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", format_number(*v)),
            Value::String(v) => write!(f, "\"{}\"", v),
            Value::Array(elements) => {
                let items: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Value::Object(object) => {
                let items: Vec<String> = object
                    .borrow()
                    .iter()
                    .map(|(k, v)| format!("\"{}\": {}", k, v))
                    .collect();
                write!(f, "{{{}}}", items.join(", "))
            }
            Value::Function(func) => write!(f, "<function {}>", func.name()),
        }
    }
}

impl Value {
    /// Returns the runtime type label used in error messages.
    ///
    /// These labels are user-visible and are expected to remain stable.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Boolean(_) => "Bool",
            Value::Integer(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
            Value::Function(_) => "Function",
        }
    }

    /// Builds an array value from owned elements.
    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(Rc::new(elements))
    }

    /// Returns whether this value is truthy.
    ///
    /// Falsy values are `undefined`, `null`, `false`, `0`, `0.0`, `NaN` and `""`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(v) => *v,
            Value::Integer(v) => *v != 0,
            Value::Float(v) => *v != 0.0 && !v.is_nan(),
            Value::String(v) => !v.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Function(_) => true,
        }
    }

    /// Returns whether this value is `undefined` or `null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Strict (`===`) equality.
    ///
    /// Primitives compare by value, `NaN` never equals itself, and arrays,
    /// objects and functions are only equal to the very same instance.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (left, right) => match (left.as_number(), right.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }

    /// Returns the numeric payload of `Integer` and `Float`, `None` otherwise.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric coercion, as applied to both operands of a subtraction.
    ///
    /// Anything without a numeric reading becomes `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Boolean(v) => f64::from(u8::from(*v)),
            Value::Integer(v) => *v as f64,
            Value::Float(v) => *v,
            Value::String(v) => parse_number(v),
            Value::Array(_) => parse_number(&self.to_string_value()),
            Value::Object(_) | Value::Function(_) => f64::NAN,
        }
    }

    /// String coercion.
    ///
    /// Unlike [`std::fmt::Display`], strings are returned without quotes and
    /// arrays join their elements with a bare `,`. This is the key a memo
    /// table files a call under, so `1`, `1.0` and `"1"` all read `"1"`.
    pub fn to_string_value(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Boolean(v) => v.to_string(),
            Value::Integer(v) => v.to_string(),
            Value::Float(v) => format_number(*v),
            Value::String(v) => v.to_string(),
            Value::Array(elements) => elements
                .iter()
                .map(|e| {
                    if e.is_nullish() {
                        String::new()
                    } else {
                        e.to_string_value()
                    }
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_string(),
            Value::Function(func) => format!("function {}", func.name()),
        }
    }

    /// Reads a named field.
    ///
    /// Objects resolve own keys first, then their prototype chain. Arrays and
    /// strings answer `length` and numeric indices. Anything missing reads as
    /// `undefined`.
    pub fn property(&self, key: &str) -> Value {
        match self {
            Value::Object(object) => object.borrow().get(key).cloned().unwrap_or_default(),
            Value::Array(elements) => {
                if key == "length" {
                    return Value::Integer(elements.len() as i64);
                }
                key.parse::<usize>()
                    .ok()
                    .and_then(|index| elements.get(index).cloned())
                    .unwrap_or_default()
            }
            Value::String(s) => {
                if key == "length" {
                    return Value::Integer(s.chars().count() as i64);
                }
                key.parse::<usize>()
                    .ok()
                    .and_then(|index| s.chars().nth(index))
                    .map(|ch| Value::String(ch.to_string().into()))
                    .unwrap_or_default()
            }
            _ => Value::Undefined,
        }
    }

    /// Converts this value into JSON data.
    ///
    /// `undefined` and functions have no JSON form and become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Formats a float the way numbers print when coerced to strings.
fn format_number(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "Infinity".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if v == 0.0 {
        // Covers -0.0 as well.
        "0".to_string()
    } else if v.abs() >= 1e21 || v.abs() < 1e-6 {
        let exp = format!("{:e}", v);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        }
    } else {
        v.to_string()
    }
}

fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')) =>
        {
            trimmed.parse().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(Rc::new(v))
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(Rc::new(RefCell::new(v)))
    }
}

impl From<Function> for Value {
    fn from(v: Function) -> Self {
        Value::Function(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(v) => Value::Boolean(v),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(v) => Value::Integer(v),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(v) => Value::String(v.into()),
            serde_json::Value::Array(items) => {
                Value::array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::from(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Object>(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null | Value::Function(_) => serializer.serialize_unit(),
            Value::Boolean(v) => serializer.serialize_bool(*v),
            Value::Integer(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Array(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements.iter() {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(object) => {
                let object = object.borrow();
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (key, value) in object.iter() {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Float(3.5).to_string(), "3.5");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Undefined.to_string(), "undefined");
        insta::assert_snapshot!(
            Value::array(vec![Value::Integer(1), "a".into(), Value::Undefined]).to_string(),
            @r#"[1, "a", undefined]"#
        );
    }

    #[test]
    fn test_is_truthy() {
        assert!(Value::Integer(1).is_truthy());
        assert!(Value::String("0".into()).is_truthy());
        assert!(Value::array(vec![]).is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(!Value::Float(f64::NAN).is_truthy());
        assert!(!Value::String("".into()).is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Undefined.is_truthy());
    }

    #[test]
    fn test_strict_equals_uses_identity_for_heap_values() {
        let arr = Value::array(vec![Value::Integer(1)]);
        let same = arr.clone();
        let lookalike = Value::array(vec![Value::Integer(1)]);

        assert!(arr.strict_equals(&same));
        assert!(!arr.strict_equals(&lookalike));
        assert_eq!(arr, lookalike);

        assert!(Value::Integer(1).strict_equals(&Value::Float(1.0)));
        assert!(!Value::Integer(1).strict_equals(&Value::String("1".into())));
        assert!(!Value::Float(f64::NAN).strict_equals(&Value::Float(f64::NAN)));
        assert!(!Value::Undefined.strict_equals(&Value::Null));
    }

    #[test]
    fn test_to_string_value() {
        assert_eq!(Value::String("hello".into()).to_string_value(), "hello");
        assert_eq!(Value::Float(1.0).to_string_value(), "1");
        assert_eq!(Value::Float(f64::INFINITY).to_string_value(), "Infinity");
        assert_eq!(Value::Float(-0.0).to_string_value(), "0");
        assert_eq!(Value::Float(1e21).to_string_value(), "1e+21");
        assert_eq!(Value::Float(-2.5e30).to_string_value(), "-2.5e+30");
        assert_eq!(Value::Float(1.5e-7).to_string_value(), "1.5e-7");
        assert_eq!(Value::Float(0.000001).to_string_value(), "0.000001");
        assert_eq!(Value::Float(1e20).to_string_value(), "100000000000000000000");
        assert_eq!(Value::Undefined.to_string_value(), "undefined");
        assert_eq!(
            Value::array(vec![Value::Integer(1), Value::Null, "b".into()]).to_string_value(),
            "1,,b"
        );
        assert_eq!(
            Value::from(Object::new()).to_string_value(),
            "[object Object]"
        );
    }

    #[test]
    fn test_to_number() {
        assert_eq!(Value::String(" 12 ".into()).to_number(), 12.0);
        assert_eq!(Value::String("".into()).to_number(), 0.0);
        assert_eq!(Value::Boolean(true).to_number(), 1.0);
        assert_eq!(Value::Null.to_number(), 0.0);
        assert_eq!(Value::array(vec![Value::Integer(5)]).to_number(), 5.0);
        assert!(Value::String("inf".into()).to_number().is_nan());
        assert!(Value::Undefined.to_number().is_nan());
    }

    #[test]
    fn test_property_lookup() {
        let person = Value::from(json!({"name": "moe", "age": 40}));
        assert_eq!(person.property("age"), Value::Integer(40));
        assert_eq!(person.property("missing"), Value::Undefined);

        let arr = Value::from(json!([10, 20]));
        assert_eq!(arr.property("length"), Value::Integer(2));
        assert_eq!(arr.property("1"), Value::Integer(20));
        assert_eq!(arr.property("2"), Value::Undefined);

        assert_eq!(Value::from("abc").property("length"), Value::Integer(3));
        assert_eq!(Value::Integer(3).property("length"), Value::Undefined);
    }

    #[test]
    fn test_json_conversion() {
        let value = Value::from(json!({"a": [1, 2.5, null], "b": true}));
        assert_eq!(value.property("b"), Value::Boolean(true));
        assert_eq!(value.to_json(), json!({"a": [1, 2.5, null], "b": true}));
        assert_eq!(Value::Undefined.to_json(), json!(null));
    }

    #[test]
    fn test_clone_shares_rc_for_array() {
        let array = Value::array(vec![Value::Integer(1), Value::Integer(2)]);
        let array_clone = array.clone();
        match (array, array_clone) {
            (Value::Array(left), Value::Array(right)) => {
                assert!(Rc::ptr_eq(&left, &right));
                assert_eq!(Rc::strong_count(&left), 2);
            }
            _ => panic!("expected array values"),
        }
    }
}
