//! Equality operations backing the assertion helpers.

use std::rc::Rc;

use crate::runtime::value::Value;

/// Strict equality: same type, same value, objects by identity.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    a == b
}

/// Loose equality with the coercions the assertion helpers rely on:
/// null and undefined are interchangeable, numeric strings compare against
/// numbers, and booleans coerce to numbers.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined)
        | (Value::Null, Value::Null)
        | (Value::Undefined, Value::Null)
        | (Value::Null, Value::Undefined) => true,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            s.trim().parse::<f64>().map(|v| v == *n).unwrap_or(false)
        }
        (Value::Boolean(a), other) | (other, Value::Boolean(a)) => {
            let n = Value::Number(if *a { 1.0 } else { 0.0 });
            loose_eq(&n, other)
        }
        (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}
