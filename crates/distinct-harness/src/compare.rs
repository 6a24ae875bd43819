use serde_json::{Number, Value};

/// Value equality used to judge fixtures.
///
/// Arrays and objects compare structurally. Integers compare exactly, and a
/// float on either side switches the comparison to `f64` so `1` matches `1.0`.
/// No coercion between kinds: `true` never matches `"true"`.
#[must_use]
pub fn values_match(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Array(lhs), Value::Array(rhs)) => {
            lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(l, r)| values_match(l, r))
        }
        (Value::Object(lhs), Value::Object(rhs)) => {
            lhs.len() == rhs.len()
                && lhs
                    .iter()
                    .all(|(key, l)| rhs.get(key).is_some_and(|r| values_match(l, r)))
        }
        (Value::Number(lhs), Value::Number(rhs)) => numbers_match(lhs, rhs),
        _ => actual == expected,
    }
}

/// Kind name used in error messages.
#[must_use]
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn numbers_match(lhs: &Number, rhs: &Number) -> bool {
    if lhs.is_f64() || rhs.is_f64() {
        return match (lhs.as_f64(), rhs.as_f64()) {
            (Some(l), Some(r)) => l == r,
            _ => false,
        };
    }
    if let (Some(l), Some(r)) = (lhs.as_i64(), rhs.as_i64()) {
        return l == r;
    }
    if let (Some(l), Some(r)) = (lhs.as_u64(), rhs.as_u64()) {
        return l == r;
    }
    false
}
