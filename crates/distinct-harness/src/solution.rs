//! Calling convention between the runner and the code under test.
//!
//! A solution receives the fixture's positional arguments as JSON values and
//! returns a JSON value. Refusing an argument list is a per-fixture failure.

use clap::ValueEnum;
use distinct_core::{MembershipStrategy, is_unique_by_strategy};
use serde_json::{Number, Value};

use crate::compare::json_kind;
use crate::error::SolutionError;

pub trait Solution {
    fn name(&self) -> &str;

    fn solve(&self, args: &[Value]) -> Result<Value, SolutionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SolutionKind {
    /// Pick the string or array form from the argument type.
    #[default]
    Auto,
    /// One string argument; its characters form the sequence.
    String,
    /// One array argument; its elements form the sequence.
    Array,
}

#[must_use]
pub fn build_solution(kind: SolutionKind, strategy: MembershipStrategy) -> Box<dyn Solution> {
    match kind {
        SolutionKind::Auto => Box::new(AutoIsUnique { strategy }),
        SolutionKind::String => Box::new(StringIsUnique { strategy }),
        SolutionKind::Array => Box::new(ArrayIsUnique { strategy }),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringIsUnique {
    pub strategy: MembershipStrategy,
}

impl Solution for StringIsUnique {
    fn name(&self) -> &str {
        "is_unique_string"
    }

    fn solve(&self, args: &[Value]) -> Result<Value, SolutionError> {
        let arg = single_argument(args)?;
        let text = arg.as_str().ok_or_else(|| SolutionError::ArgumentType {
            position: 0,
            expected: "string",
            found: json_kind(arg),
        })?;
        Ok(Value::Bool(is_unique_by_strategy(self.strategy, text.chars())))
    }
}

/// Elements are compared through their canonical JSON text: objects are equal
/// regardless of key order and integral floats collapse onto their integer, so
/// `1`, `1.0` and `-0.0`/`0` repeat exactly when `values_match` says they do.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayIsUnique {
    pub strategy: MembershipStrategy,
}

impl Solution for ArrayIsUnique {
    fn name(&self) -> &str {
        "is_unique_array"
    }

    fn solve(&self, args: &[Value]) -> Result<Value, SolutionError> {
        let arg = single_argument(args)?;
        let items = arg.as_array().ok_or_else(|| SolutionError::ArgumentType {
            position: 0,
            expected: "array",
            found: json_kind(arg),
        })?;
        let keys = items.iter().map(canonical_text);
        Ok(Value::Bool(is_unique_by_strategy(self.strategy, keys)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AutoIsUnique {
    pub strategy: MembershipStrategy,
}

impl Solution for AutoIsUnique {
    fn name(&self) -> &str {
        "is_unique"
    }

    fn solve(&self, args: &[Value]) -> Result<Value, SolutionError> {
        match single_argument(args)? {
            Value::String(_) => StringIsUnique {
                strategy: self.strategy,
            }
            .solve(args),
            Value::Array(_) => ArrayIsUnique {
                strategy: self.strategy,
            }
            .solve(args),
            other => Err(SolutionError::ArgumentType {
                position: 0,
                expected: "string or array",
                found: json_kind(other),
            }),
        }
    }
}

/// Adapts a closure to the calling convention.
pub struct FnSolution<F> {
    name: String,
    func: F,
}

impl<F> FnSolution<F>
where
    F: Fn(&[Value]) -> Result<Value, SolutionError>,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Solution for FnSolution<F>
where
    F: Fn(&[Value]) -> Result<Value, SolutionError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn solve(&self, args: &[Value]) -> Result<Value, SolutionError> {
        (self.func)(args)
    }
}

fn single_argument(args: &[Value]) -> Result<&Value, SolutionError> {
    match args {
        [only] => Ok(only),
        _ => Err(SolutionError::Arity {
            expected: 1,
            actual: args.len(),
        }),
    }
}

fn canonical_text(value: &Value) -> String {
    match value {
        Value::Object(fields) => {
            let mut entries: Vec<(&String, String)> = fields
                .iter()
                .map(|(key, field)| (key, canonical_text(field)))
                .collect();
            entries.sort_by(|lhs, rhs| lhs.0.cmp(rhs.0));
            let body = entries
                .into_iter()
                .map(|(key, field)| format!("{}:{field}", Value::String(key.clone())))
                .collect::<Vec<_>>()
                .join(",");
            format!("{{{body}}}")
        }
        Value::Array(items) => {
            let body = items
                .iter()
                .map(canonical_text)
                .collect::<Vec<_>>()
                .join(",");
            format!("[{body}]")
        }
        Value::Number(number) => canonical_number(number),
        scalar => scalar.to_string(),
    }
}

fn canonical_number(number: &Number) -> String {
    match number.as_f64() {
        Some(float)
            if number.is_f64()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float < i64::MAX as f64 =>
        {
            (float as i64).to_string()
        }
        _ => number.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ArrayIsUnique, AutoIsUnique, FnSolution, Solution, SolutionKind, StringIsUnique,
        build_solution, canonical_text,
    };
    use crate::error::SolutionError;
    use distinct_core::MembershipStrategy;
    use serde_json::{Value, json};

    #[test]
    fn string_solution_checks_characters() {
        let solution = StringIsUnique::default();
        assert_eq!(solution.solve(&[json!("you can")]), Ok(json!(true)));
        assert_eq!(solution.solve(&[json!("you shall not pass")]), Ok(json!(false)));
        assert_eq!(solution.solve(&[json!("")]), Ok(json!(true)));
    }

    #[test]
    fn array_solution_checks_elements() {
        let solution = ArrayIsUnique::default();
        assert_eq!(solution.solve(&[json!([1, 2, 3])]), Ok(json!(true)));
        assert_eq!(solution.solve(&[json!([1, 2, 1])]), Ok(json!(false)));
        assert_eq!(solution.solve(&[json!([])]), Ok(json!(true)));
        assert_eq!(solution.solve(&[json!(["1", 1])]), Ok(json!(true)));
        assert_eq!(
            solution.solve(&[json!([{"a": 1, "b": 2}, {"b": 2, "a": 1}])]),
            Ok(json!(false))
        );
    }

    #[test]
    fn auto_solution_dispatches_on_argument_kind() {
        let solution = AutoIsUnique::default();
        assert_eq!(solution.solve(&[json!("aa")]), Ok(json!(false)));
        assert_eq!(solution.solve(&[json!([[1], [2]])]), Ok(json!(true)));
        assert_eq!(
            solution.solve(&[json!(42)]),
            Err(SolutionError::ArgumentType {
                position: 0,
                expected: "string or array",
                found: "number",
            })
        );
    }

    #[test]
    fn wrong_arity_is_a_solution_error() {
        let solution = StringIsUnique::default();
        assert_eq!(
            solution.solve(&[]),
            Err(SolutionError::Arity {
                expected: 1,
                actual: 0
            })
        );
        assert_eq!(
            solution.solve(&[json!("a"), json!("b")]),
            Err(SolutionError::Arity {
                expected: 1,
                actual: 2
            })
        );
        assert!(matches!(
            ArrayIsUnique::default().solve(&[json!("abc")]),
            Err(SolutionError::ArgumentType {
                expected: "array",
                ..
            })
        ));
    }

    #[test]
    fn every_kind_and_strategy_agrees() {
        for kind in [SolutionKind::Auto, SolutionKind::String] {
            for strategy in [
                MembershipStrategy::Hash,
                MembershipStrategy::Ordered,
                MembershipStrategy::Linear,
            ] {
                let solution = build_solution(kind, strategy);
                assert_eq!(solution.solve(&[json!("you cannot")]), Ok(json!(false)));
                assert_eq!(solution.solve(&[json!("maybe no?")]), Ok(json!(true)));
            }
        }
    }

    #[test]
    fn closures_adapt_to_the_convention() {
        let sum = FnSolution::new("sum", |args: &[Value]| {
            args.iter()
                .map(|arg| {
                    arg.as_i64()
                        .ok_or_else(|| SolutionError::Failed(format!("not an integer: {arg}")))
                })
                .sum::<Result<i64, _>>()
                .map(Value::from)
        });
        assert_eq!(sum.name(), "sum");
        assert_eq!(sum.solve(&[json!(2), json!(3)]), Ok(json!(5)));
        assert!(sum.solve(&[json!("x")]).is_err());
    }

    #[test]
    fn numerically_equal_elements_repeat() {
        let solution = ArrayIsUnique::default();
        assert_eq!(solution.solve(&[json!([1, 1.0])]), Ok(json!(false)));
        assert_eq!(solution.solve(&[json!([0.0, -0.0])]), Ok(json!(false)));
        assert_eq!(solution.solve(&[json!([[1], [1.0]])]), Ok(json!(false)));
        assert_eq!(solution.solve(&[json!([{"a": 2}, {"a": 2.0}])]), Ok(json!(false)));
        assert_eq!(solution.solve(&[json!([1, 1.5, -1])]), Ok(json!(true)));
        assert_eq!(solution.solve(&[json!([1e300, 1e300])]), Ok(json!(false)));
        assert_eq!(canonical_text(&json!(-0.0)), "0");
        assert_eq!(canonical_text(&json!(2.5)), "2.5");
    }

    #[test]
    fn canonical_text_sorts_nested_keys() {
        assert_eq!(
            canonical_text(&json!({"b": [1, {"d": 1, "c": 2}], "a": "x"})),
            r#"{"a":"x","b":[1,{"c":2,"d":1}]}"#
        );
    }
}
