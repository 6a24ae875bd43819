//! Fixture tables and their two accepted JSON shapes.
//!
//! A table is either a mapping `{"<input>": <expected>}` whose keys are single
//! string arguments, or an array of records `{"input": [...], "expected": v}`.
//! Both are flattened into [`Fixture`] values as soon as they are parsed.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::compare::json_kind;
use crate::error::FixtureError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureShape {
    Mapping,
    Records,
}

impl FixtureShape {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mapping => "mapping",
            Self::Records => "records",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub id: String,
    /// Rendered input column: the quoted key for mappings, the JSON argument
    /// list for records.
    pub input_label: String,
    pub args: Vec<Value>,
    pub expected: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixtureTable {
    pub shape: FixtureShape,
    pub fixtures: Vec<Fixture>,
    pub source_sha256: Option<String>,
}

impl FixtureTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}

pub fn load_fixture_file(path: &Path) -> Result<FixtureTable, FixtureError> {
    let bytes = fs::read(path).map_err(|source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|source| FixtureError::Parse {
        origin: path.display().to_string(),
        source,
    })?;

    let mut table = normalize_fixture_value(value)?;
    table.source_sha256 = Some(sha256_hex(&bytes));
    Ok(table)
}

pub fn parse_fixture_table(raw: &str, origin: &str) -> Result<FixtureTable, FixtureError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| FixtureError::Parse {
        origin: origin.to_string(),
        source,
    })?;
    let mut table = normalize_fixture_value(value)?;
    table.source_sha256 = Some(sha256_hex(raw.as_bytes()));
    Ok(table)
}

pub fn normalize_fixture_value(value: Value) -> Result<FixtureTable, FixtureError> {
    match value {
        Value::Object(entries) => Ok(FixtureTable {
            shape: FixtureShape::Mapping,
            fixtures: normalize_mapping(entries),
            source_sha256: None,
        }),
        Value::Array(records) => Ok(FixtureTable {
            shape: FixtureShape::Records,
            fixtures: normalize_records(records)?,
            source_sha256: None,
        }),
        other => Err(FixtureError::UnsupportedShape {
            found: json_kind(&other),
        }),
    }
}

fn normalize_mapping(entries: Map<String, Value>) -> Vec<Fixture> {
    entries
        .into_iter()
        .map(|(input, expected)| Fixture {
            input_label: format!("\"{input}\""),
            id: input.clone(),
            args: vec![Value::String(input)],
            expected,
        })
        .collect()
}

fn normalize_records(records: Vec<Value>) -> Result<Vec<Fixture>, FixtureError> {
    let mut fixtures = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let mut fields = match record {
            Value::Object(fields) => fields,
            other => {
                return Err(FixtureError::RecordNotObject {
                    index,
                    found: json_kind(&other),
                });
            }
        };

        let input = fields.remove("input").ok_or(FixtureError::MissingField {
            index,
            field: "input",
        })?;
        let expected = fields.remove("expected").ok_or(FixtureError::MissingField {
            index,
            field: "expected",
        })?;
        let args = match input {
            Value::Array(args) => args,
            other => {
                return Err(FixtureError::InputNotArray {
                    index,
                    found: json_kind(&other),
                });
            }
        };

        let id = match fields.get("id").and_then(Value::as_str) {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => format!("fixture_{index}"),
        };
        fixtures.push(Fixture {
            id,
            input_label: Value::Array(args.clone()).to_string(),
            args,
            expected,
        });
    }
    Ok(fixtures)
}

/// The table shipped with the exercise itself.
#[must_use]
pub fn builtin_fixtures() -> FixtureTable {
    let entries = [
        ("you shall not pass", false),
        ("you can", true),
        ("you cannot", false),
        ("maybe no?", true),
    ]
    .into_iter()
    .map(|(input, expected)| (input.to_string(), Value::Bool(expected)))
    .collect::<Map<String, Value>>();

    FixtureTable {
        shape: FixtureShape::Mapping,
        fixtures: normalize_mapping(entries),
        source_sha256: None,
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(&mut out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{FixtureShape, builtin_fixtures, normalize_fixture_value, parse_fixture_table};
    use crate::compare::json_kind;
use crate::error::FixtureError;
    use serde_json::{Value, json};

    #[test]
    fn mapping_keys_become_single_string_arguments() {
        let table = parse_fixture_table(
            r#"{"you shall not pass": false, "you can": true, "": true}"#,
            "inline",
        )
        .expect("mapping should parse");

        assert_eq!(table.shape, FixtureShape::Mapping);
        let ids: Vec<&str> = table.fixtures.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["you shall not pass", "you can", ""]);
        assert_eq!(table.fixtures[1].args, vec![json!("you can")]);
        assert_eq!(table.fixtures[1].input_label, "\"you can\"");
        assert_eq!(table.fixtures[0].expected, Value::Bool(false));
    }

    #[test]
    fn records_keep_positional_arguments() {
        let table = normalize_fixture_value(json!([
            {"input": [[1, 2, 3]], "expected": true},
            {"id": "dup", "input": [[1, 1]], "expected": false},
        ]))
        .expect("records should parse");

        assert_eq!(table.shape, FixtureShape::Records);
        assert_eq!(table.fixtures[0].id, "fixture_0");
        assert_eq!(table.fixtures[0].args, vec![json!([1, 2, 3])]);
        assert_eq!(table.fixtures[0].input_label, "[[1,2,3]]");
        assert_eq!(table.fixtures[1].id, "dup");
        assert_eq!(table.fixtures[1].expected, json!(false));
    }

    #[test]
    fn both_shapes_normalize_to_the_same_arguments() {
        let mapping = normalize_fixture_value(json!({"abc": true, "aa": false}))
            .expect("mapping should parse");
        let records = normalize_fixture_value(json!([
            {"input": ["abc"], "expected": true},
            {"input": ["aa"], "expected": false},
        ]))
        .expect("records should parse");

        let lhs: Vec<_> = mapping.fixtures.iter().map(|f| (&f.args, &f.expected)).collect();
        let rhs: Vec<_> = records.fixtures.iter().map(|f| (&f.args, &f.expected)).collect();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn input_that_is_not_an_array_is_rejected() {
        let err = normalize_fixture_value(json!([
            {"input": [[1]], "expected": true},
            {"input": "abc", "expected": true},
        ]))
        .expect_err("scalar input must be rejected");

        assert!(matches!(
            err,
            FixtureError::InputNotArray {
                index: 1,
                found: "string"
            }
        ));
        assert!(err.to_string().contains("fixture 1"));
    }

    #[test]
    fn missing_fields_and_bad_records_are_rejected() {
        let err = normalize_fixture_value(json!([{"input": []}])).expect_err("missing expected");
        assert!(matches!(
            err,
            FixtureError::MissingField {
                index: 0,
                field: "expected"
            }
        ));

        let err = normalize_fixture_value(json!([42])).expect_err("record must be object");
        assert!(matches!(err, FixtureError::RecordNotObject { index: 0, .. }));

        let err = normalize_fixture_value(json!("abc")).expect_err("top level must be a table");
        assert!(matches!(err, FixtureError::UnsupportedShape { found: "string" }));
    }

    #[test]
    fn invalid_json_names_its_origin() {
        let err = parse_fixture_table("{not json", "broken.json").expect_err("must fail");
        assert!(err.to_string().starts_with("invalid json in broken.json"));
    }

    #[test]
    fn source_digest_is_recorded() {
        let table = parse_fixture_table("{}", "inline").expect("empty mapping parses");
        assert!(table.is_empty());
        assert_eq!(
            table.source_sha256.as_deref(),
            Some("44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a")
        );
    }

    #[test]
    fn builtin_table_matches_the_exercise() {
        let table = builtin_fixtures();
        assert_eq!(table.len(), 4);
        assert_eq!(table.fixtures[0].id, "you shall not pass");
        assert_eq!(table.fixtures[3].expected, json!(true));
        assert!(table.source_sha256.is_none());
    }
}
