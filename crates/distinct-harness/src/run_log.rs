//! Optional JSONL record of every fixture verdict.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::HarnessError;

pub const RUN_LOG_PATH_ENV: &str = "DISTINCT_RUN_LOG_PATH";

pub const REQUIRED_LOG_FIELDS: &[&str] = &[
    "suite",
    "fixture_id",
    "solution",
    "strategy",
    "input",
    "expected",
    "outcome",
    "passed",
    "fixture_sha256",
];

#[derive(Debug, Clone, Serialize)]
pub struct FixtureLogEntry {
    pub suite: String,
    pub fixture_id: String,
    pub solution: String,
    pub strategy: &'static str,
    pub input: Vec<Value>,
    pub expected: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub passed: bool,
    pub fixture_sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &FixtureLogEntry) -> Result<(), HarnessError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| HarnessError::RunLog {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| HarnessError::RunLog {
                path: self.path.clone(),
                source,
            })?;
        let mut payload = serde_json::to_string(entry)?.into_bytes();
        payload.push(b'\n');
        file.write_all(&payload)
            .map_err(|source| HarnessError::RunLog {
                path: self.path.clone(),
                source,
            })
    }
}

/// Checks that every line of a run log is a JSON object carrying the
/// required fields. Returns one message per violation.
pub fn validate_run_log(path: &Path) -> Result<Vec<String>, HarnessError> {
    let raw = fs::read_to_string(path).map_err(|source| HarnessError::RunLog {
        path: path.to_path_buf(),
        source,
    })?;

    let mut violations = Vec::new();
    let mut entry_count = 0usize;
    for (line_no, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        entry_count += 1;

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(err) => {
                violations.push(format!("line {} invalid json: {err}", line_no + 1));
                continue;
            }
        };
        let Some(obj) = value.as_object() else {
            violations.push(format!("line {} must be a JSON object", line_no + 1));
            continue;
        };
        for field in REQUIRED_LOG_FIELDS {
            if !obj.contains_key(*field) {
                violations.push(format!(
                    "line {} missing required field {field}",
                    line_no + 1
                ));
            }
        }
    }

    if entry_count == 0 {
        violations.push("run log must contain at least one entry".to_string());
    }
    Ok(violations)
}
