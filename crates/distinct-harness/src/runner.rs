//! Drives a [`Solution`] over a fixture table and renders the report.
//!
//! Loading has already succeeded by the time a runner sees a table, so the
//! only failures here are per fixture: a solution error is logged, counted
//! toward the total, and iteration moves on.

use std::io::Write;

use console::style;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::compare::values_match;
use crate::error::HarnessError;
use crate::fixture::{Fixture, FixtureTable};
use crate::run_log::{FixtureLogEntry, RunLog};
use crate::solution::Solution;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Passed { actual: Value },
    Failed { actual: Value },
    Errored { message: String },
}

impl Outcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Passed { .. } => "passed",
            Self::Failed { .. } => "failed",
            Self::Errored { .. } => "errored",
        }
    }

    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixtureResult {
    pub fixture_id: String,
    pub input_label: String,
    pub expected: Value,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub suite: String,
    pub case_count: usize,
    pub pass_count: usize,
    pub results: Vec<FixtureResult>,
}

impl RunReport {
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.case_count == self.pass_count
    }

    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.results
            .iter()
            .filter_map(|result| match &result.outcome {
                Outcome::Passed { .. } => None,
                Outcome::Failed { actual } => Some(format!(
                    "{}: mismatch expected={} actual={actual}",
                    result.fixture_id, result.expected
                )),
                Outcome::Errored { message } => {
                    Some(format!("{}: error {message}", result.fixture_id))
                }
            })
            .collect()
    }

    #[must_use]
    pub fn summary_line(&self) -> String {
        format!("{}/{} tests passed.", self.pass_count, self.case_count)
    }
}

#[derive(Debug, Clone)]
pub struct FixtureRunner {
    suite: String,
    colour: bool,
    strategy: &'static str,
    run_log: Option<RunLog>,
}

impl FixtureRunner {
    #[must_use]
    pub fn new(suite: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            colour: false,
            strategy: "hash",
            run_log: None,
        }
    }

    #[must_use]
    pub fn with_colour(mut self, colour: bool) -> Self {
        self.colour = colour;
        self
    }

    /// Strategy name recorded in the run log.
    #[must_use]
    pub fn with_strategy_label(mut self, strategy: &'static str) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_run_log(mut self, run_log: Option<RunLog>) -> Self {
        self.run_log = run_log;
        self
    }

    pub fn run(
        &self,
        solution: &dyn Solution,
        table: &FixtureTable,
        out: &mut dyn Write,
    ) -> Result<RunReport, HarnessError> {
        let mut report = RunReport {
            suite: self.suite.clone(),
            case_count: 0,
            pass_count: 0,
            results: Vec::with_capacity(table.len()),
        };

        for fixture in &table.fixtures {
            debug!(fixture = %fixture.id, solution = solution.name(), "running fixture");
            let outcome = evaluate(solution, fixture);
            if let Outcome::Errored { message } = &outcome {
                warn!(fixture = %fixture.id, input = %fixture.input_label, error = %message, "solution failed");
            }

            report.case_count += 1;
            if outcome.passed() {
                report.pass_count += 1;
            }

            let result = FixtureResult {
                fixture_id: fixture.id.clone(),
                input_label: fixture.input_label.clone(),
                expected: fixture.expected.clone(),
                outcome,
            };
            writeln!(out, "{}", render_line(&result, self.colour))?;
            self.maybe_append_log(solution, table, fixture, &result)?;
            report.results.push(result);
        }

        writeln!(out)?;
        writeln!(out, "{}", report.summary_line())?;
        info!(
            suite = %report.suite,
            passed = report.pass_count,
            total = report.case_count,
            "fixture run complete"
        );
        Ok(report)
    }

    fn maybe_append_log(
        &self,
        solution: &dyn Solution,
        table: &FixtureTable,
        fixture: &Fixture,
        result: &FixtureResult,
    ) -> Result<(), HarnessError> {
        let Some(run_log) = &self.run_log else {
            return Ok(());
        };

        let (actual, error) = match &result.outcome {
            Outcome::Passed { actual } | Outcome::Failed { actual } => (Some(actual.clone()), None),
            Outcome::Errored { message } => (None, Some(message.clone())),
        };
        run_log.append(&FixtureLogEntry {
            suite: self.suite.clone(),
            fixture_id: fixture.id.clone(),
            solution: solution.name().to_string(),
            strategy: self.strategy,
            input: fixture.args.clone(),
            expected: fixture.expected.clone(),
            actual,
            outcome: result.outcome.as_str(),
            error,
            passed: result.outcome.passed(),
            fixture_sha256: table
                .source_sha256
                .clone()
                .unwrap_or_else(|| "builtin".to_string()),
        })
    }
}

fn evaluate(solution: &dyn Solution, fixture: &Fixture) -> Outcome {
    match solution.solve(&fixture.args) {
        Ok(actual) if values_match(&actual, &fixture.expected) => Outcome::Passed { actual },
        Ok(actual) => Outcome::Failed { actual },
        Err(err) => Outcome::Errored {
            message: err.to_string(),
        },
    }
}

#[must_use]
pub fn render_line(result: &FixtureResult, colour: bool) -> String {
    let paint = |word: &'static str, ok: bool| {
        if !colour {
            return word.to_string();
        }
        let styled = style(word).bold().force_styling(true);
        if ok {
            styled.green().to_string()
        } else {
            styled.red().to_string()
        }
    };

    match &result.outcome {
        Outcome::Passed { .. } => format!("{} => {}", result.input_label, paint("PASSED", true)),
        Outcome::Failed { actual } => format!(
            "{} => {} (got {actual}, expected {})",
            result.input_label,
            paint("FAILED", false),
            result.expected
        ),
        Outcome::Errored { message } => format!(
            "{} => {} ({message})",
            result.input_label,
            paint("ERROR", false)
        ),
    }
}
