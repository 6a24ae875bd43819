#![forbid(unsafe_code)]

pub mod compare;
pub mod error;
pub mod fixture;
pub mod run_log;
pub mod runner;
pub mod solution;
pub mod stream;

use std::io::Write;
use std::path::PathBuf;

use clap::ValueEnum;
use distinct_core::MembershipStrategy;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::HarnessError;
use crate::fixture::{FixtureTable, load_fixture_file};
use crate::run_log::RunLog;
use crate::runner::{FixtureRunner, RunReport};
use crate::solution::{SolutionKind, build_solution};

pub const COLOUR_ENV: &str = "DISTINCT_COLOUR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColourMode {
    /// Colour when stdout is a terminal, unless `DISTINCT_COLOUR` says otherwise.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub suite: String,
    pub solution: SolutionKind,
    pub strategy: MembershipStrategy,
    pub colour: bool,
    pub log_path: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            suite: "is_unique".to_string(),
            solution: SolutionKind::Auto,
            strategy: MembershipStrategy::Hash,
            colour: false,
            log_path: None,
        }
    }
}

impl HarnessConfig {
    /// Layers the environment under explicit settings: `--color` beats
    /// `DISTINCT_COLOUR`, which beats terminal detection; `--log-path` beats
    /// `DISTINCT_RUN_LOG_PATH`.
    #[must_use]
    pub fn resolve(
        solution: SolutionKind,
        strategy: MembershipStrategy,
        colour: ColourMode,
        log_path: Option<PathBuf>,
    ) -> Self {
        Self::resolve_with(solution, strategy, colour, log_path, |key| {
            std::env::var(key).ok()
        })
    }

    #[must_use]
    pub fn resolve_with(
        solution: SolutionKind,
        strategy: MembershipStrategy,
        colour: ColourMode,
        log_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let colour = match colour {
            ColourMode::Always => true,
            ColourMode::Never => false,
            ColourMode::Auto => lookup(COLOUR_ENV)
                .and_then(|raw| parse_flag(&raw))
                .unwrap_or_else(console::colors_enabled),
        };
        let log_path = log_path.or_else(|| lookup(run_log::RUN_LOG_PATH_ENV).map(PathBuf::from));

        Self {
            suite: "is_unique".to_string(),
            solution,
            strategy,
            colour,
            log_path,
        }
    }

    #[must_use]
    pub fn runner(&self) -> FixtureRunner {
        FixtureRunner::new(self.suite.clone())
            .with_colour(self.colour)
            .with_strategy_label(self.strategy.as_str())
            .with_run_log(self.log_path.clone().map(RunLog::new))
    }
}

/// `value_parser` for the `--strategy` flag of both binaries.
pub fn parse_strategy(raw: &str) -> Result<MembershipStrategy, String> {
    MembershipStrategy::from_wire(raw)
        .ok_or_else(|| format!("unknown strategy {raw} (expected hash, ordered or linear)"))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn run_fixture_table(
    config: &HarnessConfig,
    table: &FixtureTable,
    out: &mut dyn Write,
) -> Result<RunReport, HarnessError> {
    let solution = build_solution(config.solution, config.strategy);
    config.runner().run(solution.as_ref(), table, out)
}

pub fn run_fixture_file(
    config: &HarnessConfig,
    path: &std::path::Path,
    out: &mut dyn Write,
) -> Result<RunReport, HarnessError> {
    let table = load_fixture_file(path)?;
    tracing::debug!(
        path = %path.display(),
        shape = table.shape.as_str(),
        fixtures = table.len(),
        "loaded fixture table"
    );
    run_fixture_table(config, &table, out)
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the `-v` count.
pub fn init_tracing(verbose: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
