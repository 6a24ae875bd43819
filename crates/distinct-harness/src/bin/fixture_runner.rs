#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use distinct_core::MembershipStrategy;
use distinct_harness::fixture::builtin_fixtures;
use distinct_harness::solution::SolutionKind;
use distinct_harness::{
    ColourMode, HarnessConfig, init_tracing, parse_strategy, run_fixture_file, run_fixture_table,
};

const USAGE: &str = "Usage: fixture_runner <test-file.json>";

#[derive(Parser)]
#[command(name = "fixture_runner")]
#[command(about = "Run a solution against a JSON fixture table", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON fixture table: a {"input": expected} mapping or a list of
    /// {"input": [args], "expected": value} records
    fixtures: Option<PathBuf>,

    /// Solution calling convention
    #[arg(long, value_enum, default_value_t = SolutionKind::Auto)]
    solution: SolutionKind,

    /// Membership strategy (hash, ordered, linear)
    #[arg(long, default_value = "hash", value_parser = parse_strategy)]
    strategy: MembershipStrategy,

    /// Run the table shipped with the exercise instead of a file
    #[arg(long, conflicts_with = "fixtures")]
    builtin: bool,

    /// Append one JSON line per fixture to this file
    #[arg(long)]
    log_path: Option<PathBuf>,

    /// Colour verdicts
    #[arg(long, value_enum, default_value_t = ColourMode::Auto)]
    color: ColourMode,

    /// Exit with status 2 when any fixture does not pass
    #[arg(long)]
    fail_on_mismatch: bool,

    /// Enable verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.fixtures.is_none() && !cli.builtin {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("fixture_runner failed: {err}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32, String> {
    let config = HarnessConfig::resolve(cli.solution, cli.strategy, cli.color, cli.log_path);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = match &cli.fixtures {
        Some(path) => run_fixture_file(&config, path, &mut out),
        None => run_fixture_table(&config, &builtin_fixtures(), &mut out),
    }
    .map_err(|err| err.to_string())?;
    out.flush()
        .map_err(|err| format!("failed flushing stdout: {err}"))?;

    if cli.fail_on_mismatch && !report.all_passed() {
        return Ok(2);
    }
    Ok(0)
}
