#![forbid(unsafe_code)]

use std::io;

use clap::Parser;
use distinct_core::MembershipStrategy;
use distinct_harness::{init_tracing, parse_strategy};
use distinct_harness::stream::{check_stream, write_verdict};

/// Reads all of stdin and prints `true` when no character repeats.
#[derive(Parser)]
#[command(name = "is_unique")]
#[command(version)]
struct Cli {
    /// Membership strategy (hash, ordered, linear)
    #[arg(long, default_value = "hash", value_parser = parse_strategy)]
    strategy: MembershipStrategy,

    /// Enable verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("is_unique failed: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let unique = check_stream(io::stdin().lock(), cli.strategy)
        .map_err(|err| format!("failed reading stdin: {err}"))?;
    tracing::debug!(strategy = cli.strategy.as_str(), unique, "checked stdin");

    write_verdict(&mut io::stdout().lock(), unique)
        .map_err(|err| format!("failed writing stdout: {err}"))
}
