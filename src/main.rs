use std::io;
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};

use logshard::cli::{self, Cli};
use logshard::config::ShardConfig;
use logshard::harness;

/// Process exit codes: 0 success, 1 runtime or verification failure, 2 CLI
/// usage error.
const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return;
    }

    if let Err(e) = cli::validate_cli_args(&cli) {
        eprintln!("logshard: Error: {}", e);
        process::exit(EXIT_USAGE);
    }

    // validate_cli_args guarantees the path is present past this point.
    let path = PathBuf::from(cli.file.as_deref().unwrap_or_default());
    let config = ShardConfig::from_cli(&cli, path);

    let report = match harness::run(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("logshard: Error: {:#}", e);
            process::exit(EXIT_FAILURE);
        }
    };

    println!("Parallel: {} ms", report.parallel.processing_time.as_millis());
    println!(
        "Sequential: {} ms",
        report.sequential.processing_time.as_millis()
    );

    if config.stats {
        eprintln!("{}", report.parallel.format_stats("parallel"));
        eprintln!("{}", report.sequential.format_stats("sequential"));
    }

    match report.fixture_ok {
        Some(fixture_ok) => println!(
            "Result stack traces are {}equal and {}correct",
            if report.equivalent { "" } else { "not " },
            if fixture_ok { "" } else { "not " },
        ),
        None => println!(
            "Result stack traces are {}equal",
            if report.equivalent { "" } else { "not " },
        ),
    }

    if !report.passed() {
        process::exit(EXIT_FAILURE);
    }
}
