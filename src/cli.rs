//! CLI argument parsing and validation.

use anyhow::Result;
use clap::Parser;
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "logshard")]
#[command(about = "Extract stack traces from large logs with adaptive partitioning")]
#[command(
    long_about = "Extract stack traces from large logs with adaptive partitioning\n\nThe file is processed twice: once split across parallel workers, once on a\nsingle thread. Both result collections are compared to prove the partitioning\nchanges only how the work is distributed, never what is extracted."
)]
#[command(version)]
pub struct Cli {
    /// Log file to process
    pub file: Option<String>,

    #[arg(
        short = 'p',
        long = "partitions",
        default_value_t = 0,
        help = "Partition/worker count for the parallel pass (0 = CPU count)",
        help_heading = "Performance Options"
    )]
    pub partitions: usize,

    #[arg(
        long = "trace-cost",
        default_value_t = 100_000,
        help = "Simulated spin iterations per stack-trace entry",
        help_heading = "Performance Options"
    )]
    pub trace_cost: u32,

    #[arg(
        long = "dated-cost",
        default_value_t = 100,
        help = "Simulated spin iterations per dated entry",
        help_heading = "Performance Options"
    )]
    pub dated_cost: u32,

    #[arg(
        long = "expect-count",
        help = "Expected number of extracted traces from a reference run",
        help_heading = "Fixture Options"
    )]
    pub expect_count: Option<usize>,

    #[arg(
        long = "expect-chars",
        help = "Expected total character count of extracted traces",
        help_heading = "Fixture Options"
    )]
    pub expect_chars: Option<usize>,

    #[arg(
        short = 's',
        long = "stats",
        help = "Print per-run statistics to stderr",
        help_heading = "Display Options"
    )]
    pub stats: bool,

    #[arg(
        long = "completions",
        value_enum,
        help = "Generate shell completions and exit",
        help_heading = "Configuration Options"
    )]
    pub completions: Option<Shell>,
}

/// Validate CLI arguments for early error detection
pub fn validate_cli_args(cli: &Cli) -> Result<()> {
    if cli.file.is_none() && cli.completions.is_none() {
        return Err(anyhow::anyhow!("a log file path is required"));
    }

    if cli.partitions > 1000 {
        return Err(anyhow::anyhow!("Partition count too high (max 1000)"));
    }

    Ok(())
}
