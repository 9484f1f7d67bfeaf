//! Equivalence harness: runs extraction fully parallel and fully sequential
//! over the same file and compares the result collections.
//!
//! Workers never share mutable state. Each one owns a pre-materialized
//! partition and reports its traces and counters over a channel; the harness
//! merges reports in arrival order, which is why the comparison treats the
//! collections as unordered.

use anyhow::{anyhow, Result};
use crossbeam_channel::unbounded;
use std::thread;
use std::time::Instant;

use crate::chunker::EntryChunker;
use crate::classify::{classify, CostModel};
use crate::config::ShardConfig;
use crate::partition::{Partition, PartitionSet};
use crate::reader::LineSource;
use crate::stats::RunStats;

/// The traces and counters produced by one run.
#[derive(Debug)]
pub struct RunOutcome {
    pub traces: Vec<String>,
    pub stats: RunStats,
}

/// What one worker sends back after draining its partition.
struct WorkerReport {
    traces: Vec<String>,
    stats: RunStats,
}

fn extract_partition(partition: &Partition, cost: &CostModel) -> WorkerReport {
    let mut traces = Vec::new();
    let mut stats = RunStats::default();
    for entry in partition {
        let extracted = classify(entry, cost);
        stats.record(entry, extracted);
        if let Some(text) = extracted {
            traces.push(text.to_string());
        }
    }
    WorkerReport { traces, stats }
}

/// Partitions the file into `config.performance.partitions` shares and
/// classifies them on one worker thread each. Partition construction completes
/// before the first worker starts.
pub fn run_parallel(config: &ShardConfig) -> Result<RunOutcome> {
    let started = Instant::now();

    let source = LineSource::open(&config.input.path)?;
    let set = PartitionSet::build(EntryChunker::new(source), config.performance.partitions)?;

    let cost = config.cost;
    let (report_tx, report_rx) = unbounded::<WorkerReport>();

    let mut handles = Vec::with_capacity(set.len());
    for partition in set.into_partitions() {
        let report_tx = report_tx.clone();
        handles.push(thread::spawn(move || {
            // A send only fails when the harness is already gone.
            let _ = report_tx.send(extract_partition(&partition, &cost));
        }));
    }
    drop(report_tx);

    let mut traces = Vec::new();
    let mut stats = RunStats::default();
    for report in report_rx.iter() {
        stats.merge(&report.stats);
        traces.extend(report.traces);
    }

    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow!("extraction worker panicked"))?;
    }

    stats.processing_time = started.elapsed();
    Ok(RunOutcome { traces, stats })
}

/// Single logical pass: one partition, classified on the calling thread.
pub fn run_sequential(config: &ShardConfig) -> Result<RunOutcome> {
    let started = Instant::now();

    let source = LineSource::open(&config.input.path)?;
    let set = PartitionSet::build(EntryChunker::new(source), 1)?;

    let report = extract_partition(&set.partitions()[0], &config.cost);

    let mut stats = report.stats;
    stats.processing_time = started.elapsed();
    Ok(RunOutcome {
        traces: report.traces,
        stats,
    })
}

/// Verdict of comparing the two runs, plus the optional fixture check.
#[derive(Debug)]
pub struct EquivalenceReport {
    pub equivalent: bool,
    pub fixture_ok: Option<bool>,
    pub parallel: RunStats,
    pub sequential: RunStats,
}

impl EquivalenceReport {
    pub fn passed(&self) -> bool {
        self.equivalent && self.fixture_ok.unwrap_or(true)
    }
}

/// Compares the two collections as sorted sequences and, when expectations
/// were supplied, checks the parallel run's aggregates against them.
pub fn compare(parallel: RunOutcome, sequential: RunOutcome, config: &ShardConfig) -> EquivalenceReport {
    let mut parallel_traces = parallel.traces;
    let mut sequential_traces = sequential.traces;
    parallel_traces.sort_unstable();
    sequential_traces.sort_unstable();

    let fixture = &config.fixture;
    let fixture_ok = if fixture.expect_count.is_none() && fixture.expect_chars.is_none() {
        None
    } else {
        let count_ok = fixture
            .expect_count
            .map_or(true, |expected| parallel.stats.traces_found == expected);
        let chars_ok = fixture
            .expect_chars
            .map_or(true, |expected| parallel.stats.trace_chars == expected);
        Some(count_ok && chars_ok)
    };

    EquivalenceReport {
        equivalent: parallel_traces == sequential_traces,
        fixture_ok,
        parallel: parallel.stats,
        sequential: sequential.stats,
    }
}

/// Runs both passes over freshly opened sources and compares them. The file is
/// read twice; a single-pass source cannot be rewound.
pub fn run(config: &ShardConfig) -> Result<EquivalenceReport> {
    let parallel = run_parallel(config)?;
    let sequential = run_sequential(config)?;
    Ok(compare(parallel, sequential, config))
}
