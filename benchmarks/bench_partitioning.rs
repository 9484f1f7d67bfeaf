use std::io::Write;

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tempfile::NamedTempFile;

use logshard::chunker::EntryChunker;
use logshard::classify::CostModel;
use logshard::config::{FixtureConfig, InputConfig, PerformanceConfig, ShardConfig};
use logshard::harness;
use logshard::partition::PartitionSet;

fn sample_log(entries: usize) -> String {
    let mut lines = Vec::new();
    for i in 0..entries {
        if i % 4 == 0 {
            lines.push(format!("worker {} crashed", i));
            lines.push("   at Handler.process()".to_string());
            lines.push("   at Dispatcher.run()".to_string());
            lines.push("   ---".to_string());
            lines.push("2023-12-31 sacrificial".to_string());
        } else {
            lines.push(format!("2023-01-01 request {} handled", i));
        }
    }
    let mut content = lines.join("\n");
    content.push('\n');
    content
}

fn config_for(path: std::path::PathBuf, partitions: usize) -> ShardConfig {
    ShardConfig {
        input: InputConfig { path },
        performance: PerformanceConfig { partitions },
        // Enough cost per trace to make the distribution matter, small enough
        // to keep the benchmark fast.
        cost: CostModel::new(10, 2_000),
        fixture: FixtureConfig::default(),
        stats: false,
    }
}

fn bench_partition_build(c: &mut Criterion) {
    let lines: Vec<String> = sample_log(4_000).lines().map(str::to_string).collect();
    c.bench_function("partition_build_8", |b| {
        b.iter(|| {
            let entries =
                EntryChunker::new(lines.iter().cloned().map(Ok::<_, std::io::Error>));
            black_box(PartitionSet::build(entries, 8).unwrap())
        });
    });
}

fn bench_parallel_extraction(c: &mut Criterion) {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(sample_log(4_000).as_bytes()).unwrap();
    let config = config_for(file.path().to_path_buf(), num_cpus::get().max(1));
    c.bench_function("extract_parallel", |b| {
        b.iter(|| black_box(harness::run_parallel(&config).unwrap()));
    });
}

fn bench_sequential_extraction(c: &mut Criterion) {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(sample_log(4_000).as_bytes()).unwrap();
    let config = config_for(file.path().to_path_buf(), 1);
    c.bench_function("extract_sequential", |b| {
        b.iter(|| black_box(harness::run_sequential(&config).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_partition_build,
    bench_parallel_extraction,
    bench_sequential_extraction
);
criterion_main!(benches);
