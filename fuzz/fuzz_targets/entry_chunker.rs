#![no_main]

use libfuzzer_sys::fuzz_target;

use logshard::chunker::EntryChunker;
use logshard::partition::PartitionSet;

const MAX_LINES: usize = 256;
const MAX_LINE_LEN: usize = 1024;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let lines: Vec<String> = text
        .lines()
        .take(MAX_LINES)
        .map(|line| line.chars().take(MAX_LINE_LEN).collect())
        .collect();
    let line_count = lines.len();

    let entries: Vec<_> = EntryChunker::new(lines.into_iter().map(Ok::<_, std::io::Error>))
        .collect::<Result<Vec<_>, _>>()
        .expect("in-memory lines cannot fail");

    // Reconstruction never invents entries.
    assert!(entries.len() <= line_count);

    // Dealing the entries out and replaying the schedule must reproduce them.
    let count = (data.first().copied().unwrap_or(0) as usize % 8) + 1;
    let set = PartitionSet::build(entries.iter().cloned().map(Ok), count)
        .expect("positive partition count");
    assert_eq!(set.total_entries(), entries.len());
    let replayed: Vec<_> = set.round_major().into_iter().cloned().collect();
    assert_eq!(replayed, entries);
});
