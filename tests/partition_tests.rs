// Distribution properties of the guided-growth partitioner.

use std::io;

use proptest::prelude::*;

use logshard::chunker::EntryChunker;
use logshard::classify::{classify, CostModel};
use logshard::partition::PartitionSet;

fn set_from_lines(lines: &[String], count: usize) -> PartitionSet {
    let entries = EntryChunker::new(lines.iter().cloned().map(Ok::<_, io::Error>));
    PartitionSet::build(entries, count).expect("count > 0")
}

fn round_major_texts(set: &PartitionSet) -> Vec<String> {
    set.round_major().iter().map(|e| e.text.clone()).collect()
}

fn sorted_traces(set: &PartitionSet) -> Vec<String> {
    let mut traces: Vec<String> = set
        .partitions()
        .iter()
        .flat_map(|p| p.iter())
        .filter_map(|e| classify(e, &CostModel::ZERO))
        .map(str::to_string)
        .collect();
    traces.sort_unstable();
    traces
}

/// Line mix resembling the target logs: dated entries, stack frames, block
/// terminators, and free-form message lines.
fn log_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            "[a-z ]{0,12}".prop_map(|s| format!("2023-01-01 {}", s)),
            "[a-z]{1,8}".prop_map(|s| format!("   at {}()", s)),
            "[A-Za-z0-9 .]{0,16}",
            Just("   ---".to_string()),
        ],
        0..48,
    )
}

proptest! {
    #[test]
    fn partition_count_changes_distribution_not_content(
        lines in log_lines(),
        count_a in 1usize..9,
        count_b in 1usize..9,
    ) {
        let set_a = set_from_lines(&lines, count_a);
        let set_b = set_from_lines(&lines, count_b);
        prop_assert_eq!(round_major_texts(&set_a), round_major_texts(&set_b));
        prop_assert_eq!(set_a.total_entries(), set_b.total_entries());
    }

    #[test]
    fn extracted_multiset_is_independent_of_partition_count(
        lines in log_lines(),
        count_a in 1usize..9,
        count_b in 1usize..9,
    ) {
        let set_a = set_from_lines(&lines, count_a);
        let set_b = set_from_lines(&lines, count_b);
        prop_assert_eq!(sorted_traces(&set_a), sorted_traces(&set_b));
    }

    #[test]
    fn partitioning_twice_is_idempotent(lines in log_lines(), count in 1usize..9) {
        let first = set_from_lines(&lines, count);
        let second = set_from_lines(&lines, count);
        prop_assert_eq!(first.total_entries(), second.total_entries());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_partition_preserves_source_order(lines in log_lines(), count in 1usize..9) {
        let whole = set_from_lines(&lines, 1);
        let split = set_from_lines(&lines, count);
        let source_order = round_major_texts(&whole);

        for partition in split.partitions() {
            let mut last_position = 0usize;
            for entry in partition {
                // Each partition's entries appear as a subsequence of the source.
                let position = source_order[last_position..]
                    .iter()
                    .position(|text| *text == entry.text)
                    .map(|offset| last_position + offset);
                prop_assert!(position.is_some());
                last_position = position.unwrap() + 1;
            }
        }
    }
}

#[test]
fn chunk_sizes_grow_by_one_each_round() {
    // 30 single-line entries over 3 partitions: rounds of 1, 2, 3, then the
    // remaining 12 entries fill round 4 as 4, 4, 4.
    let lines: Vec<String> = (0..30).map(|i| format!("2023-01-01 entry {:02}", i)).collect();
    let set = set_from_lines(&lines, 3);

    let sizes: Vec<usize> = set.partitions().iter().map(|p| p.len()).collect();
    assert_eq!(sizes, vec![10, 10, 10]);

    let first: Vec<&str> = set.partitions()[0]
        .iter()
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(
        first,
        vec![
            "2023-01-01 entry 00",
            "2023-01-01 entry 03",
            "2023-01-01 entry 04",
            "2023-01-01 entry 09",
            "2023-01-01 entry 10",
            "2023-01-01 entry 11",
            "2023-01-01 entry 18",
            "2023-01-01 entry 19",
            "2023-01-01 entry 20",
            "2023-01-01 entry 21",
        ]
    );
}
