//! Guided-growth partitioning of the entry stream.
//!
//! Entries are dealt round-robin to a fixed number of partitions. The chunk
//! handed to each partition starts at one entry per round and grows by one each
//! round, so every partition starts receiving work immediately while the number
//! of rounds stays O(sqrt(total entries)).

use anyhow::{bail, Result};
use std::slice;

use crate::chunker::LogEntry;

/// One ordered, materialized share of the entry stream. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    entries: Vec<LogEntry>,
}

impl Partition {
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = &'a LogEntry;
    type IntoIter = slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// All partitions produced by one pass over one source. The partition count is
/// fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionSet {
    partitions: Vec<Partition>,
}

impl PartitionSet {
    /// Drains `entries` completely and deals them into `count` partitions.
    ///
    /// When the source runs dry mid-chunk the current partition keeps whatever
    /// it already got and no later partition is filled in that round.
    pub fn build<I>(entries: I, count: usize) -> Result<Self>
    where
        I: IntoIterator<Item = Result<LogEntry>>,
    {
        if count == 0 {
            bail!("partition count must be greater than 0");
        }

        let mut entries = entries.into_iter();
        let mut partitions = vec![Partition::default(); count];
        let mut chunk_size = 1usize;
        let mut drained = false;

        while !drained {
            for partition in &mut partitions {
                for _ in 0..chunk_size {
                    match entries.next() {
                        Some(entry) => partition.entries.push(entry?),
                        None => {
                            drained = true;
                            break;
                        }
                    }
                }
                if drained {
                    break;
                }
            }
            chunk_size += 1;
        }

        Ok(Self { partitions })
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn into_partitions(self) -> Vec<Partition> {
        self.partitions
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    pub fn total_entries(&self) -> usize {
        self.partitions.iter().map(Partition::len).sum()
    }

    /// Replays the distribution schedule, yielding entries in round-major,
    /// partition-minor order. The result reproduces the original entry
    /// sequence exactly once.
    pub fn round_major(&self) -> Vec<&LogEntry> {
        let total = self.total_entries();
        let mut out = Vec::with_capacity(total);
        let mut cursors = vec![0usize; self.partitions.len()];
        let mut chunk_size = 1usize;

        while out.len() < total {
            for (cursor, partition) in cursors.iter_mut().zip(&self.partitions) {
                let take = chunk_size.min(partition.len() - *cursor);
                out.extend(&partition.entries()[*cursor..*cursor + take]);
                *cursor += take;
            }
            chunk_size += 1;
        }

        out
    }
}
