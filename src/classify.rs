//! Per-entry classification and the simulated processing cost.

use crate::chunker::LogEntry;

/// Simulated per-entry processing cost, in busy-wait spin iterations.
///
/// The spin only exists to make the parallel speedup observable on real logs;
/// tests run with [`CostModel::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostModel {
    pub dated_spins: u32,
    pub trace_spins: u32,
}

impl CostModel {
    pub const ZERO: CostModel = CostModel {
        dated_spins: 0,
        trace_spins: 0,
    };

    pub fn new(dated_spins: u32, trace_spins: u32) -> Self {
        Self {
            dated_spins,
            trace_spins,
        }
    }

    fn spin(iterations: u32) {
        for _ in 0..iterations {
            std::hint::spin_loop();
        }
    }
}

impl Default for CostModel {
    fn default() -> Self {
        // Dated entries are cheap to dismiss; traces carry the real work.
        Self {
            dated_spins: 100,
            trace_spins: 100_000,
        }
    }
}

/// Classifies one entry, charging its simulated cost. Returns the trace text
/// when the entry belongs in the result collection.
pub fn classify<'a>(entry: &'a LogEntry, cost: &CostModel) -> Option<&'a str> {
    if entry.dated {
        CostModel::spin(cost.dated_spins);
        None
    } else {
        CostModel::spin(cost.trace_spins);
        Some(&entry.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dated_entries_are_not_results() {
        let entry = LogEntry::dated("2023-01-01 fine");
        assert_eq!(classify(&entry, &CostModel::ZERO), None);
    }

    #[test]
    fn traces_are_collected_verbatim() {
        let entry = LogEntry::trace("boom\n   at Foo()");
        assert_eq!(classify(&entry, &CostModel::ZERO), Some("boom\n   at Foo()"));
    }
}
