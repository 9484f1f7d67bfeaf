//! Statistics collected during an extraction run.

use std::time::Duration;

use crate::chunker::LogEntry;

/// Aggregate counters for one run (parallel or sequential). Worker threads
/// each build their own and the harness merges them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub entries_scanned: usize,
    pub dated_entries: usize,
    pub traces_found: usize,
    pub trace_chars: usize,
    pub processing_time: Duration,
}

impl RunStats {
    pub fn record(&mut self, entry: &LogEntry, extracted: Option<&str>) {
        self.entries_scanned += 1;
        if entry.dated {
            self.dated_entries += 1;
        }
        if let Some(text) = extracted {
            self.traces_found += 1;
            self.trace_chars += text.chars().count();
        }
    }

    /// Folds another worker's counters into this one. Elapsed time is owned by
    /// the harness, not the workers, so it is left untouched here.
    pub fn merge(&mut self, other: &RunStats) {
        self.entries_scanned += other.entries_scanned;
        self.dated_entries += other.dated_entries;
        self.traces_found += other.traces_found;
        self.trace_chars += other.trace_chars;
    }

    pub fn format_stats(&self, label: &str) -> String {
        let mut output = format!(
            "{}: Entries processed: {} total, {} dated, {} traces ({} chars)",
            label, self.entries_scanned, self.dated_entries, self.traces_found, self.trace_chars
        );

        let processing_time_ms = self.processing_time.as_millis();
        output.push_str(&format!(" in {}ms", processing_time_ms));

        if processing_time_ms > 0 && self.entries_scanned > 0 {
            let entries_per_sec =
                (self.entries_scanned as f64 * 1000.0) / processing_time_ms as f64;
            output.push_str(&format!(" ({:.0} entries/s)", entries_per_sec));
        }

        output
    }
}
