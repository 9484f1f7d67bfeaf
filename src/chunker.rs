//! Entry reconstruction: turns a flat line stream into logical log entries.
//!
//! Dated lines are single-line entries. Anything else opens a multi-line block
//! that runs until a terminator line (six characters: three spaces, three
//! hyphens). The terminator is not part of the block.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io;

/// A line starting a dated entry begins with an ISO-style date stamp.
static DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("valid date prefix regex"));

/// Marks the end of a multi-line block.
const TERMINATOR: &str = "   ---";

/// One reconstructed log record, possibly spanning multiple raw lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Reconstructed content, continuation lines joined with `\n`.
    pub text: String,
    /// Whether the first line carried a date prefix.
    pub dated: bool,
}

impl LogEntry {
    pub fn dated(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            dated: true,
        }
    }

    pub fn trace(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            dated: false,
        }
    }
}

/// Returns true when the line's first six characters are the block terminator.
pub fn is_terminator(line: &str) -> bool {
    line.starts_with(TERMINATOR)
}

/// Returns true when the line opens a dated entry.
pub fn is_dated(line: &str) -> bool {
    DATE_PREFIX.is_match(line)
}

/// Reconstructs logical entries from a fallible line iterator.
///
/// The accumulation buffer is owned by the chunker and reused between entries.
/// The terminator check runs one line behind the read cursor, so the line
/// directly after a terminator is consumed without landing in any entry. That
/// matches the behavior the extraction fixtures were recorded against; see
/// DESIGN.md before changing it.
pub struct EntryChunker<I> {
    lines: I,
    buffer: Vec<String>,
}

impl<I> EntryChunker<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            buffer: Vec::new(),
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(e)) => Err(anyhow::Error::from(e).context("while reading log source")),
            None => Ok(None),
        }
    }
}

impl<I> Iterator for EntryChunker<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<LogEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = match self.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => return None,
            Err(e) => return Some(Err(e)),
        };

        if is_dated(&first) {
            return Some(Ok(LogEntry::dated(first)));
        }

        self.buffer.clear();
        let mut behind_terminator = is_terminator(&first);
        self.buffer.push(first);

        loop {
            let line = match self.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => return Some(Err(e)),
            };

            if behind_terminator {
                // `line` is the one past the terminator; it is dropped.
                break;
            }

            behind_terminator = is_terminator(&line);
            if !behind_terminator {
                self.buffer.push(line);
            }
        }

        Some(Ok(LogEntry::trace(self.buffer.join("\n"))))
    }
}
