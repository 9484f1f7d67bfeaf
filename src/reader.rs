//! Line source for log files.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Buffered line reader over one log file. Single pass; a new pass needs a new
/// `LineSource`.
#[derive(Debug)]
pub struct LineSource {
    lines: io::Lines<BufReader<File>>,
}

impl LineSource {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }
}

impl Iterator for LineSource {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(|res| {
            res.map(|mut line| {
                if line.ends_with('\r') {
                    line.pop();
                }
                line
            })
        })
    }
}
