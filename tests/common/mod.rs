// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

/// Binary under test; cargo builds it before integration tests run.
const BINARY: &str = env!("CARGO_BIN_EXE_logshard");

/// Helper function to run logshard with given arguments
pub fn run_logshard(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(BINARY)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute logshard");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Helper function to run logshard against a temporary log file. The file path
/// is appended to `args`.
pub fn run_logshard_with_file(args: &[&str], file_content: &str) -> (String, String, i32) {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file
        .write_all(file_content.as_bytes())
        .expect("Failed to write to temp file");

    let mut full_args = args.to_vec();
    let path = temp_file.path().to_str().unwrap().to_string();
    full_args.push(&path);

    run_logshard(&full_args)
}

/// Deterministic sample log: `dated` dated entries interleaved with `traces`
/// three-line stack-trace blocks. Every block is followed by a sacrificial
/// dated line, since the reconstructor consumes the line after each
/// terminator.
pub fn sample_log(dated: usize, traces: usize) -> String {
    let mut lines = Vec::new();
    let mut dated_left = dated;
    let mut traces_left = traces;
    let mut day = 1;

    while dated_left > 0 || traces_left > 0 {
        if dated_left > 0 {
            lines.push(format!("2023-01-{:02} request handled in {}ms", day % 28 + 1, day));
            dated_left -= 1;
        }
        if traces_left > 0 {
            lines.push(format!("NullReferenceException in request {}", traces_left));
            lines.push(format!("   at Handler.process_{}()", traces_left));
            lines.push("   at Dispatcher.run()".to_string());
            lines.push("   ---".to_string());
            lines.push("2023-12-31 sacrificial line after terminator".to_string());
            traces_left -= 1;
        }
        day += 1;
    }

    let mut content = lines.join("\n");
    content.push('\n');
    content
}
