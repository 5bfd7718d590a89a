//! Progress and result messages written to stderr.

use camino::Utf8Path;
use std::io::Write;

/// Write a line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; a closed stderr must not fail the run.
    }
}

/// Format the message printed after a successful run.
#[must_use]
pub fn success_message(entry_count: usize, archive_path: &Utf8Path) -> String {
    let plural = if entry_count == 1 { "entry" } else { "entries" };
    format!("Packaged {entry_count} {plural} into {archive_path}")
}
