//! Shared test utilities for the packager crate.
//!
//! Available to unit tests and, through the `test-support` feature, to the
//! behavioural suites under `tests/`.

use crate::builder::{BuildOutcome, Builder};
use crate::error::Result;
use crate::host::Platform;
use crate::layout::{LIB_DIR, LICENSE_FILE};
use crate::naming::binary_file_name;
use camino::Utf8Path;
use std::cell::Cell;
use std::fs;
use std::process::ExitStatus;

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// A [`Builder`] that returns a fixed outcome and counts invocations.
#[derive(Debug)]
pub struct FixedBuilder {
    outcome: BuildOutcome,
    calls: Cell<usize>,
}

impl FixedBuilder {
    /// A builder whose build always succeeds.
    #[must_use]
    pub fn succeeding() -> Self {
        Self::new(BuildOutcome::Success)
    }

    /// A builder whose build always exits with `code`.
    #[must_use]
    pub fn failing(code: i32) -> Self {
        Self::new(BuildOutcome::Failure { code: Some(code) })
    }

    /// A builder returning `outcome`.
    #[must_use]
    pub fn new(outcome: BuildOutcome) -> Self {
        Self {
            outcome,
            calls: Cell::new(0),
        }
    }

    /// Number of times [`Builder::run`] was called.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Builder for FixedBuilder {
    fn run(&self) -> Result<BuildOutcome> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.outcome)
    }

    fn describe(&self) -> String {
        "fixed build".to_owned()
    }
}

/// Write a minimal Skye working directory under `root`.
///
/// Creates `LICENSE`, `lib/a.txt`, `lib/sub/b.txt` and the release binary
/// for `platform` under `target/release/`. Safe to call repeatedly.
///
/// # Errors
///
/// Returns any I/O error raised while writing the files.
pub fn fixture_workspace(root: &Utf8Path, platform: &Platform) -> std::io::Result<()> {
    let lib = root.join(LIB_DIR);
    fs::create_dir_all(lib.join("sub"))?;
    fs::write(lib.join("a.txt"), b"a")?;
    fs::write(lib.join("sub").join("b.txt"), b"b")?;
    fs::write(root.join(LICENSE_FILE), b"MIT License\n")?;

    let release = root.join("target").join("release");
    fs::create_dir_all(&release)?;
    let binary = release.join(binary_file_name(platform));
    fs::write(&binary, b"\x7fELF fake skye")?;
    make_executable(&binary)
}

#[cfg(unix)]
fn make_executable(path: &Utf8Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Utf8Path) -> std::io::Result<()> {
    Ok(())
}
