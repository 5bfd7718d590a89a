//! Release build orchestration.
//!
//! The packager only needs to know whether the build succeeded, so the build
//! step sits behind the narrow [`Builder`] trait. [`CargoBuilder`] runs
//! `cargo build --release` with inherited stdio so compiler output reaches
//! the terminal unchanged.

use crate::error::{PackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::process::{Command, ExitStatus};

/// Program invoked for release builds.
const CARGO: &str = "cargo";

/// Arguments passed to cargo for a release build.
const RELEASE_ARGS: &[&str] = &["build", "--release"];

/// Result of running a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The build command exited with status zero.
    Success,
    /// The build command exited non-zero or was killed by a signal.
    Failure {
        /// Exit code, if the process exited normally.
        code: Option<i32>,
    },
}

impl BuildOutcome {
    /// Classify a process exit status.
    #[must_use]
    pub fn from_status(status: ExitStatus) -> Self {
        if status.success() {
            Self::Success
        } else {
            Self::Failure {
                code: status.code(),
            }
        }
    }
}

/// Capability to produce a release build.
pub trait Builder {
    /// Run the build to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the build could not be started at all. A build
    /// that runs and fails is reported as [`BuildOutcome::Failure`].
    fn run(&self) -> Result<BuildOutcome>;

    /// Human-readable command line, used in progress output.
    fn describe(&self) -> String;
}

/// Abstraction for running external commands with inherited stdio.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    /// Run `program` with `args` in `dir` and wait for it to exit.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while spawning or waiting on the process.
    fn status(&self, program: &str, args: &[String], dir: &Utf8Path) -> std::io::Result<ExitStatus>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn status(&self, program: &str, args: &[String], dir: &Utf8Path) -> std::io::Result<ExitStatus> {
        Command::new(program).args(args).current_dir(dir).status()
    }
}

/// Builds the workspace with `cargo build --release`.
#[derive(Debug, Clone)]
pub struct CargoBuilder<E = SystemCommandExecutor> {
    executor: E,
    workspace_root: Utf8PathBuf,
}

impl CargoBuilder {
    /// Create a builder that runs cargo in `workspace_root`.
    #[must_use]
    pub fn new(workspace_root: impl Into<Utf8PathBuf>) -> Self {
        Self::with_executor(SystemCommandExecutor, workspace_root)
    }
}

impl<E: CommandExecutor> CargoBuilder<E> {
    /// Create a builder using a custom command executor.
    #[must_use]
    pub fn with_executor(executor: E, workspace_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            executor,
            workspace_root: workspace_root.into(),
        }
    }

    fn args() -> Vec<String> {
        RELEASE_ARGS.iter().map(|&arg| arg.to_owned()).collect()
    }
}

impl<E: CommandExecutor> Builder for CargoBuilder<E> {
    fn run(&self) -> Result<BuildOutcome> {
        log::debug!("running `{}` in {}", self.describe(), self.workspace_root);
        let status = self
            .executor
            .status(CARGO, &Self::args(), &self.workspace_root)
            .map_err(|source| PackagerError::BuildSpawn {
                command: self.describe(),
                source,
            })?;
        Ok(BuildOutcome::from_status(status))
    }

    fn describe(&self) -> String {
        format!("{CARGO} {}", RELEASE_ARGS.join(" "))
    }
}
