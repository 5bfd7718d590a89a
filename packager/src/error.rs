//! Error types for the Skye release packager.
//!
//! Each variant names the precondition or step that failed so the CLI can
//! print a single actionable line. The first error aborts the run.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while building and packaging a release.
#[derive(Debug, Error)]
pub enum PackagerError {
    /// The build command ran but reported failure.
    #[error("{}", build_failed_message(.code))]
    BuildFailed {
        /// Exit code of the build command, if it exited normally.
        code: Option<i32>,
    },

    /// The build command could not be started.
    #[error("failed to run `{command}`")]
    BuildSpawn {
        /// The command line that was attempted.
        command: String,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The output directory could not be removed or recreated.
    #[error("failed to reset output directory {path}")]
    OutputDirReset {
        /// Path to the output directory.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A staging directory is left over from an earlier run.
    #[error("staging directory {path} already exists; remove it and retry")]
    StagingDirExists {
        /// Path to the stale staging directory.
        path: Utf8PathBuf,
    },

    /// The compiled binary was not produced by the build.
    #[error("compiled binary not found at {path}")]
    MissingBinary {
        /// Expected path of the binary.
        path: Utf8PathBuf,
    },

    /// The `LICENSE` file is missing from the working directory.
    #[error("license file not found at {path}")]
    MissingLicense {
        /// Expected path of the license file.
        path: Utf8PathBuf,
    },

    /// The `lib` directory is missing from the working directory.
    #[error("library directory not found at {path}")]
    MissingLibDir {
        /// Expected path of the library directory.
        path: Utf8PathBuf,
    },

    /// The staging directory already holds a `lib` entry.
    #[error("library directory already staged at {path}")]
    LibAlreadyStaged {
        /// Path of the conflicting entry.
        path: Utf8PathBuf,
    },

    /// Copying a file into the staging directory failed.
    #[error("failed to copy {from} to {to}")]
    Copy {
        /// Source path.
        from: Utf8PathBuf,
        /// Destination path.
        to: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the zip archive failed.
    #[error("failed to write archive {path}")]
    Archive {
        /// Path of the archive being written.
        path: Utf8PathBuf,
        /// The underlying zip error.
        #[source]
        source: zip::result::ZipError,
    },

    /// Removing the staging directory failed.
    #[error("failed to remove staging directory {path}")]
    Cleanup {
        /// Path to the staging directory.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The staging directory could not be created.
    #[error("failed to create staging directory {path}")]
    StagingDirCreate {
        /// Path to the staging directory.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A walked entry does not lie under the directory being walked.
    #[error("{} is not inside {root}", .path.display())]
    OutsideRoot {
        /// The offending entry.
        path: std::path::PathBuf,
        /// The directory that was walked.
        root: Utf8PathBuf,
    },

    /// A path encountered while walking a directory is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// Walking a directory tree failed.
    #[error("directory traversal failed")]
    Walk(#[from] walkdir::Error),

    /// An I/O operation failed.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

impl PackagerError {
    /// Process exit status for this error.
    ///
    /// Every fatal error maps to status 1, the same status a failed build
    /// produces.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }
}

fn build_failed_message(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("build failed with exit code {code}"),
        None => "build terminated by signal".to_owned(),
    }
}

/// Result type alias using [`PackagerError`].
pub type Result<T> = std::result::Result<T, PackagerError>;
