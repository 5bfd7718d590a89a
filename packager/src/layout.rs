//! Working-directory layout for a packaging run.
//!
//! All paths the packager reads or writes hang off a single root, normally
//! the current working directory.

use crate::error::{PackagerError, Result};
use crate::host::{HostTarget, Platform};
use crate::naming::{ArchiveName, binary_file_name};
use camino::{Utf8Path, Utf8PathBuf};
use std::path::Path;

/// Name of the durable output directory.
pub const OUTPUT_DIR: &str = "publish";

/// Name of the temporary staging directory.
pub const STAGING_DIR: &str = "tmp";

/// Name of the license file copied into every release.
pub const LICENSE_FILE: &str = "LICENSE";

/// Name of the library directory copied into every release.
pub const LIB_DIR: &str = "lib";

/// Paths used by a packaging run, relative to a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishLayout {
    root: Utf8PathBuf,
}

impl PublishLayout {
    /// Create a layout rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a layout rooted at the process working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be read or is not
    /// valid UTF-8.
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let root = Utf8PathBuf::try_from(cwd)
            .map_err(|e| PackagerError::NonUtf8Path(e.into_path_buf()))?;
        Ok(Self::new(root))
    }

    /// Root of the working directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// The `publish` output directory.
    #[must_use]
    pub fn output_dir(&self) -> Utf8PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    /// The `tmp` staging directory.
    #[must_use]
    pub fn staging_dir(&self) -> Utf8PathBuf {
        self.root.join(STAGING_DIR)
    }

    /// The `LICENSE` file.
    #[must_use]
    pub fn license_file(&self) -> Utf8PathBuf {
        self.root.join(LICENSE_FILE)
    }

    /// The `lib` directory.
    #[must_use]
    pub fn lib_dir(&self) -> Utf8PathBuf {
        self.root.join(LIB_DIR)
    }

    /// Directory cargo writes release builds into.
    #[must_use]
    pub fn release_dir(&self) -> Utf8PathBuf {
        self.root.join("target").join("release")
    }

    /// Path of the compiled binary for `platform`.
    #[must_use]
    pub fn binary_path(&self, platform: &Platform) -> Utf8PathBuf {
        self.release_dir().join(binary_file_name(platform))
    }

    /// Path of the release archive for `target`.
    #[must_use]
    pub fn archive_path(&self, target: &HostTarget) -> Utf8PathBuf {
        self.output_dir().join(ArchiveName::new(target).filename())
    }
}

/// `path` relative to `root`, as UTF-8.
///
/// # Errors
///
/// Returns [`PackagerError::OutsideRoot`] if `path` does not start with
/// `root`, or [`PackagerError::NonUtf8Path`] if the remainder is not UTF-8.
pub fn relative_to<'a>(root: &Utf8Path, path: &'a Path) -> Result<&'a Utf8Path> {
    let rel_path = path
        .strip_prefix(root)
        .map_err(|_| PackagerError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_owned(),
        })?;
    Utf8Path::from_path(rel_path).ok_or_else(|| PackagerError::NonUtf8Path(path.to_path_buf()))
}
