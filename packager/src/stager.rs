//! Output directory handling and release staging.
//!
//! The stager owns the two directories a run touches: the durable `publish`
//! output directory, reset at the start of every run, and the temporary
//! `tmp` staging directory that collects the release contents before they
//! are archived.

use crate::error::{PackagerError, Result};
use crate::host::Platform;
use crate::layout::{LIB_DIR, LICENSE_FILE, PublishLayout, relative_to};
use crate::naming::binary_file_name;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::ErrorKind;
use walkdir::WalkDir;

/// Remove the output directory if present, then recreate it empty.
///
/// # Errors
///
/// Returns [`PackagerError::OutputDirReset`] if removal or creation fails.
pub fn reset_output_dir(layout: &PublishLayout) -> Result<Utf8PathBuf> {
    let output_dir = layout.output_dir();
    let reset_error = |source: std::io::Error| PackagerError::OutputDirReset {
        path: output_dir.clone(),
        source,
    };

    if output_dir.exists() {
        log::debug!("removing previous output directory {output_dir}");
        fs::remove_dir_all(&output_dir).map_err(reset_error)?;
    }
    fs::create_dir(&output_dir).map_err(reset_error)?;
    Ok(output_dir)
}

/// Assembles release contents in the staging directory.
#[derive(Debug, Clone)]
pub struct Stager {
    layout: PublishLayout,
}

impl Stager {
    /// Create a stager for the given layout.
    #[must_use]
    pub fn new(layout: PublishLayout) -> Self {
        Self { layout }
    }

    /// Return the full path to the staging directory.
    #[must_use]
    pub fn staging_path(&self) -> Utf8PathBuf {
        self.layout.staging_dir()
    }

    /// Create the staging directory.
    ///
    /// Nothing is merged into a leftover directory from an earlier run.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::StagingDirExists`] if any entry named `tmp`
    /// already exists.
    pub fn prepare(&self) -> Result<Utf8PathBuf> {
        let staging_dir = self.staging_path();
        match fs::create_dir(&staging_dir) {
            Ok(()) => Ok(staging_dir),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(PackagerError::StagingDirExists { path: staging_dir })
            }
            Err(source) => Err(PackagerError::StagingDirCreate {
                path: staging_dir,
                source,
            }),
        }
    }

    /// Copy the compiled binary for `platform` into staging.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::MissingBinary`] if the build produced no
    /// binary, or [`PackagerError::Copy`] if the copy fails.
    pub fn stage_binary(&self, platform: &Platform) -> Result<Utf8PathBuf> {
        let source = self.layout.binary_path(platform);
        if !source.is_file() {
            return Err(PackagerError::MissingBinary { path: source });
        }
        let dest = self.staging_path().join(binary_file_name(platform));
        copy_file(&source, &dest)?;
        Ok(dest)
    }

    /// Copy the `LICENSE` file into staging.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::MissingLicense`] if the file is absent, or
    /// [`PackagerError::Copy`] if the copy fails.
    pub fn stage_license(&self) -> Result<Utf8PathBuf> {
        let source = self.layout.license_file();
        if !source.is_file() {
            return Err(PackagerError::MissingLicense { path: source });
        }
        let dest = self.staging_path().join(LICENSE_FILE);
        copy_file(&source, &dest)?;
        Ok(dest)
    }

    /// Recursively copy the `lib` directory into `tmp/lib`.
    ///
    /// Symbolic links are followed and their targets copied as regular
    /// content.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::MissingLibDir`] if `lib` is absent,
    /// [`PackagerError::LibAlreadyStaged`] if `tmp/lib` already exists, or a
    /// copy/traversal error.
    pub fn stage_lib_tree(&self) -> Result<Utf8PathBuf> {
        let source = self.layout.lib_dir();
        if !source.is_dir() {
            return Err(PackagerError::MissingLibDir { path: source });
        }
        let dest = self.staging_path().join(LIB_DIR);
        if dest.symlink_metadata().is_ok() {
            return Err(PackagerError::LibAlreadyStaged { path: dest });
        }
        copy_tree(&source, &dest)?;
        Ok(dest)
    }

    /// Stage the binary, license, and library tree in that order.
    ///
    /// # Errors
    ///
    /// Returns the first staging error encountered.
    pub fn stage_all(&self, platform: &Platform) -> Result<()> {
        self.stage_binary(platform)?;
        self.stage_license()?;
        self.stage_lib_tree()?;
        Ok(())
    }

    /// Remove the staging directory and everything in it.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Cleanup`] if removal fails.
    pub fn cleanup(&self) -> Result<()> {
        let staging_dir = self.staging_path();
        fs::remove_dir_all(&staging_dir).map_err(|source| PackagerError::Cleanup {
            path: staging_dir,
            source,
        })
    }
}

/// Copy a single file, keeping its permission bits but no other metadata.
fn copy_file(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    log::debug!("copying {from} -> {to}");
    fs::copy(from, to).map_err(|source| PackagerError::Copy {
        from: from.to_owned(),
        to: to.to_owned(),
        source,
    })?;
    Ok(())
}

/// Recreate the directory tree at `from` under `to`.
fn copy_tree(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    for entry in WalkDir::new(from).follow_links(true) {
        let entry = entry?;
        let rel_path = relative_to(from, entry.path())?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_dir() {
            fs::create_dir(&dest_path).map_err(|source| PackagerError::Copy {
                from: from.join(rel_path),
                to: dest_path.clone(),
                source,
            })?;
        } else {
            copy_file(&from.join(rel_path), &dest_path)?;
        }
    }
    Ok(())
}
