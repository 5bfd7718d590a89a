//! Zip archive creation for staged releases.
//!
//! Entries are named relative to the staging directory, so the archive root
//! holds the binary, `LICENSE` and `lib/` directly. Entries are written in
//! sorted order to keep archives reproducible for identical inputs.

use crate::error::{PackagerError, Result};
use crate::layout::relative_to;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Summary of a written archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Path to the created archive.
    pub path: Utf8PathBuf,
    /// Entry names in the order they were written.
    pub entries: Vec<String>,
}

/// Compress the contents of `source_dir` into a zip at `archive_path`.
///
/// Directories get their own entries with a trailing `/`. On Unix, file
/// permission bits are stored so executables stay executable after
/// extraction.
///
/// # Errors
///
/// Returns [`PackagerError::Archive`] if the archive cannot be written, or a
/// traversal error if `source_dir` cannot be walked.
pub fn create_archive(source_dir: &Utf8Path, archive_path: &Utf8Path) -> Result<ArchiveSummary> {
    let archive_error = |source: zip::result::ZipError| PackagerError::Archive {
        path: archive_path.to_owned(),
        source,
    };

    let file = fs::File::create(archive_path)
        .map_err(|e| archive_error(zip::result::ZipError::Io(e)))?;
    let mut writer = ZipWriter::new(file);
    let mut entries = Vec::new();

    for entry in WalkDir::new(source_dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let name = entry_name(source_dir, entry.path())?;
        let options = entry_options(&entry)?;

        if entry.file_type().is_dir() {
            let dir_name = format!("{name}/");
            log::debug!("adding directory {dir_name}");
            writer
                .add_directory(dir_name.as_str(), options)
                .map_err(archive_error)?;
            entries.push(dir_name);
        } else {
            log::debug!("adding file {name}");
            writer
                .start_file(name.as_str(), options)
                .map_err(archive_error)?;
            let mut source = fs::File::open(entry.path())?;
            io::copy(&mut source, &mut writer)
                .map_err(|e| archive_error(zip::result::ZipError::Io(e)))?;
            entries.push(name);
        }
    }

    writer.finish().map_err(archive_error)?;
    Ok(ArchiveSummary {
        path: archive_path.to_owned(),
        entries,
    })
}

/// Archive entry name for `path`, relative to `root` and `/`-separated.
fn entry_name(root: &Utf8Path, path: &std::path::Path) -> Result<String> {
    let rel_path = relative_to(root, path)?;
    let components: Vec<&str> = rel_path.components().map(|c| c.as_str()).collect();
    Ok(components.join("/"))
}

#[cfg(unix)]
fn entry_options(entry: &walkdir::DirEntry) -> Result<SimpleFileOptions> {
    use std::os::unix::fs::PermissionsExt;

    let mode = entry.metadata()?.permissions().mode();
    Ok(base_options().unix_permissions(mode & 0o7777))
}

#[cfg(not(unix))]
fn entry_options(_entry: &walkdir::DirEntry) -> Result<SimpleFileOptions> {
    Ok(base_options())
}

fn base_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}
