//! Shared helpers for the packager behavioural tests.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Create a temporary directory and return it with its UTF-8 path.
pub fn utf8_temp_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let root =
        Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).expect("temp dir path not UTF-8");
    (temp_dir, root)
}

/// Sorted file names directly inside `dir`.
pub fn dir_listing(dir: &Utf8Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("failed to read directory")
        .map(|entry| {
            entry
                .expect("failed to read directory entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

/// Entry names stored in the zip at `path`.
pub fn archive_entries(path: &Utf8Path) -> Vec<String> {
    let file = fs::File::open(path).expect("failed to open archive");
    let archive = zip::ZipArchive::new(file).expect("failed to read archive");
    archive.file_names().map(str::to_owned).collect()
}
