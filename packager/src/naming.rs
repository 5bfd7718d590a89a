//! Naming policy for release archives and the packaged binary.
//!
//! Archives follow `Skye-<arch>-<platform>.zip`, for example
//! `Skye-arm64-macOS.zip` or `Skye-x86_64-Linux.zip`.

use crate::host::{HostTarget, Platform};
use std::fmt;

/// The fixed prefix for all release archive names.
const ARCHIVE_PREFIX: &str = "Skye";

/// The fixed file extension for release archives.
const ARCHIVE_EXTENSION: &str = ".zip";

/// Stem of the compiled compiler binary.
pub const BINARY_STEM: &str = "skye";

/// A fully-qualified release archive name.
///
/// # Examples
///
/// ```
/// use skye_packager::host::HostTarget;
/// use skye_packager::naming::ArchiveName;
///
/// let name = ArchiveName::new(&HostTarget::new("Darwin", "arm64"));
/// assert_eq!(name.to_string(), "Skye-arm64-macOS.zip");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveName {
    target: HostTarget,
}

impl ArchiveName {
    /// Create an archive name for the given host target.
    #[must_use]
    pub fn new(target: &HostTarget) -> Self {
        Self {
            target: target.clone(),
        }
    }

    /// Return the filename as a string without consuming the value.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArchiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{ARCHIVE_PREFIX}-{}-{}{ARCHIVE_EXTENSION}",
            self.target.arch(),
            self.target.platform()
        )
    }
}

/// File name of the compiled binary on `platform`.
///
/// # Examples
///
/// ```
/// use skye_packager::host::Platform;
/// use skye_packager::naming::binary_file_name;
///
/// assert_eq!(binary_file_name(&Platform::from_os_name("Windows")), "skye.exe");
/// assert_eq!(binary_file_name(&Platform::from_os_name("Linux")), "skye");
/// ```
#[must_use]
pub fn binary_file_name(platform: &Platform) -> String {
    format!("{BINARY_STEM}{}", platform.executable_suffix())
}
