//! Host platform and architecture identifiers.
//!
//! The archive name embeds the operating system and CPU architecture of the
//! machine that ran the build. Both values are detected once at startup and
//! then passed around as an immutable [`HostTarget`], so tests can inject
//! any combination without touching the real host.

use std::fmt;

/// Raw kernel name reported by macOS hosts.
const DARWIN: &str = "Darwin";

/// Display name used for macOS hosts.
const MACOS: &str = "macOS";

/// Platform name reported by Windows hosts.
const WINDOWS: &str = "Windows";

/// A normalized operating system name.
///
/// The raw kernel name `Darwin` is rewritten to `macOS`; every other name is
/// kept verbatim.
///
/// # Examples
///
/// ```
/// use skye_packager::host::Platform;
///
/// assert_eq!(Platform::from_os_name("Darwin").as_str(), "macOS");
/// assert_eq!(Platform::from_os_name("Linux").as_str(), "Linux");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform(String);

impl Platform {
    /// Build a platform from the raw OS name reported by the host.
    #[must_use]
    pub fn from_os_name(os_name: &str) -> Self {
        if os_name == DARWIN {
            Self(MACOS.to_owned())
        } else {
            Self(os_name.to_owned())
        }
    }

    /// Return the platform name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this platform is Windows.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.0 == WINDOWS
    }

    /// Suffix appended to executable file names on this platform.
    #[must_use]
    pub fn executable_suffix(&self) -> &'static str {
        if self.is_windows() { ".exe" } else { "" }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The CPU architecture string reported by the host, used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Architecture(String);

impl Architecture {
    /// Wrap a machine architecture string.
    #[must_use]
    pub fn new(machine: impl Into<String>) -> Self {
        Self(machine.into())
    }

    /// Return the architecture as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The platform/architecture pair a release is packaged for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTarget {
    platform: Platform,
    arch: Architecture,
}

impl HostTarget {
    /// Build a target from raw host strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use skye_packager::host::HostTarget;
    ///
    /// let target = HostTarget::new("Darwin", "arm64");
    /// assert_eq!(target.platform().as_str(), "macOS");
    /// assert_eq!(target.arch().as_str(), "arm64");
    /// ```
    #[must_use]
    pub fn new(os_name: &str, machine: &str) -> Self {
        Self {
            platform: Platform::from_os_name(os_name),
            arch: Architecture::new(machine),
        }
    }

    /// Detect the platform and architecture of the running host.
    #[must_use]
    pub fn detect() -> Self {
        let (os_name, machine) = detect::os_and_machine();
        log::debug!("detected host os={os_name} machine={machine}");
        Self::new(&os_name, &machine)
    }

    /// Return the normalized platform.
    #[must_use]
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Return the architecture.
    #[must_use]
    pub fn arch(&self) -> &Architecture {
        &self.arch
    }
}

/// Kernel-style name for a compile-time `target_os` value.
fn kernel_name(target_os: &str) -> String {
    match target_os {
        "linux" | "android" => "Linux".to_owned(),
        "macos" | "ios" => DARWIN.to_owned(),
        "windows" => WINDOWS.to_owned(),
        "freebsd" => "FreeBSD".to_owned(),
        "netbsd" => "NetBSD".to_owned(),
        "openbsd" => "OpenBSD".to_owned(),
        "dragonfly" => "DragonFly".to_owned(),
        "solaris" | "illumos" => "SunOS".to_owned(),
        other => other.to_owned(),
    }
}

#[cfg(unix)]
mod detect {
    use nix::sys::utsname::{UtsName, uname};

    /// Query `uname(2)`, falling back to compile-time values on failure.
    pub(super) fn os_and_machine() -> (String, String) {
        match uname() {
            Ok(info) => names(&info),
            Err(err) => fallback(err),
        }
    }

    fn names(info: &UtsName) -> (String, String) {
        (
            info.sysname().to_string_lossy().into_owned(),
            info.machine().to_string_lossy().into_owned(),
        )
    }

    fn fallback(err: nix::Error) -> (String, String) {
        log::warn!("uname failed ({err}); falling back to compile-time host identifiers");
        (
            super::kernel_name(std::env::consts::OS),
            std::env::consts::ARCH.to_owned(),
        )
    }
}

#[cfg(not(unix))]
mod detect {
    /// Windows reports the architecture through `PROCESSOR_ARCHITECTURE`.
    pub(super) fn os_and_machine() -> (String, String) {
        let machine = std::env::var("PROCESSOR_ARCHITECTURE")
            .unwrap_or_else(|_| windows_machine(std::env::consts::ARCH).to_owned());
        (super::kernel_name(std::env::consts::OS), machine)
    }

    fn windows_machine(arch: &str) -> &str {
        match arch {
            "x86_64" => "AMD64",
            "aarch64" => "ARM64",
            "x86" => "x86",
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::darwin("Darwin", "macOS")]
    #[case::linux("Linux", "Linux")]
    #[case::windows("Windows", "Windows")]
    #[case::lowercase_darwin_untouched("darwin", "darwin")]
    fn platform_normalizes_only_darwin(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(Platform::from_os_name(raw).as_str(), expected);
    }

    #[rstest]
    #[case::windows("Windows", ".exe")]
    #[case::linux("Linux", "")]
    #[case::macos("Darwin", "")]
    fn executable_suffix_follows_platform(#[case] raw: &str, #[case] suffix: &str) {
        assert_eq!(Platform::from_os_name(raw).executable_suffix(), suffix);
    }

    #[test]
    fn architecture_is_verbatim() {
        let target = HostTarget::new("Linux", "AMD64");
        assert_eq!(target.arch().as_str(), "AMD64");
        assert_eq!(target.arch().to_string(), "AMD64");
    }

    #[rstest]
    #[case::linux("linux", "Linux")]
    #[case::macos("macos", "Darwin")]
    #[case::windows("windows", "Windows")]
    #[case::unknown("haiku", "haiku")]
    fn kernel_name_maps_target_os(#[case] target_os: &str, #[case] expected: &str) {
        assert_eq!(kernel_name(target_os), expected);
    }

    #[test]
    fn detect_reports_non_empty_values() {
        let target = HostTarget::detect();
        assert!(!target.platform().as_str().is_empty());
        assert!(!target.arch().as_str().is_empty());
        assert_ne!(target.platform().as_str(), "Darwin");
    }

    #[cfg(unix)]
    #[test]
    fn detect_uses_uname_values() {
        let info = nix::sys::utsname::uname().expect("uname succeeds");
        let target = HostTarget::detect();
        let sysname = info.sysname().to_string_lossy();
        assert_eq!(target.platform(), &Platform::from_os_name(&sysname));
        assert_eq!(target.arch().as_str(), info.machine().to_string_lossy());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn detect_reports_linux_kernel() {
        assert_eq!(HostTarget::detect().platform().as_str(), "Linux");
    }
}
