//! Build-and-package pipeline.
//!
//! [`publish`] runs the whole release sequence: reset `publish/`, build,
//! stage into `tmp/`, zip, and remove `tmp/`. The first failure aborts the
//! run. A failed build leaves the freshly emptied `publish/` in place, and a
//! failure after staging started leaves `tmp/` behind for inspection.

use crate::archive::{ArchiveSummary, create_archive};
use crate::builder::{BuildOutcome, Builder};
use crate::error::{PackagerError, Result};
use crate::host::HostTarget;
use crate::layout::PublishLayout;
use crate::output::write_stderr_line;
use crate::stager::{Stager, reset_output_dir};
use std::io::Write;

/// Immutable inputs for a packaging run.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Working-directory layout.
    pub layout: PublishLayout,
    /// Platform and architecture the archive is named after.
    pub target: HostTarget,
    /// Suppress progress output.
    pub quiet: bool,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct PublishReport {
    /// The archive that was written.
    pub archive: ArchiveSummary,
}

/// Build the release and package it into `publish/Skye-<arch>-<platform>.zip`.
///
/// # Errors
///
/// Returns [`PackagerError::BuildFailed`] when the build reports failure;
/// no staging directory or archive is created in that case. Any other
/// error names the step or precondition that failed.
pub fn publish(
    config: &PublishConfig,
    builder: &dyn Builder,
    stderr: &mut dyn Write,
) -> Result<PublishReport> {
    let layout = &config.layout;
    let target = &config.target;

    let output_dir = reset_output_dir(layout)?;
    log::info!("reset output directory {output_dir}");

    if !config.quiet {
        write_stderr_line(stderr, format!("Running {}...", builder.describe()));
    }
    match builder.run()? {
        BuildOutcome::Success => log::info!("build succeeded"),
        BuildOutcome::Failure { code } => {
            let err = PackagerError::BuildFailed { code };
            log::debug!("{err}; skipping staging");
            return Err(err);
        }
    }

    let stager = Stager::new(layout.clone());
    let staging_dir = stager.prepare()?;
    if !config.quiet {
        write_stderr_line(stderr, format!("Staging release in {staging_dir}..."));
    }
    stager.stage_all(target.platform())?;
    log::info!("staged release contents in {staging_dir}");

    let archive_path = layout.archive_path(target);
    let archive = create_archive(&staging_dir, &archive_path)?;
    log::info!(
        "wrote {} ({} entries)",
        archive.path,
        archive.entries.len()
    );

    stager.cleanup()?;
    log::debug!("removed staging directory {staging_dir}");

    Ok(PublishReport { archive })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FixedBuilder, fixture_workspace};
    use camino::Utf8PathBuf;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use rstest::{fixture, rstest};
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        config: PublishConfig,
    }

    #[fixture]
    fn linux_workspace() -> Fixture {
        let temp_dir = TempDir::new().expect("temp dir creation succeeds");
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).expect("utf-8 temp dir");
        let target = HostTarget::new("Linux", "x86_64");
        fixture_workspace(&root, target.platform()).expect("fixture workspace");
        Fixture {
            _temp_dir: temp_dir,
            config: PublishConfig {
                layout: PublishLayout::new(root),
                target,
                quiet: false,
            },
        }
    }

    #[rstest]
    fn publish_writes_named_archive_and_cleans_up(linux_workspace: Fixture) {
        let builder = FixedBuilder::succeeding();
        let mut stderr = Vec::new();

        let report = publish(&linux_workspace.config, &builder, &mut stderr).expect("publish");

        let layout = &linux_workspace.config.layout;
        assert_eq!(report.archive.path, layout.output_dir().join("Skye-x86_64-Linux.zip"));
        assert!(report.archive.path.is_file());
        assert!(!layout.staging_dir().exists());
        assert_eq!(builder.calls(), 1);
    }

    #[rstest]
    fn failed_build_leaves_empty_output_dir(linux_workspace: Fixture) {
        let builder = FixedBuilder::failing(2);
        let mut stderr = Vec::new();

        let err = publish(&linux_workspace.config, &builder, &mut stderr)
            .expect_err("build failure must abort");

        assert!(matches!(err, PackagerError::BuildFailed { code: Some(2) }));
        let layout = &linux_workspace.config.layout;
        assert!(layout.output_dir().is_dir());
        assert_eq!(fs::read_dir(layout.output_dir()).expect("read").count(), 0);
        assert!(!layout.staging_dir().exists());
    }

    struct RecordingLogger {
        records: Mutex<Vec<(Level, String)>>,
    }

    impl Log for RecordingLogger {
        fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &Record<'_>) {
            if let Ok(mut records) = self.records.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: RecordingLogger = RecordingLogger {
        records: Mutex::new(Vec::new()),
    };

    fn recording_logger() -> &'static RecordingLogger {
        // Another test may already have installed it.
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
        &LOGGER
    }

    #[rstest]
    fn failed_build_is_not_logged_as_an_error(linux_workspace: Fixture) {
        let logger = recording_logger();
        let mut stderr = Vec::new();

        publish(&linux_workspace.config, &FixedBuilder::failing(2), &mut stderr)
            .expect_err("build failure must abort");

        let records = logger.records.lock().expect("logger lock");
        assert!(
            !records
                .iter()
                .any(|(level, text)| *level <= Level::Warn && text.contains("build failed")),
            "build failure reported at warn/error level: {records:?}"
        );
    }

    #[rstest]
    fn stale_staging_dir_aborts_after_build(linux_workspace: Fixture) {
        let layout = &linux_workspace.config.layout;
        fs::create_dir(layout.staging_dir()).expect("mkdir");
        fs::write(layout.staging_dir().join("stale.txt"), b"old").expect("write");
        let builder = FixedBuilder::succeeding();
        let mut stderr = Vec::new();

        let err = publish(&linux_workspace.config, &builder, &mut stderr)
            .expect_err("stale staging dir must abort");

        assert!(matches!(err, PackagerError::StagingDirExists { .. }));
        assert_eq!(builder.calls(), 1);
        assert!(layout.staging_dir().join("stale.txt").is_file());
    }

    #[rstest]
    #[case::quiet(true)]
    #[case::chatty(false)]
    fn publish_respects_quiet_flag(mut linux_workspace: Fixture, #[case] quiet: bool) {
        linux_workspace.config.quiet = quiet;
        let mut stderr = Vec::new();

        publish(&linux_workspace.config, &FixedBuilder::succeeding(), &mut stderr)
            .expect("publish");

        let output = String::from_utf8_lossy(&stderr);
        if quiet {
            assert!(output.is_empty(), "expected no output in quiet mode");
        } else {
            assert!(output.contains("Running fixed build"));
            assert!(output.contains("Staging release"));
        }
    }

    #[rstest]
    fn missing_license_leaves_staging_dir(linux_workspace: Fixture) {
        let layout = &linux_workspace.config.layout;
        fs::remove_file(layout.license_file()).expect("remove license");
        let mut stderr = Vec::new();

        let err = publish(&linux_workspace.config, &FixedBuilder::succeeding(), &mut stderr)
            .expect_err("missing license must abort");

        assert!(matches!(err, PackagerError::MissingLicense { .. }));
        assert!(layout.staging_dir().is_dir());
    }
}
