//! CLI argument definitions for `skye-publish`.

use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;

/// Build the Skye compiler and package it for release.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "skye-publish")]
#[command(version, about)]
#[command(long_about = concat!(
    "Build the Skye compiler and package it for release.\n\n",
    "Runs `cargo build --release`, then collects the compiled binary, LICENSE ",
    "and the lib/ directory into publish/Skye-<ARCH>-<PLATFORM>.zip. The ",
    "publish/ directory is recreated on every run.",
))]
pub struct Cli {
    /// Run as if started in DIR instead of the current directory.
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<Utf8PathBuf>,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Log level implied by `-v`/`-q` when `RUST_LOG` is unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use log::LevelFilter;
    /// use skye_packager::cli::Cli;
    ///
    /// let cli = Cli { verbosity: 2, ..Cli::default() };
    /// assert_eq!(cli.log_level_filter(), LevelFilter::Debug);
    /// ```
    #[must_use]
    pub fn log_level_filter(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_runs_in_current_directory() {
        let cli = Cli::try_parse_from(["skye-publish"]).expect("parse");
        assert!(cli.directory.is_none());
        assert!(!cli.quiet);
        assert_eq!(cli.verbosity, 0);
    }

    #[test]
    fn directory_flag_sets_root() {
        let cli = Cli::try_parse_from(["skye-publish", "-C", "/src/skye"]).expect("parse");
        assert_eq!(cli.directory, Some(Utf8PathBuf::from("/src/skye")));
    }

    #[rstest]
    #[case::default(&["skye-publish"], LevelFilter::Warn)]
    #[case::info(&["skye-publish", "-v"], LevelFilter::Info)]
    #[case::debug(&["skye-publish", "-vv"], LevelFilter::Debug)]
    #[case::trace(&["skye-publish", "-vvvv"], LevelFilter::Trace)]
    #[case::quiet(&["skye-publish", "--quiet"], LevelFilter::Error)]
    fn verbosity_maps_to_log_level(#[case] args: &[&str], #[case] expected: LevelFilter) {
        let cli = Cli::try_parse_from(args.iter().copied()).expect("parse");
        assert_eq!(cli.log_level_filter(), expected);
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["skye-publish", "-v", "-q"]).is_err());
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["skye-publish", "extra"]).is_err());
    }
}
