//! `skye-publish` entrypoint.
//!
//! Builds the Skye compiler in release mode and packages it into
//! `publish/Skye-<ARCH>-<PLATFORM>.zip`.

use clap::Parser;
use env_logger::Env;
use skye_packager::builder::CargoBuilder;
use skye_packager::cli::Cli;
use skye_packager::error::{PackagerError, Result};
use skye_packager::host::HostTarget;
use skye_packager::layout::PublishLayout;
use skye_packager::output::{success_message, write_stderr_line};
use skye_packager::pipeline::{PublishConfig, PublishReport, publish};
use std::error::Error;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// `RUST_LOG` takes precedence over the level chosen by `-v`/`-q`.
fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level_filter())
        .parse_env(Env::default())
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<PublishReport> {
    let layout = match &cli.directory {
        Some(dir) => PublishLayout::new(dir.clone()),
        None => PublishLayout::from_current_dir()?,
    };
    let target = HostTarget::detect();
    log::info!(
        "packaging {} for {}/{}",
        layout.root(),
        target.platform(),
        target.arch()
    );

    let builder = CargoBuilder::new(layout.root());
    let config = PublishConfig {
        layout,
        target,
        quiet: cli.quiet,
    };
    let report = publish(&config, &builder, stderr)?;

    if !cli.quiet {
        write_stderr_line(
            stderr,
            success_message(report.archive.entries.len(), &report.archive.path),
        );
    }
    Ok(report)
}

fn exit_code_for_run_result(result: Result<PublishReport>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {}", error_chain(&err)));
            err.exit_code()
        }
    }
}

/// Render `err` and its sources on one line, separated by `: `.
fn error_chain(err: &PackagerError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
