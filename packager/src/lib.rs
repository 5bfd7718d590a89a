//! Skye release packager library.
//!
//! Builds the Skye compiler with cargo and packages the release binary, its
//! `LICENSE` and the `lib/` standard library tree into a single
//! platform-named zip under `publish/`. The `skye-publish` binary is a thin
//! wrapper around [`pipeline::publish`].
//!
//! # Modules
//!
//! - [`archive`] - Zip creation from the staging directory
//! - [`builder`] - Release build orchestration behind the [`builder::Builder`] trait
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Semantic error types
//! - [`host`] - Host platform and architecture detection
//! - [`layout`] - Working-directory relative paths
//! - [`naming`] - Archive and binary file names
//! - [`output`] - Progress and result messages
//! - [`pipeline`] - The end-to-end publish sequence
//! - [`stager`] - Output directory reset and release staging

pub mod archive;
pub mod builder;
pub mod cli;
pub mod error;
pub mod host;
pub mod layout;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod stager;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
