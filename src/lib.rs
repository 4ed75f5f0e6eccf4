//! `civic_issues` - Civic issue reporting from the terminal
//!
//! This crate provides the `civic` CLI on top of [`civic_core`]: citizens
//! report problems, authorities move them through their lifecycle, and
//! everyone reads the same dashboard numbers.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Layered configuration (defaults, YAML, env, flags)
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - `tracing` subscriber setup
//! - [`validation`] - Report form validation
//!
//! The data model, store, filters, transitions and statistics live in
//! `civic-core` and are re-exported where the CLI needs them.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;
pub mod validation;

pub use civic_core::{CivicError, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if argument handling or command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
