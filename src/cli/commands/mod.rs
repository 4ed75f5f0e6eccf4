//! Command implementations.
//!
//! Each command exposes `execute`, reads from the shared [`Context`] and
//! prints either text or JSON.

pub mod assignees;
pub mod dispute;
pub mod list;
pub mod report;
pub mod show;
pub mod stats;
pub mod transition;
pub mod urgent;
pub mod version;

use civic_core::seed::sample_issues;
use civic_core::{IssueStore, Result, jsonl};
use serde::Serialize;

use crate::config::Config;

/// Everything a command needs: resolved config, the loaded store and
/// the output mode.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub store: IssueStore,
    pub json: bool,
}

impl Context {
    /// Load the configured dataset into a fresh store.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSONL dataset cannot be read or parsed.
    pub fn load(config: Config, json: bool) -> Result<Self> {
        let issues = match &config.data {
            Some(path) => jsonl::load(path)?,
            None => sample_issues(),
        };
        tracing::debug!(count = issues.len(), "dataset ready");

        let mut store = IssueStore::with_issues(issues);
        store.set_id_prefix(config.id_prefix.clone());
        Ok(Self {
            config,
            store,
            json,
        })
    }

    /// Print `value` as pretty JSON on stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let output = serde_json::to_string_pretty(value)?;
        println!("{output}");
        Ok(())
    }
}
