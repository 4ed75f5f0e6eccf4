//! Configuration management for `civic`.
//!
//! Configuration is resolved in layers, later layers winning:
//! - Built-in defaults
//! - Workspace config (`.civic/config.yaml`, or the `--config` file)
//! - Environment variable overrides (`CIVIC_*`)
//! - Command-line flags

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use civic_core::util::DEFAULT_PREFIX;
use civic_core::{CivicError, Result, SortOrder, SubmitPolicy};
use serde::Deserialize;

/// Workspace config location, relative to the working directory.
pub const WORKSPACE_CONFIG: &str = ".civic/config.yaml";

pub const ENV_DATA: &str = "CIVIC_DATA";
pub const ENV_ID_PREFIX: &str = "CIVIC_ID_PREFIX";
pub const ENV_DEFAULT_SORT: &str = "CIVIC_DEFAULT_SORT";
pub const ENV_SUBMIT_TIMEOUT_MS: &str = "CIVIC_SUBMIT_TIMEOUT_MS";
pub const ENV_SUBMIT_ATTEMPTS: &str = "CIVIC_SUBMIT_ATTEMPTS";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSONL dataset; `None` means the built-in sample issues.
    pub data: Option<PathBuf>,
    /// Prefix for generated issue ids.
    pub id_prefix: String,
    /// Sort order used by `list` when `--sort` is not given.
    pub default_sort: SortOrder,
    pub submit: SubmitConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: None,
            id_prefix: DEFAULT_PREFIX.to_string(),
            default_sort: SortOrder::default(),
            submit: SubmitConfig::default(),
        }
    }
}

/// Submission timing, in milliseconds as written in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitConfig {
    pub timeout_ms: u64,
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        let policy = SubmitPolicy::default();
        Self {
            timeout_ms: millis(policy.timeout),
            max_attempts: policy.max_attempts,
            backoff_ms: millis(policy.backoff),
        }
    }
}

impl SubmitConfig {
    #[must_use]
    pub const fn policy(&self) -> SubmitPolicy {
        SubmitPolicy {
            timeout: Duration::from_millis(self.timeout_ms),
            max_attempts: self.max_attempts,
            backoff: Duration::from_millis(self.backoff_ms),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub id_prefix: Option<String>,
}

/// On-disk shape of a config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data: Option<PathBuf>,
    id_prefix: Option<String>,
    default_sort: Option<String>,
    submit: Option<SubmitFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SubmitFile {
    timeout_ms: Option<u64>,
    max_attempts: Option<u32>,
    backoff_ms: Option<u64>,
}

impl Config {
    /// Load configuration from the working directory and process environment.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if an explicit `--config` file is missing, or
    /// `Config` if a file or variable holds an invalid value.
    pub fn load(overrides: &CliOverrides) -> Result<Self> {
        Self::load_from(Path::new("."), overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration rooted at `dir` with a custom environment lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_from<F>(dir: &Path, overrides: &CliOverrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match &overrides.config {
            Some(path) => {
                if !path.exists() {
                    return Err(CivicError::FileNotFound(path.clone()));
                }
                config.merge_file(path)?;
            }
            None => {
                let path = dir.join(WORKSPACE_CONFIG);
                if path.exists() {
                    config.merge_file(&path)?;
                }
            }
        }

        config.merge_env(env)?;
        config.merge_overrides(overrides);

        tracing::debug!(?config, "configuration resolved");
        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let contents = fs::read_to_string(path)?;
        let file: ConfigFile = if contents.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(&contents)
                .map_err(|e| CivicError::Config(format!("{}: {e}", path.display())))?
        };

        if let Some(data) = file.data {
            self.data = Some(data);
        }
        if let Some(prefix) = file.id_prefix {
            self.id_prefix = prefix;
        }
        if let Some(sort) = file.default_sort {
            self.default_sort = parse_sort(&sort)?;
        }
        if let Some(submit) = file.submit {
            if let Some(timeout_ms) = submit.timeout_ms {
                self.submit.timeout_ms = timeout_ms;
            }
            if let Some(max_attempts) = submit.max_attempts {
                self.submit.max_attempts = max_attempts;
            }
            if let Some(backoff_ms) = submit.backoff_ms {
                self.submit.backoff_ms = backoff_ms;
            }
        }
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(())
    }

    fn merge_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(data) = get(ENV_DATA) {
            self.data = Some(PathBuf::from(data));
        }
        if let Some(prefix) = get(ENV_ID_PREFIX) {
            self.id_prefix = prefix.trim().to_string();
        }
        if let Some(sort) = get(ENV_DEFAULT_SORT) {
            self.default_sort = parse_sort(&sort)?;
        }
        if let Some(timeout) = get(ENV_SUBMIT_TIMEOUT_MS) {
            self.submit.timeout_ms = parse_number(ENV_SUBMIT_TIMEOUT_MS, &timeout)?;
        }
        if let Some(attempts) = get(ENV_SUBMIT_ATTEMPTS) {
            self.submit.max_attempts = parse_number(ENV_SUBMIT_ATTEMPTS, &attempts)?;
        }
        Ok(())
    }

    fn merge_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(data) = &overrides.data {
            self.data = Some(data.clone());
        }
        if let Some(prefix) = &overrides.id_prefix {
            self.id_prefix.clone_from(prefix);
        }
    }
}

fn parse_sort(value: &str) -> Result<SortOrder> {
    value
        .parse()
        .map_err(|_| CivicError::Config(format!("unknown sort order '{value}'")))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CivicError::Config(format!("{key} must be a number, got '{value}'")))
}
