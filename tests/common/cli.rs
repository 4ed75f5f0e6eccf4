//! Helpers for running the `civic` binary against a scratch directory.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_cmd::Command;
use civic_core::Issue;
use tempfile::TempDir;

/// Environment variables that would leak host settings into a run.
const SCRUBBED_ENV: [&str; 7] = [
    "RUST_LOG",
    "CIVIC_DATA",
    "CIVIC_ID_PREFIX",
    "CIVIC_DEFAULT_SORT",
    "CIVIC_SUBMIT_TIMEOUT_MS",
    "CIVIC_SUBMIT_ATTEMPTS",
    "CIVIC_LOG_FORMAT",
];

/// A scratch working directory; removed on drop.
pub struct CivicWorkspace {
    _temp_dir: TempDir,
    pub root: PathBuf,
}

impl CivicWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Write `issues` as a JSONL dataset and return its path.
    pub fn write_dataset(&self, name: &str, issues: &[Issue]) -> PathBuf {
        let body: Vec<String> = issues
            .iter()
            .map(|issue| serde_json::to_string(issue).expect("serialize issue"))
            .collect();
        let path = self.root.join(name);
        fs::write(&path, body.join("\n") + "\n").expect("write dataset");
        path
    }

    /// Write `.civic/config.yaml`.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.root.join(".civic");
        fs::create_dir_all(&dir).expect("create .civic");
        let path = dir.join("config.yaml");
        fs::write(&path, contents).expect("write config");
        path
    }

    pub fn path(&self) -> &Path {
        &self.root
    }
}

/// Captured result of one run.
pub struct CmdOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CmdOutput {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

pub fn civic_cmd(workspace: &CivicWorkspace) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("civic"));
    cmd.current_dir(workspace.path());
    for key in SCRUBBED_ENV {
        cmd.env_remove(key);
    }
    cmd
}

/// Run `civic` with `args`; `label` names the run in failure messages.
pub fn run_civic<I, S>(workspace: &CivicWorkspace, args: I, label: &str) -> CmdOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = civic_cmd(workspace)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("{label}: failed to run civic: {e}"));
    CmdOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
