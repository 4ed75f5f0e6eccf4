//! JSONL dataset loading.
//!
//! Each non-blank line is one complete `Issue` in its camelCase wire
//! shape. Loading is read-only: nothing in this crate writes datasets.

use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{CivicError, Result};
use crate::model::Issue;

/// Load issues from a JSONL file, in file order.
///
/// # Errors
///
/// Returns `FileNotFound` if the file is missing, `Io` if it cannot be
/// read, or `JsonlParse` naming the first invalid line.
pub fn load(path: &Path) -> Result<Vec<Issue>> {
    let file = fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CivicError::FileNotFound(path.to_path_buf())
        } else {
            CivicError::Io(e)
        }
    })?;
    let issues = parse(file)?;
    tracing::debug!(path = %path.display(), count = issues.len(), "loaded dataset");
    Ok(issues)
}

/// Parse JSONL issues from any reader.
///
/// # Errors
///
/// Returns `Io` on read failure, or `JsonlParse` on an invalid line or
/// an id already used by an earlier line.
pub fn parse(reader: impl Read) -> Result<Vec<Issue>> {
    let reader = BufReader::new(reader);
    let mut issues = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let issue: Issue = serde_json::from_str(trimmed).map_err(|e| CivicError::JsonlParse {
            line: line_num + 1,
            reason: e.to_string(),
        })?;
        if let Some(first) = seen.insert(issue.id.clone(), line_num + 1) {
            return Err(CivicError::JsonlParse {
                line: line_num + 1,
                reason: format!("duplicate issue id '{}' (first on line {first})", issue.id),
            });
        }
        issues.push(issue);
    }

    Ok(issues)
}
