//! Report submission with an explicit request/response contract.
//!
//! A submission starts `Pending` and ends `Succeeded` or `Failed`.
//! Transient failures are retried under a [`SubmitPolicy`]; rejections
//! are final.

use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::model::{Issue, IssueDraft};
use crate::store::IssueStore;

/// Why one submission attempt failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The attempt ran past its deadline.
    #[error("submission timed out after {after:?}")]
    Timeout { after: Duration },

    /// The receiving side could not take the report right now.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The receiving side refused the report.
    #[error("submission rejected: {0}")]
    Rejected(String),
}

impl SubmitError {
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Unavailable(_))
    }
}

/// Timeout and retry settings for a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPolicy {
    /// Budget for a single attempt.
    pub timeout: Duration,
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Wait before retry `n` is `backoff * n`.
    pub backoff: Duration,
}

impl Default for SubmitPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_attempts: 3,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Something that accepts validated drafts.
pub trait Submitter {
    /// Submit one draft. Implementations should give up by `deadline`.
    ///
    /// # Errors
    ///
    /// Returns a `SubmitError` describing why the attempt failed.
    fn submit(&mut self, draft: &IssueDraft, deadline: Instant) -> Result<Issue, SubmitError>;
}

/// Submits straight into an in-memory store. Never fails.
pub struct LocalSubmitter<'a> {
    store: &'a mut IssueStore,
}

impl<'a> LocalSubmitter<'a> {
    pub fn new(store: &'a mut IssueStore) -> Self {
        Self { store }
    }
}

impl Submitter for LocalSubmitter<'_> {
    fn submit(&mut self, draft: &IssueDraft, _deadline: Instant) -> Result<Issue, SubmitError> {
        Ok(self.store.add(draft.clone()))
    }
}

/// Where a submission stands.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Pending,
    Succeeded(Issue),
    Failed(SubmitError),
}

/// A submission and the number of attempts it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub state: SubmissionState,
    pub attempts: u32,
}

impl Default for Submission {
    fn default() -> Self {
        Self {
            state: SubmissionState::Pending,
            attempts: 0,
        }
    }
}

impl Submission {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, SubmissionState::Pending)
    }

    /// The stored issue, or the last error.
    ///
    /// # Errors
    ///
    /// Returns the final `SubmitError` of a failed submission, or
    /// `Unavailable` if it never finished.
    pub fn into_result(self) -> Result<Issue, SubmitError> {
        match self.state {
            SubmissionState::Succeeded(issue) => Ok(issue),
            SubmissionState::Failed(err) => Err(err),
            SubmissionState::Pending => Err(SubmitError::Unavailable(
                "submission did not complete".to_string(),
            )),
        }
    }
}

/// Submit `draft`, retrying transient failures per `policy`.
pub fn submit_with_retry<S>(submitter: &mut S, draft: &IssueDraft, policy: &SubmitPolicy) -> Submission
where
    S: Submitter + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut submission = Submission::default();

    while submission.is_pending() {
        submission.attempts += 1;
        let started = Instant::now();
        let deadline = started + policy.timeout;

        let result = submitter.submit(draft, deadline).map_err(|err| {
            // Late failures count as timeouts whatever the submitter said.
            if Instant::now() > deadline && !matches!(err, SubmitError::Rejected(_)) {
                SubmitError::Timeout {
                    after: started.elapsed(),
                }
            } else {
                err
            }
        });

        match result {
            Ok(issue) => {
                tracing::debug!(id = %issue.id, attempts = submission.attempts, "report submitted");
                submission.state = SubmissionState::Succeeded(issue);
            }
            Err(err) if err.is_retryable() && submission.attempts < max_attempts => {
                tracing::warn!(attempt = submission.attempts, error = %err, "submission failed, retrying");
                thread::sleep(policy.backoff * submission.attempts);
            }
            Err(err) => {
                tracing::warn!(attempts = submission.attempts, error = %err, "submission failed");
                submission.state = SubmissionState::Failed(err);
            }
        }
    }

    submission
}
