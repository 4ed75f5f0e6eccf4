//! Status lifecycle rules.
//!
//! ```text
//! open ──► in-progress ──► resolved ──► closed
//!   └───────────────────────►│
//!   ◄────────── reopen ──────┘
//! ```
//!
//! `apply` enforces the edges and their side effects but knows nothing
//! about roles; see [`crate::policy`] for who may take which edge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CivicError, Result};
use crate::model::{CitizenVerification, Issue, Status, VerificationStatus};

/// A directed edge of the status machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub from: Status,
    pub to: Status,
}

impl Transition {
    #[must_use]
    pub const fn new(from: Status, to: Status) -> Self {
        Self { from, to }
    }

    /// Every edge the machine allows.
    pub const ALLOWED: [Self; 5] = [
        Self::new(Status::Open, Status::InProgress),
        Self::new(Status::Open, Status::Resolved),
        Self::new(Status::InProgress, Status::Resolved),
        Self::new(Status::Resolved, Status::Closed),
        Self::new(Status::Resolved, Status::Open),
    ];

    #[must_use]
    pub fn is_allowed(&self) -> bool {
        Self::ALLOWED.contains(self)
    }

    #[must_use]
    pub const fn is_reopen(&self) -> bool {
        matches!(
            (self.from, self.to),
            (Status::Resolved, Status::Open)
        )
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Move `issue` to `to`, returning the updated copy.
///
/// `now` becomes `updated_at` and, where the edge calls for it,
/// `resolved_at` or the verification timestamp.
///
/// # Errors
///
/// Returns `InvalidTransition` if the edge is not part of the machine,
/// including same-state moves. The input is never modified.
pub fn apply(issue: &Issue, to: Status, now: DateTime<Utc>) -> Result<Issue> {
    let edge = Transition::new(issue.status, to);
    if !edge.is_allowed() {
        return Err(CivicError::InvalidTransition {
            from: issue.status,
            to,
        });
    }

    let mut next = issue.clone();
    next.status = to;
    next.updated_at = now;

    match to {
        Status::Resolved => {
            next.resolved_at = Some(now);
            // A new fix needs fresh verification; a dispute comment stays.
            let verification = next
                .citizen_verification
                .get_or_insert_with(CitizenVerification::pending);
            if verification.status == VerificationStatus::Disputed {
                verification.status = VerificationStatus::Pending;
            }
        }
        Status::Closed => {
            let verification = next.citizen_verification.get_or_insert_with(Default::default);
            verification.status = VerificationStatus::Verified;
            verification.verified_at = Some(now);
        }
        // Reopen leaves the verification record as it was.
        Status::Open | Status::InProgress => {}
    }

    tracing::debug!(id = %issue.id, %edge, "status transition");
    Ok(next)
}

/// Citizen "verify fixed": close a resolved issue, keeping an optional
/// comment on the verification record.
///
/// # Errors
///
/// Same as [`apply`] for `resolved -> closed`.
pub fn verify(issue: &Issue, comment: Option<&str>, now: DateTime<Utc>) -> Result<Issue> {
    let mut next = apply(issue, Status::Closed, now)?;
    if let (Some(comment), Some(verification)) = (comment, next.citizen_verification.as_mut()) {
        verification.comment = Some(comment.to_string());
    }
    Ok(next)
}

/// Citizen dispute: the issue stays `resolved` but the pending
/// verification becomes `disputed`.
///
/// # Errors
///
/// Returns `VerificationNotPending` unless the issue is resolved with a
/// pending verification.
pub fn dispute(issue: &Issue, comment: Option<&str>, now: DateTime<Utc>) -> Result<Issue> {
    let pending = issue.status == Status::Resolved
        && issue
            .citizen_verification
            .as_ref()
            .is_some_and(CitizenVerification::is_pending);
    if !pending {
        return Err(CivicError::VerificationNotPending {
            id: issue.id.clone(),
        });
    }

    let mut next = issue.clone();
    next.updated_at = now;
    if let Some(verification) = next.citizen_verification.as_mut() {
        verification.status = VerificationStatus::Disputed;
        verification.comment = comment.map(str::to_string);
    }
    Ok(next)
}
