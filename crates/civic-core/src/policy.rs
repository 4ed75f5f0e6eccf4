//! Role permissions for status changes.
//!
//! One table maps each role to the edges it may take. It is consulted
//! once, at the action boundary ([`crate::store::IssueStore::transition`]),
//! never by the transition rules themselves.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::error::{CivicError, Result};
use crate::model::{Issue, Status, VerificationStatus};
use crate::transition::Transition;

/// Who is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Citizen,
    Authority,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Authority => "authority",
            Self::Admin => "admin",
        }
    }

    /// Edges this role may take.
    #[must_use]
    pub fn allowed_transitions(&self) -> &'static HashSet<Transition> {
        &PERMISSIONS[self]
    }

    #[must_use]
    pub fn permits(&self, transition: Transition) -> bool {
        self.allowed_transitions().contains(&transition)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = CivicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "citizen" => Ok(Self::Citizen),
            "authority" => Ok(Self::Authority),
            "admin" => Ok(Self::Admin),
            other => Err(CivicError::InvalidRole {
                role: other.to_string(),
            }),
        }
    }
}

static PERMISSIONS: Lazy<HashMap<Role, HashSet<Transition>>> = Lazy::new(|| {
    let staff: HashSet<Transition> = [
        Transition::new(Status::Open, Status::InProgress),
        Transition::new(Status::Open, Status::Resolved),
        Transition::new(Status::InProgress, Status::Resolved),
    ]
    .into_iter()
    .collect();
    let citizen: HashSet<Transition> = [
        Transition::new(Status::Resolved, Status::Closed),
        Transition::new(Status::Resolved, Status::Open),
    ]
    .into_iter()
    .collect();

    HashMap::from([
        (Role::Citizen, citizen),
        (Role::Authority, staff.clone()),
        (Role::Admin, staff),
    ])
});

/// Check that `role` may move `issue` to `to`.
///
/// # Errors
///
/// - `InvalidTransition` if no role may take the edge
/// - `PermissionDenied` if the edge exists but not for this role
/// - `VerificationNotPending` for citizen actions on an issue whose
///   verification is not pending (or, for a reopen, disputed)
pub fn authorize(role: Role, issue: &Issue, to: Status) -> Result<()> {
    let edge = Transition::new(issue.status, to);
    if !edge.is_allowed() {
        return Err(CivicError::InvalidTransition {
            from: issue.status,
            to,
        });
    }
    if !role.permits(edge) {
        return Err(CivicError::PermissionDenied {
            role,
            from: issue.status,
            to,
        });
    }
    if role == Role::Citizen && !citizen_may_act(issue, to) {
        return Err(CivicError::VerificationNotPending {
            id: issue.id.clone(),
        });
    }
    Ok(())
}

/// Verifying needs a pending record. Reopening also accepts a disputed one.
fn citizen_may_act(issue: &Issue, to: Status) -> bool {
    match issue.verification_status() {
        Some(VerificationStatus::Pending) => true,
        Some(VerificationStatus::Disputed) => to == Status::Open,
        Some(VerificationStatus::Verified) | None => false,
    }
}

/// A button on an issue card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    StartWork,
    MarkResolved,
    VerifyFixed,
    Reopen,
}

impl Action {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::StartWork => "Start Work",
            Self::MarkResolved => "Mark Resolved",
            Self::VerifyFixed => "Verify Fixed",
            Self::Reopen => "Reopen",
        }
    }

    /// Status the action moves the issue to.
    #[must_use]
    pub const fn target(&self) -> Status {
        match self {
            Self::StartWork => Status::InProgress,
            Self::MarkResolved => Status::Resolved,
            Self::VerifyFixed => Status::Closed,
            Self::Reopen => Status::Open,
        }
    }
}

/// Actions `role` can take on `issue` right now.
#[must_use]
pub fn available_actions(issue: &Issue, role: Role) -> Vec<Action> {
    let candidates: &[Action] = match (role, issue.status) {
        (Role::Authority | Role::Admin, Status::Open) => &[Action::StartWork],
        (Role::Authority | Role::Admin, Status::InProgress) => &[Action::MarkResolved],
        (Role::Citizen, Status::Resolved) => &[Action::VerifyFixed, Action::Reopen],
        _ => &[],
    };
    candidates
        .iter()
        .copied()
        .filter(|action| authorize(role, issue, action.target()).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_issues;

    #[test]
    fn test_role_parse() {
        assert_eq!("Authority".parse::<Role>().unwrap(), Role::Authority);
        assert!(matches!(
            "mayor".parse::<Role>(),
            Err(CivicError::InvalidRole { .. })
        ));
    }

    #[test]
    fn test_table_citizen_and_staff_are_disjoint() {
        let citizen = Role::Citizen.allowed_transitions();
        let authority = Role::Authority.allowed_transitions();
        assert!(citizen.is_disjoint(authority));
        assert_eq!(authority, Role::Admin.allowed_transitions());
        let union: HashSet<_> = citizen.union(authority).copied().collect();
        let all: HashSet<_> = Transition::ALLOWED.into_iter().collect();
        assert_eq!(union, all);
    }

    #[test]
    fn test_authorize_citizen_cannot_start_work() {
        let issues = sample_issues();
        let err = authorize(Role::Citizen, &issues[0], Status::InProgress).unwrap_err();
        assert!(matches!(err, CivicError::PermissionDenied { .. }));
        assert!(authorize(Role::Authority, &issues[0], Status::InProgress).is_ok());
    }

    #[test]
    fn test_authorize_authority_cannot_close() {
        let issues = sample_issues();
        let err = authorize(Role::Authority, &issues[2], Status::Closed).unwrap_err();
        assert!(matches!(err, CivicError::PermissionDenied { .. }));
    }

    #[test]
    fn test_authorize_invalid_edge_wins() {
        let issues = sample_issues();
        let err = authorize(Role::Admin, &issues[3], Status::Open).unwrap_err();
        assert!(matches!(err, CivicError::InvalidTransition { .. }));
    }

    #[test]
    fn test_citizen_needs_pending_verification() {
        let mut resolved = sample_issues().swap_remove(2);
        assert!(authorize(Role::Citizen, &resolved, Status::Closed).is_ok());
        resolved.citizen_verification = None;
        assert!(matches!(
            authorize(Role::Citizen, &resolved, Status::Closed),
            Err(CivicError::VerificationNotPending { .. })
        ));
    }

    #[test]
    fn test_citizen_may_reopen_disputed() {
        let mut resolved = sample_issues().swap_remove(2);
        if let Some(verification) = resolved.citizen_verification.as_mut() {
            verification.status = VerificationStatus::Disputed;
        }
        assert!(authorize(Role::Citizen, &resolved, Status::Open).is_ok());
        assert!(matches!(
            authorize(Role::Citizen, &resolved, Status::Closed),
            Err(CivicError::VerificationNotPending { .. })
        ));
        assert_eq!(
            available_actions(&resolved, Role::Citizen),
            vec![Action::Reopen]
        );
    }

    #[test]
    fn test_available_actions() {
        let issues = sample_issues();
        assert_eq!(
            available_actions(&issues[0], Role::Authority),
            vec![Action::StartWork]
        );
        assert_eq!(
            available_actions(&issues[1], Role::Admin),
            vec![Action::MarkResolved]
        );
        assert_eq!(
            available_actions(&issues[2], Role::Citizen),
            vec![Action::VerifyFixed, Action::Reopen]
        );
        assert!(available_actions(&issues[2], Role::Authority).is_empty());
        assert!(available_actions(&issues[3], Role::Citizen).is_empty());
        assert!(available_actions(&issues[0], Role::Citizen).is_empty());
    }
}
