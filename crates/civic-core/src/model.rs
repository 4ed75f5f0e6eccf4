//! Core data types for civic-core.
//!
//! The serde shape matches the camelCase records of the reporting app
//! (`reportedBy`, `citizenVerification`, `in-progress`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CivicError;

/// Issue lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Resolved, Self::Closed];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }

    /// Resolved or closed: the work is done from the authority's side.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = CivicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in-progress" | "in_progress" | "inprogress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            other => Err(CivicError::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// Issue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Infrastructure,
    Sanitation,
    Safety,
    Environment,
    Transportation,
}

impl Category {
    pub const ALL: [Self; 5] = [
        Self::Infrastructure,
        Self::Sanitation,
        Self::Safety,
        Self::Environment,
        Self::Transportation,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Infrastructure => "infrastructure",
            Self::Sanitation => "sanitation",
            Self::Safety => "safety",
            Self::Environment => "environment",
            Self::Transportation => "transportation",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Infrastructure => "Infrastructure",
            Self::Sanitation => "Sanitation",
            Self::Safety => "Safety",
            Self::Environment => "Environment",
            Self::Transportation => "Transportation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = CivicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "infrastructure" => Ok(Self::Infrastructure),
            "sanitation" => Ok(Self::Sanitation),
            "safety" => Ok(Self::Safety),
            "environment" => Ok(Self::Environment),
            "transportation" => Ok(Self::Transportation),
            other => Err(CivicError::InvalidCategory {
                category: other.to_string(),
            }),
        }
    }
}

/// Issue priority, ordered `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// High and critical issues show up on the authority's urgent list.
    #[must_use]
    pub const fn is_urgent(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CivicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(CivicError::InvalidPriority {
                priority: other.to_string(),
            }),
        }
    }
}

/// State of the citizen's confirmation that a fix happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Disputed,
}

impl VerificationStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Disputed => "disputed",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending Verification",
            Self::Verified => "Verified",
            Self::Disputed => "Disputed",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = CivicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "disputed" => Ok(Self::Disputed),
            other => Err(CivicError::InvalidVerificationStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// Where the problem is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

impl Location {
    /// Location picked on the map. Until reverse geocoding exists the
    /// address is the formatted coordinate pair.
    #[must_use]
    pub fn from_coordinates(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            address: format!("Location: {lat:.4}, {lng:.4}"),
        }
    }
}

/// The citizen who filed the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reporter {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Municipal staff member working the issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub id: String,
    pub name: String,
    pub department: String,
}

/// Citizen confirmation (or dispute) of a fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CitizenVerification {
    pub status: VerificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "comments", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl CitizenVerification {
    #[must_use]
    pub fn pending() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == VerificationStatus::Pending
    }
}

/// A reported civic problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Unique ID (e.g., "civ-3kd").
    pub id: String,

    pub title: String,

    pub description: String,

    pub category: Category,

    #[serde(default)]
    pub status: Status,

    #[serde(default)]
    pub priority: Priority,

    pub location: Location,

    pub reported_by: Reporter,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Assignee>,

    /// Photo URLs, in upload order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Set when the issue enters `resolved`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citizen_verification: Option<CitizenVerification>,
}

impl Issue {
    /// Build a stored issue from a draft.
    #[must_use]
    pub fn from_draft(id: String, draft: IssueDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            status: Status::Open,
            priority: draft.priority,
            location: draft.location,
            reported_by: draft.reported_by,
            assigned_to: draft.assigned_to,
            images: draft.images,
            created_at: now,
            updated_at: now,
            resolved_at: None,
            citizen_verification: None,
        }
    }

    #[must_use]
    pub fn assignee_name(&self) -> Option<&str> {
        self.assigned_to.as_ref().map(|a| a.name.as_str())
    }

    /// Time from report to resolution, if resolved.
    #[must_use]
    pub fn resolution_time(&self) -> Option<chrono::Duration> {
        self.resolved_at.map(|resolved| resolved - self.created_at)
    }

    #[must_use]
    pub fn verification_status(&self) -> Option<VerificationStatus> {
        self.citizen_verification.as_ref().map(|v| v.status)
    }
}

/// An issue that has not been stored yet: no id, no timestamps, no
/// lifecycle state. Stored drafts always start `open`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    pub location: Location,
    pub reported_by: Reporter,
    #[serde(default)]
    pub assigned_to: Option<Assignee>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl IssueDraft {
    /// A fresh open report with medium priority.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        location: Location,
        reported_by: Reporter,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category,
            priority: Priority::Medium,
            location,
            reported_by,
            assigned_to: None,
            images: Vec::new(),
        }
    }
}
