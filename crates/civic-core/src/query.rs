//! Query, filter and patch types for issue operations.

use std::fmt;
use std::str::FromStr;

use crate::error::{CivicError, Result};
use crate::model::{Assignee, Category, Issue, Location, Priority, Status};

/// Fields to merge into an issue. `None` leaves the field alone; for
/// optional fields `Some(None)` clears it.
///
/// Status, `resolved_at` and the verification record are not editable
/// here; they change only through the status machine.
#[derive(Debug, Clone, Default)]
pub struct IssueUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub location: Option<Location>,
    pub assigned_to: Option<Option<Assignee>>,
    pub images: Option<Vec<String>>,
}

impl IssueUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.location.is_none()
            && self.assigned_to.is_none()
            && self.images.is_none()
    }

    /// Merge the set fields into `issue`. Timestamps are the caller's job.
    pub fn apply_to(&self, issue: &mut Issue) {
        if let Some(ref title) = self.title {
            issue.title.clone_from(title);
        }
        if let Some(ref description) = self.description {
            issue.description.clone_from(description);
        }
        if let Some(category) = self.category {
            issue.category = category;
        }
        if let Some(priority) = self.priority {
            issue.priority = priority;
        }
        if let Some(ref location) = self.location {
            issue.location.clone_from(location);
        }
        if let Some(ref assigned_to) = self.assigned_to {
            issue.assigned_to.clone_from(assigned_to);
        }
        if let Some(ref images) = self.images {
            issue.images.clone_from(images);
        }
    }
}

/// Assignee dimension of a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssigneeFilter {
    /// Issues nobody has picked up.
    Unassigned,
    /// Case-insensitive substring of the assignee's name.
    Name(String),
}

impl AssigneeFilter {
    /// Parse a filter parameter; `"all"` or blank means no constraint.
    #[must_use]
    pub fn from_param(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            None
        } else if trimmed.eq_ignore_ascii_case("unassigned") {
            Some(Self::Unassigned)
        } else {
            Some(Self::Name(trimmed.to_string()))
        }
    }
}

/// Filter options for listing issues. Every field is optional and an
/// unset field places no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub status: Option<Status>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub assignee: Option<AssigneeFilter>,
    /// Matched against title, description and address.
    pub search: Option<String>,
}

impl IssueFilter {
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.status.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.search.as_deref().is_none_or(str::is_empty)
    }

    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, assignee: AssigneeFilter) -> Self {
        self.assignee = Some(assignee);
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Parse one filter dimension from a UI/CLI parameter.
///
/// `"all"` and blank map to `None`.
///
/// # Errors
///
/// Returns the parse error of `T` for anything else it rejects.
pub fn parse_dimension<T>(value: &str) -> Result<Option<T>>
where
    T: FromStr<Err = CivicError>,
{
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

/// Ordering for issue lists.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum SortOrder {
    /// created_at DESC
    #[default]
    Newest,
    /// updated_at DESC
    Updated,
    /// priority DESC, then created_at DESC
    Priority,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Updated => "updated",
            Self::Priority => "priority",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CivicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "newest" | "created" | "created_at" => Ok(Self::Newest),
            "updated" | "updated_at" | "recent" => Ok(Self::Updated),
            "priority" => Ok(Self::Priority),
            other => Err(CivicError::validation(
                "sort",
                format!("unknown sort order '{other}' (expected newest, updated or priority)"),
            )),
        }
    }
}
