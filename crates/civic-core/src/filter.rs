//! Pure filtering and ordering over issue collections.
//!
//! Nothing here touches the store: callers pass in whatever snapshot
//! they hold and get borrowed views back, in input order unless they
//! sort explicitly.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::model::{Issue, Status};
use crate::query::{AssigneeFilter, IssueFilter, SortOrder};

/// Issues matching every active dimension of `filter`, in input order.
pub fn filter_issues<'a, I>(issues: I, filter: &IssueFilter) -> Vec<&'a Issue>
where
    I: IntoIterator<Item = &'a Issue>,
{
    // Lowercase the needle once, not per issue.
    let needle = search_needle(filter);
    issues
        .into_iter()
        .filter(|issue| matches_filter(issue, filter, needle.as_deref()))
        .collect()
}

/// True if `issue` satisfies every active dimension of `filter`.
#[must_use]
pub fn matches(issue: &Issue, filter: &IssueFilter) -> bool {
    matches_filter(issue, filter, search_needle(filter).as_deref())
}

/// The search text as given, lowercased. Only an empty string is no constraint.
fn search_needle(filter: &IssueFilter) -> Option<String> {
    filter
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn matches_filter(issue: &Issue, filter: &IssueFilter, needle: Option<&str>) -> bool {
    if filter.status.is_some_and(|s| s != issue.status) {
        return false;
    }
    if filter.category.is_some_and(|c| c != issue.category) {
        return false;
    }
    if filter.priority.is_some_and(|p| p != issue.priority) {
        return false;
    }
    if let Some(ref assignee) = filter.assignee {
        if !matches_assignee(issue, assignee) {
            return false;
        }
    }
    if let Some(needle) = needle {
        if !matches_search(issue, needle) {
            return false;
        }
    }
    true
}

fn matches_assignee(issue: &Issue, assignee: &AssigneeFilter) -> bool {
    match assignee {
        AssigneeFilter::Unassigned => issue.assigned_to.is_none(),
        AssigneeFilter::Name(name) => issue
            .assignee_name()
            .is_some_and(|n| n.to_lowercase().contains(&name.to_lowercase())),
    }
}

/// `needle` must already be lowercase.
fn matches_search(issue: &Issue, needle: &str) -> bool {
    issue.title.to_lowercase().contains(needle)
        || issue.description.to_lowercase().contains(needle)
        || issue.location.address.to_lowercase().contains(needle)
}

/// Sort in place. Stable, so equal keys keep their input order.
pub fn sort_issues(issues: &mut [&Issue], order: SortOrder) {
    match order {
        SortOrder::Newest => issues.sort_by_key(|i| Reverse(i.created_at)),
        SortOrder::Updated => issues.sort_by_key(|i| Reverse(i.updated_at)),
        SortOrder::Priority => {
            issues.sort_by(|a, b| {
                b.priority
                    .cmp(&a.priority)
                    .then(b.created_at.cmp(&a.created_at))
            });
        }
    }
}

/// High or critical issues that are not closed yet.
pub fn urgent_issues<'a, I>(issues: I) -> Vec<&'a Issue>
where
    I: IntoIterator<Item = &'a Issue>,
{
    issues
        .into_iter()
        .filter(|i| i.priority.is_urgent() && i.status != Status::Closed)
        .collect()
}

/// Distinct assignee names in first-seen order.
pub fn assignee_names<'a, I>(issues: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Issue>,
{
    let mut seen = HashSet::new();
    issues
        .into_iter()
        .filter_map(Issue::assignee_name)
        .filter(|name| seen.insert(*name))
        .collect()
}
